use super::common::*;
use crate::reports::domain::{AssessmentId, DimensionId, GroupId};
use crate::reports::memory::InMemoryReportStore;
use crate::reports::norms::peer_norms;

fn dim_id(id: &str) -> DimensionId {
    DimensionId(id.to_string())
}

#[test]
fn empty_dimension_list_short_circuits_before_assignment_query() {
    let store = CountingStore::default();
    store.inner.insert_group(
        group("g-1", "Peers", None),
        vec![member("p-sam", Some("peer"))],
    );

    let norms = peer_norms(
        &store,
        &GroupId("g-1".to_string()),
        &AssessmentId("a-leader".to_string()),
        &[],
    )
    .expect("norms compute");

    assert!(norms.is_empty());
    assert_eq!(store.assignment_query_count(), 0);
}

#[test]
fn unknown_group_yields_empty_mapping() {
    let store = InMemoryReportStore::default();

    let norms = peer_norms(
        &store,
        &GroupId("g-missing".to_string()),
        &AssessmentId("a-leader".to_string()),
        &[dim_id("d-comm")],
    )
    .expect("norms compute");

    assert!(norms.is_empty());
}

#[test]
fn group_without_completed_assignments_yields_empty_mapping() {
    let store = InMemoryReportStore::default();
    store.insert_group(
        group("g-1", "Peers", None),
        vec![member("p-sam", Some("peer"))],
    );

    let norms = peer_norms(
        &store,
        &GroupId("g-1".to_string()),
        &AssessmentId("a-leader".to_string()),
        &[dim_id("d-comm")],
    )
    .expect("norms compute");

    assert!(norms.is_empty());
}

#[test]
fn averages_scores_across_group_members() {
    let store = InMemoryReportStore::default();
    store.insert_group(
        group("g-1", "Peers", None),
        vec![member("p-a", Some("peer")), member("p-b", Some("peer"))],
    );
    store.insert_assignment(assignment("asg-a", "a-leader", "p-a", None, batch_time()));
    store.insert_assignment(assignment("asg-b", "a-leader", "p-b", None, other_time()));
    store.insert_score(score("asg-a", "d-comm", 2.0));
    store.insert_score(score("asg-b", "d-comm", 4.0));
    store.insert_score(score("asg-a", "d-lead", 3.5));

    let norms = peer_norms(
        &store,
        &GroupId("g-1".to_string()),
        &AssessmentId("a-leader".to_string()),
        &[dim_id("d-comm"), dim_id("d-lead"), dim_id("d-unscored")],
    )
    .expect("norms compute");

    let comm = norms.get(&dim_id("d-comm")).expect("communication norm");
    assert!((comm.average - 3.0).abs() < f64::EPSILON);
    assert_eq!(comm.participants, 2);

    let lead = norms.get(&dim_id("d-lead")).expect("leadership norm");
    assert!((lead.average - 3.5).abs() < f64::EPSILON);
    assert_eq!(lead.participants, 1);

    // A dimension without contributing scores is absent, never present with
    // zero participants.
    assert!(!norms.contains_key(&dim_id("d-unscored")));
    assert!(norms.values().all(|norm| norm.participants > 0));
}

#[test]
fn incomplete_assignments_do_not_contribute() {
    let store = InMemoryReportStore::default();
    store.insert_group(
        group("g-1", "Peers", None),
        vec![member("p-a", Some("peer"))],
    );
    let mut pending = assignment("asg-a", "a-leader", "p-a", None, batch_time());
    pending.completed = false;
    store.insert_assignment(pending);
    store.insert_score(score("asg-a", "d-comm", 2.0));

    let norms = peer_norms(
        &store,
        &GroupId("g-1".to_string()),
        &AssessmentId("a-leader".to_string()),
        &[dim_id("d-comm")],
    )
    .expect("norms compute");

    assert!(norms.is_empty());
}
