//! Integration specifications for the report composition engine, driven
//! entirely through the public crate API with an injected in-memory store.

mod common {
    use chrono::{DateTime, TimeZone, Utc};

    use talent_reports::reports::{
        AssignedFeedback, Assignment, AssignmentId, Assessment, AssessmentId, Benchmark,
        Dimension, DimensionId, DimensionScore, FeedbackKind, Group, GroupId, GroupMember,
        InMemoryReportStore, Profile, ProfileId, TextAnswer,
    };

    pub(super) fn batch_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 6, 9, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    pub(super) fn profile(id: &str, first: &str, last: &str) -> Profile {
        Profile {
            id: ProfileId(id.to_string()),
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: format!("{}@example.com", first.to_lowercase()),
        }
    }

    fn dimension(id: &str, assessment: &str, name: &str, parent: Option<&str>) -> Dimension {
        Dimension {
            id: DimensionId(id.to_string()),
            assessment_id: AssessmentId(assessment.to_string()),
            name: name.to_string(),
            code: name.to_uppercase(),
            parent_id: parent.map(|parent| DimensionId(parent.to_string())),
        }
    }

    fn completed(id: &str, assessment: &str, user: &str, target: Option<&str>) -> Assignment {
        Assignment {
            id: AssignmentId(id.to_string()),
            assessment_id: AssessmentId(assessment.to_string()),
            user_id: ProfileId(user.to_string()),
            target_id: target.map(|target| ProfileId(target.to_string())),
            completed: true,
            created_at: batch_time(),
        }
    }

    fn score(assignment: &str, dimension: &str, avg: f64) -> DimensionScore {
        DimensionScore {
            assignment_id: AssignmentId(assignment.to_string()),
            dimension_id: DimensionId(dimension.to_string()),
            avg_score: avg,
            answer_count: 5,
        }
    }

    /// A Leader assessment with a subdimension, a peer group, a two-person
    /// batch, benchmarks, and assigned feedback.
    pub(super) fn leader_fixture() -> (InMemoryReportStore, AssignmentId) {
        let store = InMemoryReportStore::default();
        store.insert_profile(profile("p-ana", "Ana", "Silva"));
        store.insert_profile(profile("p-ben", "Ben", "Moreau"));
        store.insert_group(
            Group {
                id: GroupId("g-cohort".to_string()),
                name: "Spring Cohort".to_string(),
                target_id: None,
            },
            vec![
                GroupMember {
                    profile_id: ProfileId("p-ana".to_string()),
                    role: None,
                },
                GroupMember {
                    profile_id: ProfileId("p-ben".to_string()),
                    role: None,
                },
            ],
        );
        store.insert_assessment(Assessment {
            id: AssessmentId("a-compass".to_string()),
            title: "Leadership Compass".to_string(),
            is_360: false,
        });
        store.insert_dimension(dimension("d-comm", "a-compass", "Communication", None));
        store.insert_dimension(dimension("d-lead", "a-compass", "Leadership", None));
        store.insert_dimension(dimension("d-listen", "a-compass", "Listening", Some("d-comm")));
        store.insert_benchmark(Benchmark {
            dimension_id: DimensionId("d-comm".to_string()),
            value: 3.0,
        });
        store.insert_benchmark(Benchmark {
            dimension_id: DimensionId("d-lead".to_string()),
            value: 3.0,
        });

        store.insert_assignment(completed("asg-ana", "a-compass", "p-ana", None));
        store.insert_assignment(completed("asg-ben", "a-compass", "p-ben", None));
        store.insert_score(score("asg-ana", "d-comm", 2.0));
        store.insert_score(score("asg-ana", "d-lead", 4.0));
        store.insert_score(score("asg-ana", "d-listen", 2.4));
        store.insert_score(score("asg-ben", "d-comm", 4.0));
        store.insert_score(score("asg-ben", "d-lead", 4.0));

        store.insert_feedback(
            AssignmentId("asg-ana".to_string()),
            AssignedFeedback {
                dimension_id: Some(DimensionId("d-comm".to_string())),
                kind: FeedbackKind::Overall,
                content: "Strong writer, quieter in the room.".to_string(),
            },
        );

        (store, AssignmentId("asg-ana".to_string()))
    }

    /// A 360 assessment around one target with three raters in distinct roles.
    pub(super) fn three_sixty_fixture() -> (InMemoryReportStore, AssignmentId) {
        let store = InMemoryReportStore::default();
        store.insert_profile(profile("p-dana", "Dana", "Okafor"));
        store.insert_profile(profile("p-ana", "Ana", "Silva"));
        store.insert_profile(profile("p-ben", "Ben", "Moreau"));
        store.insert_group(
            Group {
                id: GroupId("g-circle".to_string()),
                name: "Dana Review Circle".to_string(),
                target_id: Some(ProfileId("p-dana".to_string())),
            },
            vec![
                GroupMember {
                    profile_id: ProfileId("p-ana".to_string()),
                    role: Some("Colleague".to_string()),
                },
                GroupMember {
                    profile_id: ProfileId("p-ben".to_string()),
                    role: Some("boss".to_string()),
                },
                GroupMember {
                    profile_id: ProfileId("p-dana".to_string()),
                    role: Some("self".to_string()),
                },
            ],
        );
        store.insert_assessment(Assessment {
            id: AssessmentId("a-360".to_string()),
            title: "Leadership 360".to_string(),
            is_360: true,
        });
        store.insert_dimension(dimension("d-comm", "a-360", "Communication", None));

        store.insert_assignment(completed("asg-ana", "a-360", "p-ana", Some("p-dana")));
        store.insert_assignment(completed("asg-ben", "a-360", "p-ben", Some("p-dana")));
        store.insert_assignment(completed("asg-dana", "a-360", "p-dana", Some("p-dana")));
        store.insert_score(score("asg-ana", "d-comm", 2.0));
        store.insert_score(score("asg-ben", "d-comm", 4.0));
        store.insert_score(score("asg-dana", "d-comm", 3.3));

        store.insert_text_answer(TextAnswer {
            assignment_id: AssignmentId("asg-ana".to_string()),
            value: "Direct and fair.".to_string(),
            dimension_id: Some(DimensionId("d-comm".to_string())),
        });

        (store, AssignmentId("asg-ana".to_string()))
    }
}

use std::sync::Arc;

use common::{leader_fixture, three_sixty_fixture};
use talent_reports::reports::{ReportBody, ReportComposer, ReportVariant};

#[test]
fn leader_report_composes_end_to_end() {
    let (store, assignment_id) = leader_fixture();
    let composer = ReportComposer::new(Arc::new(store));

    let report = composer.compose(&assignment_id).expect("report composes");

    assert_eq!(report.subject.first_name, "Ana");
    assert_eq!(report.assessment_title, "Leadership Compass");
    assert_eq!(
        report.group.as_ref().map(|group| group.name.as_str()),
        Some("Spring Cohort")
    );
    // Overall: (2.0 + 4.0) / 2; the 2.4 subdimension score stays out.
    assert_eq!(report.overall_score, Some(3.0));

    let ReportBody::SingleRater { variant, dimensions } = &report.body else {
        panic!("expected single-rater body");
    };
    assert_eq!(*variant, ReportVariant::Leader);
    assert_eq!(dimensions.len(), 2);

    let comm = &dimensions[0];
    assert_eq!(comm.dimension.name, "Communication");
    assert_eq!(comm.benchmark, Some(3.0));
    // Peer norm across Ana and Ben: (2.0 + 4.0) / 2.
    let norm = comm.peer_norm.expect("norm present");
    assert!((norm.average - 3.0).abs() < f64::EPSILON);
    assert_eq!(norm.participants, 2);
    // Both assignments share one creation timestamp, so the batch average
    // matches the norm here.
    assert_eq!(comm.group_score, Some(3.0));
    assert!(comm.improvement_needed);
    assert_eq!(
        comm.overall_feedback.as_deref(),
        Some("Strong writer, quieter in the room.")
    );
    assert_eq!(comm.subdimensions.len(), 1);
    assert_eq!(comm.subdimensions[0].score, 2.4);

    let lead = &dimensions[1];
    assert!(!lead.improvement_needed);
    assert!(lead.subdimensions.is_empty());
}

#[test]
fn three_sixty_report_composes_end_to_end() {
    let (store, assignment_id) = three_sixty_fixture();
    let composer = ReportComposer::new(Arc::new(store));

    let report = composer.compose(&assignment_id).expect("report composes");

    assert_eq!(report.subject.first_name, "Dana");
    let ReportBody::MultiRater { dimensions, .. } = &report.body else {
        panic!("expected multi-rater body");
    };
    assert_eq!(dimensions.len(), 1);

    let comm = &dimensions[0];
    assert!((comm.overall_score - 3.1).abs() < 1e-9);
    assert_eq!(comm.rater_breakdown.peer, Some(2.0));
    assert_eq!(comm.rater_breakdown.supervisor, Some(4.0));
    assert_eq!(comm.rater_breakdown.self_rating, Some(3.3));
    assert_eq!(comm.rater_breakdown.direct_report, None);
    assert_eq!(comm.comments, vec!["Direct and fair.".to_string()]);

    // Peer norm covers every completed group-member submission of this
    // assessment, raters included.
    let norm = comm.peer_norm.expect("norm present");
    assert_eq!(norm.participants, 3);
}

#[test]
fn reports_serialize_to_stable_json_shapes() {
    let (store, assignment_id) = leader_fixture();
    let report = ReportComposer::new(Arc::new(store))
        .compose(&assignment_id)
        .expect("report composes");

    let json = serde_json::to_value(&report).expect("report serializes");
    assert_eq!(json["kind"], "single_rater");
    assert_eq!(json["variant"], "leader");
    assert_eq!(json["subject"]["last_name"], "Silva");
    assert_eq!(json["dimensions"][0]["subdimensions"][0]["score"], 2.4);
    // Absent optionals are omitted rather than serialized as null.
    assert!(json["dimensions"][1]
        .as_object()
        .expect("entry object")
        .get("specific_feedback")
        .is_none());
}

#[test]
fn composition_is_a_pure_function_of_store_state() {
    let (store, assignment_id) = three_sixty_fixture();
    let composer = ReportComposer::new(Arc::new(store));

    let first = composer.compose(&assignment_id).expect("first compose");
    let second = composer.compose(&assignment_id).expect("second compose");

    assert_eq!(first, second);
}
