use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, TimeZone, Utc};

use crate::reports::domain::{
    AssignedFeedback, Assignment, AssignmentId, Assessment, AssessmentId, Benchmark, Dimension,
    DimensionId, DimensionScore, Group, GroupId, GroupMember, Profile, ProfileId,
};
use crate::reports::memory::InMemoryReportStore;
use crate::reports::store::{AssignmentFilter, ReportStore, StoreError};

pub(super) fn batch_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 8, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn other_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 20, 10, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn profile(id: &str, first: &str) -> Profile {
    Profile {
        id: ProfileId(id.to_string()),
        first_name: first.to_string(),
        last_name: "Tester".to_string(),
        email: format!("{}@example.com", first.to_lowercase()),
    }
}

pub(super) fn assessment(id: &str, title: &str, is_360: bool) -> Assessment {
    Assessment {
        id: AssessmentId(id.to_string()),
        title: title.to_string(),
        is_360,
    }
}

pub(super) fn dimension(id: &str, assessment: &str, name: &str, parent: Option<&str>) -> Dimension {
    Dimension {
        id: DimensionId(id.to_string()),
        assessment_id: AssessmentId(assessment.to_string()),
        name: name.to_string(),
        code: name.to_uppercase().replace(' ', "_"),
        parent_id: parent.map(|parent| DimensionId(parent.to_string())),
    }
}

pub(super) fn assignment(
    id: &str,
    assessment: &str,
    user: &str,
    target: Option<&str>,
    created_at: DateTime<Utc>,
) -> Assignment {
    Assignment {
        id: AssignmentId(id.to_string()),
        assessment_id: AssessmentId(assessment.to_string()),
        user_id: ProfileId(user.to_string()),
        target_id: target.map(|target| ProfileId(target.to_string())),
        completed: true,
        created_at,
    }
}

pub(super) fn score(assignment: &str, dimension: &str, avg: f64) -> DimensionScore {
    DimensionScore {
        assignment_id: AssignmentId(assignment.to_string()),
        dimension_id: DimensionId(dimension.to_string()),
        avg_score: avg,
        answer_count: 4,
    }
}

pub(super) fn benchmark(dimension: &str, value: f64) -> Benchmark {
    Benchmark {
        dimension_id: DimensionId(dimension.to_string()),
        value,
    }
}

pub(super) fn member(profile: &str, role: Option<&str>) -> GroupMember {
    GroupMember {
        profile_id: ProfileId(profile.to_string()),
        role: role.map(str::to_string),
    }
}

pub(super) fn group(id: &str, name: &str, target: Option<&str>) -> Group {
    Group {
        id: GroupId(id.to_string()),
        name: name.to_string(),
        target_id: target.map(|target| ProfileId(target.to_string())),
    }
}

/// Baseline Leader scenario: two scored top-level dimensions, benchmarks at
/// 3.0, no peer group.
pub(super) fn leader_store() -> (InMemoryReportStore, AssignmentId) {
    let store = InMemoryReportStore::default();
    store.insert_profile(profile("p-sam", "Sam"));
    store.insert_assessment(assessment("a-leader", "Leadership Assessment", false));
    store.insert_dimension(dimension("d-comm", "a-leader", "Communication", None));
    store.insert_dimension(dimension("d-lead", "a-leader", "Leadership", None));
    store.insert_benchmark(benchmark("d-comm", 3.0));
    store.insert_benchmark(benchmark("d-lead", 3.0));

    let own = assignment("asg-1", "a-leader", "p-sam", None, batch_time());
    let own_id = own.id.clone();
    store.insert_assignment(own);
    store.insert_score(score("asg-1", "d-comm", 2.0));
    store.insert_score(score("asg-1", "d-lead", 4.0));

    (store, own_id)
}

/// Store wrapper counting completed-assignment queries so tests can prove the
/// peer-norm short-circuit never reaches the assignment table.
#[derive(Default)]
pub(super) struct CountingStore {
    pub(super) inner: InMemoryReportStore,
    pub(super) assignment_queries: AtomicUsize,
}

impl CountingStore {
    pub(super) fn assignment_query_count(&self) -> usize {
        self.assignment_queries.load(Ordering::Relaxed)
    }
}

impl ReportStore for CountingStore {
    fn find_assignment(
        &self,
        id: &AssignmentId,
    ) -> Result<Option<Assignment>, StoreError> {
        self.inner.find_assignment(id)
    }

    fn find_assessment(
        &self,
        id: &AssessmentId,
    ) -> Result<Option<Assessment>, StoreError> {
        self.inner.find_assessment(id)
    }

    fn find_profile(&self, id: &ProfileId) -> Result<Option<Profile>, StoreError> {
        self.inner.find_profile(id)
    }

    fn find_group_members(&self, group_id: &GroupId) -> Result<Vec<GroupMember>, StoreError> {
        self.inner.find_group_members(group_id)
    }

    fn find_groups_for_profile(&self, profile_id: &ProfileId) -> Result<Vec<Group>, StoreError> {
        self.inner.find_groups_for_profile(profile_id)
    }

    fn find_group_by_target(&self, target_id: &ProfileId) -> Result<Option<Group>, StoreError> {
        self.inner.find_group_by_target(target_id)
    }

    fn find_completed_assignments(
        &self,
        filter: &AssignmentFilter,
    ) -> Result<Vec<Assignment>, StoreError> {
        self.assignment_queries.fetch_add(1, Ordering::Relaxed);
        self.inner.find_completed_assignments(filter)
    }

    fn find_dimensions(&self, assessment_id: &AssessmentId) -> Result<Vec<Dimension>, StoreError> {
        self.inner.find_dimensions(assessment_id)
    }

    fn find_dimension_scores(
        &self,
        assignment_ids: &[AssignmentId],
        dimension_ids: &[DimensionId],
    ) -> Result<Vec<DimensionScore>, StoreError> {
        self.inner.find_dimension_scores(assignment_ids, dimension_ids)
    }

    fn find_benchmarks(
        &self,
        dimension_ids: &[DimensionId],
    ) -> Result<Vec<Benchmark>, StoreError> {
        self.inner.find_benchmarks(dimension_ids)
    }

    fn find_assigned_feedback(
        &self,
        assignment_id: &AssignmentId,
    ) -> Result<Vec<AssignedFeedback>, StoreError> {
        self.inner.find_assigned_feedback(assignment_id)
    }

    fn find_text_answers(
        &self,
        assignment_ids: &[AssignmentId],
    ) -> Result<Vec<crate::reports::domain::TextAnswer>, StoreError> {
        self.inner.find_text_answers(assignment_ids)
    }
}
