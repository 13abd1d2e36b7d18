use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::domain::{
    AssignedFeedback, Assignment, AssignmentId, Assessment, AssessmentId, Benchmark, Dimension,
    DimensionId, DimensionScore, Group, GroupId, GroupMember, Profile, ProfileId, TextAnswer,
};
use super::store::{AssignmentFilter, ReportStore, StoreError};

/// In-memory implementation of [`ReportStore`] backing the demo server and the
/// test suites. Rows are returned in insertion order, so "first match" reads
/// are deterministic per seeded dataset.
#[derive(Default, Clone)]
pub struct InMemoryReportStore {
    inner: Arc<Mutex<Tables>>,
}

#[derive(Default)]
struct Tables {
    assignments: Vec<Assignment>,
    assessments: Vec<Assessment>,
    profiles: Vec<Profile>,
    groups: Vec<Group>,
    memberships: HashMap<GroupId, Vec<GroupMember>>,
    dimensions: Vec<Dimension>,
    scores: Vec<DimensionScore>,
    benchmarks: Vec<Benchmark>,
    feedback: HashMap<AssignmentId, Vec<AssignedFeedback>>,
    text_answers: Vec<TextAnswer>,
}

impl InMemoryReportStore {
    pub fn insert_assignment(&self, assignment: Assignment) {
        self.lock().assignments.push(assignment);
    }

    pub fn insert_assessment(&self, assessment: Assessment) {
        self.lock().assessments.push(assessment);
    }

    pub fn insert_profile(&self, profile: Profile) {
        self.lock().profiles.push(profile);
    }

    pub fn insert_group(&self, group: Group, members: Vec<GroupMember>) {
        let mut tables = self.lock();
        tables.memberships.insert(group.id.clone(), members);
        tables.groups.push(group);
    }

    pub fn insert_dimension(&self, dimension: Dimension) {
        self.lock().dimensions.push(dimension);
    }

    pub fn insert_score(&self, score: DimensionScore) {
        self.lock().scores.push(score);
    }

    pub fn insert_benchmark(&self, benchmark: Benchmark) {
        self.lock().benchmarks.push(benchmark);
    }

    pub fn insert_feedback(&self, assignment_id: AssignmentId, entry: AssignedFeedback) {
        self.lock()
            .feedback
            .entry(assignment_id)
            .or_default()
            .push(entry);
    }

    pub fn insert_text_answer(&self, answer: TextAnswer) {
        self.lock().text_answers.push(answer);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.inner.lock().expect("report store mutex poisoned")
    }
}

impl ReportStore for InMemoryReportStore {
    fn find_assignment(&self, id: &AssignmentId) -> Result<Option<Assignment>, StoreError> {
        Ok(self
            .lock()
            .assignments
            .iter()
            .find(|assignment| &assignment.id == id)
            .cloned())
    }

    fn find_assessment(&self, id: &AssessmentId) -> Result<Option<Assessment>, StoreError> {
        Ok(self
            .lock()
            .assessments
            .iter()
            .find(|assessment| &assessment.id == id)
            .cloned())
    }

    fn find_profile(&self, id: &ProfileId) -> Result<Option<Profile>, StoreError> {
        Ok(self
            .lock()
            .profiles
            .iter()
            .find(|profile| &profile.id == id)
            .cloned())
    }

    fn find_group_members(&self, group_id: &GroupId) -> Result<Vec<GroupMember>, StoreError> {
        Ok(self
            .lock()
            .memberships
            .get(group_id)
            .cloned()
            .unwrap_or_default())
    }

    fn find_groups_for_profile(&self, profile_id: &ProfileId) -> Result<Vec<Group>, StoreError> {
        let tables = self.lock();
        Ok(tables
            .groups
            .iter()
            .filter(|group| {
                tables
                    .memberships
                    .get(&group.id)
                    .map(|members| members.iter().any(|member| &member.profile_id == profile_id))
                    .unwrap_or(false)
            })
            .cloned()
            .collect())
    }

    fn find_group_by_target(&self, target_id: &ProfileId) -> Result<Option<Group>, StoreError> {
        Ok(self
            .lock()
            .groups
            .iter()
            .find(|group| group.target_id.as_ref() == Some(target_id))
            .cloned())
    }

    fn find_completed_assignments(
        &self,
        filter: &AssignmentFilter,
    ) -> Result<Vec<Assignment>, StoreError> {
        Ok(self
            .lock()
            .assignments
            .iter()
            .filter(|assignment| assignment.completed)
            .filter(|assignment| match &filter.profile_ids {
                Some(ids) => ids.contains(&assignment.user_id),
                None => true,
            })
            .filter(|assignment| match &filter.assessment_id {
                Some(id) => &assignment.assessment_id == id,
                None => true,
            })
            .filter(|assignment| match &filter.target_id {
                Some(id) => assignment.target_id.as_ref() == Some(id),
                None => true,
            })
            .filter(|assignment| match &filter.created_at {
                Some(at) => &assignment.created_at == at,
                None => true,
            })
            .cloned()
            .collect())
    }

    fn find_dimensions(&self, assessment_id: &AssessmentId) -> Result<Vec<Dimension>, StoreError> {
        Ok(self
            .lock()
            .dimensions
            .iter()
            .filter(|dimension| &dimension.assessment_id == assessment_id)
            .cloned()
            .collect())
    }

    fn find_dimension_scores(
        &self,
        assignment_ids: &[AssignmentId],
        dimension_ids: &[DimensionId],
    ) -> Result<Vec<DimensionScore>, StoreError> {
        Ok(self
            .lock()
            .scores
            .iter()
            .filter(|score| {
                assignment_ids.contains(&score.assignment_id)
                    && dimension_ids.contains(&score.dimension_id)
            })
            .cloned()
            .collect())
    }

    fn find_benchmarks(
        &self,
        dimension_ids: &[DimensionId],
    ) -> Result<Vec<Benchmark>, StoreError> {
        Ok(self
            .lock()
            .benchmarks
            .iter()
            .filter(|benchmark| dimension_ids.contains(&benchmark.dimension_id))
            .cloned()
            .collect())
    }

    fn find_assigned_feedback(
        &self,
        assignment_id: &AssignmentId,
    ) -> Result<Vec<AssignedFeedback>, StoreError> {
        Ok(self
            .lock()
            .feedback
            .get(assignment_id)
            .cloned()
            .unwrap_or_default())
    }

    fn find_text_answers(
        &self,
        assignment_ids: &[AssignmentId],
    ) -> Result<Vec<TextAnswer>, StoreError> {
        Ok(self
            .lock()
            .text_answers
            .iter()
            .filter(|answer| assignment_ids.contains(&answer.assignment_id))
            .cloned()
            .collect())
    }
}
