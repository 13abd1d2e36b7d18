use chrono::{DateTime, Utc};

use super::domain::{
    AssignedFeedback, Assignment, AssignmentId, Assessment, AssessmentId, Benchmark, Dimension,
    DimensionId, DimensionScore, Group, GroupId, GroupMember, Profile, ProfileId, TextAnswer,
};

/// Filter for completed-assignment lookups. Unset fields match everything;
/// `created_at` matches the exact timestamp so batch queries can find
/// assignments created in one bulk-assign operation.
#[derive(Debug, Clone, Default)]
pub struct AssignmentFilter {
    pub profile_ids: Option<Vec<ProfileId>>,
    pub assessment_id: Option<AssessmentId>,
    pub target_id: Option<ProfileId>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Read-only data-access abstraction over the hosted store. The composers take
/// this as an injected dependency so tests can substitute in-memory fakes; no
/// method mutates anything.
pub trait ReportStore: Send + Sync {
    fn find_assignment(&self, id: &AssignmentId) -> Result<Option<Assignment>, StoreError>;

    fn find_assessment(&self, id: &AssessmentId) -> Result<Option<Assessment>, StoreError>;

    fn find_profile(&self, id: &ProfileId) -> Result<Option<Profile>, StoreError>;

    fn find_group_members(&self, group_id: &GroupId) -> Result<Vec<GroupMember>, StoreError>;

    /// Groups the profile belongs to, in store order. Callers that need one
    /// group take the first; the ordering is implementation-defined.
    fn find_groups_for_profile(&self, profile_id: &ProfileId) -> Result<Vec<Group>, StoreError>;

    /// The group whose designated 360 target is the given profile.
    fn find_group_by_target(&self, target_id: &ProfileId) -> Result<Option<Group>, StoreError>;

    fn find_completed_assignments(
        &self,
        filter: &AssignmentFilter,
    ) -> Result<Vec<Assignment>, StoreError>;

    /// Every dimension configured for the assessment, top-level and children.
    fn find_dimensions(&self, assessment_id: &AssessmentId) -> Result<Vec<Dimension>, StoreError>;

    fn find_dimension_scores(
        &self,
        assignment_ids: &[AssignmentId],
        dimension_ids: &[DimensionId],
    ) -> Result<Vec<DimensionScore>, StoreError>;

    fn find_benchmarks(&self, dimension_ids: &[DimensionId])
        -> Result<Vec<Benchmark>, StoreError>;

    fn find_assigned_feedback(
        &self,
        assignment_id: &AssignmentId,
    ) -> Result<Vec<AssignedFeedback>, StoreError>;

    fn find_text_answers(
        &self,
        assignment_ids: &[AssignmentId],
    ) -> Result<Vec<TextAnswer>, StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("data store unavailable: {0}")]
    Unavailable(String),
}
