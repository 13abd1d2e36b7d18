use std::sync::Arc;

use super::composed::ComposedReport;
use super::domain::{Assignment, AssignmentId, Assessment};
use super::store::{ReportStore, StoreError};
use super::{multi_rater, single_rater};

/// Facade dispatching report composition on the assessment's 360 flag. Holds
/// its data-access dependency explicitly so callers and tests decide which
/// store backs it.
pub struct ReportComposer<S> {
    store: Arc<S>,
}

impl<S> ReportComposer<S>
where
    S: ReportStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Composes the right report shape for the assignment: 360 assessments go
    /// through the multi-rater path, everything else through Leader/Blocker.
    pub fn compose(&self, assignment_id: &AssignmentId) -> Result<ComposedReport, ComposeError> {
        let (assignment, assessment) = self.load(assignment_id)?;
        if assessment.is_360 {
            multi_rater::compose(self.store.as_ref(), &assignment, &assessment)
        } else {
            single_rater::compose(self.store.as_ref(), &assignment, &assessment)
        }
    }

    /// Composes a Leader/Blocker report, rejecting 360 assessments.
    pub fn compose_single_rater(
        &self,
        assignment_id: &AssignmentId,
    ) -> Result<ComposedReport, ComposeError> {
        let (assignment, assessment) = self.load(assignment_id)?;
        single_rater::compose(self.store.as_ref(), &assignment, &assessment)
    }

    /// Composes a 360 report, rejecting single-rater assessments.
    pub fn compose_360(
        &self,
        assignment_id: &AssignmentId,
    ) -> Result<ComposedReport, ComposeError> {
        let (assignment, assessment) = self.load(assignment_id)?;
        multi_rater::compose(self.store.as_ref(), &assignment, &assessment)
    }

    fn load(
        &self,
        assignment_id: &AssignmentId,
    ) -> Result<(Assignment, Assessment), ComposeError> {
        let assignment = self
            .store
            .find_assignment(assignment_id)?
            .ok_or_else(|| ComposeError::NotFound(format!("assignment '{}'", assignment_id.0)))?;
        let assessment = self
            .store
            .find_assessment(&assignment.assessment_id)?
            .ok_or_else(|| {
                ComposeError::NotFound(format!("assessment '{}'", assignment.assessment_id.0))
            })?;
        Ok((assignment, assessment))
    }
}

/// Error raised while composing a report. Never retried internally; the API
/// layer owns retry and translation policy.
#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("invalid assessment configuration: {0}")]
    InvalidAssessment(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}
