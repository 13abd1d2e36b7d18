use std::collections::BTreeMap;

use serde::Serialize;

use super::domain::{AssessmentId, DimensionId, GroupId};
use super::store::{AssignmentFilter, ReportStore, StoreError};

/// Peer-group norm ("GEOnorm") for one dimension: the average score across the
/// group's completed assignments plus the number of contributing score rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeerNorm {
    pub average: f64,
    pub participants: usize,
}

/// Computes peer norms for the requested dimensions on demand.
///
/// Degenerate inputs never error: an unknown or empty group, no completed
/// assignments, or no contributing scores all collapse to an empty (or
/// partial) map. A dimension with zero contributing rows is absent from the
/// result — callers must read absence as "no norm available," which is not
/// the same as a norm of zero. Results are not cached; repeat calls reflect
/// whatever assignments have completed since.
pub fn peer_norms(
    store: &dyn ReportStore,
    group_id: &GroupId,
    assessment_id: &AssessmentId,
    dimension_ids: &[DimensionId],
) -> Result<BTreeMap<DimensionId, PeerNorm>, StoreError> {
    if dimension_ids.is_empty() {
        return Ok(BTreeMap::new());
    }

    let members = store.find_group_members(group_id)?;
    if members.is_empty() {
        return Ok(BTreeMap::new());
    }

    let profile_ids = members.into_iter().map(|member| member.profile_id).collect();
    let assignments = store.find_completed_assignments(&AssignmentFilter {
        profile_ids: Some(profile_ids),
        assessment_id: Some(assessment_id.clone()),
        ..AssignmentFilter::default()
    })?;
    if assignments.is_empty() {
        return Ok(BTreeMap::new());
    }

    let assignment_ids: Vec<_> = assignments
        .into_iter()
        .map(|assignment| assignment.id)
        .collect();
    let scores = store.find_dimension_scores(&assignment_ids, dimension_ids)?;

    let mut sums: BTreeMap<DimensionId, (f64, usize)> = BTreeMap::new();
    for score in scores {
        let entry = sums.entry(score.dimension_id).or_insert((0.0, 0));
        entry.0 += score.avg_score;
        entry.1 += 1;
    }

    let norms = sums
        .into_iter()
        .map(|(dimension_id, (sum, count))| {
            (
                dimension_id,
                PeerNorm {
                    average: sum / count as f64,
                    participants: count,
                },
            )
        })
        .collect();

    Ok(norms)
}
