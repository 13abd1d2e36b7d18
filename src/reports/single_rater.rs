use std::collections::BTreeMap;

use tracing::debug;

use super::composed::{
    ComposedReport, DimensionInfo, GroupInfo, ReportBody, ReportVariant, SingleRaterEntry,
};
use super::domain::{
    AssignedFeedback, Assignment, Assessment, Dimension, DimensionId, FeedbackKind,
};
use super::norms::{peer_norms, PeerNorm};
use super::service::ComposeError;
use super::store::{AssignmentFilter, ReportStore};

/// Tolerance band applied to the batch group-score comparison: a Leader score
/// only flags against the group when it trails by more than this margin.
const GROUP_SCORE_MARGIN: f64 = 0.49;

/// Builds a Leader or Blocker report for one completed assignment.
///
/// The variant is sniffed from the assessment title: any title containing
/// "blocker" (case-insensitive) is treated as a Blocker assessment. Known to
/// misfire on titles like "Blocker-Free Leadership"; kept for compatibility
/// with existing assessment data.
pub(crate) fn compose(
    store: &dyn ReportStore,
    assignment: &Assignment,
    assessment: &Assessment,
) -> Result<ComposedReport, ComposeError> {
    if assessment.is_360 {
        return Err(ComposeError::InvalidAssessment(format!(
            "assessment '{}' is a 360 assessment and must be composed per rating target",
            assessment.title
        )));
    }

    let subject = store
        .find_profile(&assignment.user_id)?
        .ok_or_else(|| ComposeError::NotFound(format!("profile '{}'", assignment.user_id.0)))?;

    let variant = if assessment.title.to_lowercase().contains("blocker") {
        ReportVariant::Blocker
    } else {
        ReportVariant::Leader
    };

    // A user may belong to several groups; the first membership found wins.
    // Store ordering is implementation-defined, not a semantic guarantee.
    let group = store
        .find_groups_for_profile(&assignment.user_id)?
        .into_iter()
        .next();

    let dimensions = store.find_dimensions(&assessment.id)?;
    if dimensions.is_empty() {
        return Err(ComposeError::InvalidAssessment(format!(
            "assessment '{}' has no dimensions configured",
            assessment.title
        )));
    }

    let (roots, children): (Vec<Dimension>, Vec<Dimension>) = match variant {
        // Blocker assessments score a flat list; every dimension is a root.
        ReportVariant::Blocker => (dimensions, Vec::new()),
        ReportVariant::Leader => {
            let (roots, children) = dimensions
                .into_iter()
                .partition::<Vec<_>, _>(Dimension::is_top_level);
            if roots.is_empty() {
                return Err(ComposeError::InvalidAssessment(format!(
                    "assessment '{}' defines only subdimensions; at least one top-level dimension is required",
                    assessment.title
                )));
            }
            (roots, children)
        }
    };

    let relevant_ids: Vec<DimensionId> = roots
        .iter()
        .chain(children.iter())
        .map(|dimension| dimension.id.clone())
        .collect();

    let own_ids = [assignment.id.clone()];
    let scores: BTreeMap<DimensionId, f64> = store
        .find_dimension_scores(&own_ids, &relevant_ids)?
        .into_iter()
        .map(|score| (score.dimension_id, score.avg_score))
        .collect();

    let benchmarks: BTreeMap<DimensionId, f64> = store
        .find_benchmarks(&relevant_ids)?
        .into_iter()
        .map(|benchmark| (benchmark.dimension_id, benchmark.value))
        .collect();

    let norms = match &group {
        Some(group) => peer_norms(store, &group.id, &assessment.id, &relevant_ids)?,
        None => BTreeMap::new(),
    };

    let group_scores = batch_scores(store, assignment, &relevant_ids)?;
    let feedback = store.find_assigned_feedback(&assignment.id)?;

    let mut entries = Vec::new();
    for root in &roots {
        // No score row for a dimension means the assignment never answered
        // its questions; the dimension is skipped, not zero-filled.
        let Some(score) = scores.get(&root.id).copied() else {
            continue;
        };

        let mut entry = build_entry(
            root,
            score,
            variant,
            false,
            &benchmarks,
            &norms,
            &group_scores,
            &feedback,
        );

        if variant == ReportVariant::Leader {
            entry.subdimensions = children
                .iter()
                .filter(|child| child.parent_id.as_ref() == Some(&root.id))
                .filter_map(|child| {
                    scores.get(&child.id).copied().map(|score| {
                        build_entry(
                            child,
                            score,
                            variant,
                            true,
                            &benchmarks,
                            &norms,
                            &group_scores,
                            &feedback,
                        )
                    })
                })
                .collect();
        }

        entries.push(entry);
    }

    // Subdimension scores never contribute to the overall mean.
    let overall_score = mean(entries.iter().map(|entry| entry.score));

    debug!(
        assignment = %assignment.id.0,
        variant = ?variant,
        dimensions = entries.len(),
        "composed single-rater report"
    );

    Ok(ComposedReport {
        subject,
        assessment_title: assessment.title.clone(),
        group: group.as_ref().map(GroupInfo::from_group),
        overall_score,
        body: ReportBody::SingleRater {
            variant,
            dimensions: entries,
        },
    })
}

/// Averages dimension scores across the assignment's batch: every completed
/// assignment sharing the same assessment and the exact creation timestamp,
/// i.e. everything assigned in the same bulk operation.
fn batch_scores(
    store: &dyn ReportStore,
    assignment: &Assignment,
    dimension_ids: &[DimensionId],
) -> Result<BTreeMap<DimensionId, f64>, ComposeError> {
    let batch = store.find_completed_assignments(&AssignmentFilter {
        assessment_id: Some(assignment.assessment_id.clone()),
        created_at: Some(assignment.created_at),
        ..AssignmentFilter::default()
    })?;
    if batch.is_empty() {
        return Ok(BTreeMap::new());
    }

    let batch_ids: Vec<_> = batch.into_iter().map(|assignment| assignment.id).collect();
    let mut sums: BTreeMap<DimensionId, (f64, usize)> = BTreeMap::new();
    for score in store.find_dimension_scores(&batch_ids, dimension_ids)? {
        let entry = sums.entry(score.dimension_id).or_insert((0.0, 0));
        entry.0 += score.avg_score;
        entry.1 += 1;
    }

    Ok(sums
        .into_iter()
        .map(|(dimension_id, (sum, count))| (dimension_id, sum / count as f64))
        .collect())
}

#[allow(clippy::too_many_arguments)]
fn build_entry(
    dimension: &Dimension,
    score: f64,
    variant: ReportVariant,
    is_subdimension: bool,
    benchmarks: &BTreeMap<DimensionId, f64>,
    norms: &BTreeMap<DimensionId, PeerNorm>,
    group_scores: &BTreeMap<DimensionId, f64>,
    feedback: &[AssignedFeedback],
) -> SingleRaterEntry {
    let benchmark = benchmarks.get(&dimension.id).copied();
    let peer_norm = norms.get(&dimension.id).copied();
    let group_score = group_scores.get(&dimension.id).copied();

    let improvement_needed = improvement_needed(
        variant,
        is_subdimension,
        score,
        benchmark,
        peer_norm,
        group_score,
    );

    // Overall feedback is only attached at the top level; specific feedback
    // applies to every entry.
    let overall_feedback = if is_subdimension {
        None
    } else {
        pick_first(feedback, FeedbackKind::Overall, &dimension.id)
    };
    let specific_feedback = pick_first(feedback, FeedbackKind::Specific, &dimension.id);

    SingleRaterEntry {
        dimension: DimensionInfo::from_dimension(dimension),
        score,
        benchmark,
        peer_norm,
        group_score,
        improvement_needed,
        overall_feedback,
        specific_feedback,
        subdimensions: Vec::new(),
    }
}

/// Flag polarity depends on the variant: Blocker scores measure how much a
/// behavior blocks (higher is worse), Leader scores measure capability (lower
/// is worse). The group-score test only applies to top-level Leader entries.
fn improvement_needed(
    variant: ReportVariant,
    is_subdimension: bool,
    score: f64,
    benchmark: Option<f64>,
    peer_norm: Option<PeerNorm>,
    group_score: Option<f64>,
) -> bool {
    match variant {
        ReportVariant::Blocker => {
            benchmark.is_some_and(|value| score > value)
                || peer_norm.is_some_and(|norm| score > norm.average)
        }
        ReportVariant::Leader => {
            let behind_group = !is_subdimension
                && group_score.is_some_and(|value| score < value - GROUP_SCORE_MARGIN);
            benchmark.is_some_and(|value| score < value)
                || peer_norm.is_some_and(|norm| score < norm.average)
                || behind_group
        }
    }
}

/// First-match-wins feedback selection. The store may hold several candidates
/// per dimension and kind; exactly the first one in store order is surfaced.
pub(crate) fn pick_first(
    feedback: &[AssignedFeedback],
    kind: FeedbackKind,
    dimension_id: &DimensionId,
) -> Option<String> {
    feedback
        .iter()
        .find(|entry| entry.kind == kind && entry.dimension_id.as_ref() == Some(dimension_id))
        .map(|entry| entry.content.clone())
}

pub(crate) fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for value in values {
        sum += value;
        count += 1;
    }
    (count > 0).then(|| sum / count as f64)
}
