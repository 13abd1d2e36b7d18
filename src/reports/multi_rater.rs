use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use super::composed::{
    ComposedReport, DimensionInfo, GroupInfo, MultiRaterEntry, RaterBreakdown, ReportBody,
};
use super::domain::{
    Assignment, AssignmentId, Assessment, DimensionId, ProfileId, RaterType,
};
use super::norms::peer_norms;
use super::service::ComposeError;
use super::single_rater::mean;
use super::store::{AssignmentFilter, ReportStore};

/// Builds a 360 report: one target person, many rater submissions, scores
/// split by normalized rater role.
pub(crate) fn compose(
    store: &dyn ReportStore,
    assignment: &Assignment,
    assessment: &Assessment,
) -> Result<ComposedReport, ComposeError> {
    if !assessment.is_360 {
        return Err(ComposeError::InvalidAssessment(format!(
            "assessment '{}' is not a 360 assessment; compose it per respondent",
            assessment.title
        )));
    }

    // A 360 assignment without a rating target is malformed.
    let target_id = assignment.target_id.clone().ok_or_else(|| {
        ComposeError::NotFound(format!(
            "rating target for assignment '{}'",
            assignment.id.0
        ))
    })?;
    let subject = store
        .find_profile(&target_id)?
        .ok_or_else(|| ComposeError::NotFound(format!("profile '{}'", target_id.0)))?;

    // Every 360 target must belong to exactly one group designating them.
    let group = store.find_group_by_target(&target_id)?.ok_or_else(|| {
        ComposeError::NotFound(format!(
            "group designating profile '{}' as 360 target",
            target_id.0
        ))
    })?;

    let raters = store.find_completed_assignments(&AssignmentFilter {
        assessment_id: Some(assessment.id.clone()),
        target_id: Some(target_id.clone()),
        ..AssignmentFilter::default()
    })?;

    let rater_types: HashMap<ProfileId, RaterType> = store
        .find_group_members(&group.id)?
        .into_iter()
        .map(|member| {
            let rater_type = RaterType::from_role(member.role.as_deref());
            (member.profile_id, rater_type)
        })
        .collect();

    let dimensions = store.find_dimensions(&assessment.id)?;
    if dimensions.is_empty() {
        return Err(ComposeError::InvalidAssessment(format!(
            "assessment '{}' has no dimensions configured",
            assessment.title
        )));
    }
    // 360 reports never recurse into subdimensions.
    let roots: Vec<_> = dimensions
        .into_iter()
        .filter(|dimension| dimension.is_top_level())
        .collect();
    if roots.is_empty() {
        return Err(ComposeError::InvalidAssessment(format!(
            "assessment '{}' defines only subdimensions; at least one top-level dimension is required",
            assessment.title
        )));
    }

    let root_ids: Vec<DimensionId> = roots.iter().map(|dimension| dimension.id.clone()).collect();
    let rater_ids: Vec<AssignmentId> = raters.iter().map(|rater| rater.id.clone()).collect();
    let rater_by_assignment: HashMap<AssignmentId, ProfileId> = raters
        .iter()
        .map(|rater| (rater.id.clone(), rater.user_id.clone()))
        .collect();

    // Per dimension, every rater's score tagged with the rater's type.
    let mut scores_by_dimension: BTreeMap<DimensionId, Vec<(RaterType, f64)>> = BTreeMap::new();
    for score in store.find_dimension_scores(&rater_ids, &root_ids)? {
        let rater_type = rater_by_assignment
            .get(&score.assignment_id)
            .and_then(|user_id| rater_types.get(user_id))
            .copied()
            .unwrap_or(RaterType::Other);
        scores_by_dimension
            .entry(score.dimension_id)
            .or_default()
            .push((rater_type, score.avg_score));
    }

    let benchmarks: BTreeMap<DimensionId, f64> = store
        .find_benchmarks(&root_ids)?
        .into_iter()
        .map(|benchmark| (benchmark.dimension_id, benchmark.value))
        .collect();
    let norms = peer_norms(store, &group.id, &assessment.id, &root_ids)?;

    // Free-text answers bucketed by dimension; untagged answers land in the
    // general bucket and stay out of every per-dimension list.
    let mut comments_by_dimension: BTreeMap<DimensionId, Vec<String>> = BTreeMap::new();
    let mut general_comments = Vec::new();
    for answer in store.find_text_answers(&rater_ids)? {
        match answer.dimension_id {
            Some(dimension_id) => comments_by_dimension
                .entry(dimension_id)
                .or_default()
                .push(answer.value),
            None => general_comments.push(answer.value),
        }
    }

    let mut entries = Vec::new();
    for root in &roots {
        let Some(rater_scores) = scores_by_dimension.get(&root.id) else {
            // Nobody scored this dimension; skip it rather than emit an
            // undefined average.
            continue;
        };

        let overall_score = match mean(rater_scores.iter().map(|(_, score)| *score)) {
            Some(score) => score,
            None => continue,
        };

        let benchmark = benchmarks.get(&root.id).copied();
        let peer_norm = norms.get(&root.id).copied();
        // 360 reports only use lower-is-worse polarity.
        let improvement_needed = benchmark.is_some_and(|value| overall_score < value)
            || peer_norm.is_some_and(|norm| overall_score < norm.average);

        entries.push(MultiRaterEntry {
            dimension: DimensionInfo::from_dimension(root),
            overall_score,
            rater_breakdown: breakdown(rater_scores),
            benchmark,
            peer_norm,
            improvement_needed,
            comments: comments_by_dimension.remove(&root.id).unwrap_or_default(),
        });
    }

    let overall_score = mean(entries.iter().map(|entry| entry.overall_score));

    debug!(
        assignment = %assignment.id.0,
        target = %target_id.0,
        raters = rater_ids.len(),
        dimensions = entries.len(),
        "composed 360 report"
    );

    Ok(ComposedReport {
        subject,
        assessment_title: assessment.title.clone(),
        group: Some(GroupInfo::from_group(&group)),
        overall_score,
        body: ReportBody::MultiRater {
            dimensions: entries,
            general_comments,
        },
    })
}

/// Mean per rater type. A type with no contributing raters stays `None`; that
/// absence must remain distinguishable from a true zero average.
fn breakdown(rater_scores: &[(RaterType, f64)]) -> RaterBreakdown {
    let per_type = |wanted: RaterType| {
        mean(
            rater_scores
                .iter()
                .filter(|(rater_type, _)| *rater_type == wanted)
                .map(|(_, score)| *score),
        )
    };

    RaterBreakdown {
        peer: per_type(RaterType::Peer),
        direct_report: per_type(RaterType::DirectReport),
        supervisor: per_type(RaterType::Supervisor),
        self_rating: per_type(RaterType::SelfRating),
        other: per_type(RaterType::Other),
    }
}
