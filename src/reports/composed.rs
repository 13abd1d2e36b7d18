use serde::Serialize;

use super::domain::{Dimension, DimensionId, Group, GroupId, Profile};
use super::norms::PeerNorm;

/// The composed report handed to the rendering/API layer. A plain value
/// object: no identity, no persistence, rebuilt from current store state on
/// every request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComposedReport {
    /// The person the report is about: the responding user for single-rater
    /// reports, the rated target for 360 reports.
    pub subject: Profile,
    pub assessment_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupInfo>,
    /// Unweighted mean of the top-level dimension scores; absent when no
    /// dimension produced a score.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_score: Option<f64>,
    #[serde(flatten)]
    pub body: ReportBody,
}

/// Group identity attached to a report when the subject belongs to one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupInfo {
    pub id: GroupId,
    pub name: String,
}

impl GroupInfo {
    pub fn from_group(group: &Group) -> Self {
        GroupInfo {
            id: group.id.clone(),
            name: group.name.clone(),
        }
    }
}

/// Variant-specific report content, resolved once from the assessment's 360
/// flag at the dispatch boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportBody {
    SingleRater {
        variant: ReportVariant,
        dimensions: Vec<SingleRaterEntry>,
    },
    MultiRater {
        dimensions: Vec<MultiRaterEntry>,
        /// Free-text answers from fields carrying no dimension tag; they never
        /// appear in any per-dimension comment list.
        #[serde(skip_serializing_if = "Vec::is_empty")]
        general_comments: Vec<String>,
    },
}

/// Which single-rater shape the report follows. Blocker assessments score a
/// flat dimension list where higher is worse; Leader assessments score a
/// two-level tree where lower is worse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportVariant {
    Leader,
    Blocker,
}

/// Dimension name/code surfaced alongside each entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionInfo {
    pub id: DimensionId,
    pub name: String,
    pub code: String,
}

impl DimensionInfo {
    pub fn from_dimension(dimension: &Dimension) -> Self {
        DimensionInfo {
            id: dimension.id.clone(),
            name: dimension.name.clone(),
            code: dimension.code.clone(),
        }
    }
}

/// Per-dimension entry of a Leader/Blocker report. Missing comparison values
/// stay `None`; renderers must treat absence as "no data," never as zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SingleRaterEntry {
    pub dimension: DimensionInfo,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benchmark: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peer_norm: Option<PeerNorm>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_score: Option<f64>,
    pub improvement_needed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_feedback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specific_feedback: Option<String>,
    /// Child entries for Leader reports; always empty for Blocker.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subdimensions: Vec<SingleRaterEntry>,
}

/// Per-dimension entry of a 360 report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiRaterEntry {
    pub dimension: DimensionInfo,
    /// Unweighted mean across every rater that scored this dimension.
    pub overall_score: f64,
    pub rater_breakdown: RaterBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub benchmark: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peer_norm: Option<PeerNorm>,
    pub improvement_needed: bool,
    /// Free-text answers given for this dimension across all raters.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,
}

/// Mean score per normalized rater type. A type with no contributing raters
/// is `None`, which is distinct from a true zero average.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RaterBreakdown {
    pub peer: Option<f64>,
    pub direct_report: Option<f64>,
    pub supervisor: Option<f64>,
    #[serde(rename = "self")]
    pub self_rating: Option<f64>,
    pub other: Option<f64>,
}
