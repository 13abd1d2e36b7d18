use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for assessment assignments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssignmentId(pub String);

/// Identifier wrapper for assessments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssessmentId(pub String);

/// Identifier wrapper for scoring dimensions. Orderable so norm and score
/// maps keep a stable iteration order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DimensionId(pub String);

/// Identifier wrapper for user profiles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProfileId(pub String);

/// Identifier wrapper for peer groups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupId(pub String);

/// One instance of one person completing one assessment. For 360 assessments
/// the responding user is a rater and `target_id` names the person being rated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: AssignmentId,
    pub assessment_id: AssessmentId,
    pub user_id: ProfileId,
    pub target_id: Option<ProfileId>,
    pub completed: bool,
    /// Assignments created in one bulk-assign operation share this timestamp
    /// and form a "batch" for group-score comparison.
    pub created_at: DateTime<Utc>,
}

/// Assessment metadata consulted during report dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub id: AssessmentId,
    pub title: String,
    pub is_360: bool,
}

/// Identity surfaced as the subject of a composed report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// A named, coded scoring category belonging to an assessment. A dimension
/// with a `parent_id` is a subdimension; nesting never goes deeper than one
/// level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub id: DimensionId,
    pub assessment_id: AssessmentId,
    pub name: String,
    pub code: String,
    pub parent_id: Option<DimensionId>,
}

impl Dimension {
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Precomputed average of numeric answers for one (assignment, dimension)
/// pair. At most one row exists per pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub assignment_id: AssignmentId,
    pub dimension_id: DimensionId,
    pub avg_score: f64,
    pub answer_count: u32,
}

/// Static industry reference score for a dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Benchmark {
    pub dimension_id: DimensionId,
    pub value: f64,
}

/// A named collection of peer profiles within a client. A group may designate
/// one member as the target of a 360 assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub target_id: Option<ProfileId>,
}

/// Group membership row. The role label is free text maintained by admins and
/// only consulted for the 360 rater breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupMember {
    pub profile_id: ProfileId,
    pub role: Option<String>,
}

/// Free-text feedback previously attached to a report by a coach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignedFeedback {
    pub dimension_id: Option<DimensionId>,
    pub kind: FeedbackKind,
    pub content: String,
}

/// Distinguishes dimension-overview feedback from specific improvement notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    Overall,
    Specific,
}

/// A free-text answer given by a rater, tagged with the answered field's
/// dimension when the field has one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAnswer {
    pub assignment_id: AssignmentId,
    pub value: String,
    pub dimension_id: Option<DimensionId>,
}

/// Normalized role of a 360 respondent relative to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaterType {
    Peer,
    DirectReport,
    Supervisor,
    SelfRating,
    Other,
}

impl RaterType {
    /// Maps a stored role label onto a rater type. Matching is
    /// case-insensitive; unrecognized or missing labels fall into `Other`.
    pub fn from_role(role: Option<&str>) -> Self {
        let Some(role) = role else {
            return RaterType::Other;
        };
        match role.trim().to_ascii_lowercase().as_str() {
            "peer" | "colleague" => RaterType::Peer,
            "direct_report" | "subordinate" | "directreport" => RaterType::DirectReport,
            "supervisor" | "manager" | "boss" => RaterType::Supervisor,
            "self" => RaterType::SelfRating,
            _ => RaterType::Other,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RaterType::Peer => "peer",
            RaterType::DirectReport => "direct_report",
            RaterType::Supervisor => "supervisor",
            RaterType::SelfRating => "self",
            RaterType::Other => "other",
        }
    }
}
