//! Report scoring and aggregation engine.
//!
//! Turns raw dimension-score rows for completed assessments into structured,
//! scored reports: on-demand peer-group norms (GEOnorms), single-rater
//! Leader/Blocker reports, and multi-rater 360 reports with a per-role score
//! breakdown. The engine only reads, through the [`store::ReportStore`]
//! trait; it never writes back and holds no state between invocations.

pub mod composed;
pub mod domain;
pub mod memory;
pub(crate) mod multi_rater;
pub mod norms;
pub mod router;
pub mod service;
pub(crate) mod single_rater;
pub mod store;

#[cfg(test)]
mod tests;

pub use composed::{
    ComposedReport, DimensionInfo, GroupInfo, MultiRaterEntry, RaterBreakdown, ReportBody,
    ReportVariant, SingleRaterEntry,
};
pub use domain::{
    AssignedFeedback, Assignment, AssignmentId, Assessment, AssessmentId, Benchmark, Dimension,
    DimensionId, DimensionScore, FeedbackKind, Group, GroupId, GroupMember, Profile, ProfileId,
    RaterType, TextAnswer,
};
pub use memory::InMemoryReportStore;
pub use norms::{peer_norms, PeerNorm};
pub use router::report_router;
pub use service::{ComposeError, ReportComposer};
pub use store::{AssignmentFilter, ReportStore, StoreError};
