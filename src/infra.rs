use chrono::{DateTime, TimeZone, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::reports::{
    AssignedFeedback, Assignment, AssignmentId, Assessment, AssessmentId, Benchmark, Dimension,
    DimensionId, DimensionScore, FeedbackKind, Group, GroupId, GroupMember, InMemoryReportStore,
    Profile, ProfileId, TextAnswer,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Demo assignment ids surfaced by the CLI so the seeded dataset is easy to
/// explore without a database.
pub(crate) const DEMO_LEADER_ASSIGNMENT: &str = "asg-ava-compass";
pub(crate) const DEMO_BLOCKER_ASSIGNMENT: &str = "asg-ava-blockers";
pub(crate) const DEMO_360_ASSIGNMENT: &str = "asg-noah-360-self";

fn batch_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).single().expect("valid timestamp")
}

fn profile(id: &str, first: &str, last: &str) -> Profile {
    Profile {
        id: ProfileId(id.to_string()),
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: format!("{}.{}@example.com", first.to_lowercase(), last.to_lowercase()),
    }
}

fn dimension(id: &str, assessment: &str, name: &str, code: &str, parent: Option<&str>) -> Dimension {
    Dimension {
        id: DimensionId(id.to_string()),
        assessment_id: AssessmentId(assessment.to_string()),
        name: name.to_string(),
        code: code.to_string(),
        parent_id: parent.map(|parent| DimensionId(parent.to_string())),
    }
}

fn score(assignment: &str, dimension: &str, avg: f64) -> DimensionScore {
    DimensionScore {
        assignment_id: AssignmentId(assignment.to_string()),
        dimension_id: DimensionId(dimension.to_string()),
        avg_score: avg,
        answer_count: 6,
    }
}

/// Builds the in-memory dataset the demo server and CLI run against: one
/// Leader assessment with a subdimension tree, one Blocker assessment, and a
/// 360 assessment with four raters around a single target.
pub(crate) fn seeded_store() -> InMemoryReportStore {
    let store = InMemoryReportStore::default();
    let created_at = batch_timestamp();

    for person in [
        profile("p-ava", "Ava", "Keller"),
        profile("p-noah", "Noah", "Brandt"),
        profile("p-mia", "Mia", "Sorensen"),
        profile("p-liam", "Liam", "Okafor"),
    ] {
        store.insert_profile(person);
    }

    store.insert_group(
        Group {
            id: GroupId("g-product".to_string()),
            name: "Product Leadership".to_string(),
            target_id: Some(ProfileId("p-noah".to_string())),
        },
        vec![
            GroupMember {
                profile_id: ProfileId("p-ava".to_string()),
                role: Some("peer".to_string()),
            },
            GroupMember {
                profile_id: ProfileId("p-mia".to_string()),
                role: Some("Manager".to_string()),
            },
            GroupMember {
                profile_id: ProfileId("p-liam".to_string()),
                role: Some("direct_report".to_string()),
            },
            GroupMember {
                profile_id: ProfileId("p-noah".to_string()),
                role: Some("self".to_string()),
            },
        ],
    );

    // Leader assessment with one subdimension under Communication.
    store.insert_assessment(Assessment {
        id: AssessmentId("a-compass".to_string()),
        title: "Leadership Compass".to_string(),
        is_360: false,
    });
    store.insert_dimension(dimension("d-comm", "a-compass", "Communication", "COMM", None));
    store.insert_dimension(dimension("d-lead", "a-compass", "Leading Others", "LEAD", None));
    store.insert_dimension(dimension(
        "d-listen",
        "a-compass",
        "Active Listening",
        "COMM.LIS",
        Some("d-comm"),
    ));
    store.insert_benchmark(Benchmark {
        dimension_id: DimensionId("d-comm".to_string()),
        value: 3.8,
    });
    store.insert_benchmark(Benchmark {
        dimension_id: DimensionId("d-lead".to_string()),
        value: 3.5,
    });

    // Ava and Mia were assigned in the same bulk operation, so they form a
    // batch for the group-score comparison.
    for (id, user) in [(DEMO_LEADER_ASSIGNMENT, "p-ava"), ("asg-mia-compass", "p-mia")] {
        store.insert_assignment(Assignment {
            id: AssignmentId(id.to_string()),
            assessment_id: AssessmentId("a-compass".to_string()),
            user_id: ProfileId(user.to_string()),
            target_id: None,
            completed: true,
            created_at,
        });
    }
    store.insert_score(score(DEMO_LEADER_ASSIGNMENT, "d-comm", 3.4));
    store.insert_score(score(DEMO_LEADER_ASSIGNMENT, "d-lead", 4.1));
    store.insert_score(score(DEMO_LEADER_ASSIGNMENT, "d-listen", 3.0));
    store.insert_score(score("asg-mia-compass", "d-comm", 4.2));
    store.insert_score(score("asg-mia-compass", "d-lead", 3.9));

    store.insert_feedback(
        AssignmentId(DEMO_LEADER_ASSIGNMENT.to_string()),
        AssignedFeedback {
            dimension_id: Some(DimensionId("d-comm".to_string())),
            kind: FeedbackKind::Overall,
            content: "Clear in writing, less consistent in stand-ups.".to_string(),
        },
    );
    store.insert_feedback(
        AssignmentId(DEMO_LEADER_ASSIGNMENT.to_string()),
        AssignedFeedback {
            dimension_id: Some(DimensionId("d-comm".to_string())),
            kind: FeedbackKind::Specific,
            content: "Close each meeting with explicit owners and dates.".to_string(),
        },
    );

    // Blocker assessment: flat dimension list, higher scores are worse.
    store.insert_assessment(Assessment {
        id: AssessmentId("a-blockers".to_string()),
        title: "Personal Blockers Inventory".to_string(),
        is_360: false,
    });
    store.insert_dimension(dimension(
        "d-micro",
        "a-blockers",
        "Micromanagement",
        "BLK.MIC",
        None,
    ));
    store.insert_dimension(dimension(
        "d-avoid",
        "a-blockers",
        "Conflict Avoidance",
        "BLK.AVD",
        None,
    ));
    store.insert_benchmark(Benchmark {
        dimension_id: DimensionId("d-micro".to_string()),
        value: 2.5,
    });
    store.insert_benchmark(Benchmark {
        dimension_id: DimensionId("d-avoid".to_string()),
        value: 2.5,
    });
    store.insert_assignment(Assignment {
        id: AssignmentId(DEMO_BLOCKER_ASSIGNMENT.to_string()),
        assessment_id: AssessmentId("a-blockers".to_string()),
        user_id: ProfileId("p-ava".to_string()),
        target_id: None,
        completed: true,
        created_at,
    });
    store.insert_score(score(DEMO_BLOCKER_ASSIGNMENT, "d-micro", 3.1));
    store.insert_score(score(DEMO_BLOCKER_ASSIGNMENT, "d-avoid", 1.8));

    // 360 assessment: four raters around Noah.
    store.insert_assessment(Assessment {
        id: AssessmentId("a-360".to_string()),
        title: "Leadership 360".to_string(),
        is_360: true,
    });
    store.insert_dimension(dimension("d360-comm", "a-360", "Communication", "360.COMM", None));
    store.insert_dimension(dimension("d360-vision", "a-360", "Vision", "360.VIS", None));
    store.insert_benchmark(Benchmark {
        dimension_id: DimensionId("d360-comm".to_string()),
        value: 3.6,
    });

    let raters = [
        (DEMO_360_ASSIGNMENT, "p-noah"),
        ("asg-ava-360", "p-ava"),
        ("asg-mia-360", "p-mia"),
        ("asg-liam-360", "p-liam"),
    ];
    for (id, user) in raters {
        store.insert_assignment(Assignment {
            id: AssignmentId(id.to_string()),
            assessment_id: AssessmentId("a-360".to_string()),
            user_id: ProfileId(user.to_string()),
            target_id: Some(ProfileId("p-noah".to_string())),
            completed: true,
            created_at,
        });
    }
    store.insert_score(score(DEMO_360_ASSIGNMENT, "d360-comm", 4.0));
    store.insert_score(score("asg-ava-360", "d360-comm", 3.2));
    store.insert_score(score("asg-mia-360", "d360-comm", 3.6));
    store.insert_score(score("asg-liam-360", "d360-comm", 3.0));
    store.insert_score(score("asg-ava-360", "d360-vision", 4.4));
    store.insert_score(score("asg-mia-360", "d360-vision", 4.0));

    store.insert_text_answer(TextAnswer {
        assignment_id: AssignmentId("asg-ava-360".to_string()),
        value: "Noah communicates direction well once decisions are made.".to_string(),
        dimension_id: Some(DimensionId("d360-comm".to_string())),
    });
    store.insert_text_answer(TextAnswer {
        assignment_id: AssignmentId("asg-liam-360".to_string()),
        value: "Would like more frequent one-on-ones.".to_string(),
        dimension_id: Some(DimensionId("d360-comm".to_string())),
    });
    store.insert_text_answer(TextAnswer {
        assignment_id: AssignmentId("asg-mia-360".to_string()),
        value: "A steady hand for the whole group this year.".to_string(),
        dimension_id: None,
    });

    store
}
