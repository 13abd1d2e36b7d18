use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;

use super::domain::AssignmentId;
use super::service::{ComposeError, ReportComposer};
use super::store::ReportStore;

/// Router builder exposing the report composition endpoint.
pub fn report_router<S>(composer: Arc<ReportComposer<S>>) -> Router
where
    S: ReportStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/reports/:assignment_id",
            get(report_handler::<S>),
        )
        .with_state(composer)
}

pub(crate) async fn report_handler<S>(
    State(composer): State<Arc<ReportComposer<S>>>,
    Path(assignment_id): Path<String>,
) -> Response
where
    S: ReportStore + 'static,
{
    match composer.compose(&AssignmentId(assignment_id)) {
        Ok(report) => (StatusCode::OK, axum::Json(report)).into_response(),
        Err(error) => {
            let status = match &error {
                ComposeError::NotFound(_) => StatusCode::NOT_FOUND,
                ComposeError::InvalidAssessment(_) => StatusCode::UNPROCESSABLE_ENTITY,
                ComposeError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            let payload = json!({ "error": error.to_string() });
            (status, axum::Json(payload)).into_response()
        }
    }
}
