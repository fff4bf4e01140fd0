use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::conflicts::Proposal;
use super::domain::{AssignmentCandidate, AssignmentId, LecturerId};
use super::repository::{AssignmentFilter, AssignmentStore, StoreError};
use super::writer::{AssignmentWriteError, AssignmentWriter};
use crate::scheduling::calendar::{Block, CalendarParseError, Room, TimeSlot};
use crate::scheduling::cohort::parse_registration;

/// Router builder exposing the faculty assignment endpoints.
pub fn assignment_router<S>(writer: Arc<AssignmentWriter<S>>) -> Router
where
    S: AssignmentStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/assignments",
            get(list_handler::<S>).post(create_handler::<S>),
        )
        .route("/api/v1/assignments/check", post(check_handler::<S>))
        .route("/api/v1/assignments/audit", get(audit_handler::<S>))
        .route(
            "/api/v1/assignments/:assignment_id",
            put(update_handler::<S>).delete(relieve_handler::<S>),
        )
        .route(
            "/api/v1/lecturers/:lecturer_id/timetable",
            get(lecturer_timetable_handler::<S>),
        )
        .route("/api/v1/cohorts/:registration", get(cohort_handler))
        .with_state(writer)
}

/// Query-string form of [`AssignmentFilter`]; tokens are parsed so bad values become a 400.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct AssignmentQuery {
    lecturer: Option<String>,
    room: Option<String>,
    time_slot: Option<String>,
    block: Option<String>,
    course: Option<String>,
}

impl AssignmentQuery {
    fn into_filter(self) -> Result<AssignmentFilter, CalendarParseError> {
        Ok(AssignmentFilter {
            lecturer: self.lecturer.map(LecturerId),
            room: self.room.as_deref().map(str::parse::<Room>).transpose()?,
            time_slot: self.time_slot.as_deref().map(str::parse::<TimeSlot>).transpose()?,
            block: self.block.as_deref().map(str::parse::<Block>).transpose()?,
            course: self.course,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CheckRequest {
    #[serde(flatten)]
    proposal: Proposal,
    #[serde(default)]
    exclude: Option<AssignmentId>,
}

pub(crate) async fn list_handler<S>(
    State(writer): State<Arc<AssignmentWriter<S>>>,
    Query(query): Query<AssignmentQuery>,
) -> Response
where
    S: AssignmentStore + 'static,
{
    let filter = match query.into_filter() {
        Ok(filter) => filter,
        Err(error) => {
            let payload = json!({ "error": "VALIDATION_ERROR", "message": error.to_string() });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    match writer.assignments(&filter) {
        Ok(assignments) => (StatusCode::OK, axum::Json(assignments)).into_response(),
        Err(error) => store_error_response(&error),
    }
}

pub(crate) async fn create_handler<S>(
    State(writer): State<Arc<AssignmentWriter<S>>>,
    axum::Json(candidate): axum::Json<AssignmentCandidate>,
) -> Response
where
    S: AssignmentStore + 'static,
{
    match writer.save(&candidate, None) {
        Ok(outcome) => (StatusCode::CREATED, axum::Json(outcome)).into_response(),
        Err(error) => write_error_response(error),
    }
}

pub(crate) async fn update_handler<S>(
    State(writer): State<Arc<AssignmentWriter<S>>>,
    Path(assignment_id): Path<String>,
    axum::Json(candidate): axum::Json<AssignmentCandidate>,
) -> Response
where
    S: AssignmentStore + 'static,
{
    let id = AssignmentId(assignment_id);
    match writer.save(&candidate, Some(&id)) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome)).into_response(),
        Err(error) => write_error_response(error),
    }
}

pub(crate) async fn relieve_handler<S>(
    State(writer): State<Arc<AssignmentWriter<S>>>,
    Path(assignment_id): Path<String>,
) -> Response
where
    S: AssignmentStore + 'static,
{
    match writer.relieve(&AssignmentId(assignment_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => write_error_response(error),
    }
}

pub(crate) async fn check_handler<S>(
    State(writer): State<Arc<AssignmentWriter<S>>>,
    axum::Json(request): axum::Json<CheckRequest>,
) -> Response
where
    S: AssignmentStore + 'static,
{
    match writer.check(&request.proposal, request.exclude.as_ref()) {
        Ok(()) => (StatusCode::OK, axum::Json(json!({ "ok": true }))).into_response(),
        Err(AssignmentWriteError::Conflict(rejection)) => {
            let payload = json!({
                "ok": false,
                "reason": rejection.reason,
                "conflicting": rejection.conflicting,
                "message": rejection.message,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(other) => write_error_response(other),
    }
}

pub(crate) async fn audit_handler<S>(State(writer): State<Arc<AssignmentWriter<S>>>) -> Response
where
    S: AssignmentStore + 'static,
{
    match writer.audit() {
        Ok(violations) => {
            let payload = json!({ "clean": violations.is_empty(), "violations": violations });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => store_error_response(&error),
    }
}

pub(crate) async fn lecturer_timetable_handler<S>(
    State(writer): State<Arc<AssignmentWriter<S>>>,
    Path(lecturer_id): Path<String>,
) -> Response
where
    S: AssignmentStore + 'static,
{
    match writer.lecturer_timetable(&LecturerId(lecturer_id)) {
        Ok(assignments) => (StatusCode::OK, axum::Json(assignments)).into_response(),
        Err(error) => store_error_response(&error),
    }
}

pub(crate) async fn cohort_handler(Path(registration): Path<String>) -> Response {
    match parse_registration(&registration) {
        Ok(cohort) => (StatusCode::OK, axum::Json(cohort)).into_response(),
        Err(error) => {
            let payload = json!({
                "error": "UNPARSEABLE_REGISTRATION",
                "message": error.to_string(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
    }
}

/// HTTP status a store failure is reported with.
pub fn store_status(error: &StoreError) -> StatusCode {
    match error {
        StoreError::NotFound => StatusCode::NOT_FOUND,
        StoreError::PermissionDenied => StatusCode::FORBIDDEN,
        StoreError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

fn store_error_response(error: &StoreError) -> Response {
    let payload = json!({ "error": "STORE_ERROR", "message": error.to_string() });
    (store_status(error), axum::Json(payload)).into_response()
}

pub(crate) fn write_error_response(error: AssignmentWriteError) -> Response {
    let code = error.code();
    match error {
        AssignmentWriteError::Validation(error) => {
            let payload = json!({ "error": code, "message": error.to_string() });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        AssignmentWriteError::Conflict(rejection) => {
            let payload = json!({
                "error": code,
                "message": rejection.message,
                "conflicting": rejection.conflicting,
            });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        AssignmentWriteError::Store(error) => store_error_response(&error),
        AssignmentWriteError::Incomplete { written, failed } => {
            let failed: Vec<_> = failed
                .iter()
                .map(|failure| {
                    json!({
                        "course_code": failure.course_code,
                        "message": failure.error.to_string(),
                    })
                })
                .collect();
            let payload = json!({
                "error": code,
                "written": written,
                "failed": failed,
            });
            (StatusCode::MULTI_STATUS, axum::Json(payload)).into_response()
        }
    }
}
