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

use super::domain::{ProjectDetailsUpdate, ProjectId, ProjectSubmission};
use super::repository::{ProjectRepository, RepositoryError};
use super::service::{PriorityFilter, ProjectService, ProjectServiceError};
use crate::scoring::ProjectAnswers;

/// Router builder exposing the project intake, priority board, and
/// re-scoring endpoints.
pub fn project_router<R>(service: Arc<ProjectService<R>>) -> Router
where
    R: ProjectRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/projects",
            post(submit_handler::<R>).get(list_handler::<R>),
        )
        .route(
            "/api/v1/projects/:project_id",
            get(get_handler::<R>).put(update_details_handler::<R>),
        )
        .route(
            "/api/v1/projects/:project_id/answers",
            put(update_answers_handler::<R>),
        )
        .route(
            "/api/v1/projects/:project_id/retenu",
            post(toggle_retenu_handler::<R>),
        )
        .route("/api/v1/projects/rescore", post(rescore_handler::<R>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PriorityQuery {
    /// Pass `retenu=1` to list only selected projects.
    retenu: Option<String>,
    limit: Option<usize>,
}

impl PriorityQuery {
    fn filter(&self) -> PriorityFilter {
        let defaults = PriorityFilter::default();
        PriorityFilter {
            retenu_only: self.retenu.as_deref() == Some("1"),
            limit: self.limit.unwrap_or(defaults.limit),
        }
    }
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<ProjectService<R>>>,
    axum::Json(submission): axum::Json<ProjectSubmission>,
) -> Response
where
    R: ProjectRepository + 'static,
{
    match service.submit(submission) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<ProjectService<R>>>,
    Query(query): Query<PriorityQuery>,
) -> Response
where
    R: ProjectRepository + 'static,
{
    match service.prioritized(query.filter()) {
        Ok(board) => (StatusCode::OK, axum::Json(board)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn get_handler<R>(
    State(service): State<Arc<ProjectService<R>>>,
    Path(project_id): Path<String>,
) -> Response
where
    R: ProjectRepository + 'static,
{
    let id = ProjectId(project_id);
    match service.get(&id) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn update_details_handler<R>(
    State(service): State<Arc<ProjectService<R>>>,
    Path(project_id): Path<String>,
    axum::Json(update): axum::Json<ProjectDetailsUpdate>,
) -> Response
where
    R: ProjectRepository + 'static,
{
    let id = ProjectId(project_id);
    match service.update_details(&id, update) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn update_answers_handler<R>(
    State(service): State<Arc<ProjectService<R>>>,
    Path(project_id): Path<String>,
    axum::Json(answers): axum::Json<ProjectAnswers>,
) -> Response
where
    R: ProjectRepository + 'static,
{
    let id = ProjectId(project_id);
    match service.update_answers(&id, answers) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn toggle_retenu_handler<R>(
    State(service): State<Arc<ProjectService<R>>>,
    Path(project_id): Path<String>,
) -> Response
where
    R: ProjectRepository + 'static,
{
    let id = ProjectId(project_id);
    match service.toggle_retenu(&id) {
        Ok(retenu) => {
            let payload = json!({ "project_id": id.0, "retenu": retenu });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn rescore_handler<R>(
    State(service): State<Arc<ProjectService<R>>>,
) -> Response
where
    R: ProjectRepository + 'static,
{
    match service.rescore_all() {
        Ok(rescored) => {
            let payload = json!({ "rescored": rescored });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

fn service_error_response(error: ProjectServiceError) -> Response {
    let status = match &error {
        ProjectServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ProjectServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        ProjectServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
