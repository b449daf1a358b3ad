use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{extract::Query, Extension, Json};
use prioritizer::capacity::{
    available_capacity, required_load, AvailabilityRow, LoadRow, PlannedProject, WeekGrid,
};
use prioritizer::projects::{project_router, ProjectRepository, ProjectService};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::infra::{seed_categories, seed_releases, AppState};

pub(crate) fn with_project_routes<R>(service: Arc<ProjectService<R>>) -> axum::Router
where
    R: ProjectRepository + 'static,
{
    project_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/categories",
            axum::routing::get(categories_endpoint),
        )
        .route("/api/v1/releases", axum::routing::get(releases_endpoint))
        .route(
            "/api/v1/capacity/available",
            axum::routing::get(capacity_available_endpoint),
        )
        .route(
            "/api/v1/capacity/required",
            axum::routing::post(capacity_required_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn categories_endpoint() -> Json<Vec<prioritizer::reference::Category>> {
    Json(seed_categories())
}

pub(crate) async fn releases_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<Vec<prioritizer::reference::Release>> {
    Json(seed_releases(state.planning_year))
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AvailableCapacityQuery {
    /// Restrict the returned week labels to one month, e.g. `month=January`.
    month: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AvailableCapacityResponse {
    pub(crate) year: i32,
    pub(crate) weeks: Vec<String>,
    pub(crate) availability: Vec<AvailabilityRow>,
}

pub(crate) async fn capacity_available_endpoint(
    Extension(state): Extension<AppState>,
    Query(query): Query<AvailableCapacityQuery>,
) -> Json<AvailableCapacityResponse> {
    let grid = WeekGrid::for_year(state.planning_year);
    let weeks = match query.month.as_deref() {
        Some(month) => grid.weeks_in_month(month),
        None => grid.labels(),
    };

    Json(AvailableCapacityResponse {
        year: grid.year(),
        weeks,
        availability: available_capacity(&state.profiles),
    })
}

#[derive(Debug, Deserialize)]
pub(crate) struct RequiredLoadRequest {
    /// Defaults to the configured planning year.
    #[serde(default)]
    pub(crate) year: Option<i32>,
    pub(crate) projects: Vec<PlannedProject>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RequiredLoadResponse {
    pub(crate) year: i32,
    pub(crate) load: Vec<LoadRow>,
}

pub(crate) async fn capacity_required_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<RequiredLoadRequest>,
) -> Json<RequiredLoadResponse> {
    let year = payload.year.unwrap_or(state.planning_year);
    let grid = WeekGrid::for_year(year);

    Json(RequiredLoadResponse {
        year,
        load: required_load(&grid, &payload.projects),
    })
}
