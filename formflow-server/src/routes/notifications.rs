use std::collections::BTreeMap;

use axum::{
    extract::State,
    routing::{get, patch, post},
    Json, Router,
};
use formflow_db::models::{NotificationModel, NotificationStats};
use formflow_service::CleanupReport;
use serde::Serialize;
use uuid::Uuid;

use crate::error::HttpResult;
use crate::extract::PathParam;
use crate::identity::CurrentUser;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(list_notifications))
        .route("/notifications/{id}/read", patch(mark_read))
        .route("/notifications/stats", get(stats))
        .route("/notifications/cleanup", post(cleanup))
}

#[derive(Debug, Serialize)]
struct StatsResponse {
    stats: NotificationStats,
    retention_days: i64,
    /// Registered scheduler jobs and whether each is still running.
    scheduler: BTreeMap<String, bool>,
}

async fn list_notifications(
    State(state): State<AppState>,
    CurrentUser(requester): CurrentUser,
) -> HttpResult<Json<Vec<NotificationModel>>> {
    Ok(Json(state.services.notifications.list_for_user(requester.id).await?))
}

async fn mark_read(
    State(state): State<AppState>,
    CurrentUser(requester): CurrentUser,
    PathParam(id): PathParam<Uuid>,
) -> HttpResult<Json<NotificationModel>> {
    Ok(Json(state.services.notifications.mark_read(&requester, id).await?))
}

async fn stats(State(state): State<AppState>, CurrentUser(_): CurrentUser) -> HttpResult<Json<StatsResponse>> {
    let notifications = &state.services.notifications;
    Ok(Json(StatsResponse {
        stats: notifications.stats().await?,
        retention_days: notifications.retention().num_days(),
        scheduler: state.scheduler.status(),
    }))
}

async fn cleanup(State(state): State<AppState>, CurrentUser(_): CurrentUser) -> HttpResult<Json<CleanupReport>> {
    Ok(Json(state.services.notifications.cleanup_now().await?))
}
