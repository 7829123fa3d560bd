use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use formflow_api::{CreateValidationRequest, UpdateValidationRequest};
use formflow_db::models::ValidationModel;
use formflow_service::views::{CompletionView, ValidationView};
use uuid::Uuid;

use crate::error::HttpResult;
use crate::extract::{JsonBody, PathParam};
use crate::identity::CurrentUser;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/validations", post(create_validation).get(list_validations))
        .route("/validations/pending", get(pending))
        .route("/validations/completed", get(completed))
        .route("/validations/completion/{completion_id}", get(by_completion))
        .route("/validations/{id}", put(update_validation))
}

async fn create_validation(
    State(state): State<AppState>,
    CurrentUser(requester): CurrentUser,
    JsonBody(body): JsonBody<CreateValidationRequest>,
) -> HttpResult<(StatusCode, Json<ValidationModel>)> {
    let validation = state.services.validations.create(&requester, body).await?;
    Ok((StatusCode::CREATED, Json(validation)))
}

async fn list_validations(
    State(state): State<AppState>,
    CurrentUser(requester): CurrentUser,
) -> HttpResult<Json<Vec<ValidationView>>> {
    Ok(Json(state.services.validations.list(&requester).await?))
}

async fn pending(
    State(state): State<AppState>,
    CurrentUser(requester): CurrentUser,
) -> HttpResult<Json<Vec<CompletionView>>> {
    Ok(Json(state.services.validations.pending(&requester).await?))
}

async fn completed(
    State(state): State<AppState>,
    CurrentUser(requester): CurrentUser,
) -> HttpResult<Json<Vec<ValidationView>>> {
    Ok(Json(state.services.validations.completed(&requester).await?))
}

async fn by_completion(
    State(state): State<AppState>,
    CurrentUser(_): CurrentUser,
    PathParam(completion_id): PathParam<Uuid>,
) -> HttpResult<Json<ValidationModel>> {
    Ok(Json(state.services.validations.get_by_completion(completion_id).await?))
}

async fn update_validation(
    State(state): State<AppState>,
    CurrentUser(requester): CurrentUser,
    PathParam(id): PathParam<Uuid>,
    JsonBody(body): JsonBody<UpdateValidationRequest>,
) -> HttpResult<Json<ValidationModel>> {
    Ok(Json(state.services.validations.update(&requester, id, body).await?))
}
