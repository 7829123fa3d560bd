use axum::{
    extract::State,
    http::StatusCode,
    routing::{post, put},
    Json, Router,
};
use formflow_api::{CreateCompletionRequest, UpdateCompletionRequest};
use formflow_db::models::CompletionModel;
use formflow_service::views::CompletionView;
use uuid::Uuid;

use crate::error::HttpResult;
use crate::extract::{JsonBody, PathParam};
use crate::identity::CurrentUser;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/completions", post(create_completion).get(list_completions))
        .route("/completions/{id}", put(update_completion))
}

async fn create_completion(
    State(state): State<AppState>,
    CurrentUser(requester): CurrentUser,
    JsonBody(body): JsonBody<CreateCompletionRequest>,
) -> HttpResult<(StatusCode, Json<CompletionModel>)> {
    let completion = state.services.completions.create(&requester, body).await?;
    Ok((StatusCode::CREATED, Json(completion)))
}

async fn list_completions(
    State(state): State<AppState>,
    CurrentUser(requester): CurrentUser,
) -> HttpResult<Json<Vec<CompletionView>>> {
    Ok(Json(state.services.completions.list_for_owner(&requester).await?))
}

async fn update_completion(
    State(state): State<AppState>,
    CurrentUser(requester): CurrentUser,
    PathParam(id): PathParam<Uuid>,
    JsonBody(body): JsonBody<UpdateCompletionRequest>,
) -> HttpResult<Json<CompletionModel>> {
    Ok(Json(state.services.completions.update(&requester, id, body).await?))
}
