use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use formflow_api::{CreateFormatRequest, UpdateFormatRequest};
use formflow_db::models::FormatModel;
use formflow_db::repository::FormatFilter;
use uuid::Uuid;

use crate::error::HttpResult;
use crate::extract::{JsonBody, PathParam, QueryParams};
use crate::identity::CurrentUser;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/formats", post(create_format).get(list_formats))
        .route("/formats/{id}", get(get_format).put(update_format).delete(delete_format))
}

async fn create_format(
    State(state): State<AppState>,
    CurrentUser(requester): CurrentUser,
    JsonBody(body): JsonBody<CreateFormatRequest>,
) -> HttpResult<(StatusCode, Json<FormatModel>)> {
    let format = state.services.formats.create(&requester, body).await?;
    Ok((StatusCode::CREATED, Json(format)))
}

async fn list_formats(
    State(state): State<AppState>,
    CurrentUser(_): CurrentUser,
    QueryParams(filter): QueryParams<FormatFilter>,
) -> HttpResult<Json<Vec<FormatModel>>> {
    Ok(Json(state.services.formats.list(&filter).await?))
}

async fn get_format(
    State(state): State<AppState>,
    CurrentUser(_): CurrentUser,
    PathParam(id): PathParam<Uuid>,
) -> HttpResult<Json<FormatModel>> {
    Ok(Json(state.services.formats.get(id).await?))
}

async fn update_format(
    State(state): State<AppState>,
    CurrentUser(requester): CurrentUser,
    PathParam(id): PathParam<Uuid>,
    JsonBody(body): JsonBody<UpdateFormatRequest>,
) -> HttpResult<Json<FormatModel>> {
    Ok(Json(state.services.formats.update(&requester, id, body).await?))
}

async fn delete_format(
    State(state): State<AppState>,
    CurrentUser(requester): CurrentUser,
    PathParam(id): PathParam<Uuid>,
) -> HttpResult<StatusCode> {
    state.services.formats.delete(&requester, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
