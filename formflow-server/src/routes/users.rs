use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use formflow_api::{CreateUserRequest, UpdateRoleRequest};
use formflow_db::models::UserModel;
use uuid::Uuid;

use crate::error::HttpResult;
use crate::extract::{JsonBody, PathParam};
use crate::identity::CurrentUser;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/me", get(me))
        .route("/users/{id}/role", put(update_role))
}

async fn list_users(
    State(state): State<AppState>,
    CurrentUser(requester): CurrentUser,
) -> HttpResult<Json<Vec<UserModel>>> {
    Ok(Json(state.services.users.list(&requester).await?))
}

async fn me(State(state): State<AppState>, CurrentUser(requester): CurrentUser) -> HttpResult<Json<UserModel>> {
    Ok(Json(state.services.users.me(&requester).await?))
}

async fn create_user(
    State(state): State<AppState>,
    CurrentUser(requester): CurrentUser,
    JsonBody(body): JsonBody<CreateUserRequest>,
) -> HttpResult<(StatusCode, Json<UserModel>)> {
    let user = state.services.users.create(&requester, body).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn update_role(
    State(state): State<AppState>,
    CurrentUser(requester): CurrentUser,
    PathParam(id): PathParam<Uuid>,
    JsonBody(body): JsonBody<UpdateRoleRequest>,
) -> HttpResult<Json<UserModel>> {
    Ok(Json(state.services.users.update_role(&requester, id, body).await?))
}
