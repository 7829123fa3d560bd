use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use uuid::Uuid;

use crate::error::HttpResult;
use crate::extract::PathParam;
use crate::identity::CurrentUser;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/pdf/preview-base64/{completion_id}", get(preview))
        .route("/pdf/preview-validated/{completion_id}", get(preview_validated))
        .route("/pdf/download/{completion_id}", get(download))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PreviewResponse {
    pdf_base64: String,
}

async fn preview(
    State(state): State<AppState>,
    CurrentUser(requester): CurrentUser,
    PathParam(completion_id): PathParam<Uuid>,
) -> HttpResult<Json<PreviewResponse>> {
    let pdf_base64 = state.services.documents.preview_base64(&requester, completion_id).await?;
    Ok(Json(PreviewResponse { pdf_base64 }))
}

async fn preview_validated(
    State(state): State<AppState>,
    CurrentUser(requester): CurrentUser,
    PathParam(completion_id): PathParam<Uuid>,
) -> HttpResult<Json<PreviewResponse>> {
    let pdf_base64 = state
        .services
        .documents
        .preview_validated_base64(&requester, completion_id)
        .await?;
    Ok(Json(PreviewResponse { pdf_base64 }))
}

async fn download(
    State(state): State<AppState>,
    CurrentUser(requester): CurrentUser,
    PathParam(completion_id): PathParam<Uuid>,
) -> HttpResult<Response> {
    let document = state.services.documents.download(&requester, completion_id).await?;
    let disposition = format!("attachment; filename=\"{}\"", document.filename);
    Ok((
        [
            (header::CONTENT_TYPE, document.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document.bytes,
    )
        .into_response())
}
