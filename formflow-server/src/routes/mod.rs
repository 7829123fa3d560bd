mod completions;
mod documents;
mod formats;
mod notifications;
mod users;
mod validations;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/status", get(status))
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(formats::routes())
        .merge(users::routes())
        .merge(completions::routes())
        .merge(validations::routes())
        .merge(documents::routes())
        .merge(notifications::routes())
}

async fn status() -> Json<Value> {
    Json(json!({"message": "ok"}))
}
