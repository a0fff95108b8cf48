//! HTTP API handlers

pub mod agents;
pub mod live;
pub mod session;

use axum::extract::FromRequest;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::error::MeetError;
use crate::server::state::AppState;

/// JSON body extractor whose rejections use the API error envelope
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(MeetError))]
pub struct ApiJson<T>(pub T);

/// Build the `/api` routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/agents", get(agents::list_handler).post(agents::create_handler))
        .route(
            "/agents/:id",
            get(agents::get_handler)
                .patch(agents::update_handler)
                .put(agents::update_handler),
        )
        .route("/live/meeting-link", get(live::meeting_link_handler))
        .route("/session", get(session::handler))
}

/// GET /health - Liveness probe.
pub async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
