use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use super::ApiJson;
use crate::auth::AuthSession;
use crate::error::Result;
use crate::server::state::AppState;
use crate::types::{Agent, AgentInput};

/// GET /api/agents - Agents owned by the session user.
pub async fn list_handler(
    State(state): State<AppState>,
    AuthSession(user): AuthSession,
) -> Result<Json<Vec<Agent>>> {
    let agents = state.directory.get_many(&user).await?;
    Ok(Json(agents))
}

/// GET /api/agents/:id - One owned agent.
pub async fn get_handler(
    State(state): State<AppState>,
    AuthSession(user): AuthSession,
    Path(id): Path<String>,
) -> Result<Json<Agent>> {
    let agent = state.directory.get_one(&user, &id).await?;
    Ok(Json(agent))
}

/// POST /api/agents - Create an agent owned by the session user.
pub async fn create_handler(
    State(state): State<AppState>,
    AuthSession(user): AuthSession,
    ApiJson(input): ApiJson<AgentInput>,
) -> Result<(StatusCode, Json<Agent>)> {
    let agent = state.directory.create(&user, input).await?;
    Ok((StatusCode::CREATED, Json(agent)))
}

/// PATCH /api/agents/:id - Update name and instructions of an owned agent.
pub async fn update_handler(
    State(state): State<AppState>,
    AuthSession(user): AuthSession,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<AgentInput>,
) -> Result<Json<Agent>> {
    let agent = state.directory.update(&user, &id, input).await?;
    Ok(Json(agent))
}
