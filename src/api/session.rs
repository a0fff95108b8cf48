use axum::Json;

use crate::auth::AuthSession;
use crate::types::SessionUser;

/// GET /api/session - The user attached to the current session.
pub async fn handler(AuthSession(user): AuthSession) -> Json<SessionUser> {
    Json(user)
}
