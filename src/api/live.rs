use axum::extract::Query;
use axum::Json;

use crate::link::{MeetingLinkQuery, MeetingLinkResponse};

/// GET /api/live/meeting-link?agent=<name> - Resolve an agent's meeting link.
///
/// Always succeeds; an absent or unusable name yields the `agent` slug and a
/// repeated `agent` parameter resolves to its first value.
pub async fn meeting_link_handler(
    Query(pairs): Query<Vec<(String, String)>>,
) -> Json<MeetingLinkResponse> {
    let query = MeetingLinkQuery::from_pairs(pairs);
    Json(MeetingLinkResponse::for_agent(query.agent.as_deref()))
}
