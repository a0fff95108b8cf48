//! Meeting link resolution
//!
//! A meeting link is `https://stream.meet.ai/<slug>` where the slug is
//! derived from the agent's display name. The link is available in two
//! forms that must agree: [`meeting_link`] computes it synchronously, and a
//! [`MeetingLinkLookup`] fetches it from the `/api/live/meeting-link`
//! endpoint (which runs the same computation server-side).

use crate::error::{MeetError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Base URL every meeting link lives under
pub const MEETING_LINK_BASE: &str = "https://stream.meet.ai";

/// Slug used when a name yields nothing usable
pub const FALLBACK_SLUG: &str = "agent";

/// Path of the lookup endpoint
pub const MEETING_LINK_PATH: &str = "/api/live/meeting-link";

/// Lower-case `name` and collapse every run of characters outside
/// `[a-z0-9]` into a single hyphen, with no leading or trailing hyphen.
///
/// Falls back to `"agent"` for a missing name or one with no alphanumerics.
pub fn slugify(name: Option<&str>) -> String {
    let lowered = name.unwrap_or(FALLBACK_SLUG).to_lowercase();
    let mut slug = String::with_capacity(lowered.len());
    let mut pending_hyphen = false;

    for c in lowered.chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// Synchronous meeting link for an agent name
pub fn meeting_link(name: Option<&str>) -> String {
    format!("{MEETING_LINK_BASE}/{}", slugify(name))
}

/// Query accepted by the lookup endpoint
///
/// Built from raw query pairs; only the first `agent` value counts, so a
/// repeated parameter never turns into a rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeetingLinkQuery {
    pub agent: Option<String>,
}

impl MeetingLinkQuery {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let agent = pairs
            .into_iter()
            .find(|(key, _)| key == "agent")
            .map(|(_, value)| value);
        Self { agent }
    }
}

/// JSON envelope returned by the lookup endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingLinkResponse {
    pub meeting_link: String,
}

impl MeetingLinkResponse {
    pub fn for_agent(name: Option<&str>) -> Self {
        Self {
            meeting_link: meeting_link(name),
        }
    }
}

/// Request/response form of the resolver
///
/// Callers treat a successful result as the value of record and fall back
/// to [`meeting_link`] on any error.
#[async_trait]
pub trait MeetingLinkLookup: Send + Sync {
    async fn lookup(&self, agent_name: &str) -> Result<String>;
}

/// Lookup against a running meet-ai server
pub struct HttpLinkLookup {
    client: reqwest::Client,
    base_url: String,
}

impl HttpLinkLookup {
    /// `base_url` is the server origin, e.g. `http://127.0.0.1:3000`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, MEETING_LINK_PATH)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupBody {
    meeting_link: Option<String>,
}

#[async_trait]
impl MeetingLinkLookup for HttpLinkLookup {
    async fn lookup(&self, agent_name: &str) -> Result<String> {
        let response = self
            .client
            .get(self.endpoint())
            .query(&[("agent", agent_name)])
            .send()
            .await
            .map_err(|e| MeetError::LinkLookup(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MeetError::LinkLookup(format!(
                "Unable to fetch meeting link: HTTP {}",
                response.status()
            )));
        }

        let body: LookupBody = response
            .json()
            .await
            .map_err(|e| MeetError::LinkLookup(e.to_string()))?;

        body.meeting_link
            .filter(|link| !link.is_empty())
            .ok_or_else(|| MeetError::LinkLookup("response missing meetingLink".to_string()))
    }
}

/// In-process lookup that never fails
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalLinkLookup;

#[async_trait]
impl MeetingLinkLookup for LocalLinkLookup {
    async fn lookup(&self, agent_name: &str) -> Result<String> {
        Ok(meeting_link(Some(agent_name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_well_formed(slug: &str) -> bool {
        !slug.is_empty()
            && !slug.starts_with('-')
            && !slug.ends_with('-')
            && !slug.contains("--")
            && slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    }

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify(Some("Cricket Coach")), "cricket-coach");
        assert_eq!(slugify(Some("My Bot!")), "my-bot");
        assert_eq!(slugify(Some("  --Sales__Closer 3000--  ")), "sales-closer-3000");
    }

    #[test]
    fn test_slugify_fallbacks() {
        assert_eq!(slugify(None), "agent");
        assert_eq!(slugify(Some("")), "agent");
        assert_eq!(slugify(Some("!!!")), "agent");
        assert_eq!(slugify(Some("日本語")), "agent");
    }

    #[test]
    fn test_slugify_non_ascii_letters_become_separators() {
        assert_eq!(slugify(Some("Café Über")), "caf-ber");
    }

    #[test]
    fn test_slugify_shape_and_idempotence() {
        let inputs = [
            "Cricket Coach",
            "a",
            "-a-",
            "A  B\tC\nD",
            "x!y?z",
            "ÀÉÎ 42",
            "🙂 happy 🙂",
            "",
            "---",
            "Tax 2024 / Q1",
        ];
        for input in inputs {
            let slug = slugify(Some(input));
            assert!(is_well_formed(&slug), "bad slug {slug:?} for {input:?}");
            assert_eq!(slugify(Some(&slug)), slug, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_meeting_link() {
        assert_eq!(meeting_link(Some("My Bot!")), "https://stream.meet.ai/my-bot");
        assert_eq!(meeting_link(None), "https://stream.meet.ai/agent");
    }

    #[test]
    fn test_query_takes_first_agent() {
        let pairs = vec![
            ("other".to_string(), "x".to_string()),
            ("agent".to_string(), "My Bot".to_string()),
            ("agent".to_string(), "Other".to_string()),
        ];
        assert_eq!(MeetingLinkQuery::from_pairs(pairs).agent.as_deref(), Some("My Bot"));
        assert_eq!(MeetingLinkQuery::from_pairs(Vec::new()), MeetingLinkQuery::default());
    }

    #[test]
    fn test_response_envelope() {
        let json = serde_json::to_value(MeetingLinkResponse::for_agent(Some("My Bot!"))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"meetingLink": "https://stream.meet.ai/my-bot"})
        );
    }

    #[tokio::test]
    async fn test_local_lookup_matches_sync_form() {
        let link = LocalLinkLookup.lookup("Cricket Coach").await.unwrap();
        assert_eq!(link, meeting_link(Some("Cricket Coach")));
    }

    #[test]
    fn test_http_lookup_endpoint() {
        let lookup = HttpLinkLookup::new("http://127.0.0.1:3000/");
        assert_eq!(lookup.endpoint(), "http://127.0.0.1:3000/api/live/meeting-link");
    }

    #[tokio::test]
    async fn test_http_lookup_unreachable_is_error() {
        let lookup = HttpLinkLookup::new("http://127.0.0.1:9");
        let err = lookup.lookup("Cricket Coach").await.unwrap_err();
        assert!(matches!(err, MeetError::LinkLookup(_)));
    }
}
