//! Display helpers for the live call room

use super::session::{CallSession, CallStatus};

pub const DEFAULT_INSTRUCTIONS_PREVIEW: &str = "OpenAI agent ready for live calls.";

const PREVIEW_LIMIT: usize = 140;
const PREVIEW_KEEP: usize = 137;

/// `MM:SS`, minutes zero-padded and unbounded
pub fn format_duration(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Instructions trimmed to fit the agent card
pub fn short_instructions(instructions: Option<&str>) -> String {
    match instructions {
        None | Some("") => DEFAULT_INSTRUCTIONS_PREVIEW.to_string(),
        Some(text) if text.chars().count() < PREVIEW_LIMIT => text.to_string(),
        Some(text) => {
            let kept: String = text.chars().take(PREVIEW_KEEP).collect();
            format!("{kept}...")
        }
    }
}

pub fn status_badge(status: CallStatus) -> &'static str {
    match status {
        CallStatus::Live => "Live on video",
        CallStatus::Connecting => "Connecting",
        CallStatus::Idle => "Offline",
    }
}

pub fn start_button_label(status: CallStatus) -> &'static str {
    match status {
        CallStatus::Connecting => "Connecting...",
        CallStatus::Live => "Agent is live",
        CallStatus::Idle => "Start live video",
    }
}

pub fn clock_label(session: &CallSession) -> String {
    match session.status() {
        CallStatus::Live => format!("On call {}", format_duration(session.elapsed_seconds())),
        _ => "00:00".to_string(),
    }
}

/// Meeting link line, showing progress while a lookup is outstanding
pub fn link_label(session: &CallSession) -> String {
    if session.is_fetching_link() {
        "Fetching meeting link...".to_string()
    } else {
        session.meeting_link().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Agent, AgentInput};

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "00:00");
        assert_eq!(format_duration(65), "01:05");
        assert_eq!(format_duration(6_000), "100:00");
    }

    #[test]
    fn test_short_instructions() {
        assert_eq!(short_instructions(None), DEFAULT_INSTRUCTIONS_PREVIEW);
        assert_eq!(short_instructions(Some("")), DEFAULT_INSTRUCTIONS_PREVIEW);
        assert_eq!(short_instructions(Some("Be brief.")), "Be brief.");

        let long = "x".repeat(140);
        let preview = short_instructions(Some(&long));
        assert_eq!(preview.chars().count(), 140);
        assert!(preview.ends_with("..."));

        let just_under = "y".repeat(139);
        assert_eq!(short_instructions(Some(&just_under)), just_under);
    }

    #[test]
    fn test_labels() {
        assert_eq!(status_badge(CallStatus::Idle), "Offline");
        assert_eq!(start_button_label(CallStatus::Connecting), "Connecting...");

        let session = CallSession::new(vec![Agent::new("u1", AgentInput::new("Coach", "Help"))]);
        assert_eq!(clock_label(&session), "00:00");
        assert_eq!(link_label(&session), "https://stream.meet.ai/coach");
    }
}
