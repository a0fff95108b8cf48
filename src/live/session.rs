//! Call session state machine
//!
//! `CallSession` is a plain owned value: every transition is a method that
//! mutates it and reports whether anything happened. It knows nothing about
//! timers or tasks. Delayed work (the connect delay, the duration tick, the
//! meeting link lookup) is driven from outside by `LiveCall`, which passes
//! back the epoch it captured so late callbacks can be recognised and
//! ignored.

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use crate::error::Result;
use crate::link;
use crate::types::Agent;

/// Lifecycle state of a simulated call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    #[default]
    Idle,
    Connecting,
    Live,
}

impl std::fmt::Display for CallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CallStatus::Idle => write!(f, "idle"),
            CallStatus::Connecting => write!(f, "connecting"),
            CallStatus::Live => write!(f, "live"),
        }
    }
}

/// Who a transcript line is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Agent,
    User,
    System,
}

/// One entry in the call transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptLine {
    pub speaker: String,
    pub content: String,
    pub tone: Tone,
}

impl TranscriptLine {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            speaker: "System".to_string(),
            content: content.into(),
            tone: Tone::System,
        }
    }

    pub fn agent(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            speaker: name.into(),
            content: content.into(),
            tone: Tone::Agent,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            speaker: "You".to_string(),
            content: content.into(),
            tone: Tone::User,
        }
    }
}

pub const WELCOME_LINE: &str = "Pair your agent to join a live video call and begin transcribing.";
pub const INSIGHT_PROMPT: &str = "Give me a concise status and next actions for this call.";

/// Client-local state of one simulated call
#[derive(Debug, Clone)]
pub struct CallSession {
    agents: Vec<Agent>,
    active: Option<usize>,
    status: CallStatus,
    elapsed_seconds: u64,
    transcript: Vec<TranscriptLine>,
    meeting_link: String,
    fetching_link: bool,
    live_since: Option<Instant>,
    call_epoch: u64,
    link_epoch: u64,
}

impl CallSession {
    /// Fresh session over `agents` with the first agent active
    pub fn new(agents: Vec<Agent>) -> Self {
        Self::with_preferred(agents, None)
    }

    /// Fresh session preferring `agent_id` when it is in the set
    pub fn with_preferred(agents: Vec<Agent>, agent_id: Option<&str>) -> Self {
        let active = agent_id
            .and_then(|id| agents.iter().position(|a| a.id == id))
            .or(if agents.is_empty() { None } else { Some(0) });

        let mut session = Self {
            agents,
            active,
            status: CallStatus::Idle,
            elapsed_seconds: 0,
            transcript: vec![TranscriptLine::system(WELCOME_LINE)],
            meeting_link: String::new(),
            fetching_link: false,
            live_since: None,
            call_epoch: 0,
            link_epoch: 0,
        };
        session.meeting_link = session.fallback_link();
        session
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn active_agent(&self) -> Option<&Agent> {
        self.active.map(|i| &self.agents[i])
    }

    pub fn status(&self) -> CallStatus {
        self.status
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn transcript(&self) -> &[TranscriptLine] {
        &self.transcript
    }

    pub fn meeting_link(&self) -> &str {
        &self.meeting_link
    }

    pub fn is_fetching_link(&self) -> bool {
        self.fetching_link
    }

    /// Whether a call is in progress (connecting or live)
    pub fn in_call(&self) -> bool {
        self.status != CallStatus::Idle
    }

    pub fn call_epoch(&self) -> u64 {
        self.call_epoch
    }

    pub fn link_epoch(&self) -> u64 {
        self.link_epoch
    }

    /// Link derived locally from the active agent's name
    pub fn fallback_link(&self) -> String {
        link::meeting_link(self.active_agent().map(|a| a.name.as_str()))
    }

    /// Begin a call with the active agent.
    ///
    /// Only valid from `Idle`. Appends the three joining lines synchronously;
    /// the caller schedules [`go_live`](Self::go_live) with the returned epoch.
    pub fn start(&mut self) -> Option<u64> {
        if self.status != CallStatus::Idle {
            return None;
        }
        let name = self.active_agent()?.name.clone();

        self.elapsed_seconds = 0;
        self.live_since = None;
        self.status = CallStatus::Connecting;
        self.call_epoch += 1;

        self.transcript.push(TranscriptLine::system(format!(
            "{name} is joining with OpenAI-powered voice + video on Stream."
        )));
        self.transcript.push(TranscriptLine::agent(
            &name,
            "I'm live on camera and ready to assist. What would you like me to capture?",
        ));
        self.transcript.push(TranscriptLine::system(format!(
            "Stream video bridge ready at {}. Captions and speaker tags are enabled for this session.",
            self.meeting_link
        )));

        Some(self.call_epoch)
    }

    /// Finish connecting. Ignored unless still connecting for the same call.
    pub fn go_live(&mut self, epoch: u64, now: Instant) -> bool {
        if self.status != CallStatus::Connecting || epoch != self.call_epoch {
            return false;
        }
        let Some(name) = self.active_agent().map(|a| a.name.clone()) else {
            return false;
        };

        self.status = CallStatus::Live;
        self.live_since = Some(now);
        self.elapsed_seconds = 0;
        self.transcript.push(TranscriptLine::system(format!(
            "{name} is now live on video. Audio, captions, and action items will stream automatically."
        )));
        true
    }

    /// Recompute elapsed seconds from the instant the call went live.
    ///
    /// Returns `false` once the call this epoch belongs to is no longer live,
    /// which tells the ticker to stop.
    pub fn refresh_elapsed(&mut self, epoch: u64, now: Instant) -> bool {
        if self.status != CallStatus::Live || epoch != self.call_epoch {
            return false;
        }
        if let Some(since) = self.live_since {
            self.elapsed_seconds = now.saturating_duration_since(since).as_secs();
        }
        true
    }

    /// End the current call. No-op when idle.
    pub fn end(&mut self) -> bool {
        if self.status == CallStatus::Idle {
            return false;
        }
        let name = self
            .active_agent()
            .map(|a| a.name.clone())
            .unwrap_or_else(|| "Agent".to_string());

        self.status = CallStatus::Idle;
        self.elapsed_seconds = 0;
        self.live_since = None;
        self.transcript.push(TranscriptLine::system(format!(
            "{name} ended the live video session. A recap will be queued automatically."
        )));
        true
    }

    /// Ask the active agent for a canned status recap. Only valid while live.
    pub fn request_insight(&mut self) -> bool {
        if self.status != CallStatus::Live {
            return false;
        }
        let Some(name) = self.active_agent().map(|a| a.name.clone()) else {
            return false;
        };

        self.transcript.push(TranscriptLine::user(INSIGHT_PROMPT));
        self.transcript.push(TranscriptLine::agent(
            &name,
            format!(
                "Based on the live transcript, here are the next steps: summarize decisions, assign owners, and send a recap that matches the {name} playbook."
            ),
        ));
        self.transcript.push(TranscriptLine::system(
            "Live summary delivered. The video agent will keep tracking follow-ups in real time.",
        ));
        true
    }

    /// Switch the active agent.
    ///
    /// Leaves status and transcript untouched. Resets the meeting link to the
    /// new agent's fallback and invalidates any outstanding lookup. Returns
    /// `false` for an unknown id or the agent that is already active.
    pub fn select_agent(&mut self, agent_id: &str) -> bool {
        let Some(index) = self.agents.iter().position(|a| a.id == agent_id) else {
            return false;
        };
        if self.active == Some(index) {
            return false;
        }

        self.active = Some(index);
        self.cancel_link_lookup();
        self.meeting_link = self.fallback_link();
        true
    }

    /// Mark a lookup as outstanding for the active agent.
    ///
    /// Returns the epoch to hand back to [`finish_link_lookup`](Self::finish_link_lookup)
    /// together with the name to look up.
    pub fn begin_link_lookup(&mut self) -> Option<(u64, String)> {
        let name = self.active_agent()?.name.clone();
        if name.is_empty() {
            return None;
        }
        self.link_epoch += 1;
        self.fetching_link = true;
        Some((self.link_epoch, name))
    }

    /// Apply a lookup outcome. Stale outcomes are dropped.
    pub fn finish_link_lookup(&mut self, epoch: u64, outcome: Result<String>) -> bool {
        if epoch != self.link_epoch {
            return false;
        }
        self.meeting_link = match outcome {
            Ok(link) if !link.is_empty() => link,
            _ => self.fallback_link(),
        };
        self.fetching_link = false;
        true
    }

    /// Invalidate any outstanding lookup so its result is ignored
    pub fn cancel_link_lookup(&mut self) {
        self.link_epoch += 1;
        self.fetching_link = false;
    }
}
