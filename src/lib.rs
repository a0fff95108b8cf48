//! # meet-ai
//!
//! Agent directory service and live call session simulator for Meet.AI.
//!
//! ## Overview
//!
//! Signed-in users keep a set of named agents (name + instructions). An
//! agent can be paired into a simulated live video call that walks through
//! `idle → connecting → live → idle` with a locally generated transcript.
//!
//! ## Quick Start
//!
//! ```rust
//! use meet_ai::{AgentDirectory, AgentInput, MemoryAgentStore, SessionUser};
//!
//! # async fn example() -> meet_ai::Result<()> {
//! let directory = AgentDirectory::new(MemoryAgentStore::new());
//! let user = SessionUser::new("user-1", "Alice", "alice@example.com");
//!
//! let agent = directory
//!     .create(&user, AgentInput::new("Cricket Coach", "Coach the nets"))
//!     .await?;
//!
//! assert_eq!(meet_ai::link::meeting_link(Some(&agent.name)), "https://stream.meet.ai/cricket-coach");
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **AgentStore** trait: storage backends (memory, JSON file)
//! - **AgentDirectory**: owner-scoped agent procedures
//! - **SessionResolver** trait: session token lookup supplied by auth
//! - **CallSession**: pure call state machine
//! - **LiveCall**: drives a session's timers and link lookup as cancellable tasks

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod directory;
pub mod dirs;
pub mod error;
pub mod link;
pub mod live;
pub mod server;
pub mod store;
pub mod types;

// Re-export core types
pub use auth::{AuthSession, MemorySessionResolver, SessionResolver};
pub use config::MeetConfig;
pub use directory::AgentDirectory;
pub use error::{MeetError, Result};
pub use link::{meeting_link, slugify, HttpLinkLookup, LocalLinkLookup, MeetingLinkLookup};
pub use live::{CallSession, CallStatus, CallTiming, LiveCall, Tone, TranscriptLine};
pub use store::{AgentStore, FileAgentStore, MemoryAgentStore};
pub use types::{Agent, AgentInput, SessionUser};
