//! Simulated live call sessions
//!
//! - [`session`]: the pure `idle → connecting → live → idle` state machine
//! - [`controller`]: `LiveCall`, which drives timers and the link lookup
//! - [`view`]: labels and formatting for rendering a session

pub mod controller;
pub mod session;
pub mod view;

pub use controller::{CallTiming, LiveCall};
pub use session::{CallSession, CallStatus, Tone, TranscriptLine};
