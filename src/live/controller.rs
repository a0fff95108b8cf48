//! Live call driver
//!
//! `LiveCall` owns one [`CallSession`] for the lifetime of a view and runs
//! its delayed work as tokio tasks: the connect delay, the duration ticker
//! and the meeting link lookup. All tasks share a cancellation token that
//! fires on teardown, and each re-checks its epoch under the session lock
//! before touching state.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use super::session::{CallSession, CallStatus};
use crate::link::MeetingLinkLookup;
use crate::types::Agent;

/// Timer settings for a simulated call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallTiming {
    /// Delay between `start` and going live
    pub connect_delay: Duration,
    /// Interval at which the elapsed duration is refreshed
    pub tick: Duration,
}

impl Default for CallTiming {
    fn default() -> Self {
        Self {
            connect_delay: Duration::from_millis(800),
            tick: Duration::from_secs(1),
        }
    }
}

/// A mounted live call view
pub struct LiveCall {
    session: Arc<Mutex<CallSession>>,
    lookup: Arc<dyn MeetingLinkLookup>,
    timing: CallTiming,
    shutdown: CancellationToken,
    call_task: Option<JoinHandle<()>>,
    link_task: Option<JoinHandle<()>>,
}

impl LiveCall {
    /// Mount a fresh session over `agents` and kick off the first link lookup
    pub async fn mount(
        agents: Vec<Agent>,
        preferred: Option<&str>,
        lookup: Arc<dyn MeetingLinkLookup>,
        timing: CallTiming,
    ) -> Self {
        let mut call = Self {
            session: Arc::new(Mutex::new(CallSession::with_preferred(agents, preferred))),
            lookup,
            timing,
            shutdown: CancellationToken::new(),
            call_task: None,
            link_task: None,
        };
        call.refresh_link().await;
        call
    }

    pub fn timing(&self) -> CallTiming {
        self.timing
    }

    /// Copy of the current session state
    pub async fn snapshot(&self) -> CallSession {
        self.session.lock().await.clone()
    }

    pub async fn status(&self) -> CallStatus {
        self.session.lock().await.status()
    }

    /// Start a call with the active agent. Returns `false` if not idle or no agent.
    pub async fn start(&mut self) -> bool {
        let epoch = {
            let mut session = self.session.lock().await;
            let Some(epoch) = session.start() else {
                return false;
            };
            if let Some(agent) = session.active_agent() {
                tracing::info!(agent_id = %agent.id, epoch, "Live call connecting");
            }
            epoch
        };

        if let Some(task) = self.call_task.take() {
            task.abort();
        }

        let session = self.session.clone();
        let shutdown = self.shutdown.clone();
        let timing = self.timing;

        self.call_task = Some(tokio::spawn(async move {
            tokio::select! {
                _ = shutdown.cancelled() => return,
                _ = time::sleep(timing.connect_delay) => {}
            }

            let live_since = {
                let mut session = session.lock().await;
                let now = Instant::now();
                if shutdown.is_cancelled() || !session.go_live(epoch, now) {
                    return;
                }
                tracing::info!(epoch, "Live call is live");
                now
            };

            let mut ticker = time::interval_at(live_since + timing.tick, timing.tick);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    _ = ticker.tick() => {}
                }

                let mut session = session.lock().await;
                if !session.refresh_elapsed(epoch, Instant::now()) {
                    break;
                }
            }
        }));

        true
    }

    /// End the current call. Returns `false` when already idle.
    pub async fn end(&mut self) -> bool {
        let ended = {
            let mut session = self.session.lock().await;
            session.end()
        };
        if ended {
            if let Some(task) = self.call_task.take() {
                task.abort();
            }
            tracing::info!("Live call ended");
        }
        ended
    }

    /// Ask the agent for a live summary. Returns `false` unless live.
    pub async fn request_insight(&self) -> bool {
        self.session.lock().await.request_insight()
    }

    /// Switch the active agent and re-resolve the meeting link
    pub async fn select_agent(&mut self, agent_id: &str) -> bool {
        let changed = self.session.lock().await.select_agent(agent_id);
        if changed {
            tracing::debug!(agent_id, "Active agent changed");
            self.refresh_link().await;
        }
        changed
    }

    async fn refresh_link(&mut self) {
        if let Some(task) = self.link_task.take() {
            task.abort();
        }

        let Some((epoch, name)) = self.session.lock().await.begin_link_lookup() else {
            return;
        };

        let session = self.session.clone();
        let lookup = self.lookup.clone();
        let shutdown = self.shutdown.clone();

        self.link_task = Some(tokio::spawn(async move {
            let outcome = tokio::select! {
                _ = shutdown.cancelled() => return,
                outcome = lookup.lookup(&name) => outcome,
            };

            if let Err(e) = &outcome {
                tracing::debug!(agent = %name, error = %e, "Meeting link lookup failed, using fallback");
            }

            let mut session = session.lock().await;
            if shutdown.is_cancelled() {
                return;
            }
            session.finish_link_lookup(epoch, outcome);
        }));
    }

    /// Tear the view down, cancelling every outstanding task
    pub fn teardown(mut self) {
        self.cancel_all();
    }

    fn cancel_all(&mut self) {
        self.shutdown.cancel();
        if let Some(task) = self.call_task.take() {
            task.abort();
        }
        if let Some(task) = self.link_task.take() {
            task.abort();
        }
    }

    /// Handle to the shared session, for observers that outlive a snapshot
    pub fn session(&self) -> Arc<Mutex<CallSession>> {
        self.session.clone()
    }
}

impl Drop for LiveCall {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
