//! Agent directory service
//!
//! `AgentDirectory` exposes the four agent procedures (`get_many`, `get_one`,
//! `create`, `update`) on top of any `AgentStore`. Every call takes the
//! session user; nothing here can reach another user's agents.

use crate::error::{MeetError, Result};
use crate::store::AgentStore;
use crate::types::{Agent, AgentInput, SessionUser};
use std::sync::Arc;

/// High-level agent service backed by a pluggable store
#[derive(Clone)]
pub struct AgentDirectory {
    store: Arc<dyn AgentStore>,
}

impl AgentDirectory {
    pub fn new(store: impl AgentStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Get the store backend name
    pub fn store_name(&self) -> &str {
        self.store.name()
    }

    /// All agents owned by the session user
    pub async fn get_many(&self, user: &SessionUser) -> Result<Vec<Agent>> {
        self.store.list(&user.id).await
    }

    /// One agent owned by the session user
    pub async fn get_one(&self, user: &SessionUser, id: &str) -> Result<Agent> {
        self.store
            .get(&user.id, id)
            .await?
            .ok_or_else(|| MeetError::NotFound(id.to_string()))
    }

    /// Insert a new agent owned by the session user
    pub async fn create(&self, user: &SessionUser, input: AgentInput) -> Result<Agent> {
        input.validate()?;
        let agent = self.store.insert(Agent::new(&user.id, input)).await?;

        tracing::info!(
            agent_id = %agent.id,
            user_id = %user.id,
            name = %agent.name,
            "Agent created"
        );
        Ok(agent)
    }

    /// Update name and instructions of an owned agent
    pub async fn update(&self, user: &SessionUser, id: &str, input: AgentInput) -> Result<Agent> {
        input.validate()?;
        let agent = self
            .store
            .update(&user.id, id, input)
            .await?
            .ok_or_else(|| MeetError::NotFound(id.to_string()))?;

        tracing::info!(agent_id = %agent.id, user_id = %user.id, "Agent updated");
        Ok(agent)
    }
}
