//! Agent persistence
//!
//! `AgentStore` is the storage abstraction the directory service talks to.
//! Every query takes the owning user id, mirroring a relational
//! `WHERE user_id = ?` filter, so ownership is enforced at the lowest layer.

use crate::error::{MeetError, Result};
use crate::types::{Agent, AgentInput};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

/// Core trait for agent storage backends
#[async_trait]
pub trait AgentStore: Send + Sync {
    /// All agents owned by `user_id`, oldest first
    async fn list(&self, user_id: &str) -> Result<Vec<Agent>>;

    /// One agent owned by `user_id`, or `None`
    async fn get(&self, user_id: &str, id: &str) -> Result<Option<Agent>>;

    /// Insert a new agent
    async fn insert(&self, agent: Agent) -> Result<Agent>;

    /// Update name/instructions of an owned agent, or `None` if no row matched
    async fn update(&self, user_id: &str, id: &str, input: AgentInput) -> Result<Option<Agent>>;

    /// Backend name (e.g., "memory", "file")
    fn name(&self) -> &str;
}

fn owned_by<'a>(agents: &'a [Agent], user_id: &'a str) -> impl Iterator<Item = &'a Agent> {
    agents.iter().filter(move |a| a.is_owned_by(user_id))
}

fn sorted(mut agents: Vec<Agent>) -> Vec<Agent> {
    agents.sort_by(|a, b| a.created_at.cmp(&b.created_at));
    agents
}

/// In-memory agent store
///
/// Lost on drop. Used by tests and by `storage = "memory"` deployments.
#[derive(Default)]
pub struct MemoryAgentStore {
    agents: RwLock<Vec<Agent>>,
}

impl MemoryAgentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AgentStore for MemoryAgentStore {
    async fn list(&self, user_id: &str) -> Result<Vec<Agent>> {
        let agents = self.agents.read().await;
        Ok(sorted(owned_by(&agents, user_id).cloned().collect()))
    }

    async fn get(&self, user_id: &str, id: &str) -> Result<Option<Agent>> {
        let agents = self.agents.read().await;
        let found = owned_by(&agents, user_id).find(|a| a.id == id).cloned();
        Ok(found)
    }

    async fn insert(&self, agent: Agent) -> Result<Agent> {
        let mut agents = self.agents.write().await;
        if agents.iter().any(|a| a.id == agent.id) {
            return Err(MeetError::Store(format!("Duplicate agent id: {}", agent.id)));
        }
        agents.push(agent.clone());
        Ok(agent)
    }

    async fn update(&self, user_id: &str, id: &str, input: AgentInput) -> Result<Option<Agent>> {
        let mut agents = self.agents.write().await;
        let Some(agent) = agents
            .iter_mut()
            .find(|a| a.id == id && a.is_owned_by(user_id))
        else {
            return Ok(None);
        };
        agent.apply(input);
        Ok(Some(agent.clone()))
    }

    fn name(&self) -> &str {
        "memory"
    }
}

/// JSON file-based agent store
///
/// Keeps all rows in memory and rewrites the file after each mutation.
/// Atomic writes via temp file + rename to prevent corruption.
pub struct FileAgentStore {
    path: PathBuf,
    agents: RwLock<Vec<Agent>>,
}

impl FileAgentStore {
    /// Open the store at `path`, loading existing rows if the file exists
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let agents = load_file(&path)?;
        tracing::debug!(path = %path.display(), count = agents.len(), "Agent store loaded");
        Ok(Self {
            path,
            agents: RwLock::new(agents),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, agents: &[Agent]) -> Result<()> {
        let json = serde_json::to_string_pretty(agents)?;
        let tmp_path = self.path.with_extension("tmp");

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                MeetError::Store(format!(
                    "Failed to create store directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        std::fs::write(&tmp_path, json).map_err(|e| {
            MeetError::Store(format!(
                "Failed to write store file {}: {}",
                tmp_path.display(),
                e
            ))
        })?;

        std::fs::rename(&tmp_path, &self.path).map_err(|e| {
            MeetError::Store(format!(
                "Failed to rename store file {} → {}: {}",
                tmp_path.display(),
                self.path.display(),
                e
            ))
        })?;

        tracing::debug!(path = %self.path.display(), count = agents.len(), "Agent store saved");
        Ok(())
    }
}

fn load_file(path: &Path) -> Result<Vec<Agent>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let json = std::fs::read_to_string(path).map_err(|e| {
        MeetError::Store(format!("Failed to read store file {}: {}", path.display(), e))
    })?;

    serde_json::from_str(&json).map_err(|e| {
        MeetError::Store(format!("Failed to parse store file {}: {}", path.display(), e))
    })
}

#[async_trait]
impl AgentStore for FileAgentStore {
    async fn list(&self, user_id: &str) -> Result<Vec<Agent>> {
        let agents = self.agents.read().await;
        Ok(sorted(owned_by(&agents, user_id).cloned().collect()))
    }

    async fn get(&self, user_id: &str, id: &str) -> Result<Option<Agent>> {
        let agents = self.agents.read().await;
        let found = owned_by(&agents, user_id).find(|a| a.id == id).cloned();
        Ok(found)
    }

    async fn insert(&self, agent: Agent) -> Result<Agent> {
        let mut agents = self.agents.write().await;
        if agents.iter().any(|a| a.id == agent.id) {
            return Err(MeetError::Store(format!("Duplicate agent id: {}", agent.id)));
        }
        agents.push(agent.clone());
        if let Err(e) = self.persist(&agents) {
            agents.pop();
            return Err(e);
        }
        Ok(agent)
    }

    async fn update(&self, user_id: &str, id: &str, input: AgentInput) -> Result<Option<Agent>> {
        let mut agents = self.agents.write().await;
        let Some(index) = agents
            .iter()
            .position(|a| a.id == id && a.is_owned_by(user_id))
        else {
            return Ok(None);
        };

        let previous = agents[index].clone();
        agents[index].apply(input);
        if let Err(e) = self.persist(&agents) {
            agents[index] = previous;
            return Err(e);
        }
        Ok(Some(agents[index].clone()))
    }

    fn name(&self) -> &str {
        "file"
    }
}
