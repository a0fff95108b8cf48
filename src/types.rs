//! Core domain types for meet-ai
//!
//! All types use camelCase JSON serialization for wire compatibility.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{MeetError, Result};

/// A user-owned agent persona
///
/// Every agent belongs to exactly one user. Reads and updates are always
/// scoped by `user_id`, so an agent is only ever visible to its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    /// Unique agent identifier (agt-<uuid>)
    pub id: String,

    /// Owning user
    pub user_id: String,

    /// Display name, never empty
    pub name: String,

    /// Free-text instructions the agent follows during calls
    pub instructions: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Agent {
    /// Create a new agent owned by `user_id` with a generated id
    pub fn new(user_id: impl Into<String>, input: AgentInput) -> Self {
        let now = Utc::now();
        Self {
            id: format!("agt-{}", uuid::Uuid::new_v4()),
            user_id: user_id.into(),
            name: input.name,
            instructions: input.instructions,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply an update in place, bumping `updated_at`
    pub fn apply(&mut self, input: AgentInput) {
        self.name = input.name;
        self.instructions = input.instructions;
        self.updated_at = Utc::now();
    }

    /// Whether this agent belongs to the given user
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}

/// Fields accepted when creating or updating an agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentInput {
    pub name: String,
    pub instructions: String,
}

impl AgentInput {
    pub fn new(name: impl Into<String>, instructions: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instructions: instructions.into(),
        }
    }

    /// Reject blank names or instructions. Whitespace-only counts as blank.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(MeetError::Validation("Name is required".to_string()));
        }
        if self.instructions.trim().is_empty() {
            return Err(MeetError::Validation(
                "Instructions are required".to_string(),
            ));
        }
        Ok(())
    }
}

/// The identity attached to an authenticated request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl SessionUser {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
        }
    }
}
