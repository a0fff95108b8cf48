use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::dirs;
use crate::error::{MeetError, Result};
use crate::live::CallTiming;
use crate::types::SessionUser;

/// Where agents are persisted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Memory,
    #[default]
    File,
}

/// A session token accepted by the server, mapped to its user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSeed {
    pub token: String,
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl SessionSeed {
    pub fn user(&self) -> SessionUser {
        SessionUser::new(&self.user_id, &self.name, &self.email)
    }
}

/// User-configurable settings for the meet-ai server and CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetConfig {
    /// Host address for the HTTP server (default: 127.0.0.1)
    #[serde(default = "default_host")]
    pub host: String,

    /// Port for the HTTP server (default: 3000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Base directory for agent storage
    #[serde(default = "dirs::meet_home")]
    pub data_dir: PathBuf,

    /// Agent storage backend
    #[serde(default)]
    pub storage: StorageKind,

    /// Delay before a connecting call goes live, in milliseconds
    #[serde(default = "default_connect_delay_ms")]
    pub connect_delay_ms: u64,

    /// Call duration refresh interval, in milliseconds
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Server origin used for meeting link lookups; unset resolves locally
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_lookup_url: Option<String>,

    /// Session tokens accepted by the server
    #[serde(default)]
    pub sessions: Vec<SessionSeed>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_connect_delay_ms() -> u64 {
    800
}

fn default_tick_ms() -> u64 {
    1000
}

impl Default for MeetConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            data_dir: dirs::meet_home(),
            storage: StorageKind::default(),
            connect_delay_ms: default_connect_delay_ms(),
            tick_ms: default_tick_ms(),
            link_lookup_url: None,
            sessions: Vec::new(),
        }
    }
}

impl MeetConfig {
    /// Load configuration from the default config file path.
    /// Returns default config if the file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&dirs::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            MeetError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        let config: MeetConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save the current configuration to the default config file path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&dirs::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.tick_ms == 0 {
            return Err(MeetError::Config("tick_ms must be greater than zero".to_string()));
        }
        if let Some(seed) = self.sessions.iter().find(|s| s.token.is_empty()) {
            return Err(MeetError::Config(format!(
                "Session for user {} has an empty token",
                seed.user_id
            )));
        }
        Ok(())
    }

    /// Returns the server bind address string (e.g., "127.0.0.1:3000").
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn call_timing(&self) -> CallTiming {
        CallTiming {
            connect_delay: Duration::from_millis(self.connect_delay_ms),
            tick: Duration::from_millis(self.tick_ms),
        }
    }

    /// Lookup origin for a call: an explicit override wins over the config value.
    pub fn lookup_url<'a>(&'a self, override_url: Option<&'a str>) -> Option<&'a str> {
        override_url.or(self.link_lookup_url.as_deref())
    }

    pub fn agents_path(&self) -> PathBuf {
        dirs::agents_path(&self.data_dir)
    }
}
