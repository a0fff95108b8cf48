pub mod router;
pub mod state;

use std::sync::Arc;

use crate::auth::MemorySessionResolver;
use crate::config::{MeetConfig, StorageKind};
use crate::directory::AgentDirectory;
use crate::error::{MeetError, Result};
use crate::store::{FileAgentStore, MemoryAgentStore};

/// Assemble handler state from configuration.
pub fn build_state(config: MeetConfig) -> Result<state::AppState> {
    let directory = match config.storage {
        StorageKind::Memory => AgentDirectory::new(MemoryAgentStore::new()),
        StorageKind::File => AgentDirectory::new(FileAgentStore::open(config.agents_path())?),
    };
    tracing::info!(store = directory.store_name(), "Initialized agent store");

    let sessions = MemorySessionResolver::with_sessions(
        config
            .sessions
            .iter()
            .map(|seed| (seed.token.clone(), seed.user())),
    );
    tracing::info!(count = config.sessions.len(), "Loaded session tokens");

    Ok(state::AppState::new(directory, Arc::new(sessions)))
}

/// Start the HTTP server with the given configuration.
pub async fn start(config: MeetConfig) -> Result<()> {
    let bind_addr = config.bind_address();
    let app = router::build(build_state(config)?);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| MeetError::Server(format!("Failed to bind to {bind_addr}: {e}")))?;

    tracing::info!("Server listening on {bind_addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| MeetError::Server(format!("Server error: {e}")))?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::SessionResolver;
    use crate::config::SessionSeed;

    #[tokio::test]
    async fn test_build_state_memory() {
        let config = MeetConfig {
            storage: StorageKind::Memory,
            sessions: vec![SessionSeed {
                token: "tok".into(),
                user_id: "u1".into(),
                name: "Alice".into(),
                email: "alice@example.com".into(),
            }],
            ..MeetConfig::default()
        };
        let state = build_state(config).unwrap();
        assert_eq!(state.directory.store_name(), "memory");
        assert_eq!(state.sessions.resolve("tok").await.unwrap().name, "Alice");
    }

    #[tokio::test]
    async fn test_build_state_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = MeetConfig {
            data_dir: dir.path().to_path_buf(),
            ..MeetConfig::default()
        };
        let state = build_state(config).unwrap();
        assert_eq!(state.directory.store_name(), "file");
    }
}
