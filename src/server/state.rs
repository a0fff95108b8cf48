use axum::extract::FromRef;

use crate::auth::SharedResolver;
use crate::directory::AgentDirectory;

/// Shared application state accessible to all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub directory: AgentDirectory,
    pub sessions: SharedResolver,
}

impl AppState {
    pub fn new(directory: AgentDirectory, sessions: SharedResolver) -> Self {
        Self {
            directory,
            sessions,
        }
    }
}

impl FromRef<AppState> for SharedResolver {
    fn from_ref(state: &AppState) -> Self {
        state.sessions.clone()
    }
}
