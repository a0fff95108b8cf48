use std::path::{Path, PathBuf};

/// Returns the base directory for meet-ai data.
///
/// Uses `$MEET_AI_HOME` if set, otherwise defaults to `~/.meet-ai`.
pub fn meet_home() -> PathBuf {
    resolve_home(std::env::var_os("MEET_AI_HOME").map(PathBuf::from), dirs::home_dir())
}

fn resolve_home(override_dir: Option<PathBuf>, user_home: Option<PathBuf>) -> PathBuf {
    override_dir.unwrap_or_else(|| user_home.unwrap_or_else(|| PathBuf::from(".")).join(".meet-ai"))
}

/// Returns the path to the user configuration file.
pub fn config_path() -> PathBuf {
    meet_home().join("config.toml")
}

/// Returns the agents file under a data directory.
pub fn agents_path(data_dir: &Path) -> PathBuf {
    data_dir.join("agents.json")
}
