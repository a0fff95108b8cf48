use crate::config::MeetConfig;
use crate::error::Result;
use crate::server;

/// Execute the `serve` command: start the HTTP server.
pub async fn execute(host: Option<&str>, port: Option<u16>) -> Result<()> {
    let mut config = MeetConfig::load()?;

    // Override config with CLI arguments
    if let Some(host) = host {
        config.host = host.to_string();
    }
    if let Some(port) = port {
        config.port = port;
    }

    println!("Meet.AI server starting...");
    println!("Listening on http://{}:{}", config.host, config.port);
    println!("Press Ctrl+C to stop");

    server::start(config).await
}
