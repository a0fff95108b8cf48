pub mod call;
pub mod link;
pub mod serve;

use clap::{Parser, Subcommand};

/// Meet.AI - Agent directory and live call simulator
#[derive(Debug, Parser)]
#[command(name = "meet-ai", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host address to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print the meeting link for an agent name
    Link {
        /// Agent display name (defaults to "agent")
        name: Option<String>,
    },

    /// Run a simulated live call and print the transcript
    Call {
        /// Agent display name
        #[arg(long)]
        agent: String,

        /// Agent instructions
        #[arg(long, default_value = "Keep the meeting on track.")]
        instructions: String,

        /// Seconds to stay live before ending the call
        #[arg(long, default_value_t = 3)]
        seconds: u64,

        /// Ask the agent for a live summary before ending
        #[arg(long)]
        insight: bool,

        /// Resolve the meeting link through a running server instead of locally
        #[arg(long)]
        lookup_url: Option<String>,
    },
}
