use std::sync::Arc;

use crate::config::MeetConfig;
use crate::error::Result;
use crate::link::{HttpLinkLookup, LocalLinkLookup, MeetingLinkLookup};
use crate::live::view;
use crate::live::{CallSession, LiveCall, Tone};
use crate::types::{Agent, AgentInput};

/// Options for the `call` command.
#[derive(Debug, Clone)]
pub struct CallOptions {
    pub agent: String,
    pub instructions: String,
    pub seconds: u64,
    pub insight: bool,
    pub lookup_url: Option<String>,
}

/// Execute the `call` command: run one simulated call end to end.
pub async fn execute(options: CallOptions) -> Result<()> {
    let config = MeetConfig::load()?;
    let timing = config.call_timing();

    let input = AgentInput::new(&options.agent, &options.instructions);
    input.validate()?;
    let agent = Agent::new("local", input);

    let lookup_url = config.lookup_url(options.lookup_url.as_deref());
    let lookup: Arc<dyn MeetingLinkLookup> = match lookup_url {
        Some(url) => Arc::new(HttpLinkLookup::new(url)),
        None => Arc::new(LocalLinkLookup),
    };

    let mut call = LiveCall::mount(vec![agent], None, lookup, timing).await;
    print_header(&call.snapshot().await);

    call.start().await;
    tokio::time::sleep(timing.connect_delay + timing.tick / 10).await;

    if options.insight {
        call.request_insight().await;
    }
    tokio::time::sleep(std::time::Duration::from_secs(options.seconds)).await;

    let live = call.snapshot().await;
    println!("{} | {}", view::status_badge(live.status()), view::clock_label(&live));

    call.end().await;
    let finished = call.snapshot().await;
    call.teardown();

    println!();
    print_transcript(&finished);
    Ok(())
}

fn print_header(session: &CallSession) {
    if let Some(agent) = session.active_agent() {
        println!("{}", agent.name);
        println!("{}", view::short_instructions(Some(&agent.instructions)));
    }
    println!("{}", view::link_label(session));
    println!();
}

fn print_transcript(session: &CallSession) {
    for line in session.transcript() {
        let marker = match line.tone {
            Tone::System => "*",
            Tone::Agent => ">",
            Tone::User => "<",
        };
        println!("{marker} {:<16} {}", line.speaker, line.content);
    }
}
