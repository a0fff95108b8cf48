//! Live call lifecycle tests
//!
//! Runs `LiveCall` on a paused tokio clock so connect delays and duration
//! ticks are deterministic.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use meet_ai::live::view;
use meet_ai::{
    Agent, AgentInput, CallStatus, CallTiming, LiveCall, LocalLinkLookup, MeetingLinkLookup,
    Tone,
};
use tokio::sync::Notify;
use tokio::time::sleep;

fn agents() -> Vec<Agent> {
    vec![
        Agent::new("user-1", AgentInput::new("Cricket Coach", "Coach the nets")),
        Agent::new("user-1", AgentInput::new("Tax Helper", "File returns on time")),
    ]
}

async fn mount(agents: Vec<Agent>, lookup: Arc<dyn MeetingLinkLookup>) -> LiveCall {
    LiveCall::mount(agents, None, lookup, CallTiming::default()).await
}

/// Lookup that never completes
struct PendingLookup;

#[async_trait]
impl MeetingLinkLookup for PendingLookup {
    async fn lookup(&self, _agent_name: &str) -> meet_ai::Result<String> {
        std::future::pending().await
    }
}

/// Lookup that answers with a custom link once released
struct GatedLookup {
    release: Arc<Notify>,
}

#[async_trait]
impl MeetingLinkLookup for GatedLookup {
    async fn lookup(&self, agent_name: &str) -> meet_ai::Result<String> {
        self.release.notified().await;
        Ok(format!("https://stream.meet.ai/custom-{}", agent_name.len()))
    }
}

// ─── Call lifecycle ─────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_start_connects_then_goes_live() {
    let mut call = mount(agents(), Arc::new(LocalLinkLookup)).await;
    sleep(Duration::from_millis(1)).await;

    assert!(call.start().await);
    let connecting = call.snapshot().await;
    assert_eq!(connecting.status(), CallStatus::Connecting);
    assert_eq!(connecting.transcript().len(), 4);
    assert!(connecting.transcript()[1..]
        .iter()
        .any(|line| line.content.contains("https://stream.meet.ai/cricket-coach")));

    sleep(Duration::from_millis(801)).await;
    let live = call.snapshot().await;
    assert_eq!(live.status(), CallStatus::Live);
    assert_eq!(live.transcript().len(), 5);
    assert_eq!(live.transcript()[4].tone, Tone::System);
    assert_eq!(live.elapsed_seconds(), 0);

    sleep(Duration::from_millis(3_000)).await;
    let later = call.snapshot().await;
    assert_eq!(later.elapsed_seconds(), 3);
    assert_eq!(view::clock_label(&later), "On call 00:03");
}

#[tokio::test(start_paused = true)]
async fn test_start_twice_is_noop() {
    let mut call = mount(agents(), Arc::new(LocalLinkLookup)).await;
    assert!(call.start().await);
    assert!(!call.start().await);

    sleep(Duration::from_millis(900)).await;
    assert!(!call.start().await);
    assert_eq!(call.snapshot().await.transcript().len(), 5);
}

#[tokio::test(start_paused = true)]
async fn test_start_without_agents_is_noop() {
    let mut call = mount(Vec::new(), Arc::new(LocalLinkLookup)).await;
    assert!(!call.start().await);

    let snapshot = call.snapshot().await;
    assert_eq!(snapshot.status(), CallStatus::Idle);
    assert_eq!(snapshot.transcript().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_end_from_live_stops_ticking() {
    let mut call = mount(agents(), Arc::new(LocalLinkLookup)).await;
    call.start().await;
    sleep(Duration::from_millis(2_900)).await;
    assert_eq!(call.snapshot().await.elapsed_seconds(), 2);

    let before = call.snapshot().await.transcript().len();
    assert!(call.end().await);

    let ended = call.snapshot().await;
    assert_eq!(ended.status(), CallStatus::Idle);
    assert_eq!(ended.elapsed_seconds(), 0);
    assert_eq!(ended.transcript().len(), before + 1);

    sleep(Duration::from_secs(5)).await;
    let idle = call.snapshot().await;
    assert_eq!(idle.elapsed_seconds(), 0);
    assert_eq!(idle.transcript().len(), before + 1);
}

#[tokio::test(start_paused = true)]
async fn test_end_from_idle_is_noop() {
    let mut call = mount(agents(), Arc::new(LocalLinkLookup)).await;
    assert!(!call.end().await);
    assert_eq!(call.snapshot().await.transcript().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_end_while_connecting_cancels_go_live() {
    let mut call = mount(agents(), Arc::new(LocalLinkLookup)).await;
    call.start().await;
    sleep(Duration::from_millis(400)).await;
    assert!(call.end().await);

    sleep(Duration::from_secs(2)).await;
    let snapshot = call.snapshot().await;
    assert_eq!(snapshot.status(), CallStatus::Idle);
    assert!(!snapshot
        .transcript()
        .iter()
        .any(|line| line.content.contains("is now live on video")));
}

#[tokio::test(start_paused = true)]
async fn test_restart_after_end() {
    let mut call = mount(agents(), Arc::new(LocalLinkLookup)).await;
    call.start().await;
    sleep(Duration::from_secs(2)).await;
    call.end().await;

    assert!(call.start().await);
    sleep(Duration::from_millis(1_801)).await;
    let snapshot = call.snapshot().await;
    assert_eq!(snapshot.status(), CallStatus::Live);
    assert_eq!(snapshot.elapsed_seconds(), 1);
}

// ─── Insight ────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn test_insight_only_while_live() {
    let mut call = mount(agents(), Arc::new(LocalLinkLookup)).await;
    assert!(!call.request_insight().await);
    assert_eq!(call.snapshot().await.transcript().len(), 1);

    call.start().await;
    assert!(!call.request_insight().await);

    sleep(Duration::from_millis(801)).await;
    let before = call.snapshot().await.transcript().len();
    assert!(call.request_insight().await);

    let snapshot = call.snapshot().await;
    let added = &snapshot.transcript()[before..];
    assert_eq!(added.len(), 3);
    assert_eq!(added[0].tone, Tone::User);
    assert_eq!(added[1].tone, Tone::Agent);
    assert!(added[1].content.contains("Cricket Coach"));
}

// ─── Agent switching and meeting links ──────────────────────────

#[tokio::test(start_paused = true)]
async fn test_switch_agent_mid_call_keeps_transcript() {
    let list = agents();
    let tax_id = list[1].id.clone();
    let mut call = mount(list, Arc::new(LocalLinkLookup)).await;
    call.start().await;
    sleep(Duration::from_millis(801)).await;
    let before = call.snapshot().await.transcript().to_vec();

    assert!(call.select_agent(&tax_id).await);
    sleep(Duration::from_millis(1)).await;

    let snapshot = call.snapshot().await;
    assert_eq!(snapshot.status(), CallStatus::Live);
    assert_eq!(snapshot.transcript(), before.as_slice());
    assert_eq!(snapshot.meeting_link(), "https://stream.meet.ai/tax-helper");
}

#[tokio::test(start_paused = true)]
async fn test_pending_lookup_never_overwrites() {
    let list = agents();
    let tax_id = list[1].id.clone();
    let mut call = mount(list, Arc::new(PendingLookup)).await;

    let mounted = call.snapshot().await;
    assert!(mounted.is_fetching_link());
    assert_eq!(view::link_label(&mounted), "Fetching meeting link...");
    assert_eq!(mounted.meeting_link(), "https://stream.meet.ai/cricket-coach");

    call.select_agent(&tax_id).await;
    sleep(Duration::from_secs(10)).await;
    assert_eq!(call.snapshot().await.meeting_link(), "https://stream.meet.ai/tax-helper");
}

#[tokio::test(start_paused = true)]
async fn test_released_lookup_after_switch_is_ignored() {
    let list = agents();
    let tax_id = list[1].id.clone();
    let release = Arc::new(Notify::new());
    let mut call = mount(list, Arc::new(GatedLookup { release: release.clone() })).await;
    sleep(Duration::from_millis(1)).await;

    call.select_agent(&tax_id).await;
    sleep(Duration::from_millis(1)).await;

    // Only the lookup for the current agent is still waiting
    release.notify_waiters();
    sleep(Duration::from_millis(1)).await;

    let snapshot = call.snapshot().await;
    assert_eq!(snapshot.meeting_link(), "https://stream.meet.ai/custom-10");
    assert!(!snapshot.is_fetching_link());
}

#[tokio::test(start_paused = true)]
async fn test_teardown_stops_everything() {
    let mut call = mount(agents(), Arc::new(PendingLookup)).await;
    call.start().await;
    let session = call.session();
    call.teardown();

    sleep(Duration::from_secs(5)).await;
    let session = session.lock().await;
    assert_eq!(session.status(), CallStatus::Connecting);
    assert_eq!(session.transcript().len(), 4);
    assert_eq!(session.meeting_link(), "https://stream.meet.ai/cricket-coach");
}
