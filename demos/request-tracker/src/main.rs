//! Request tracker binary
//!
//! Replays a scripted request history and prints the state after each action.

use request_state_core::environment::SystemClock;
use request_state_core::{RequestState, narrow};
use request_tracker::{Tracker, TrackerAction, TrackerEnvironment};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn describe(request: &RequestState) -> String {
    if let Some(failure) = request.narrow::<narrow::Error>() {
        return format!("failed with {:?}", failure.message());
    }
    request.tag().to_string()
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "request_tracker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Request Tracker ===\n");

    let mut tracker = Tracker::new(TrackerEnvironment::new(SystemClock));
    println!("Initial: {}", describe(&tracker.state().request));

    let script = [
        TrackerAction::Start,
        TrackerAction::Settle(Err("connection timed out".to_string())),
        TrackerAction::Succeed,
        TrackerAction::Start,
        TrackerAction::Settle(Ok(())),
        TrackerAction::Reset,
    ];

    for action in script {
        println!("\n>>> Sending: {}", action.name());
        let reduced = tracker.send(action);
        println!(
            "{} ({reduced} action(s) reduced)",
            describe(&tracker.state().request)
        );
        println!("{}", serde_json::to_string(tracker.state())?);
    }

    Ok(())
}
