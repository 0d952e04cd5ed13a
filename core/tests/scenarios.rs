//! End-to-end checks of projection, matching and narrowing through the
//! public API only.

#![allow(clippy::unwrap_used)] // Tests can unwrap

use request_state_core::{LifecycleTag, RequestState, matches, narrow, project};

#[test]
fn test_project_idle() {
    assert_eq!(project(&RequestState::Idle), LifecycleTag::Idle);
}

#[test]
fn test_project_pending() {
    assert_eq!(project(&RequestState::Pending), LifecycleTag::Pending);
}

#[test]
fn test_project_success() {
    assert_eq!(project(&RequestState::Success), LifecycleTag::Success);
}

#[test]
fn test_project_error() {
    assert_eq!(project(&RequestState::failed("timeout")), LifecycleTag::Error);
}

#[test]
fn test_matches_error_and_read_message() {
    let state = RequestState::failed("timeout");
    assert!(matches(&state, LifecycleTag::Error));

    let failure = state.narrow::<narrow::Error>();
    assert_eq!(failure.map(|f| f.message()), Some("timeout"));
}

#[test]
fn test_matches_mismatch_and_unit_match() {
    assert!(!matches(&RequestState::Success, LifecycleTag::Error));
    assert!(matches(&RequestState::Pending, LifecycleTag::Pending));
}

#[test]
fn test_repeated_calls_are_stable() {
    let state = RequestState::failed("timeout");
    let first = (project(&state), matches(&state, LifecycleTag::Error));
    for _ in 0..10 {
        assert_eq!((project(&state), matches(&state, LifecycleTag::Error)), first);
    }
}

#[test]
fn test_state_read_from_json_is_classified() {
    let states: Vec<RequestState> =
        serde_json::from_str(r#"["idle", "pending", "success", {"error": "HTTP 503"}]"#)
            .unwrap();

    let tags: Vec<LifecycleTag> = states.iter().map(project).collect();
    assert_eq!(tags, LifecycleTag::ALL);
    assert_eq!(states[3].error_message(), Some("HTTP 503"));
}

#[test]
fn test_types_are_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RequestState>();
    assert_send_sync::<LifecycleTag>();
}
