//! # Request State Testing
//!
//! Testing utilities and helpers for request lifecycle state.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - Proptest strategies for tags and states
//! - Assertion helpers for lifecycle state and effects
//! - A Given-When-Then harness for reducers that own a request lifecycle
//!
//! ## Example
//!
//! ```
//! use request_state_core::{LifecycleTag, RequestState};
//! use request_state_testing::assertions::{assert_failed_with, assert_lifecycle};
//!
//! assert_lifecycle(&RequestState::Pending, LifecycleTag::Pending);
//! assert_failed_with(&RequestState::failed("timeout"), "timeout");
//! ```

use chrono::{DateTime, Utc};
use request_state_core::environment::Clock;


pub use reducer_test::ReducerTest;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use request_state_testing::mocks::FixedClock;
    /// use request_state_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Property-based testing strategies using proptest.
pub mod strategies {
    use proptest::prelude::*;
    use request_state_core::{LifecycleTag, RequestState};

    /// Any of the four lifecycle tags.
    pub fn any_tag() -> impl Strategy<Value = LifecycleTag> {
        prop::sample::select(LifecycleTag::ALL.to_vec())
    }

    /// Failure messages, including the empty string and non-ASCII text.
    pub fn error_message() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(String::new()),
            Just("timeout".to_string()),
            "[a-zA-Z0-9 :._-]{1,64}",
            any::<String>(),
        ]
    }

    /// Any request state, with the error variant drawn from [`error_message`].
    pub fn any_state() -> impl Strategy<Value = RequestState> {
        prop_oneof![
            Just(RequestState::Idle),
            Just(RequestState::Pending),
            Just(RequestState::Success),
            error_message().prop_map(RequestState::failed),
        ]
    }
}

/// Assertion helpers for lifecycle state and reducer effects
pub mod assertions {
    use request_state_core::effect::Effect;
    use request_state_core::{LifecycleTag, RequestState, matches, narrow};

    /// Assert that `state` is in the `expected` lifecycle phase
    ///
    /// # Panics
    ///
    /// Panics if `matches(state, expected)` is false.
    #[allow(clippy::panic)] // Test assertion
    #[track_caller]
    pub fn assert_lifecycle(state: &RequestState, expected: LifecycleTag) {
        assert!(
            matches(state, expected),
            "Expected request to be {expected}, but it was {state}"
        );
    }

    /// Assert that `state` failed with exactly `message`
    ///
    /// # Panics
    ///
    /// Panics if the state is not an error, or carries a different message.
    #[allow(clippy::panic)] // Test assertion
    #[track_caller]
    pub fn assert_failed_with(state: &RequestState, message: &str) {
        match state.narrow::<narrow::Error>() {
            Some(failure) => assert_eq!(
                failure.message(),
                message,
                "Request failed with an unexpected message"
            ),
            None => panic!("Expected request to have failed with {message:?}, but it was {state}"),
        }
    }

    /// Assert that there are no effects
    ///
    /// # Panics
    ///
    /// Panics if any effect does something.
    #[allow(clippy::panic)] // Test assertion
    #[track_caller]
    pub fn assert_no_effects<A: std::fmt::Debug>(effects: &[Effect<A>]) {
        assert!(
            effects.iter().all(Effect::is_none),
            "Expected no effects, but found {}: {:?}",
            effects.len(),
            effects
        );
    }

    /// Assert that the effects dispatch exactly `expected`, in order
    ///
    /// # Panics
    ///
    /// Panics if the dispatched actions differ.
    #[allow(clippy::panic)] // Test assertion
    #[track_caller]
    pub fn assert_dispatches<A: std::fmt::Debug + PartialEq>(effects: &[Effect<A>], expected: &[A]) {
        let dispatched: Vec<&A> = effects.iter().filter_map(Effect::dispatched).collect();
        let expected: Vec<&A> = expected.iter().collect();
        assert_eq!(dispatched, expected, "Unexpected dispatched actions");
    }
}

/// Install a `tracing` subscriber for tests, honouring `RUST_LOG`.
///
/// Safe to call from many tests; only the first call installs anything.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_test_writer()
        .try_init();
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};
