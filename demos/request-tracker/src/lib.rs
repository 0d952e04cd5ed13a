//! # Request Tracker
//!
//! Owns the transitions of a single request's lifecycle.
//!
//! The lifecycle types only describe and inspect state. Something has to move a
//! request from `Idle` to `Pending` and on to `Success` or `Error`; here that is
//! a pure reducer:
//!
//! ```text
//!            Start                Succeed
//!   Idle ─────────────▶ Pending ─────────────▶ Success
//!    ▲                     │                      │
//!    │                     │ Fail { message }     │ Start
//!    │ Reset               ▼                      ▼
//!    └──────────────── Error { message } ──▶ Pending (retry by caller)
//! ```
//!
//! `Reset` returns to `Idle` from anywhere. `Settle` takes the raw outcome of a
//! request and dispatches `Succeed` or `Fail`. Actions that do not apply to the
//! current state are logged and ignored.
//!
//! ## Example
//!
//! ```
//! use request_state_core::environment::SystemClock;
//! use request_tracker::{Tracker, TrackerAction, TrackerEnvironment};
//!
//! let mut tracker = Tracker::new(TrackerEnvironment::new(SystemClock));
//! tracker.send(TrackerAction::Start);
//! tracker.send(TrackerAction::Settle(Err("timeout".to_string())));
//!
//! assert_eq!(tracker.state().request.error_message(), Some("timeout"));
//! ```

use request_state_core::{
    DateTime, LifecycleTag, RequestState, SmallVec, Utc, effect::Effect, environment::Clock,
    matches, reducer::Reducer, smallvec,
};
use serde::Serialize;
use std::collections::VecDeque;

/// State tracked for one request
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TrackerState {
    /// Current lifecycle of the request
    pub request: RequestState,
    /// Number of times the request has been started since the last reset
    pub attempts: u32,
    /// When the last accepted transition happened
    pub updated_at: Option<DateTime<Utc>>,
}

/// Actions the tracker understands
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TrackerAction {
    /// The request was sent
    Start,
    /// The request completed successfully
    Succeed,
    /// The request failed
    Fail {
        /// Human-readable failure message
        message: String,
    },
    /// Raw outcome of the request, translated into `Succeed` or `Fail`
    Settle(Result<(), String>),
    /// Forget the request and return to `Idle`
    Reset,
}

impl TrackerAction {
    /// Shorthand for [`TrackerAction::Fail`]
    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        Self::Fail {
            message: message.into(),
        }
    }

    /// Stable name used in logs
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Succeed => "succeed",
            Self::Fail { .. } => "fail",
            Self::Settle(_) => "settle",
            Self::Reset => "reset",
        }
    }

    /// Lifecycle phases this action may be applied in
    const fn allowed_from(&self) -> &'static [LifecycleTag] {
        match self {
            Self::Start => &[LifecycleTag::Idle, LifecycleTag::Success, LifecycleTag::Error],
            Self::Succeed | Self::Fail { .. } | Self::Settle(_) => &[LifecycleTag::Pending],
            Self::Reset => &LifecycleTag::ALL,
        }
    }
}

/// Tracker environment
///
/// The clock stamps every accepted transition.
#[derive(Debug, Clone)]
pub struct TrackerEnvironment<C: Clock> {
    /// Clock for transition timestamps
    pub clock: C,
}

impl<C: Clock> TrackerEnvironment<C> {
    /// Create a new tracker environment with the given clock
    #[must_use]
    pub const fn new(clock: C) -> Self {
        Self { clock }
    }
}

/// Tracker reducer
///
/// Generic over the Clock type C to work with any clock implementation.
#[derive(Debug, Clone, Copy)]
pub struct TrackerReducer<C> {
    _phantom: std::marker::PhantomData<C>,
}

impl<C> TrackerReducer<C> {
    /// Create a new tracker reducer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<C> Default for TrackerReducer<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Reducer for TrackerReducer<C> {
    type State = TrackerState;
    type Action = TrackerAction;
    type Environment = TrackerEnvironment<C>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let from = state.request.tag();
        let span = tracing::debug_span!("tracker_reduce", action = action.name(), %from);
        let _enter = span.enter();

        let allowed = action
            .allowed_from()
            .iter()
            .any(|tag| matches(&state.request, *tag));
        if !allowed {
            tracing::warn!("Ignoring action not valid in current state");
            return smallvec![Effect::None];
        }

        match action {
            TrackerAction::Start => {
                state.request = RequestState::Pending;
                state.attempts = state.attempts.saturating_add(1);
                tracing::debug!(attempt = state.attempts, "Request started");
            },
            TrackerAction::Succeed => {
                state.request = RequestState::Success;
                tracing::debug!(attempt = state.attempts, "Request succeeded");
            },
            TrackerAction::Fail { message } => {
                tracing::info!(attempt = state.attempts, %message, "Request failed");
                state.request = RequestState::failed(message);
            },
            TrackerAction::Settle(outcome) => {
                let next = match outcome {
                    Ok(()) => TrackerAction::Succeed,
                    Err(message) => TrackerAction::Fail { message },
                };
                return smallvec![Effect::Dispatch(next)];
            },
            TrackerAction::Reset => {
                state.request = RequestState::Idle;
                state.attempts = 0;
                tracing::debug!("Request reset");
            },
        }

        state.updated_at = Some(env.clock.now());
        smallvec![Effect::None]
    }
}

/// Synchronous driver for a [`TrackerReducer`]
///
/// Holds the state and feeds dispatched actions back into the reducer until
/// none remain.
#[derive(Debug)]
pub struct Tracker<C: Clock> {
    state: TrackerState,
    reducer: TrackerReducer<C>,
    env: TrackerEnvironment<C>,
}

impl<C: Clock> Tracker<C> {
    /// Create a tracker for a request that has not been started
    #[must_use]
    pub fn new(env: TrackerEnvironment<C>) -> Self {
        Self::with_state(TrackerState::default(), env)
    }

    /// Create a tracker starting from `state`
    #[must_use]
    pub const fn with_state(state: TrackerState, env: TrackerEnvironment<C>) -> Self {
        Self {
            state,
            reducer: TrackerReducer::new(),
            env,
        }
    }

    /// Reduce `action` and every action it dispatches
    ///
    /// Returns the number of actions reduced.
    pub fn send(&mut self, action: TrackerAction) -> usize {
        let mut queue = VecDeque::from([action]);
        let mut reduced = 0;

        while let Some(action) = queue.pop_front() {
            let effects = self.reducer.reduce(&mut self.state, action, &self.env);
            reduced += 1;
            queue.extend(effects.iter().filter_map(Effect::dispatched).cloned());
        }

        reduced
    }

    /// Current state
    #[must_use]
    pub const fn state(&self) -> &TrackerState {
        &self.state
    }

    /// Current lifecycle tag of the request
    #[must_use]
    pub const fn lifecycle(&self) -> LifecycleTag {
        self.state.request.tag()
    }
}
