//! # Request State Core
//!
//! Lifecycle state for asynchronous requests, and the predicate that tests it.
//!
//! ## Core Concepts
//!
//! - **`LifecycleTag`**: One of `Idle`, `Pending`, `Success`, `Error`
//! - **`RequestState`**: A tag, or for failures, an error carrying its message
//! - **`project`**: `RequestState → LifecycleTag`, collapsing the error payload
//! - **`matches`**: `project(state) == expected`, the single "is it in state X" check
//! - **`narrow`**: `matches` plus access to the variant's data in one step
//!
//! Both operations are pure, total and O(1). The core never builds or mutates a
//! state on its own; that belongs to whatever tracks request progress, usually
//! a [`Reducer`](reducer::Reducer) over a state that embeds a `RequestState`.
//!
//! ## Example
//!
//! ```
//! use request_state_core::{matches, narrow, LifecycleTag, RequestState};
//!
//! let state = RequestState::failed("timeout");
//!
//! assert!(matches(&state, LifecycleTag::Error));
//! assert!(!matches(&state, LifecycleTag::Success));
//!
//! // Boolean check and access to the message in a single call
//! let failure = state.narrow::<narrow::Error>();
//! assert_eq!(failure.map(|f| f.message()), Some("timeout"));
//!
//! // Exhaustive matching works too
//! match &state {
//!     RequestState::Error(failure) => assert_eq!(failure.message(), "timeout"),
//!     RequestState::Idle | RequestState::Pending | RequestState::Success => unreachable!(),
//! }
//! ```

pub mod error;
pub mod lifecycle;
pub mod narrow;
pub mod state;

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use error::StateError;
pub use lifecycle::LifecycleTag;
pub use smallvec::{SmallVec, smallvec};
pub use state::{RequestError, RequestState, matches, project};

/// Reducer module - the collaborator side that owns transitions
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.
/// The request lifecycle itself defines no transitions; applications move a
/// [`RequestState`] forward from inside their own reducer.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The Reducer trait - core abstraction for state transitions
    ///
    /// # Type Parameters
    ///
    /// - `State`: The state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    ///
    /// # Example
    ///
    /// ```ignore
    /// impl Reducer for FetchReducer {
    ///     type State = FetchState;
    ///     type Action = FetchAction;
    ///     type Environment = FetchEnvironment;
    ///
    ///     fn reduce(
    ///         &self,
    ///         state: &mut FetchState,
    ///         action: FetchAction,
    ///         env: &FetchEnvironment,
    ///     ) -> SmallVec<[Effect<FetchAction>; 4]> {
    ///         match action {
    ///             FetchAction::Started => state.request = RequestState::Pending,
    ///             FetchAction::Failed(message) => state.request = RequestState::failed(message),
    ///         }
    ///         smallvec![Effect::None]
    ///     }
    /// }
    /// ```
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Returns
        ///
        /// Effect descriptions for the caller to interpret
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects are values, never execution. This crate does not run requests, so
/// the only thing an effect can describe is a follow-up action.
pub mod effect {
    /// Effect type - describes work for the caller to perform after a reduction
    ///
    /// `Action` is the action type fed back into the reducer.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Feed an action back into the reducer
        Dispatch(Action),
    }

    impl<Action> Effect<Action> {
        /// The action this effect feeds back into the reducer, if any
        #[must_use]
        pub const fn dispatched(&self) -> Option<&Action> {
            match self {
                Effect::None => None,
                Effect::Dispatch(action) => Some(action),
            }
        }

        /// Whether this effect does nothing
        #[must_use]
        pub const fn is_none(&self) -> bool {
            matches!(self, Effect::None)
        }
    }
}

/// Environment module - Dependency injection traits
///
/// External dependencies of a reducer are abstracted behind traits and
/// injected via the Environment parameter.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```
    /// use request_state_core::environment::Clock;
    /// use request_state_core::{DateTime, Utc};
    ///
    /// struct WallClock;
    ///
    /// impl Clock for WallClock {
    ///     fn now(&self) -> DateTime<Utc> {
    ///         Utc::now()
    ///     }
    /// }
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::effect::Effect;

    #[test]
    fn test_effect_is_none() {
        assert!(Effect::<()>::None.is_none());
        assert!(!Effect::Dispatch(()).is_none());
    }

    #[test]
    fn test_effect_dispatched() {
        assert_eq!(Effect::Dispatch(7).dispatched(), Some(&7));
        assert_eq!(Effect::<i32>::None.dispatched(), None);
    }
}
