//! Type-level lifecycle markers for narrowing a [`RequestState`].
//!
//! Each marker names one [`LifecycleTag`] and the shape a state is known to
//! have once it matches that tag. [`RequestState::narrow`] runs the
//! [`matches`](crate::matches) test and, when it passes, returns that shape:
//!
//! | Marker      | Tag                      | View                 |
//! |-------------|--------------------------|----------------------|
//! | [`Idle`]    | [`LifecycleTag::Idle`]    | `Idle`               |
//! | [`Pending`] | [`LifecycleTag::Pending`] | `Pending`            |
//! | [`Success`] | [`LifecycleTag::Success`] | `Success`            |
//! | [`Error`]   | [`LifecycleTag::Error`]   | `&RequestError`      |
//!
//! # Example
//!
//! ```
//! use request_state_core::{narrow, RequestState};
//!
//! fn describe(state: &RequestState) -> String {
//!     if let Some(failure) = state.narrow::<narrow::Error>() {
//!         return format!("failed: {}", failure.message());
//!     }
//!     if state.narrow::<narrow::Pending>().is_some() {
//!         return "loading".to_string();
//!     }
//!     state.tag().to_string()
//! }
//!
//! assert_eq!(describe(&RequestState::failed("timeout")), "failed: timeout");
//! assert_eq!(describe(&RequestState::Pending), "loading");
//! assert_eq!(describe(&RequestState::Success), "success");
//! ```

use crate::lifecycle::LifecycleTag;
use crate::state::{RequestError, RequestState};

mod sealed {
    pub trait Sealed {}
}

/// A lifecycle marker usable with [`RequestState::narrow`].
///
/// Sealed: the four markers in this module are the only implementations,
/// mirroring the closed set of [`LifecycleTag`]s.
pub trait Lifecycle: sealed::Sealed {
    /// The tag this marker stands for.
    const TAG: LifecycleTag;

    /// What a state matching [`Self::TAG`] is refined to.
    type View<'a>;

    /// Extract the refined view, or `None` if `state` does not have this shape.
    fn view(state: &RequestState) -> Option<Self::View<'_>>;
}

/// Marker for a request that has not been started.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Idle;

/// Marker for a request in flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pending;

/// Marker for a request that succeeded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Success;

/// Marker for a request that failed. Narrows to the [`RequestError`] payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Error;

impl sealed::Sealed for Idle {}
impl sealed::Sealed for Pending {}
impl sealed::Sealed for Success {}
impl sealed::Sealed for Error {}

impl Lifecycle for Idle {
    const TAG: LifecycleTag = LifecycleTag::Idle;
    type View<'a> = Self;

    fn view(state: &RequestState) -> Option<Self> {
        match state {
            RequestState::Idle => Some(Self),
            RequestState::Pending | RequestState::Success | RequestState::Error(_) => None,
        }
    }
}

impl Lifecycle for Pending {
    const TAG: LifecycleTag = LifecycleTag::Pending;
    type View<'a> = Self;

    fn view(state: &RequestState) -> Option<Self> {
        match state {
            RequestState::Pending => Some(Self),
            RequestState::Idle | RequestState::Success | RequestState::Error(_) => None,
        }
    }
}

impl Lifecycle for Success {
    const TAG: LifecycleTag = LifecycleTag::Success;
    type View<'a> = Self;

    fn view(state: &RequestState) -> Option<Self> {
        match state {
            RequestState::Success => Some(Self),
            RequestState::Idle | RequestState::Pending | RequestState::Error(_) => None,
        }
    }
}

impl Lifecycle for Error {
    const TAG: LifecycleTag = LifecycleTag::Error;
    type View<'a> = &'a RequestError;

    fn view(state: &RequestState) -> Option<&RequestError> {
        match state {
            RequestState::Error(error) => Some(error),
            RequestState::Idle | RequestState::Pending | RequestState::Success => None,
        }
    }
}
