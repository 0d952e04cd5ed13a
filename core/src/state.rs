//! The request state sum type and its two core operations.
//!
//! [`project`] collapses a state to its [`LifecycleTag`]; [`matches`] compares
//! that projection against an expected tag. Everything else in this module is
//! defined in terms of those two functions.

use crate::error::StateError;
use crate::lifecycle::LifecycleTag;
use crate::narrow::Lifecycle;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Payload of a failed request: a human-readable message.
///
/// The message is always present. Holding a `RequestError` is proof that the
/// request is in the [`LifecycleTag::Error`] state.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestError {
    error: String,
}

impl RequestError {
    /// Create an error payload with the given message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }

    /// The failure message, exactly as it was supplied.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.error
    }

    /// Consume the payload and return the message.
    #[must_use]
    pub fn into_message(self) -> String {
        self.error
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.error)
    }
}

/// Lifecycle state of an asynchronous request.
///
/// Three unit variants share their identity with a [`LifecycleTag`]; the
/// fourth carries the failure message.
///
/// # Serialized form
///
/// Unit variants serialize as their bare tag name, the error variant as an
/// object with an `error` field:
///
/// ```
/// use request_state_core::RequestState;
///
/// assert_eq!(serde_json::to_string(&RequestState::Pending).unwrap(), r#""pending""#);
/// assert_eq!(
///     serde_json::to_string(&RequestState::failed("timeout")).unwrap(),
///     r#"{"error":"timeout"}"#
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Repr", into = "Repr")]
pub enum RequestState {
    /// Not started.
    #[default]
    Idle,
    /// In flight.
    Pending,
    /// Completed successfully.
    Success,
    /// Failed with a message.
    Error(RequestError),
}

/// Wire shape: either a bare tag string or an `{ "error": ... }` record.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum Repr {
    Tag(LifecycleTag),
    Failure(RequestError),
}

impl From<RequestState> for Repr {
    fn from(state: RequestState) -> Self {
        match state {
            RequestState::Idle => Self::Tag(LifecycleTag::Idle),
            RequestState::Pending => Self::Tag(LifecycleTag::Pending),
            RequestState::Success => Self::Tag(LifecycleTag::Success),
            RequestState::Error(error) => Self::Failure(error),
        }
    }
}

impl TryFrom<Repr> for RequestState {
    type Error = StateError;

    fn try_from(repr: Repr) -> Result<Self, StateError> {
        match repr {
            Repr::Tag(tag) => Self::try_from(tag),
            Repr::Failure(error) => Ok(RequestState::Error(error)),
        }
    }
}

/// A unit tag converts into its state; `Error` cannot, having no message.
impl TryFrom<LifecycleTag> for RequestState {
    type Error = StateError;

    fn try_from(tag: LifecycleTag) -> Result<Self, StateError> {
        match tag {
            LifecycleTag::Idle => Ok(Self::Idle),
            LifecycleTag::Pending => Ok(Self::Pending),
            LifecycleTag::Success => Ok(Self::Success),
            LifecycleTag::Error => Err(StateError::MissingErrorMessage),
        }
    }
}

impl From<RequestError> for RequestState {
    fn from(error: RequestError) -> Self {
        Self::Error(error)
    }
}

/// Project a state onto its lifecycle tag.
///
/// The error variant is recognised by its payload; the unit variants map to
/// the tag of the same name. Total and pure.
///
/// # Example
///
/// ```
/// use request_state_core::{project, LifecycleTag, RequestState};
///
/// assert_eq!(project(&RequestState::Idle), LifecycleTag::Idle);
/// assert_eq!(project(&RequestState::failed("timeout")), LifecycleTag::Error);
/// ```
#[must_use]
pub const fn project(state: &RequestState) -> LifecycleTag {
    match state {
        RequestState::Error(_) => LifecycleTag::Error,
        RequestState::Idle => LifecycleTag::Idle,
        RequestState::Pending => LifecycleTag::Pending,
        RequestState::Success => LifecycleTag::Success,
    }
}

/// Test whether `state` is in the `expected` lifecycle phase.
///
/// Equivalent to `project(state) == expected`. This is the one place where
/// "is this request in state X" is decided; use it (or the narrowing helpers
/// built on it) instead of matching ad hoc.
///
/// To read variant data after a successful check, use
/// [`RequestState::narrow`], which performs the same test and hands back the
/// refined view in one step.
///
/// # Example
///
/// ```
/// use request_state_core::{matches, LifecycleTag, RequestState};
///
/// let state = RequestState::failed("timeout");
/// assert!(matches(&state, LifecycleTag::Error));
/// assert!(!matches(&RequestState::Success, LifecycleTag::Error));
/// ```
#[must_use]
pub fn matches(state: &RequestState, expected: LifecycleTag) -> bool {
    project(state) == expected
}

impl RequestState {
    /// Build a failed state carrying `message`.
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Error(RequestError::new(message))
    }

    /// The lifecycle tag of this state. See [`project`].
    #[must_use]
    pub const fn tag(&self) -> LifecycleTag {
        project(self)
    }

    /// Whether this state is in the `expected` phase. See [`matches`].
    #[must_use]
    pub fn is(&self, expected: LifecycleTag) -> bool {
        matches(self, expected)
    }

    /// Test for lifecycle `M` and, on success, return the refined view.
    ///
    /// The view for [`narrow::Error`](crate::narrow::Error) is the
    /// [`RequestError`] payload, so the message is available without any
    /// further check. For the unit markers the view is the marker itself.
    ///
    /// ```
    /// use request_state_core::{narrow, RequestState};
    ///
    /// let state = RequestState::failed("timeout");
    /// if let Some(failure) = state.narrow::<narrow::Error>() {
    ///     assert_eq!(failure.message(), "timeout");
    /// }
    /// assert!(state.narrow::<narrow::Success>().is_none());
    /// ```
    #[must_use]
    pub fn narrow<M: Lifecycle>(&self) -> Option<M::View<'_>> {
        if matches(self, M::TAG) {
            M::view(self)
        } else {
            None
        }
    }

    /// `true` when the request has not been started.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.is(LifecycleTag::Idle)
    }

    /// `true` while the request is in flight.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.is(LifecycleTag::Pending)
    }

    /// `true` when the request succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.is(LifecycleTag::Success)
    }

    /// `true` when the request failed.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.is(LifecycleTag::Error)
    }

    /// `true` once the request has either succeeded or failed.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.tag().is_settled()
    }

    /// The failure payload, if the request failed.
    #[must_use]
    pub fn as_error(&self) -> Option<&RequestError> {
        self.narrow::<crate::narrow::Error>()
    }

    /// The failure message, if the request failed.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.as_error().map(RequestError::message)
    }

    /// Consume the state and return the failure payload, if any.
    #[must_use]
    pub fn into_error(self) -> Option<RequestError> {
        match self {
            Self::Error(error) => Some(error),
            Self::Idle | Self::Pending | Self::Success => None,
        }
    }
}

impl fmt::Display for RequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error(error) => write!(f, "{}: {error}", LifecycleTag::Error),
            Self::Idle | Self::Pending | Self::Success => fmt::Display::fmt(&self.tag(), f),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn all_states() -> Vec<RequestState> {
        vec![
            RequestState::Idle,
            RequestState::Pending,
            RequestState::Success,
            RequestState::failed("timeout"),
            RequestState::failed(""),
        ]
    }

    #[test]
    fn test_project_unit_variants_are_identity() {
        assert_eq!(project(&RequestState::Idle), LifecycleTag::Idle);
        assert_eq!(project(&RequestState::Pending), LifecycleTag::Pending);
        assert_eq!(project(&RequestState::Success), LifecycleTag::Success);
    }

    #[test]
    fn test_project_error_variant() {
        assert_eq!(project(&RequestState::failed("timeout")), LifecycleTag::Error);
        assert_eq!(project(&RequestState::failed("")), LifecycleTag::Error);
    }

    #[test]
    fn test_matches_agrees_with_project() {
        for state in all_states() {
            for tag in LifecycleTag::ALL {
                assert_eq!(matches(&state, tag), project(&state) == tag, "{state} / {tag}");
            }
        }
    }

    #[test]
    fn test_matches_scenarios() {
        let failed = RequestState::failed("timeout");
        assert!(matches(&failed, LifecycleTag::Error));
        assert_eq!(failed.error_message(), Some("timeout"));

        assert!(!matches(&RequestState::Success, LifecycleTag::Error));
        assert!(matches(&RequestState::Pending, LifecycleTag::Pending));
    }

    #[test]
    fn test_exactly_one_tag_matches() {
        for state in all_states() {
            let hits = LifecycleTag::ALL
                .into_iter()
                .filter(|tag| state.is(*tag))
                .count();
            assert_eq!(hits, 1, "{state}");
        }
    }

    #[test]
    fn test_convenience_predicates() {
        assert!(RequestState::Idle.is_idle());
        assert!(RequestState::Pending.is_pending());
        assert!(RequestState::Success.is_success());
        assert!(RequestState::failed("boom").is_error());

        assert!(!RequestState::Pending.is_settled());
        assert!(RequestState::Success.is_settled());
        assert!(RequestState::failed("boom").is_settled());
    }

    #[test]
    fn test_error_accessors() {
        let state = RequestState::failed("connection reset");
        assert_eq!(state.as_error(), Some(&RequestError::new("connection reset")));
        assert_eq!(
            state.into_error().map(RequestError::into_message),
            Some("connection reset".to_string())
        );

        assert_eq!(RequestState::Success.as_error(), None);
        assert_eq!(RequestState::Pending.into_error(), None);
    }

    #[test]
    fn test_default_is_idle() {
        assert_eq!(RequestState::default(), RequestState::Idle);
    }

    #[test]
    fn test_try_from_tag() {
        assert_eq!(
            RequestState::try_from(LifecycleTag::Pending),
            Ok(RequestState::Pending)
        );
        assert_eq!(
            RequestState::try_from(LifecycleTag::Error),
            Err(StateError::MissingErrorMessage)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(RequestState::Idle.to_string(), "idle");
        assert_eq!(RequestState::Success.to_string(), "success");
        assert_eq!(RequestState::failed("timeout").to_string(), "error: timeout");
    }

    #[test]
    fn test_serialize_shapes() {
        assert_eq!(serde_json::to_string(&RequestState::Idle).unwrap(), r#""idle""#);
        assert_eq!(
            serde_json::to_string(&RequestState::failed("timeout")).unwrap(),
            r#"{"error":"timeout"}"#
        );
    }

    #[test]
    fn test_deserialize_shapes() {
        let state: RequestState = serde_json::from_str(r#""success""#).unwrap();
        assert_eq!(state, RequestState::Success);

        let state: RequestState = serde_json::from_str(r#"{"error":"timeout"}"#).unwrap();
        assert_eq!(state.error_message(), Some("timeout"));
    }

    #[test]
    fn test_deserialize_rejects_bare_error_tag() {
        let result = serde_json::from_str::<RequestState>(r#""error""#);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("requires a message"), "{message}");
    }

    #[test]
    fn test_deserialize_rejects_unknown_shapes() {
        assert!(serde_json::from_str::<RequestState>(r#""loading""#).is_err());
        assert!(serde_json::from_str::<RequestState>(r#"{"error":null}"#).is_err());
        assert!(serde_json::from_str::<RequestState>("{}").is_err());
        for json in [r#"{"idle":null}"#, r#"{"pending":null}"#, r#"{"success":null}"#] {
            assert!(serde_json::from_str::<RequestState>(json).is_err(), "{json}");
        }
    }
}
