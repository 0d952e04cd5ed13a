//! Error types for the textual boundaries of request state.
//!
//! [`project`](crate::project) and [`matches`](crate::matches) are total and
//! never produce these. They only arise when a tag or state is read from text
//! (parsing, deserialization) or when a bare tag is converted into a state.

use thiserror::Error;

/// Errors raised when building a lifecycle tag or request state from outside data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// The name does not belong to the closed set of lifecycle tags.
    #[error("Unknown lifecycle tag: {0}")]
    UnknownTag(String),

    /// The `error` tag was given without the message that must accompany it.
    #[error("Error state requires a message")]
    MissingErrorMessage,
}
