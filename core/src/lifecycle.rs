//! Lifecycle tags: the four phases a tracked request can be in.

use crate::error::StateError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of lifecycle markers.
///
/// A tag carries no data. It is what every [`RequestState`](crate::RequestState)
/// collapses to under [`project`](crate::project), which makes all states
/// comparable with plain equality.
///
/// # Example
///
/// ```
/// use request_state_core::LifecycleTag;
///
/// let tag: LifecycleTag = "pending".parse().unwrap();
/// assert_eq!(tag, LifecycleTag::Pending);
/// assert_eq!(tag.to_string(), "pending");
/// ```
///
/// On the wire a tag is only ever its exact lowercase name; the map form
/// serde would otherwise accept for unit variants (`{"idle": null}`) is
/// rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum LifecycleTag {
    /// The request has not been started.
    Idle,
    /// The request is in flight.
    Pending,
    /// The request completed successfully.
    Success,
    /// The request failed.
    Error,
}

impl LifecycleTag {
    /// Every tag, in lifecycle order.
    pub const ALL: [Self; 4] = [Self::Idle, Self::Pending, Self::Success, Self::Error];

    /// Stable lowercase name of the tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    /// Whether this tag is terminal for a single attempt (`Success` or `Error`).
    #[must_use]
    pub const fn is_settled(self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }
}

impl fmt::Display for LifecycleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LifecycleTag {
    type Err = StateError;

    /// Parse a tag name, ignoring ASCII case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| StateError::UnknownTag(name.to_string()))
    }
}

/// Exact-name conversion used for deserialization.
impl TryFrom<String> for LifecycleTag {
    type Error = StateError;

    fn try_from(name: String) -> Result<Self, <Self as TryFrom<String>>::Error> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == name)
            .ok_or(StateError::UnknownTag(name))
    }
}
