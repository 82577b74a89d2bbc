//! The tagged action record and its building blocks.
//!
//! An [`Action`] is an immutable value carrying a discriminant
//! ([`ActionType`]), an optional JSON payload, an optional error flag, and
//! optional metadata. Actions follow the flux-standard-action wire shape:
//! the discriminant serializes as `type`, and `payload`, `error`, and `meta`
//! are omitted entirely when absent (`error` is never serialized as an
//! explicit `false`).
//!
//! Payloads are typed at the creator and erased to [`serde_json::Value`]
//! here so a single reducer can dispatch over actions with heterogeneous
//! payload types. [`Action::payload_as`] recovers the typed value.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// ActionType
// ---------------------------------------------------------------------------

/// The unique discriminant string identifying an action's logical kind.
///
/// Discriminants are minted by an [`ActionCreatorFactory`] and are unique
/// within that factory's registry. Two factories may independently issue
/// the same discriminant.
///
/// [`ActionCreatorFactory`]: crate::ActionCreatorFactory
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionType(String);

impl ActionType {
    /// Create an action type from any string-like value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Return the discriminant as a string slice.
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Consume the wrapper and return the inner [`String`].
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl core::fmt::Display for ActionType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ActionType {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for ActionType {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl PartialEq<str> for ActionType {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ActionType {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

/// Action metadata: an ordered mapping of string keys to JSON values.
pub type Meta = BTreeMap<String, Value>;

/// Merge common and per-call metadata into the metadata of one action.
///
/// The merge is deterministic and order-sensitive: on a key conflict the
/// `per_call` value wins over the `common` value. When neither side is
/// present the result is `None`, so an action constructed without any
/// metadata carries no `meta` field at all.
pub fn merge_meta(common: Option<&Meta>, per_call: Option<Meta>) -> Option<Meta> {
    match (common, per_call) {
        (None, None) => None,
        (None, Some(per_call)) => Some(per_call),
        (Some(common), None) => Some(common.clone()),
        (Some(common), Some(per_call)) => {
            let mut merged = common.clone();
            merged.extend(per_call);
            Some(merged)
        }
    }
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// An immutable tagged action record.
///
/// Actions are values, not identities: they are constructed per invocation
/// by an [`ActionCreator`] and have no further lifecycle. The discriminant
/// never changes after construction.
///
/// [`ActionCreator`]: crate::ActionCreator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The discriminant identifying this action's logical kind.
    #[serde(rename = "type")]
    pub action_type: ActionType,

    /// The type-erased payload, absent when the action carries none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,

    /// Whether this action represents a failure. Serialized only when true.
    #[serde(default, skip_serializing_if = "core::ops::Not::not")]
    pub error: bool,

    /// Metadata attached at construction, absent when none was provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl Action {
    /// Create an action carrying only a discriminant.
    ///
    /// Useful for probing a reducer with a kind it has no case for, and in
    /// tests. Actions meant for dispatch are normally built through an
    /// [`ActionCreator`](crate::ActionCreator).
    pub const fn bare(action_type: ActionType) -> Self {
        Self {
            action_type,
            payload: None,
            error: false,
            meta: None,
        }
    }

    /// Decode the payload back to a typed value.
    ///
    /// Returns `None` when the action has no payload or the payload does
    /// not match the shape of `P`. A shape mismatch is a normal outcome,
    /// not an error.
    pub fn payload_as<P: DeserializeOwned>(&self) -> Option<P> {
        self.payload
            .as_ref()
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }
}
