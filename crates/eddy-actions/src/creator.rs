//! Action creators: immutable values that construct actions of one kind.
//!
//! An [`ActionCreator`] is bound to a single [`ActionType`] at registration
//! and never changes afterward. Invoking it produces a fresh [`Action`]
//! with the creator's discriminant, the (optional) payload erased to JSON,
//! metadata merged from the creator's common metadata and the per-call
//! metadata, and the error flag derived from the creator's [`ErrorSpec`].

use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::action::{merge_meta, Action, ActionType, Meta};
use crate::ActionError;

// ---------------------------------------------------------------------------
// Error rule
// ---------------------------------------------------------------------------

/// A shared predicate deciding whether a payload marks a failed action.
pub type ErrorTest = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// The rule a creator applies to derive an action's error flag.
#[derive(Clone)]
pub enum ErrorSpec {
    /// Every constructed action is flagged as an error.
    Always,
    /// No constructed action is ever flagged as an error.
    Never,
    /// The flag is decided by a predicate over the payload. Actions
    /// constructed without a payload are never flagged.
    Test(ErrorTest),
}

impl ErrorSpec {
    /// Build a predicate-based rule from a closure.
    pub fn test(test: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        Self::Test(Arc::new(test))
    }

    /// Evaluate the rule against an optional payload.
    pub fn evaluate(&self, payload: Option<&Value>) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Test(test) => payload.is_some_and(|value| test(value)),
        }
    }
}

impl From<bool> for ErrorSpec {
    fn from(always: bool) -> Self {
        if always { Self::Always } else { Self::Never }
    }
}

impl core::fmt::Debug for ErrorSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Always => f.write_str("Always"),
            Self::Never => f.write_str("Never"),
            Self::Test(_) => f.write_str("Test(..)"),
        }
    }
}

// ---------------------------------------------------------------------------
// ActionCreator
// ---------------------------------------------------------------------------

/// A value bound to one discriminant that constructs actions of that kind.
///
/// Creators are minted by an [`ActionCreatorFactory`] and are immutable
/// thereafter. They are cheap to clone and safe to share across threads
/// for any payload type `P` -- the payload type only describes what the
/// creator accepts, it is never stored.
///
/// [`ActionCreatorFactory`]: crate::ActionCreatorFactory
pub struct ActionCreator<P> {
    action_type: ActionType,
    common_meta: Option<Meta>,
    error_spec: ErrorSpec,
    _payload: PhantomData<fn() -> P>,
}

impl<P> ActionCreator<P> {
    pub(crate) const fn new(
        action_type: ActionType,
        common_meta: Option<Meta>,
        error_spec: ErrorSpec,
    ) -> Self {
        Self {
            action_type,
            common_meta,
            error_spec,
            _payload: PhantomData,
        }
    }

    /// Return the discriminant this creator is bound to.
    pub const fn action_type(&self) -> &ActionType {
        &self.action_type
    }

    /// Return whether an action carries this creator's discriminant.
    pub fn matches(&self, action: &Action) -> bool {
        action.action_type == self.action_type
    }

    /// Construct an action without a payload.
    ///
    /// A predicate-based error rule is not applied when there is no payload;
    /// only [`ErrorSpec::Always`] flags a payload-less action.
    pub fn empty(&self) -> Action {
        self.build_action(None, None)
    }

    /// Construct an action without a payload but with per-call metadata.
    pub fn empty_with_meta(&self, meta: Meta) -> Action {
        self.build_action(None, Some(meta))
    }

    fn build_action(&self, payload: Option<Value>, meta: Option<Meta>) -> Action {
        let error = self.error_spec.evaluate(payload.as_ref());
        Action {
            action_type: self.action_type.clone(),
            payload,
            error,
            meta: merge_meta(self.common_meta.as_ref(), meta),
        }
    }
}

impl<P: Serialize> ActionCreator<P> {
    /// Construct an action carrying the given payload.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::PayloadSerialization`] if the payload cannot
    /// be represented as JSON.
    pub fn action(&self, payload: P) -> Result<Action, ActionError> {
        let value = serde_json::to_value(payload)?;
        Ok(self.build_action(Some(value), None))
    }

    /// Construct an action carrying the given payload and per-call metadata.
    ///
    /// Per-call metadata overrides the creator's common metadata on key
    /// conflicts.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::PayloadSerialization`] if the payload cannot
    /// be represented as JSON.
    pub fn action_with_meta(&self, payload: P, meta: Meta) -> Result<Action, ActionError> {
        let value = serde_json::to_value(payload)?;
        Ok(self.build_action(Some(value), Some(meta)))
    }
}

impl<P> Clone for ActionCreator<P> {
    fn clone(&self) -> Self {
        Self {
            action_type: self.action_type.clone(),
            common_meta: self.common_meta.clone(),
            error_spec: self.error_spec.clone(),
            _payload: PhantomData,
        }
    }
}

/// A creator displays as its discriminant, so it can stand in for the
/// raw string in log lines and case labels.
impl<P> core::fmt::Display for ActionCreator<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.action_type)
    }
}

impl<P> core::fmt::Debug for ActionCreator<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ActionCreator")
            .field("action_type", &self.action_type)
            .field("common_meta", &self.common_meta)
            .field("error_spec", &self.error_spec)
            .finish_non_exhaustive()
    }
}

/// Return whether an action carries the given creator's discriminant.
///
/// This is a plain discriminant comparison, kept for call sites where the
/// creator is at hand. Applications that model their actions as an enum
/// get the same narrowing from exhaustive `match` on the discriminant and
/// rarely need this function.
pub fn is_type<P>(action: &Action, creator: &ActionCreator<P>) -> bool {
    creator.matches(action)
}
