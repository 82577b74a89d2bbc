//! Creator triples modeling asynchronous operation lifecycles.
//!
//! An asynchronous operation family is three sibling creators sharing a
//! discriminant prefix: `started` when the operation begins, `done` when it
//! succeeds, `failed` when it does not. The triple is registered in one
//! call through [`ActionCreatorFactory::async_creators`], which wires the
//! error flags: `started` and `done` never flag, `failed` always does.
//!
//! [`ActionCreatorFactory::async_creators`]: crate::ActionCreatorFactory::async_creators

use serde::{Deserialize, Serialize};

use crate::action::ActionType;
use crate::creator::ActionCreator;

// ---------------------------------------------------------------------------
// Lifecycle payloads
// ---------------------------------------------------------------------------

/// Payload of a successful completion: the parameters the operation was
/// started with and the result it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonePayload<P, R> {
    /// The parameters the operation was started with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<P>,

    /// The value the operation produced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<R>,
}

/// Payload of a failed completion: the parameters the operation was
/// started with and the error that ended it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedPayload<P, E> {
    /// The parameters the operation was started with.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<P>,

    /// The error that ended the operation.
    pub error: E,
}

// ---------------------------------------------------------------------------
// The creator triple
// ---------------------------------------------------------------------------

/// Three sibling creators modeling one asynchronous operation family.
///
/// The family's own [`action_type`](Self::action_type) identifies the
/// logical operation, not a dispatchable action kind -- only the three
/// suffixed child discriminants appear on constructed actions.
pub struct AsyncActionCreators<P, R, E> {
    action_type: ActionType,

    /// Constructs the action marking the operation's start.
    pub started: ActionCreator<P>,

    /// Constructs the action marking successful completion.
    pub done: ActionCreator<DonePayload<P, R>>,

    /// Constructs the action marking failed completion.
    pub failed: ActionCreator<FailedPayload<P, E>>,
}

impl<P, R, E> AsyncActionCreators<P, R, E> {
    pub(crate) const fn new(
        action_type: ActionType,
        started: ActionCreator<P>,
        done: ActionCreator<DonePayload<P, R>>,
        failed: ActionCreator<FailedPayload<P, E>>,
    ) -> Self {
        Self {
            action_type,
            started,
            done,
            failed,
        }
    }

    /// Return the un-suffixed family identifier.
    pub const fn action_type(&self) -> &ActionType {
        &self.action_type
    }
}

impl<P, R, E> Clone for AsyncActionCreators<P, R, E> {
    fn clone(&self) -> Self {
        Self {
            action_type: self.action_type.clone(),
            started: self.started.clone(),
            done: self.done.clone(),
            failed: self.failed.clone(),
        }
    }
}

impl<P, R, E> core::fmt::Debug for AsyncActionCreators<P, R, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AsyncActionCreators")
            .field("action_type", &self.action_type)
            .field("started", &self.started)
            .field("done", &self.done)
            .field("failed", &self.failed)
            .finish()
    }
}
