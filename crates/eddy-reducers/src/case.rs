//! Ordered dispatch cases, shared by the builder and the compiled reducer.
//!
//! A case pairs the discriminant of the creator it was registered with
//! and a handler closure. Case order is dispatch priority: the first case
//! whose discriminant equals the incoming action's wins, and an action no
//! case matches passes the state through unchanged. Dispatch never fails.

use std::sync::Arc;

use tracing::trace;

use eddy_actions::{Action, ActionType};

/// A shared fold handler: previous state and the matched action in, next
/// state out.
pub(crate) type CaseHandler<InS, OutS> = Arc<dyn Fn(InS, &Action) -> OutS + Send + Sync>;

/// One ordered element of a reducer's case list.
pub(crate) struct ReducerCase<InS, OutS> {
    pub(crate) action_type: ActionType,
    pub(crate) handler: CaseHandler<InS, OutS>,
}

impl<InS, OutS> Clone for ReducerCase<InS, OutS> {
    fn clone(&self) -> Self {
        Self {
            action_type: self.action_type.clone(),
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<InS, OutS> core::fmt::Debug for ReducerCase<InS, OutS> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReducerCase")
            .field("action_type", &self.action_type)
            .finish_non_exhaustive()
    }
}

/// Scan the case list in registration order and fold the action into the
/// state.
///
/// A missing state falls back to the initial state. When neither is
/// available the result is `None` -- there is nothing to fold from. An
/// unmatched action returns the state unchanged, converted through `Into`
/// for upcasting reducers.
pub(crate) fn dispatch<InS, OutS>(
    initial_state: Option<&InS>,
    cases: &[ReducerCase<InS, OutS>],
    state: Option<InS>,
    action: &Action,
) -> Option<OutS>
where
    InS: Clone + Into<OutS>,
{
    let state = state.or_else(|| initial_state.cloned());

    for case in cases {
        if case.action_type == action.action_type {
            trace!(action_type = %action.action_type, "matched reducer case");
            return state.map(|current| (case.handler)(current, action));
        }
    }

    state.map(Into::into)
}
