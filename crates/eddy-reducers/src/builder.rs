//! The reducer builder: accumulate ordered cases, then compile.
//!
//! A [`ReducerBuilder`] has two phases. While assembling, cases are
//! appended in priority order and the builder itself is directly callable
//! through [`reduce`](ReducerBuilder::reduce) over its current case list.
//! [`build`](ReducerBuilder::build) takes an immutable snapshot and
//! produces a [`Reducer`]; cases appended afterwards never reach an
//! already-built reducer. Both phases are freely re-enterable -- a builder
//! can keep growing and be built again.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use eddy_actions::{Action, ActionCreator};

use crate::case::{dispatch, ReducerCase};
use crate::reducer::Reducer;

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Start a reducer that falls back to `initial_state` when called without
/// a state.
pub const fn reducer_with_initial_state<S>(initial_state: S) -> ReducerBuilder<S, S> {
    ReducerBuilder {
        initial_state: Some(initial_state),
        cases: Vec::new(),
    }
}

/// Start a reducer with no fallback state.
///
/// Calling the result without a state yields `None`: there is nothing to
/// fold from.
pub const fn reducer_without_initial_state<S>() -> ReducerBuilder<S, S> {
    ReducerBuilder {
        initial_state: None,
        cases: Vec::new(),
    }
}

/// Start a reducer whose handlers migrate state from `InS` to `OutS`.
///
/// Useful when a state shape evolves across migrations: every handler
/// returns the new shape, and an unmatched action carries the old state
/// across through its [`Into`] conversion.
pub const fn upcasting_reducer<InS, OutS>() -> ReducerBuilder<InS, OutS>
where
    InS: Into<OutS>,
{
    ReducerBuilder {
        initial_state: None,
        cases: Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Accumulates ordered (discriminant, handler) cases and compiles them
/// into a [`Reducer`].
///
/// # Examples
///
/// ```
/// use eddy_actions::ActionCreatorFactory;
/// use eddy_reducers::reducer_with_initial_state;
///
/// let factory = ActionCreatorFactory::new();
/// let Ok(increment) = factory.create::<u32>("INCREMENT") else {
///     return;
/// };
///
/// let counter = reducer_with_initial_state(0_u32)
///     .case(&increment, |state, by| state.saturating_add(by.unwrap_or(1)))
///     .build();
///
/// assert_eq!(counter.reduce(None, &increment.empty()), Some(1));
/// assert_eq!(counter.reduce(Some(4), &increment.empty()), Some(5));
/// ```
pub struct ReducerBuilder<InS, OutS = InS> {
    initial_state: Option<InS>,
    cases: Vec<ReducerCase<InS, OutS>>,
}

impl<InS, OutS> ReducerBuilder<InS, OutS> {
    /// Append a case whose handler receives the full matched action.
    ///
    /// The case is bound to the creator's discriminant; registration order
    /// is dispatch priority.
    #[must_use]
    pub fn case_with_action<P>(
        mut self,
        creator: &ActionCreator<P>,
        handler: impl Fn(InS, &Action) -> OutS + Send + Sync + 'static,
    ) -> Self {
        self.cases.push(ReducerCase {
            action_type: creator.action_type().clone(),
            handler: Arc::new(handler),
        });
        self
    }

    /// Append a case whose handler receives the decoded payload.
    ///
    /// The payload is `None` when the action carries none or its shape
    /// does not decode to `P` -- both are normal outcomes.
    #[must_use]
    pub fn case<P>(
        self,
        creator: &ActionCreator<P>,
        handler: impl Fn(InS, Option<P>) -> OutS + Send + Sync + 'static,
    ) -> Self
    where
        P: DeserializeOwned,
    {
        self.case_with_action(creator, move |state, action| {
            handler(state, action.payload_as::<P>())
        })
    }

    /// Fold an action into a state over the builder's current case list.
    ///
    /// The builder is directly callable while assembling; the semantics
    /// match [`Reducer::reduce`] over a snapshot taken now.
    pub fn reduce(&self, state: Option<InS>, action: &Action) -> Option<OutS>
    where
        InS: Clone + Into<OutS>,
    {
        dispatch(self.initial_state.as_ref(), &self.cases, state, action)
    }

    /// Compile the current case list into an immutable [`Reducer`].
    ///
    /// The snapshot is independent of the builder: cases appended after
    /// this call never reach the returned reducer.
    #[must_use]
    pub fn build(&self) -> Reducer<InS, OutS>
    where
        InS: Clone,
    {
        Reducer::new(self.initial_state.clone(), self.cases.clone())
    }
}

impl<InS: core::fmt::Debug, OutS> core::fmt::Debug for ReducerBuilder<InS, OutS> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReducerBuilder")
            .field("initial_state", &self.initial_state)
            .field("cases", &self.cases)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eddy_actions::{Action, ActionCreatorFactory, ActionType};

    fn counter_creators() -> Option<(ActionCreator<u32>, ActionCreator<u32>)> {
        let factory = ActionCreatorFactory::new();
        let add = factory.create::<u32>("ADD").ok()?;
        let reset = factory.create::<u32>("RESET").ok()?;
        Some((add, reset))
    }

    #[test]
    fn first_matching_case_wins() {
        let creators = counter_creators();
        assert!(creators.is_some());
        let Some((add, _)) = creators else { return };

        // Two cases for the same discriminant: only the first ever runs.
        let builder = reducer_with_initial_state(0_u32)
            .case(&add, |state, _by| state.saturating_add(1))
            .case(&add, |state, _by| state.saturating_add(100));

        assert_eq!(builder.reduce(None, &add.empty()), Some(1));
    }

    #[test]
    fn later_cases_match_their_own_discriminant() {
        let creators = counter_creators();
        assert!(creators.is_some());
        let Some((add, reset)) = creators else { return };

        let builder = reducer_with_initial_state(7_u32)
            .case(&add, |state, _by| state.saturating_add(1))
            .case(&reset, |_state, to| to.unwrap_or(0));

        let to_zero = reset.action(0).ok();
        assert!(to_zero.is_some());
        let Some(to_zero) = to_zero else { return };
        assert_eq!(builder.reduce(None, &to_zero), Some(0));
    }

    #[test]
    fn unmatched_action_passes_state_through() {
        let creators = counter_creators();
        assert!(creators.is_some());
        let Some((add, _)) = creators else { return };

        let builder = reducer_with_initial_state(0_u32)
            .case(&add, |state, _by| state.saturating_add(1));

        let other = Action::bare(ActionType::new("OTHER"));
        assert_eq!(builder.reduce(Some(5), &other), Some(5));
    }

    #[test]
    fn missing_state_falls_back_to_initial() {
        let creators = counter_creators();
        assert!(creators.is_some());
        let Some((add, _)) = creators else { return };

        let builder = reducer_with_initial_state(10_u32)
            .case(&add, |state, _by| state.saturating_add(1));

        assert_eq!(builder.reduce(None, &add.empty()), Some(11));
    }

    #[test]
    fn without_initial_state_and_no_state_yields_none() {
        let creators = counter_creators();
        assert!(creators.is_some());
        let Some((add, _)) = creators else { return };

        let builder = reducer_without_initial_state::<u32>()
            .case(&add, |state, _by| state.saturating_add(1));

        assert_eq!(builder.reduce(None, &add.empty()), None);
        assert_eq!(builder.reduce(Some(2), &add.empty()), Some(3));
    }

    #[test]
    fn case_decodes_the_payload() {
        let creators = counter_creators();
        assert!(creators.is_some());
        let Some((add, _)) = creators else { return };

        let builder = reducer_with_initial_state(0_u32)
            .case(&add, |state, by| state.saturating_add(by.unwrap_or(0)));

        let by_three = add.action(3).ok();
        assert!(by_three.is_some());
        let Some(by_three) = by_three else { return };
        assert_eq!(builder.reduce(None, &by_three), Some(3));
    }

    #[test]
    fn case_with_action_sees_the_whole_record() {
        let creators = counter_creators();
        assert!(creators.is_some());
        let Some((add, _)) = creators else { return };

        let builder = reducer_with_initial_state(0_u32).case_with_action(&add, |state, action| {
            if action.error {
                state
            } else {
                state.saturating_add(1)
            }
        });

        assert_eq!(builder.reduce(None, &add.empty()), Some(1));
    }

    #[test]
    fn built_reducer_ignores_later_cases() {
        let creators = counter_creators();
        assert!(creators.is_some());
        let Some((add, reset)) = creators else { return };

        let builder = reducer_with_initial_state(0_u32)
            .case(&add, |state, _by| state.saturating_add(1));
        let reducer = builder.build();

        // Grow the builder after the snapshot was taken.
        let builder = builder.case(&reset, |_state, _to| 99);

        let to_zero = reset.empty();
        assert_eq!(reducer.reduce(Some(5), &to_zero), Some(5));
        assert_eq!(builder.reduce(Some(5), &to_zero), Some(99));
    }

    #[test]
    fn upcasting_converts_unmatched_state() {
        let factory = ActionCreatorFactory::new();
        let widen = factory.create::<u32>("WIDEN").ok();
        assert!(widen.is_some());
        let Some(widen) = widen else { return };

        let builder = upcasting_reducer::<u32, u64>()
            .case(&widen, |state, _by| u64::from(state).saturating_add(1));

        let other = Action::bare(ActionType::new("OTHER"));
        assert_eq!(builder.reduce(Some(5), &other), Some(5_u64));
        assert_eq!(builder.reduce(Some(5), &widen.empty()), Some(6_u64));
    }
}
