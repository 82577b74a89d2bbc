//! The compiled reducer: an immutable snapshot of a case list.
//!
//! A [`Reducer`] is produced by [`ReducerBuilder::build`] and is purely a
//! fold function: no interior mutability, no registration, no failure
//! path. An external dispatcher is expected to call
//! [`reduce`](Reducer::reduce) once per action it routes and to hold on
//! to the resulting state.
//!
//! [`ReducerBuilder::build`]: crate::ReducerBuilder::build

use eddy_actions::Action;

use crate::case::{dispatch, ReducerCase};

/// A frozen `(state, action) -> state` fold over an ordered case list.
///
/// Cheap to clone (handlers are shared) and safe to share across threads.
pub struct Reducer<InS, OutS = InS> {
    initial_state: Option<InS>,
    cases: Vec<ReducerCase<InS, OutS>>,
}

impl<InS, OutS> Reducer<InS, OutS> {
    pub(crate) const fn new(
        initial_state: Option<InS>,
        cases: Vec<ReducerCase<InS, OutS>>,
    ) -> Self {
        Self {
            initial_state,
            cases,
        }
    }

    /// Fold one action into a state.
    ///
    /// A missing state falls back to the initial state captured at build
    /// time; when neither is available the result is `None`. The first
    /// case registered for the action's discriminant computes the next
    /// state; an action no case matches returns the state unchanged.
    /// Dispatch never fails -- an unmatched action is a normal outcome.
    pub fn reduce(&self, state: Option<InS>, action: &Action) -> Option<OutS>
    where
        InS: Clone + Into<OutS>,
    {
        dispatch(self.initial_state.as_ref(), &self.cases, state, action)
    }

    /// Return the number of cases in the snapshot.
    pub const fn case_count(&self) -> usize {
        self.cases.len()
    }
}

impl<InS: Clone, OutS> Clone for Reducer<InS, OutS> {
    fn clone(&self) -> Self {
        Self {
            initial_state: self.initial_state.clone(),
            cases: self.cases.clone(),
        }
    }
}

impl<InS: core::fmt::Debug, OutS> core::fmt::Debug for Reducer<InS, OutS> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Reducer")
            .field("initial_state", &self.initial_state)
            .field("cases", &self.cases)
            .finish()
    }
}
