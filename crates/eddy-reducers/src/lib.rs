//! Ordered first-match reducer building over tagged action records.
//!
//! A reducer is a pure fold: `(state, action) -> state`. This crate
//! assembles reducers from ordered (creator, handler) cases and compiles
//! them into immutable dispatch functions. It pairs with `eddy-actions`,
//! which mints the creators the cases are keyed on; the store or
//! dispatcher that feeds actions through a compiled reducer is an
//! external collaborator.
//!
//! # Modules
//!
//! - [`builder`] -- [`ReducerBuilder`] and the three entry points
//!   ([`reducer_with_initial_state`], [`reducer_without_initial_state`],
//!   [`upcasting_reducer`]).
//! - [`reducer`] -- The compiled [`Reducer`] snapshot.
//!
//! # Usage
//!
//! ```
//! use eddy_actions::{Action, ActionCreatorFactory, ActionType};
//! use eddy_reducers::reducer_with_initial_state;
//!
//! let factory = ActionCreatorFactory::with_prefix("app");
//! let Ok(increment) = factory.create::<u32>("INCREMENT") else {
//!     return;
//! };
//!
//! let counter = reducer_with_initial_state(0_u32)
//!     .case(&increment, |state, _by| state.saturating_add(1))
//!     .build();
//!
//! // No state yet: the initial state seeds the fold.
//! assert_eq!(counter.reduce(None, &increment.empty()), Some(1));
//!
//! // An unmatched action passes the state through unchanged.
//! let other = Action::bare(ActionType::new("other"));
//! assert_eq!(counter.reduce(Some(5), &other), Some(5));
//! ```

pub mod builder;
pub mod reducer;

mod case;

// Re-export primary types at crate root.
pub use builder::{
    reducer_with_initial_state, reducer_without_initial_state, upcasting_reducer, ReducerBuilder,
};
pub use reducer::Reducer;
