//! Tagged action records and the factory that mints their creators.
//!
//! An action is an immutable structured value: a unique discriminant
//! string, an optional JSON payload, an optional error flag, and optional
//! metadata. This crate builds those values and nothing else -- stores,
//! dispatchers, subscriptions, and persistence are external collaborators
//! that consume what it produces. The companion `eddy-reducers` crate
//! folds actions into state.
//!
//! # Modules
//!
//! - [`action`] -- The [`Action`] record, [`ActionType`] newtype, and
//!   metadata merge.
//! - [`creator`] -- [`ActionCreator`], the [`ErrorSpec`] error-flag rule,
//!   and the [`is_type`] convenience guard.
//! - [`factory`] -- [`ActionCreatorFactory`], [`CreatorBuilder`], and
//!   configuration.
//! - [`lifecycle`] -- The started/done/failed creator triple for
//!   asynchronous operation families.
//! - [`registry`] -- The per-factory discriminant collision set.
//!
//! # Usage
//!
//! ```
//! use eddy_actions::{is_type, ActionCreatorFactory};
//!
//! let factory = ActionCreatorFactory::with_prefix("app");
//!
//! let Ok(increment) = factory.create::<u32>("INCREMENT") else {
//!     return;
//! };
//! assert_eq!(increment.action_type().as_str(), "app/INCREMENT");
//!
//! let Ok(action) = increment.action(3) else {
//!     return;
//! };
//! assert!(is_type(&action, &increment));
//! assert_eq!(action.payload_as::<u32>(), Some(3));
//! assert!(!action.error);
//! ```

pub mod action;
pub mod creator;
pub mod factory;
pub mod lifecycle;
pub mod registry;

// Re-export primary types at crate root.
pub use action::{merge_meta, Action, ActionType, Meta};
pub use creator::{is_type, ActionCreator, ErrorSpec, ErrorTest};
pub use factory::{ActionCreatorFactory, CreatorBuilder, DuplicateCheck, FactoryOptions};
pub use lifecycle::{AsyncActionCreators, DonePayload, FailedPayload};
pub use registry::TypeRegistry;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when registering creators or constructing actions.
#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    /// A factory attempted to register a discriminant it already issued.
    #[error("duplicate action type: {action_type}")]
    DuplicateActionType {
        /// The discriminant that was already present in the registry.
        action_type: ActionType,
    },

    /// A payload could not be represented as JSON.
    #[error("failed to serialize action payload: {source}")]
    PayloadSerialization {
        /// The underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}
