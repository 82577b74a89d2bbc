//! The per-factory collision set for issued discriminants.
//!
//! Each [`ActionCreatorFactory`] owns exactly one [`TypeRegistry`]; two
//! factories never share one, so the same discriminant can be issued by
//! independent factories without conflict. Registration is serialized
//! through a mutex so a factory shared across threads cannot miss a
//! collision.
//!
//! [`ActionCreatorFactory`]: crate::ActionCreatorFactory

use std::collections::BTreeSet;
use std::sync::{Mutex, PoisonError};

use crate::action::ActionType;
use crate::ActionError;

/// Tracks the discriminants already issued by one factory.
///
/// The registry lives as long as its owning factory. A failed registration
/// leaves the set untouched: the clashing discriminant is not re-registered
/// and previously issued creators keep working.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    registered: Mutex<BTreeSet<ActionType>>,
}

impl TypeRegistry {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            registered: Mutex::new(BTreeSet::new()),
        }
    }

    /// Record a discriminant, rejecting one that was already issued.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::DuplicateActionType`] if the discriminant is
    /// already present.
    pub fn register(&self, action_type: &ActionType) -> Result<(), ActionError> {
        let mut registered = self
            .registered
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if registered.insert(action_type.clone()) {
            Ok(())
        } else {
            Err(ActionError::DuplicateActionType {
                action_type: action_type.clone(),
            })
        }
    }

    /// Return whether a discriminant has been issued by this registry.
    pub fn contains(&self, action_type: &ActionType) -> bool {
        self.registered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(action_type)
    }

    /// Return the number of issued discriminants.
    pub fn len(&self) -> usize {
        self.registered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Return whether no discriminant has been issued yet.
    pub fn is_empty(&self) -> bool {
        self.registered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}
