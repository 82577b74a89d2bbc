//! The action creator factory and its registration builder.
//!
//! A factory owns one [`TypeRegistry`] and mints [`ActionCreator`] values
//! under an optional shared prefix. Registration is the only fallible,
//! stateful step in the crate: the full discriminant is checked against
//! the registry and recorded before a creator is handed out. Everything a
//! creator does afterwards is a pure function over immutable inputs.
//!
//! Optional creator fields (common metadata, the error rule) are supplied
//! through [`CreatorBuilder`], in the same style the rest of the workspace
//! uses for multi-field construction.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, trace};

use crate::action::{ActionType, Meta};
use crate::creator::{ActionCreator, ErrorSpec, ErrorTest};
use crate::lifecycle::AsyncActionCreators;
use crate::registry::TypeRegistry;
use crate::ActionError;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// How a factory treats discriminant collisions at registration time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateCheck {
    /// Reject a discriminant that was already issued (the default).
    #[default]
    Enforce,
    /// Skip both the check and the bookkeeping. An explicit escape hatch
    /// for startup-cost-sensitive builds that accept losing duplicate
    /// detection.
    Skip,
}

/// Factory configuration.
///
/// All fields default, so hosts can embed this struct in their own config
/// files and omit what they do not care about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FactoryOptions {
    /// Prefix prepended to every issued discriminant as `{prefix}/{name}`.
    #[serde(default)]
    pub prefix: Option<String>,

    /// Collision handling at registration time.
    #[serde(default)]
    pub duplicate_check: DuplicateCheck,
}

/// The stock error-kind test: a payload marks a failure when it is a JSON
/// object carrying an `"error"` key, the shape failed lifecycle actions
/// use for their payloads.
fn payload_is_error_kind(payload: &Value) -> bool {
    payload
        .as_object()
        .is_some_and(|object| object.contains_key("error"))
}

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

/// Mints action creators under an optional shared prefix.
///
/// Each factory owns a fresh [`TypeRegistry`]; factories are fully
/// independent of one another. A factory may be shared across threads --
/// registration is serialized through the registry's mutex.
pub struct ActionCreatorFactory {
    prefix: Option<String>,
    duplicate_check: DuplicateCheck,
    default_error_test: ErrorTest,
    registry: TypeRegistry,
}

impl ActionCreatorFactory {
    /// Create a factory with no prefix and default options.
    pub fn new() -> Self {
        Self::with_options(FactoryOptions::default())
    }

    /// Create a factory whose discriminants are issued as `{prefix}/{name}`.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self::with_options(FactoryOptions {
            prefix: Some(prefix.into()),
            ..FactoryOptions::default()
        })
    }

    /// Create a factory from configuration.
    pub fn with_options(options: FactoryOptions) -> Self {
        Self {
            prefix: options.prefix,
            duplicate_check: options.duplicate_check,
            default_error_test: Arc::new(payload_is_error_kind),
            registry: TypeRegistry::new(),
        }
    }

    /// Replace the default error-kind test applied to creators registered
    /// without an explicit error rule.
    #[must_use]
    pub fn default_error_test(
        mut self,
        test: impl Fn(&Value) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.default_error_test = Arc::new(test);
        self
    }

    /// Compute the full discriminant this factory would issue for a name.
    pub fn full_type(&self, name: &str) -> ActionType {
        self.prefix.as_ref().map_or_else(
            || ActionType::new(name),
            |prefix| ActionType::new(format!("{prefix}/{name}")),
        )
    }

    /// Register a creator with default options.
    ///
    /// Shorthand for [`creator`](Self::creator) followed by
    /// [`register`](CreatorBuilder::register).
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::DuplicateActionType`] if this factory already
    /// issued the same discriminant.
    pub fn create<P>(&self, name: &str) -> Result<ActionCreator<P>, ActionError> {
        self.creator(name).register()
    }

    /// Start building a creator with optional fields.
    pub fn creator<P>(&self, name: &str) -> CreatorBuilder<'_, P> {
        CreatorBuilder::new(self, name)
    }

    /// Register the started/done/failed creator triple for one
    /// asynchronous operation family.
    ///
    /// The three creators share `common_meta` and are issued the
    /// discriminants `{full}_STARTED`, `{full}_DONE`, and `{full}_FAILED`.
    /// `started` and `done` never flag an error; `failed` always does.
    /// The group's own [`action_type`](AsyncActionCreators::action_type)
    /// is the un-suffixed family name and is not itself dispatchable.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::DuplicateActionType`] if any of the three
    /// discriminants was already issued by this factory.
    pub fn async_creators<P, R, E>(
        &self,
        name: &str,
        common_meta: Option<Meta>,
    ) -> Result<AsyncActionCreators<P, R, E>, ActionError> {
        let started = self
            .creator(&format!("{name}_STARTED"))
            .maybe_common_meta(common_meta.clone())
            .never_error()
            .register()?;
        let done = self
            .creator(&format!("{name}_DONE"))
            .maybe_common_meta(common_meta.clone())
            .never_error()
            .register()?;
        let failed = self
            .creator(&format!("{name}_FAILED"))
            .maybe_common_meta(common_meta)
            .always_error()
            .register()?;

        Ok(AsyncActionCreators::new(
            self.full_type(name),
            started,
            done,
            failed,
        ))
    }

    /// Return the registry owned by this factory.
    pub const fn registry(&self) -> &TypeRegistry {
        &self.registry
    }
}

impl Default for ActionCreatorFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for ActionCreatorFactory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ActionCreatorFactory")
            .field("prefix", &self.prefix)
            .field("duplicate_check", &self.duplicate_check)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Creator builder
// ---------------------------------------------------------------------------

/// Builder for the optional fields of a creator registration.
///
/// # Examples
///
/// ```
/// use eddy_actions::{ActionCreatorFactory, Meta};
/// use serde_json::json;
///
/// let factory = ActionCreatorFactory::with_prefix("app");
/// let creator = factory
///     .creator::<u32>("RETRY")
///     .common_meta(Meta::from([("source".to_owned(), json!("scheduler"))]))
///     .never_error()
///     .register();
///
/// assert!(creator.is_ok());
/// ```
pub struct CreatorBuilder<'f, P> {
    factory: &'f ActionCreatorFactory,
    name: String,
    common_meta: Option<Meta>,
    error_spec: Option<ErrorSpec>,
    _payload: PhantomData<fn() -> P>,
}

impl<'f, P> CreatorBuilder<'f, P> {
    fn new(factory: &'f ActionCreatorFactory, name: &str) -> Self {
        Self {
            factory,
            name: name.to_owned(),
            common_meta: None,
            error_spec: None,
            _payload: PhantomData,
        }
    }

    /// Attach metadata that every action built by the creator will carry.
    /// Per-call metadata overrides it on key conflicts.
    #[must_use]
    pub fn common_meta(mut self, meta: Meta) -> Self {
        self.common_meta = Some(meta);
        self
    }

    /// Attach common metadata only when present.
    #[must_use]
    fn maybe_common_meta(mut self, meta: Option<Meta>) -> Self {
        self.common_meta = meta;
        self
    }

    /// Set the error rule. Accepts an [`ErrorSpec`] or a plain `bool`.
    ///
    /// When no rule is set, the factory's default error-kind test decides
    /// the flag from the payload.
    #[must_use]
    pub fn error_spec(mut self, spec: impl Into<ErrorSpec>) -> Self {
        self.error_spec = Some(spec.into());
        self
    }

    /// Flag every constructed action as an error.
    #[must_use]
    pub fn always_error(self) -> Self {
        self.error_spec(ErrorSpec::Always)
    }

    /// Never flag a constructed action as an error.
    #[must_use]
    pub fn never_error(self) -> Self {
        self.error_spec(ErrorSpec::Never)
    }

    /// Decide the error flag with a predicate over the payload.
    #[must_use]
    pub fn error_when(self, test: impl Fn(&Value) -> bool + Send + Sync + 'static) -> Self {
        self.error_spec(ErrorSpec::test(test))
    }

    /// Record the full discriminant and return the creator.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::DuplicateActionType`] if the factory already
    /// issued the same discriminant, unless the factory was configured
    /// with [`DuplicateCheck::Skip`].
    pub fn register(self) -> Result<ActionCreator<P>, ActionError> {
        let full_type = self.factory.full_type(&self.name);

        match self.factory.duplicate_check {
            DuplicateCheck::Enforce => self.factory.registry.register(&full_type)?,
            DuplicateCheck::Skip => {
                trace!(action_type = %full_type, "duplicate check skipped");
            }
        }

        let error_spec = self
            .error_spec
            .unwrap_or_else(|| ErrorSpec::Test(Arc::clone(&self.factory.default_error_test)));

        debug!(action_type = %full_type, "registered action creator");
        Ok(ActionCreator::new(full_type, self.common_meta, error_spec))
    }
}

impl<P> core::fmt::Debug for CreatorBuilder<'_, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CreatorBuilder")
            .field("name", &self.name)
            .field("common_meta", &self.common_meta)
            .field("error_spec", &self.error_spec)
            .finish_non_exhaustive()
    }
}
