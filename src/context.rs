//! Per-call options for serialization and deserialization.
//!
//! A [`Context`] wraps one options [`Object`] and exposes the flags derived
//! from it. Every serialize/deserialize entry point takes a context by
//! reference; [`Context::none`] is the no-op value for callers with nothing
//! to configure.

use crate::{Object, Value};

/// Options bag threaded through every serialize/deserialize call.
///
/// # Examples
///
/// ```rust
/// use muesli::Context;
///
/// assert!(!Context::none().skip_defaults());
/// assert!(Context::skipping_defaults().skip_defaults());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Context {
    options: Object,
}

impl Context {
    /// Option key: omit fields whose computed value equals the registered
    /// default.
    pub const SKIP_DEFAULTS: &'static str = "skip_defaults";

    /// A context carrying no options.
    #[must_use]
    pub fn none() -> Self {
        Context::default()
    }

    /// Creates a context from an options object.
    #[must_use]
    pub fn new(options: Object) -> Self {
        Context { options }
    }

    /// A context with [`SKIP_DEFAULTS`](Self::SKIP_DEFAULTS) enabled.
    #[must_use]
    pub fn skipping_defaults() -> Self {
        let mut options = Object::new();
        options.add(Self::SKIP_DEFAULTS, true);
        Context::new(options)
    }

    /// Whether fields equal to their registered default should be omitted
    /// from serialized output.
    #[must_use]
    pub fn skip_defaults(&self) -> bool {
        self.options
            .get(Self::SKIP_DEFAULTS)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// The raw options object.
    #[must_use]
    pub fn options(&self) -> &Object {
        &self.options
    }
}
