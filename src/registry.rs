//! Spec lookup and polymorphic resolution.
//!
//! A [`Registry`] is an explicit value holding two tables: spec name →
//! type-erased [`Spec`], and native type → [`SubSpec`] (the ordered candidate
//! set used to resolve untyped data). Registration goes through `&mut self`
//! and reading through `&self`, so the borrow checker enforces the contract
//! that all registration completes before the first serialize or deserialize
//! call. Once built, a registry is immutable and safe to share across
//! threads (`&Registry` or `Arc<Registry>`).
//!
//! Re-registering a name silently replaces the earlier spec — last writer
//! wins. Treat an unintentional overwrite as a configuration error.
//!
//! ## Resolution
//!
//! Deserializing an [`Object`] node into a requested type `T` proceeds in
//! order:
//!
//! 1. The node carries a non-empty type name with a registered spec: the
//!    value is built through that spec, either directly (the spec targets
//!    `T`) or through the `SubSpec` candidate carrying that name. A name
//!    that resolves to an incompatible type fails naming both types.
//! 2. Otherwise, if `T` has a registered `SubSpec`, its candidates are tried
//!    in registration order; the first whose structural predicate matches is
//!    constructed. Construction failure after a confirmed match is a hard
//!    error, not a cue to try the next candidate. First-in-registration-order
//!    is the deliberate precedence rule when several candidates would match.
//! 3. Otherwise the call fails naming the node's type name and `T`.
//!
//! ## Example
//!
//! ```rust
//! use muesli::{Context, Record, Registry, Spec, SubSpec};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Circle { radius: f64 }
//! #[derive(Clone, Debug, PartialEq)]
//! enum Shape { Circle(Circle) }
//!
//! impl Record for Shape {
//!     fn spec_name(&self) -> &str {
//!         match self { Shape::Circle(_) => "Circle" }
//!     }
//! }
//!
//! let mut registry = Registry::new();
//! let circle = registry.register(
//!     Spec::<Circle>::builder("Circle", |data, spec, registry, _| {
//!         Ok(Circle { radius: spec.get_f64("radius", data, registry)? })
//!     })
//!     .field("radius", 0.0, |c: &Circle| c.radius)
//!     .build(),
//! );
//! registry.register_sub_spec(SubSpec::new().with(
//!     &circle,
//!     Shape::Circle,
//!     |shape| match shape { Shape::Circle(c) => Some(c) },
//! ));
//!
//! // Untyped data resolves structurally.
//! let data = muesli::parse("{ radius 2.0 }").unwrap();
//! let shape: Shape = registry
//!     .from_value(data.as_object().unwrap(), &Context::none())
//!     .unwrap();
//! assert_eq!(shape, Shape::Circle(Circle { radius: 2.0 }));
//! ```

use crate::spec::{DynSpec, Record, Spec};
use crate::{Context, Error, List, Object, Result, Value};
use indexmap::IndexMap;
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Process-wide lookup tables: name → spec and native type → sub-spec.
#[derive(Default)]
pub struct Registry {
    specs: IndexMap<String, Arc<dyn DynSpec>>,
    sub_specs: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Registry::default()
    }

    /// Registers a spec under its name, replacing any earlier spec with the
    /// same name. Returns the shared handle, which [`SubSpec::with`] takes.
    pub fn register<T: 'static>(&mut self, spec: Spec<T>) -> Arc<Spec<T>> {
        let spec = Arc::new(spec);
        self.specs
            .insert(spec.name().to_string(), spec.clone() as Arc<dyn DynSpec>);
        spec
    }

    /// Registers the sub-spec consulted when untyped data is deserialized
    /// into `T`.
    pub fn register_sub_spec<T: 'static>(&mut self, sub: SubSpec<T>) {
        self.sub_specs.insert(TypeId::of::<T>(), Box::new(sub));
    }

    /// Returns `true` if a spec is registered under the name.
    #[must_use]
    pub fn has_spec(&self, name: &str) -> bool {
        self.specs.contains_key(name)
    }

    fn sub_spec<T: 'static>(&self) -> Option<&SubSpec<T>> {
        self.sub_specs
            .get(&TypeId::of::<T>())
            .and_then(|sub| sub.downcast_ref::<SubSpec<T>>())
    }

    pub(crate) fn dyn_spec(&self, name: &str) -> Result<&Arc<dyn DynSpec>> {
        self.specs.get(name).ok_or_else(|| Error::missing_spec(name))
    }

    /// The named spec's synthesized default node.
    pub(crate) fn default_value(&self, name: &str) -> Result<Value> {
        self.dyn_spec(name)?.create_default(self)
    }

    /// Serializes a value into a [`Value`] tree. A type with a registered
    /// [`SubSpec`] dispatches through its candidates; anything else resolves
    /// through the spec registered under the value's own
    /// [`spec_name`](Record::spec_name).
    pub fn to_value<T: Record>(&self, value: &T, context: &Context) -> Result<Value> {
        if let Some(sub) = self.sub_spec::<T>() {
            return sub.serialize(value, self, context);
        }
        let spec = self.dyn_spec(value.spec_name())?;
        spec.serialize_any(value, self, context)
    }

    /// Serializes a value under an explicit spec name, overriding whatever
    /// the value would declare for itself. Handing the named spec a value of
    /// the wrong type yields [`Value::Null`].
    pub fn to_value_as<T: 'static>(
        &self,
        name: &str,
        value: &T,
        context: &Context,
    ) -> Result<Value> {
        let spec = self.dyn_spec(name)?;
        spec.serialize_any(value, self, context)
    }

    /// Deserializes an object node into the requested type. See the module
    /// docs for the resolution order.
    pub fn from_value<T: 'static>(&self, data: &Object, context: &Context) -> Result<T> {
        let name = data.type_name();
        if !name.is_empty() {
            if let Some(spec) = self.specs.get(name) {
                if spec.target_type() == TypeId::of::<T>() {
                    let boxed = spec.deserialize_any(data, self, context)?;
                    return boxed
                        .downcast::<T>()
                        .map(|value| *value)
                        .map_err(|_| Error::invalid_type(type_name::<T>(), spec.target_type_name()));
                }
                if let Some(sub) = self.sub_spec::<T>() {
                    if let Some(candidate) = sub.candidate_named(name) {
                        return (candidate.construct)(data, self, context);
                    }
                }
                return Err(Error::invalid_type(
                    type_name::<T>(),
                    spec.target_type_name(),
                ));
            }
        }
        match self.sub_spec::<T>() {
            Some(sub) => sub.resolve(data, self, context),
            None => Err(Error::unknown_type(name, type_name::<T>())),
        }
    }

    /// Deserializes every object element of a list into the requested type.
    /// Non-object elements are skipped.
    pub fn from_list<T: 'static>(&self, data: &List, context: &Context) -> Result<Vec<T>> {
        let mut out = Vec::with_capacity(data.len());
        for value in data.iter() {
            if let Value::Object(obj) = value {
                out.push(self.from_value(obj, context)?);
            }
        }
        Ok(out)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("specs", &self.specs.keys().collect::<Vec<_>>())
            .field("sub_specs", &self.sub_specs.len())
            .finish()
    }
}

struct Candidate<T> {
    spec: Arc<dyn DynSpec>,
    construct: Box<dyn Fn(&Object, &Registry, &Context) -> Result<T> + Send + Sync>,
    project: Box<dyn Fn(&T, &Registry, &Context) -> Option<Result<Value>> + Send + Sync>,
}

/// The ordered set of concrete specs registered under one supertype,
/// disambiguated by structural matching.
pub struct SubSpec<T> {
    candidates: Vec<Candidate<T>>,
}

impl<T: 'static> SubSpec<T> {
    /// Creates an empty candidate set.
    #[must_use]
    pub fn new() -> Self {
        SubSpec {
            candidates: Vec::new(),
        }
    }

    /// Appends a candidate. `wrap` lifts the concrete value into the
    /// supertype after construction; `project` recovers the concrete value
    /// for serialize-side dispatch, returning `None` when the supertype
    /// value belongs to a different candidate. Registration order is the
    /// resolution precedence.
    #[must_use]
    pub fn with<C: 'static>(
        mut self,
        spec: &Arc<Spec<C>>,
        wrap: fn(C) -> T,
        project: fn(&T) -> Option<&C>,
    ) -> Self {
        let construct_spec = Arc::clone(spec);
        let project_spec = Arc::clone(spec);
        self.candidates.push(Candidate {
            spec: Arc::clone(spec) as Arc<dyn DynSpec>,
            construct: Box::new(move |data, registry, context| {
                construct_spec
                    .deserialize(data, registry, context)
                    .map(wrap)
            }),
            project: Box::new(move |value, registry, context| {
                project(value).map(|concrete| project_spec.serialize(concrete, registry, context))
            }),
        });
        self
    }

    fn candidate_named(&self, name: &str) -> Option<&Candidate<T>> {
        self.candidates.iter().find(|c| c.spec.name() == name)
    }

    /// Resolves untyped data: the first candidate in registration order
    /// whose structural predicate matches is constructed, and its failure is
    /// surfaced rather than swallowed.
    fn resolve(
        &self,
        data: &Object,
        registry: &Registry,
        context: &Context,
    ) -> Result<T> {
        for candidate in &self.candidates {
            if candidate.spec.matches(data) {
                return (candidate.construct)(data, registry, context);
            }
        }
        Err(Error::no_match(data))
    }

    fn serialize(&self, value: &T, registry: &Registry, context: &Context) -> Result<Value> {
        for candidate in &self.candidates {
            if let Some(result) = (candidate.project)(value, registry, context) {
                return result;
            }
        }
        Err(Error::missing_spec(type_name::<T>()))
    }
}

impl<T: 'static> Default for SubSpec<T> {
    fn default() -> Self {
        SubSpec::new()
    }
}
