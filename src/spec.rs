//! Per-type field-accessor tables.
//!
//! A [`Spec`] maps one native type to and from [`Object`] nodes without any
//! runtime reflection. It holds an ordered table of field descriptors — key,
//! default, accessor closure — plus one constructor callback that rebuilds
//! the native value from a node. Types declare the registry key they
//! serialize under through the [`Record`] trait; nothing is ever derived from
//! a type's own name.
//!
//! ## Declaring a spec
//!
//! ```rust
//! use muesli::{Context, Registry, Record, Spec};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Engine { power: i64 }
//!
//! impl Record for Engine {
//!     fn spec_name(&self) -> &str { "Engine" }
//! }
//!
//! let mut registry = Registry::new();
//! registry.register(
//!     Spec::<Engine>::builder("Engine", |data, spec, registry, _context| {
//!         Ok(Engine { power: spec.get_i64("power", data, registry)? })
//!     })
//!     .field("power", 90, |e: &Engine| e.power)
//!     .build(),
//! );
//!
//! let engine = Engine { power: 120 };
//! let tree = registry.to_value(&engine, &Context::none()).unwrap();
//! let back: Engine = registry
//!     .from_value(tree.as_object().unwrap(), &Context::none())
//!     .unwrap();
//! assert_eq!(engine, back);
//! ```
//!
//! ## Defaults
//!
//! Each field carries a [`FieldDefault`]. A literal default serves three
//! duties: it is the fallback when the field is absent from parsed data, the
//! comparison value for default-skipping serialization, and its structural
//! kind (scalar/list/object) is what polymorphic resolution checks against.
//! A `Nested` default delegates to another registered spec, whose own
//! defaults are synthesized recursively on demand.

use crate::value::Kind;
use crate::{Context, Error, List, Object, Registry, Result, Value};
use std::any::{type_name, Any, TypeId};

/// Declares the registry key a value serializes under.
///
/// Every serializable type states its spec name explicitly; the name is a
/// stable identifier independent of the Rust type path.
pub trait Record: Any {
    /// Registry key this value serializes under.
    fn spec_name(&self) -> &str;
}

/// The registered default for one field.
pub enum FieldDefault {
    /// A literal default value.
    Value(Value),
    /// An object-kinded field with no derivable default.
    Object,
    /// A list-kinded field with no derivable default.
    List,
    /// An object-kinded field whose default is synthesized from the named
    /// spec's own field defaults.
    Nested(String),
}

impl FieldDefault {
    pub(crate) fn kind(&self) -> Kind {
        match self {
            FieldDefault::Value(value) => value.kind(),
            FieldDefault::Object | FieldDefault::Nested(_) => Kind::Object,
            FieldDefault::List => Kind::List,
        }
    }

    pub(crate) fn resolve(&self, registry: &Registry) -> Result<Value> {
        match self {
            FieldDefault::Value(value) => Ok(value.clone()),
            FieldDefault::Object => Ok(Value::Object(Object::new())),
            FieldDefault::List => Ok(Value::List(List::new())),
            FieldDefault::Nested(name) => registry.default_value(name),
        }
    }
}

type Access<T> = Box<dyn Fn(&T, &Registry, &Context) -> Result<Value> + Send + Sync>;
type Construct<T> = Box<dyn Fn(&Object, &Spec<T>, &Registry, &Context) -> Result<T> + Send + Sync>;

struct Field<T> {
    key: String,
    default: FieldDefault,
    access: Access<T>,
}

/// The field-accessor table and constructor for one native type.
pub struct Spec<T> {
    name: String,
    fields: Vec<Field<T>>,
    construct: Construct<T>,
}

impl<T: 'static> Spec<T> {
    /// Starts building a spec under the given registry name, with the
    /// constructor callback that rebuilds a `T` from an object node.
    pub fn builder<F>(name: impl Into<String>, construct: F) -> SpecBuilder<T>
    where
        F: Fn(&Object, &Spec<T>, &Registry, &Context) -> Result<T> + Send + Sync + 'static,
    {
        SpecBuilder {
            name: name.into(),
            fields: Vec::new(),
            construct: Box::new(construct),
        }
    }

    /// The globally-unique registry name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Converts a native value into an [`Object`] node named after this spec.
    ///
    /// Each registered field is computed through its accessor; under a
    /// default-skipping [`Context`] a field whose computed value equals its
    /// registered default is omitted.
    pub fn serialize(&self, value: &T, registry: &Registry, context: &Context) -> Result<Value> {
        let skip = context.skip_defaults();
        let mut root = Object::typed(self.name.clone());
        for field in &self.fields {
            let computed = (field.access)(value, registry, context)?;
            if skip && computed == field.default.resolve(registry)? {
                continue;
            }
            root.add(field.key.clone(), computed);
        }
        Ok(Value::Object(root))
    }

    /// Rebuilds a native value from an object node via the constructor
    /// callback.
    pub fn deserialize(&self, data: &Object, registry: &Registry, context: &Context) -> Result<T> {
        (self.construct)(data, self, registry, context)
    }

    /// Pulls a field from the node: the stored value when present and
    /// non-null, otherwise the field's registered default. Asking for a key
    /// this spec never registered is a configuration error.
    pub fn get(&self, key: &str, data: &Object, registry: &Registry) -> Result<Value> {
        if let Some(value) = data.get(key) {
            if !value.is_null() {
                return Ok(value.clone());
            }
        }
        let field = self
            .fields
            .iter()
            .find(|f| f.key == key)
            .ok_or_else(|| Error::custom(format!("spec '{}' has no field '{}'", self.name, key)))?;
        field.default.resolve(registry)
    }

    /// Pulls a field as an `i64`.
    pub fn get_i64(&self, key: &str, data: &Object, registry: &Registry) -> Result<i64> {
        self.get(key, data, registry)?.try_into()
    }

    /// Pulls a field as an `f64`.
    pub fn get_f64(&self, key: &str, data: &Object, registry: &Registry) -> Result<f64> {
        self.get(key, data, registry)?.try_into()
    }

    /// Pulls a field as a `bool`.
    pub fn get_bool(&self, key: &str, data: &Object, registry: &Registry) -> Result<bool> {
        self.get(key, data, registry)?.try_into()
    }

    /// Pulls a field as a `String`.
    pub fn get_string(&self, key: &str, data: &Object, registry: &Registry) -> Result<String> {
        self.get(key, data, registry)?.try_into()
    }

    /// Pulls a field as a [`List`].
    pub fn get_list(&self, key: &str, data: &Object, registry: &Registry) -> Result<List> {
        match self.get(key, data, registry)? {
            Value::List(list) => Ok(list),
            other => Err(Error::invalid_type("list", other.kind_name())),
        }
    }

    /// Pulls a field as an [`Object`].
    pub fn get_object(&self, key: &str, data: &Object, registry: &Registry) -> Result<Object> {
        match self.get(key, data, registry)? {
            Value::Object(obj) => Ok(obj),
            other => Err(Error::invalid_type("object", other.kind_name())),
        }
    }

    /// Pulls a field and deserializes it into the requested native type
    /// through the registry.
    pub fn get_record<V: 'static>(
        &self,
        key: &str,
        data: &Object,
        registry: &Registry,
        context: &Context,
    ) -> Result<V> {
        let obj = self.get_object(key, data, registry)?;
        registry.from_value(&obj, context)
    }

    /// Pulls a list field and deserializes each object element into the
    /// requested native type. Non-object elements are skipped.
    pub fn get_records<V: 'static>(
        &self,
        key: &str,
        data: &Object,
        registry: &Registry,
        context: &Context,
    ) -> Result<Vec<V>> {
        let list = self.get_list(key, data, registry)?;
        registry.from_list(&list, context)
    }
}

/// Type-erased view of a [`Spec`] stored in the registry.
pub(crate) trait DynSpec: Send + Sync {
    fn name(&self) -> &str;
    fn target_type(&self) -> TypeId;
    fn target_type_name(&self) -> &'static str;
    /// Structural-match predicate: every registered field key is present in
    /// the node with a value of the same kind as the field's default. Never
    /// fails; matching is the sole disambiguator in polymorphic resolution.
    fn matches(&self, data: &Object) -> bool;
    /// Synthesizes the default node: the spec name plus every field at its
    /// registered default, recursing through nested defaults.
    fn create_default(&self, registry: &Registry) -> Result<Value>;
    fn serialize_any(
        &self,
        value: &dyn Any,
        registry: &Registry,
        context: &Context,
    ) -> Result<Value>;
    fn deserialize_any(
        &self,
        data: &Object,
        registry: &Registry,
        context: &Context,
    ) -> Result<Box<dyn Any>>;
}

impl<T: 'static> DynSpec for Spec<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn target_type(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn target_type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn matches(&self, data: &Object) -> bool {
        self.fields.iter().all(|field| {
            data.get(&field.key)
                .is_some_and(|value| value.kind() == field.default.kind())
        })
    }

    fn create_default(&self, registry: &Registry) -> Result<Value> {
        let mut root = Object::typed(self.name.clone());
        for field in &self.fields {
            root.add(field.key.clone(), field.default.resolve(registry)?);
        }
        Ok(Value::Object(root))
    }

    fn serialize_any(
        &self,
        value: &dyn Any,
        registry: &Registry,
        context: &Context,
    ) -> Result<Value> {
        match value.downcast_ref::<T>() {
            Some(value) => self.serialize(value, registry, context),
            None => Ok(Value::Null),
        }
    }

    fn deserialize_any(
        &self,
        data: &Object,
        registry: &Registry,
        context: &Context,
    ) -> Result<Box<dyn Any>> {
        let value = self.deserialize(data, registry, context)?;
        Ok(Box::new(value))
    }
}

/// Builder assembling a [`Spec`]'s ordered field table.
pub struct SpecBuilder<T> {
    name: String,
    fields: Vec<Field<T>>,
    construct: Construct<T>,
}

impl<T: 'static> SpecBuilder<T> {
    /// Adds a field with a literal default. The accessor produces the raw
    /// field value; scalars and scalar collections convert directly.
    #[must_use]
    pub fn field<D, V, F>(mut self, key: impl Into<String>, default: D, access: F) -> Self
    where
        D: Into<Value>,
        V: Into<Value>,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.fields.push(Field {
            key: key.into(),
            default: FieldDefault::Value(default.into()),
            access: Box::new(move |value, _registry, _context| Ok(access(value).into())),
        });
        self
    }

    /// Adds a field holding another registered value, dispatched through the
    /// value's own [`Record::spec_name`]. No default is derivable.
    #[must_use]
    pub fn record<V, F>(mut self, key: impl Into<String>, access: F) -> Self
    where
        V: Record,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        self.fields.push(Field {
            key: key.into(),
            default: FieldDefault::Object,
            access: Box::new(move |value, registry, context| {
                let nested = access(value);
                registry.to_value(&nested, context)
            }),
        });
        self
    }

    /// Adds a field serialized through the named spec, with that spec's
    /// synthesized default standing in when the field is absent.
    #[must_use]
    pub fn nested<V, F>(mut self, key: impl Into<String>, spec: impl Into<String>, access: F) -> Self
    where
        V: 'static,
        F: Fn(&T) -> V + Send + Sync + 'static,
    {
        let spec_name = spec.into();
        self.fields.push(Field {
            key: key.into(),
            default: FieldDefault::Nested(spec_name.clone()),
            access: Box::new(move |value, registry, context| {
                let nested = access(value);
                registry.to_value_as(&spec_name, &nested, context)
            }),
        });
        self
    }

    /// Adds a field holding a list of registered values, each dispatched
    /// through its own [`Record::spec_name`].
    #[must_use]
    pub fn record_list<V, F>(mut self, key: impl Into<String>, access: F) -> Self
    where
        V: Record,
        F: Fn(&T) -> Vec<V> + Send + Sync + 'static,
    {
        self.fields.push(Field {
            key: key.into(),
            default: FieldDefault::List,
            access: Box::new(move |value, registry, context| {
                let mut list = List::new();
                for item in access(value) {
                    list.add(registry.to_value(&item, context)?);
                }
                Ok(Value::List(list))
            }),
        });
        self
    }

    /// Finishes the spec.
    #[must_use]
    pub fn build(self) -> Spec<T> {
        Spec {
            name: self.name,
            fields: self.fields,
            construct: self.construct,
        }
    }
}
