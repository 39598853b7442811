//! # muesli
//!
//! A self-describing text serialization format with a schema-driven mapping
//! layer that converts between the format and native Rust values — no
//! runtime reflection, no derive magic, just explicit field tables.
//!
//! ## The format
//!
//! Objects are brace-delimited key/value sequences, optionally prefixed with
//! a bare type name; lists are bracket-delimited; scalars are bare tokens
//! classified as booleans, numbers or strings, with single quotes around
//! anything ambiguous:
//!
//! ```text
//! Car {
//!   name 'Delta 88'
//!   seats 5
//!   engine Engine {
//!     power 120
//!   }
//! }
//! ```
//!
//! See [`grammar`] for the full grammar.
//!
//! ## Key pieces
//!
//! - [`Value`], [`Object`], [`List`]: the dynamic value tree produced by
//!   parsing and consumed by writing
//! - [`Reader`] / [`Writer`] with a configurable [`Format`]
//! - [`Spec`]: per-type field-accessor table mapping one native type to and
//!   from object nodes
//! - [`Registry`]: explicit name → spec and type → [`SubSpec`] tables;
//!   sub-specs resolve untyped data by structural matching
//! - [`Context`]: per-call options (currently default-skipping)
//!
//! ## Quick start
//!
//! ```rust
//! use muesli::{Context, Format, Record, Registry, Spec};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct User {
//!     name: String,
//!     admin: bool,
//! }
//!
//! impl Record for User {
//!     fn spec_name(&self) -> &str { "User" }
//! }
//!
//! let mut registry = Registry::new();
//! registry.register(
//!     Spec::<User>::builder("User", |data, spec, registry, _context| {
//!         Ok(User {
//!             name: spec.get_string("name", data, registry)?,
//!             admin: spec.get_bool("admin", data, registry)?,
//!         })
//!     })
//!     .field("name", "", |u: &User| u.name.clone())
//!     .field("admin", false, |u: &User| u.admin)
//!     .build(),
//! );
//!
//! let user = User { name: "Alice".to_string(), admin: true };
//!
//! let text = muesli::to_string(&registry, &user).unwrap();
//! assert_eq!(text, "User {\n  name Alice\n  admin true\n}");
//!
//! let back: User = muesli::from_str(&registry, &text).unwrap();
//! assert_eq!(user, back);
//!
//! // Fields equal to their registered default can be omitted on write.
//! let guest = User { name: "guest".to_string(), admin: false };
//! let compact = muesli::to_string_with(
//!     &registry,
//!     &guest,
//!     &Format::compact(),
//!     &Context::skipping_defaults(),
//! )
//! .unwrap();
//! assert_eq!(compact, "User { name guest }");
//! ```
//!
//! ## Concurrency
//!
//! Registration happens through `&mut Registry`; afterwards the registry is
//! read-only and freely shared (`&Registry`, `Arc<Registry>`) — the borrow
//! checker enforces that registration completes before use. `Reader` and
//! `Writer` instances each wrap one stream and serve one session; they are
//! not meant to be shared between concurrent callers.

pub mod context;
pub mod error;
pub mod format;
pub mod grammar;
pub mod list;
pub mod macros;
pub mod object;
pub mod reader;
pub mod registry;
pub mod spec;
pub mod value;
pub mod writer;

mod buffer;

pub use context::Context;
pub use error::{Error, Result};
pub use format::Format;
pub use list::List;
pub use object::Object;
pub use reader::Reader;
pub use registry::{Registry, SubSpec};
pub use spec::{FieldDefault, Record, Spec, SpecBuilder};
pub use value::{Number, Value};
pub use writer::Writer;

use std::io;

/// Parses one value tree from text in the standard format.
///
/// # Examples
///
/// ```rust
/// use muesli::{parse, Value};
///
/// let value = parse("{ a 1 }").unwrap();
/// assert!(value.is_object());
/// assert_eq!(parse("").unwrap(), Value::Null);
/// ```
///
/// # Errors
///
/// Returns an error if the input is malformed or truncated.
pub fn parse(input: &str) -> Result<Value> {
    Reader::new(input).read()
}

/// Parses one value tree from text with the given format.
///
/// # Errors
///
/// Returns an error if the input is malformed or truncated.
pub fn parse_with(input: &str, format: &Format) -> Result<Value> {
    Reader::with_format(input, format.clone()).read()
}

/// Renders a value tree in the standard format.
#[must_use]
pub fn write_value(value: &Value) -> String {
    write_value_with(value, &Format::standard())
}

/// Renders a value tree with the given format.
#[must_use]
pub fn write_value_with(value: &Value, format: &Format) -> String {
    let mut writer = Writer::with_format(format.clone());
    writer.write(value);
    writer.into_inner()
}

/// Serializes a registered value to text in the standard format.
///
/// # Errors
///
/// Returns an error if the value's spec (or a nested one) is not registered.
pub fn to_string<T: Record>(registry: &Registry, value: &T) -> Result<String> {
    to_string_with(registry, value, &Format::standard(), &Context::none())
}

/// Serializes a registered value to text with the given format and context.
///
/// # Errors
///
/// Returns an error if the value's spec (or a nested one) is not registered.
pub fn to_string_with<T: Record>(
    registry: &Registry,
    value: &T,
    format: &Format,
    context: &Context,
) -> Result<String> {
    let tree = registry.to_value(value, context)?;
    Ok(write_value_with(&tree, format))
}

/// Serializes a value to text under an explicit spec name, overriding
/// whatever the value would declare for itself.
///
/// # Errors
///
/// Returns an error if no spec is registered under the name.
pub fn to_string_as<T: 'static>(registry: &Registry, name: &str, value: &T) -> Result<String> {
    let tree = registry.to_value_as(name, value, &Context::none())?;
    Ok(write_value(&tree))
}

/// Serializes a registered value to a [`Value`] tree.
///
/// # Errors
///
/// Returns an error if the value's spec (or a nested one) is not registered.
pub fn to_value<T: Record>(registry: &Registry, value: &T) -> Result<Value> {
    registry.to_value(value, &Context::none())
}

/// Serializes a registered value to a writer in the standard format.
///
/// # Errors
///
/// Returns an error if serialization fails or the writer rejects the bytes.
pub fn to_writer<W: io::Write, T: Record>(
    writer: W,
    registry: &Registry,
    value: &T,
) -> Result<()> {
    to_writer_with(writer, registry, value, &Format::standard(), &Context::none())
}

/// Serializes a registered value to a writer with the given format and
/// context.
///
/// # Errors
///
/// Returns an error if serialization fails or the writer rejects the bytes.
pub fn to_writer_with<W: io::Write, T: Record>(
    mut writer: W,
    registry: &Registry,
    value: &T,
    format: &Format,
    context: &Context,
) -> Result<()> {
    let text = to_string_with(registry, value, format, context)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(e.to_string()))
}

/// Reads one typed value from text.
///
/// # Errors
///
/// Returns an error if the input is malformed, is not an object, or does not
/// resolve to the requested type.
pub fn from_str<T: 'static>(registry: &Registry, input: &str) -> Result<T> {
    from_str_with(registry, input, &Context::none())
}

/// Reads one typed value from text with the given context.
///
/// # Errors
///
/// Returns an error if the input is malformed, is not an object, or does not
/// resolve to the requested type.
pub fn from_str_with<T: 'static>(registry: &Registry, input: &str, context: &Context) -> Result<T> {
    match parse(input)? {
        Value::Object(obj) => registry.from_value(&obj, context),
        other => Err(Error::invalid_type("object", other.kind_name())),
    }
}

/// Reads a list of typed values from text. Non-object elements are skipped.
///
/// # Errors
///
/// Returns an error if the input is malformed, is not a list, or an element
/// does not resolve to the requested type.
pub fn from_str_list<T: 'static>(registry: &Registry, input: &str) -> Result<Vec<T>> {
    from_str_list_with(registry, input, &Context::none())
}

/// Reads a list of typed values from text with the given context.
/// Non-object elements are skipped.
///
/// # Errors
///
/// Returns an error if the input is malformed, is not a list, or an element
/// does not resolve to the requested type.
pub fn from_str_list_with<T: 'static>(
    registry: &Registry,
    input: &str,
    context: &Context,
) -> Result<Vec<T>> {
    match parse(input)? {
        Value::List(list) => registry.from_list(&list, context),
        other => Err(Error::invalid_type("list", other.kind_name())),
    }
}

/// Reads one typed value from an I/O stream.
///
/// # Errors
///
/// Returns an error if reading fails, the input is malformed, or it does not
/// resolve to the requested type.
pub fn from_reader<R: io::Read, T: 'static>(registry: &Registry, mut reader: R) -> Result<T> {
    let mut input = String::new();
    reader
        .read_to_string(&mut input)
        .map_err(|e| Error::io(e.to_string()))?;
    from_str(registry, &input)
}
