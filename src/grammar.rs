//! The text grammar.
//!
//! This module documents the format parsed by [`Reader`](crate::Reader) and
//! produced by [`Writer`](crate::Writer); it contains no code.
//!
//! # Grammar
//!
//! Whitespace separates tokens and is otherwise insignificant:
//!
//! ```text
//! value          := object | list | primitive
//! object         := [ bareWord ] '{' (key value)* '}'
//! list           := '[' value* ']'
//! key            := (alnum | '_')+ ( delimiter )?
//! primitive      := escapedString | bareToken
//! escapedString  := ESCAPE rawChars ESCAPE
//! bareToken      := (alnum | '.' | '-' | '_')+
//! ```
//!
//! # Token resolution
//!
//! A bare token resolves, in order:
//!
//! 1. A case-insensitive `true` or `false` is a boolean.
//! 2. A token that stayed numeric — an optional leading `-`, digits, at most
//!    one `.` after the first position — is a number; with a `.` it is a
//!    float, otherwise an integer.
//! 3. Anything else is a string.
//!
//! An escaped string is always a string: no boolean or number inference, no
//! type-name lookahead. Inside one, the escape character is written twice to
//! stand for itself.
//!
//! # Type-prefixed objects
//!
//! A bare word that resolves as a string and is followed by `{` names the
//! object that follows:
//!
//! ```text
//! Engine {
//!   power 120
//!   turbo true
//! }
//! ```
//!
//! parses to an object with type name `Engine`, while `{ power 120 }` parses
//! to an object with the empty type name. The type name is what the
//! [`Registry`](crate::Registry) resolves on deserialization.
//!
//! # Examples
//!
//! ```rust
//! use muesli::{parse, Value};
//!
//! let value = parse("Engine { power 120 label 'main engine' }").unwrap();
//! let obj = value.as_object().unwrap();
//! assert_eq!(obj.type_name(), "Engine");
//! assert_eq!(obj.get("power"), Some(&Value::from(120)));
//! assert_eq!(obj.get("label"), Some(&Value::from("main engine")));
//!
//! // Keys may also carry an explicit ':' delimiter.
//! let value = parse("{ a: 1 b: [ true FALSE ] }").unwrap();
//! let obj = value.as_object().unwrap();
//! assert_eq!(obj.get("a"), Some(&Value::from(1)));
//! assert_eq!(obj.list("b").unwrap().get(1), Some(&Value::from(false)));
//! ```
