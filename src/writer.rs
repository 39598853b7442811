//! Tree renderer for the text format.
//!
//! The [`Writer`] walks a [`Value`] tree and produces text that the
//! [`Reader`](crate::Reader) parses back to an entries-equal tree. With a
//! non-empty indent each structural token starts a new line at the current
//! depth; with an empty indent a single space keeps tokens separated on one
//! line.
//!
//! Strings are wrapped in the escape character whenever re-parsing could
//! misclassify them: any non-alphanumeric character, the empty string, a
//! bare `true`/`false` in any case, or an all-digit token. Embedded escape
//! characters are doubled.
//!
//! ## Usage
//!
//! ```rust
//! use muesli::{muesli, Format, Writer};
//!
//! let value = muesli!({ "a": 1, "b": "two words" });
//!
//! let mut writer = Writer::with_format(Format::compact());
//! writer.write(&value);
//! assert_eq!(writer.into_inner(), "{ a 1 b 'two words' }");
//! ```
//!
//! A writer wraps one output buffer and is stateful; use one instance per
//! write session.

use crate::{Format, List, Number, Object, Value};

/// Renders value trees into an internal string buffer.
pub struct Writer {
    out: String,
    format: Format,
    depth: usize,
    pending: bool,
}

impl Writer {
    /// Creates a writer with the standard format.
    #[must_use]
    pub fn new() -> Self {
        Writer::with_format(Format::standard())
    }

    /// Creates a writer with the given format.
    #[must_use]
    pub fn with_format(format: Format) -> Self {
        Writer {
            out: String::with_capacity(256),
            format,
            depth: 0,
            pending: false,
        }
    }

    /// Renders a value. Returns `self` for chaining.
    pub fn write(&mut self, value: &Value) -> &mut Self {
        self.emit(value, false);
        self
    }

    /// Renders an object node.
    pub fn write_object(&mut self, obj: &Object) -> &mut Self {
        self.object(obj);
        self
    }

    /// Renders a list node.
    pub fn write_list(&mut self, list: &List) -> &mut Self {
        self.list(list);
        self
    }

    /// The text rendered so far.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.out
    }

    /// Consumes the writer, returning the rendered text.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.out
    }

    fn emit(&mut self, value: &Value, force_escape: bool) {
        match value {
            Value::Null => self.atom("null"),
            Value::Bool(true) => self.atom("true"),
            Value::Bool(false) => self.atom("false"),
            Value::Number(n) => self.number(*n),
            Value::String(s) => self.string(s, force_escape),
            Value::List(list) => self.list(list),
            Value::Object(obj) => self.object(obj),
        }
    }

    fn object(&mut self, obj: &Object) {
        self.type_name(obj.type_name());
        self.begin('{');
        for (key, value) in obj.iter() {
            self.key(key);
            self.emit(value, false);
        }
        self.end('}');
    }

    fn list(&mut self, list: &List) {
        self.begin('[');
        for (i, value) in list.iter().enumerate() {
            // A bare string directly before an object would be re-read as
            // that object's type name.
            let force = matches!(value, Value::String(_))
                && matches!(list.get(i + 1), Some(Value::Object(_)));
            self.break_line();
            self.emit(value, force);
        }
        self.end(']');
    }

    fn atom(&mut self, text: &str) {
        self.out.push_str(text);
        self.pending = true;
    }

    fn number(&mut self, n: Number) {
        let text = n.to_string();
        self.atom(&text);
    }

    fn string(&mut self, s: &str, force_escape: bool) {
        if force_escape || needs_escape(s) {
            let escape = self.format.escape_char();
            self.out.push(escape);
            for c in s.chars() {
                if c == escape {
                    self.out.push(escape);
                }
                self.out.push(c);
            }
            self.out.push(escape);
        } else {
            self.out.push_str(s);
        }
        self.pending = true;
    }

    fn key(&mut self, key: &str) {
        self.break_line();
        self.out.push_str(key);
        if let Some(d) = self.format.delimiter() {
            self.out.push(d);
        }
        self.out.push(self.format.separator());
    }

    fn type_name(&mut self, name: &str) {
        if !name.is_empty() {
            self.break_line();
            self.out.push_str(name);
            self.out.push(self.format.separator());
        }
    }

    fn begin(&mut self, open: char) {
        self.break_line();
        self.out.push(open);
        self.pending = true;
        self.depth += 1;
    }

    fn end(&mut self, close: char) {
        self.depth -= 1;
        self.break_line();
        self.out.push(close);
        self.pending = true;
    }

    fn break_line(&mut self) {
        if !self.pending {
            return;
        }
        if self.format.indent().is_empty() {
            self.out.push(' ');
        } else {
            self.out.push('\n');
            for _ in 0..self.depth {
                self.out.push_str(self.format.indent());
            }
        }
        self.pending = false;
    }
}

impl Default for Writer {
    fn default() -> Self {
        Writer::new()
    }
}

fn needs_escape(s: &str) -> bool {
    s.is_empty()
        || s.chars().any(|c| !c.is_alphanumeric())
        || s.eq_ignore_ascii_case("true")
        || s.eq_ignore_ascii_case("false")
        || s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::muesli;

    fn compact(value: &Value) -> String {
        let mut writer = Writer::with_format(Format::compact());
        writer.write(value);
        writer.into_inner()
    }

    #[test]
    fn pretty_object_layout() {
        let value = muesli!(Point { "x": 1, "y": 2 });
        let mut writer = Writer::new();
        writer.write(&value);
        assert_eq!(writer.into_inner(), "Point {\n  x 1\n  y 2\n}");
    }

    #[test]
    fn compact_output_is_single_line() {
        let value = muesli!({ "a": 1, "b": [1, 2] });
        assert_eq!(compact(&value), "{ a 1 b [ 1 2 ] }");
    }

    #[test]
    fn strings_escape_when_ambiguous() {
        assert_eq!(compact(&Value::from("plain")), "plain");
        assert_eq!(compact(&Value::from("two words")), "'two words'");
        assert_eq!(compact(&Value::from("")), "''");
        assert_eq!(compact(&Value::from("007")), "'007'");
        assert_eq!(compact(&Value::from("True")), "'True'");
    }

    #[test]
    fn embedded_escape_character_is_doubled() {
        assert_eq!(compact(&Value::from("it's")), "'it''s'");
    }

    #[test]
    fn string_before_object_in_list_is_escaped() {
        let value = muesli!(["word", { "a": 1 }]);
        assert_eq!(compact(&value), "[ 'word' { a 1 } ]");
    }
}
