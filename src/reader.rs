//! Recursive-descent reader for the text format.
//!
//! The [`Reader`] pulls one character at a time, feeds bare tokens through
//! the token buffer, and builds a [`Value`] tree. See [`crate::grammar`] for
//! the grammar it implements.
//!
//! ## Disambiguation
//!
//! A value is first read as a primitive. When the token resolves as a string
//! and the next non-whitespace character is `{`, the token is reinterpreted
//! as the type name of the object that follows — type names are recognized
//! purely by lookahead and never declared separately. Escaped strings take no
//! part in this: they never become type names and never undergo number or
//! boolean inference.
//!
//! ## End of input
//!
//! A stream that ends inside an object, list or escaped string, or where a
//! key or value is required, is malformed and fails immediately with the
//! position of the failure. End of input after a complete bare token simply
//! terminates it, and an empty (or all-whitespace) stream reads as
//! [`Value::Null`].
//!
//! ## Usage
//!
//! ```rust
//! use muesli::{Reader, Value};
//!
//! let mut reader = Reader::new("Point { x 1 y 2 }");
//! let value = reader.read().unwrap();
//!
//! let obj = value.as_object().unwrap();
//! assert_eq!(obj.type_name(), "Point");
//! assert_eq!(obj.get("x").and_then(Value::as_i64), Some(1));
//! ```
//!
//! A reader wraps one input and is stateful; use one instance per parse.

use crate::buffer::TokenBuffer;
use crate::{Error, Format, List, Object, Result, Value};

/// Parses one value tree from a string of text.
pub struct Reader<'de> {
    input: &'de str,
    position: usize,
    line: usize,
    column: usize,
    format: Format,
    buffer: TokenBuffer,
}

impl<'de> Reader<'de> {
    /// Creates a reader over the input with the standard format.
    pub fn new(input: &'de str) -> Self {
        Reader::with_format(input, Format::standard())
    }

    /// Creates a reader over the input with the given format. The format
    /// supplies the escape character and the optional key delimiter.
    pub fn with_format(input: &'de str, format: Format) -> Self {
        Reader {
            input,
            position: 0,
            line: 1,
            column: 1,
            format,
            buffer: TokenBuffer::new(),
        }
    }

    /// Reads the top-level value. An empty or all-whitespace input yields
    /// [`Value::Null`]; trailing content after the first value is ignored.
    pub fn read(&mut self) -> Result<Value> {
        self.skip_space();
        if self.at_end() {
            return Ok(Value::Null);
        }
        self.read_value()
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.position += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn skip_space(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() {
                self.next_char();
            } else {
                break;
            }
        }
    }

    fn eof(&self, expected: &str) -> Error {
        Error::unexpected_eof(self.line, self.column, expected)
    }

    fn read_value(&mut self) -> Result<Value> {
        self.skip_space();
        match self.peek_char() {
            None => Err(self.eof("a value")),
            Some('{') => {
                self.next_char();
                self.read_object(String::new()).map(Value::Object)
            }
            Some('[') => {
                self.next_char();
                self.read_list().map(Value::List)
            }
            Some(c) if c == self.format.escape_char() => {
                self.next_char();
                self.read_escaped().map(Value::String)
            }
            Some(_) => {
                let value = self.read_token()?;
                if let Value::String(name) = value {
                    // A bare word directly before '{' names the object's type.
                    self.skip_space();
                    if self.peek_char() == Some('{') {
                        self.next_char();
                        return self.read_object(name).map(Value::Object);
                    }
                    return Ok(Value::String(name));
                }
                Ok(value)
            }
        }
    }

    fn read_object(&mut self, name: String) -> Result<Object> {
        let mut obj = Object::typed(name);
        loop {
            self.skip_space();
            match self.peek_char() {
                None => return Err(self.eof("'}'")),
                Some('}') => {
                    self.next_char();
                    return Ok(obj);
                }
                Some(_) => {
                    let key = self.read_key()?;
                    let value = self.read_value()?;
                    obj.add(key, value);
                }
            }
        }
    }

    fn read_list(&mut self) -> Result<List> {
        let mut list = List::new();
        loop {
            self.skip_space();
            match self.peek_char() {
                None => return Err(self.eof("']'")),
                Some(']') => {
                    self.next_char();
                    return Ok(list);
                }
                Some(_) => {
                    let value = self.read_value()?;
                    list.add(value);
                }
            }
        }
    }

    fn read_key(&mut self) -> Result<String> {
        let start = self.position;
        while let Some(c) = self.peek_char() {
            if c.is_alphanumeric() || c == '_' {
                self.next_char();
            } else {
                break;
            }
        }
        if self.position == start {
            let found = self.peek_char().map(|c| format!("'{}'", c));
            return Err(Error::syntax(
                self.line,
                self.column,
                format!(
                    "expected a key, found {}",
                    found.as_deref().unwrap_or("end of input")
                ),
            ));
        }
        let key = self.input[start..self.position].to_string();

        // Consume a trailing key delimiter; otherwise whitespace separates.
        if let Some(c) = self.peek_char() {
            if c == ':' || self.format.delimiter() == Some(c) {
                self.next_char();
            }
        }
        Ok(key)
    }

    fn read_token(&mut self) -> Result<Value> {
        self.buffer.reset();
        match self.peek_char() {
            Some(c) if is_token_char(c) => {}
            Some(c) => {
                return Err(Error::syntax(
                    self.line,
                    self.column,
                    format!("unexpected character '{}'", c),
                ))
            }
            None => return Err(self.eof("a value")),
        }
        while let Some(c) = self.peek_char() {
            if is_token_char(c) {
                self.buffer.push(c);
                self.next_char();
            } else {
                break;
            }
        }
        Ok(self.buffer.to_value())
    }

    fn read_escaped(&mut self) -> Result<String> {
        let escape = self.format.escape_char();
        self.buffer.reset();
        loop {
            match self.next_char() {
                None => return Err(self.eof("the closing escape character")),
                Some(c) if c == escape => {
                    // A doubled escape character is a literal one.
                    if self.peek_char() == Some(escape) {
                        self.next_char();
                        self.buffer.push(escape);
                    } else {
                        break;
                    }
                }
                Some(c) => self.buffer.push(c),
            }
        }
        Ok(self.buffer.as_str().to_string())
    }
}

fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '.' | '-' | '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_reads_as_null() {
        assert_eq!(Reader::new("").read().unwrap(), Value::Null);
        assert_eq!(Reader::new("  \n\t ").read().unwrap(), Value::Null);
    }

    #[test]
    fn bare_token_at_end_of_input() {
        assert_eq!(Reader::new("-123").read().unwrap(), Value::from(-123));
        assert_eq!(
            Reader::new("hello").read().unwrap(),
            Value::from("hello")
        );
    }

    #[test]
    fn escaped_string_is_never_a_type_name() {
        let value = Reader::new("'Foo' { a 1 }").read().unwrap();
        assert_eq!(value, Value::from("Foo"));
    }

    #[test]
    fn errors_carry_position() {
        let err = Reader::new("{ a\n  'oops").read().unwrap_err();
        match err {
            Error::UnexpectedEof { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }
}
