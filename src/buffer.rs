//! Token accumulation and classification.
//!
//! The [`TokenBuffer`] collects the characters of one token and tracks, as
//! they arrive, whether the token still looks numeric. Resolution happens
//! once at the end: a case-insensitive `true`/`false` becomes a boolean, a
//! numeric token becomes a number, anything else stays a string.
//!
//! Numbers are accumulated digit by digit (`value * 10 + digit`, with a
//! separate decimal scale and a trailing sign application) rather than handed
//! to the standard library. Integer accumulation wraps on overflow and long
//! fractions are subject to ordinary floating-point rounding; tokens that
//! must survive exactly belong in escaped strings.

use crate::{Number, Value};

/// Accumulates one token's characters and classifies them.
#[derive(Debug)]
pub(crate) struct TokenBuffer {
    buf: String,
    numeric: bool,
    decimal: bool,
}

impl TokenBuffer {
    pub fn new() -> Self {
        TokenBuffer {
            buf: String::with_capacity(16),
            numeric: true,
            decimal: false,
        }
    }

    /// Clears the buffer for the next token.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.numeric = true;
        self.decimal = false;
    }

    /// Appends one character, updating the numeric classification:
    /// digits always keep it, a `-` is allowed only first, a single `.` is
    /// allowed after the first position, and anything else clears it for the
    /// rest of the token.
    pub fn push(&mut self, c: char) {
        let first = self.buf.is_empty();
        self.buf.push(c);

        if !self.numeric {
            return;
        }
        if c.is_ascii_digit() {
            return;
        }
        if c == '.' && !self.decimal && !first {
            self.decimal = true;
            return;
        }
        if c == '-' && first {
            return;
        }
        self.numeric = false;
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Resolves the accumulated token to a value.
    pub fn to_value(&self) -> Value {
        let token = self.buf.as_str();
        if token.eq_ignore_ascii_case("true") {
            return Value::Bool(true);
        }
        if token.eq_ignore_ascii_case("false") {
            return Value::Bool(false);
        }
        if self.numeric && token.bytes().any(|b| b.is_ascii_digit()) {
            if self.decimal {
                Value::Number(Number::Float(parse_decimal(token)))
            } else {
                Value::Number(Number::Integer(parse_integer(token)))
            }
        } else {
            Value::String(token.to_string())
        }
    }
}

fn parse_integer(token: &str) -> i64 {
    let mut value: i64 = 0;
    let mut negative = false;
    for (i, b) in token.bytes().enumerate() {
        if i == 0 && b == b'-' {
            negative = true;
            continue;
        }
        value = value.wrapping_mul(10).wrapping_add(i64::from(b - b'0'));
    }
    if negative {
        value.wrapping_neg()
    } else {
        value
    }
}

fn parse_decimal(token: &str) -> f64 {
    let mut value: f64 = 0.0;
    let mut scale: f64 = 0.0;
    let mut negative = false;
    for (i, b) in token.bytes().enumerate() {
        if i == 0 && b == b'-' {
            negative = true;
            continue;
        }
        if b == b'.' {
            scale = 1.0;
            continue;
        }
        value = value * 10.0 + f64::from(b - b'0');
        if scale > 0.0 {
            scale *= 10.0;
        }
    }
    if scale > 0.0 {
        value /= scale;
    }
    if negative {
        -value
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(token: &str) -> Value {
        let mut buffer = TokenBuffer::new();
        for c in token.chars() {
            buffer.push(c);
        }
        buffer.to_value()
    }

    #[test]
    fn booleans_are_case_insensitive() {
        assert_eq!(resolve("true"), Value::Bool(true));
        assert_eq!(resolve("TRUE"), Value::Bool(true));
        assert_eq!(resolve("True"), Value::Bool(true));
        assert_eq!(resolve("false"), Value::Bool(false));
        assert_eq!(resolve("FALSE"), Value::Bool(false));
        assert_eq!(resolve("truex"), Value::String("truex".to_string()));
    }

    #[test]
    fn integers() {
        assert_eq!(resolve("0"), Value::from(0));
        assert_eq!(resolve("123"), Value::from(123));
        assert_eq!(resolve("-123"), Value::from(-123));
        // Leading zeros are not preserved in the parsed value.
        assert_eq!(resolve("007"), Value::from(7));
    }

    #[test]
    fn decimals() {
        assert_eq!(resolve("12.5"), Value::from(12.5));
        assert_eq!(resolve("-0.25"), Value::from(-0.25));
        assert_eq!(resolve("7."), Value::from(7.0));
    }

    #[test]
    fn sign_and_dot_placement() {
        // A '-' after the first position breaks the numeric classification.
        assert_eq!(resolve("1-2"), Value::String("1-2".to_string()));
        // A leading '.' is not numeric, and a second '.' is not either.
        assert_eq!(resolve(".5"), Value::String(".5".to_string()));
        assert_eq!(resolve("1.2.3"), Value::String("1.2.3".to_string()));
        // A lone '-' carries no digits.
        assert_eq!(resolve("-"), Value::String("-".to_string()));
    }

    #[test]
    fn non_numeric_tokens_stay_strings() {
        assert_eq!(resolve("hello"), Value::String("hello".to_string()));
        assert_eq!(resolve("12a"), Value::String("12a".to_string()));
        assert_eq!(resolve("a.b-c_d"), Value::String("a.b-c_d".to_string()));
    }

    #[test]
    fn integer_overflow_wraps() {
        // i64::MIN survives the wrap-around of its magnitude.
        assert_eq!(resolve("-9223372036854775808"), Value::from(i64::MIN));
    }

    #[test]
    fn reset_clears_classification() {
        let mut buffer = TokenBuffer::new();
        for c in "abc".chars() {
            buffer.push(c);
        }
        assert_eq!(buffer.to_value(), Value::String("abc".to_string()));

        buffer.reset();
        for c in "42".chars() {
            buffer.push(c);
        }
        assert_eq!(buffer.to_value(), Value::from(42));
    }
}
