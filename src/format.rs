//! Format configuration for reading and writing.
//!
//! A [`Format`] is an immutable record that parameterizes both the [`Reader`]
//! and the [`Writer`](crate::Writer):
//!
//! - `indent`: the string emitted once per nesting level; empty means compact
//!   single-line output
//! - `delimiter`: an optional character terminating a key (`None` means keys
//!   are separated from values by whitespace alone)
//! - `separator`: the character between a key or type name and its value;
//!   forced to a space whenever `delimiter` is `None`
//! - `escape`: the character enclosing strings that need quoting
//!
//! [`Reader`]: crate::Reader
//!
//! ## Examples
//!
//! ```rust
//! use muesli::Format;
//!
//! // Two-space indent, whitespace-separated keys, single-quote escapes.
//! let standard = Format::standard();
//! assert_eq!(standard.indent(), "  ");
//! assert_eq!(standard.escape_char(), '\'');
//!
//! // Single-line output with explicit key delimiters.
//! let compact = Format::compact().with_delimiter(':');
//! assert_eq!(compact.indent(), "");
//! assert_eq!(compact.delimiter(), Some(':'));
//! ```

/// Immutable formatting configuration shared by reader and writer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Format {
    indent: String,
    delimiter: Option<char>,
    separator: char,
    escape: char,
}

impl Format {
    /// The standard configuration: two-space indent, no key delimiter, space
    /// separator, single-quote escape character.
    #[must_use]
    pub fn standard() -> Self {
        Format {
            indent: "  ".to_string(),
            delimiter: None,
            separator: ' ',
            escape: '\'',
        }
    }

    /// The standard configuration with an empty indent, producing
    /// single-line output.
    #[must_use]
    pub fn compact() -> Self {
        Format::standard().with_indent("")
    }

    /// Creates a configuration from its four parts.
    #[must_use]
    pub fn new(
        indent: impl Into<String>,
        delimiter: Option<char>,
        separator: char,
        escape: char,
    ) -> Self {
        Format {
            indent: indent.into(),
            delimiter,
            separator,
            escape,
        }
    }

    /// Sets the per-level indent string. Empty means compact output.
    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Sets the character written after each key.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Removes the key delimiter; keys are then separated from values by
    /// whitespace alone.
    #[must_use]
    pub fn without_delimiter(mut self) -> Self {
        self.delimiter = None;
        self
    }

    /// Sets the character between a key or type name and its value.
    #[must_use]
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Sets the character enclosing escaped strings.
    #[must_use]
    pub fn with_escape_char(mut self, escape: char) -> Self {
        self.escape = escape;
        self
    }

    /// The per-level indent string.
    #[must_use]
    pub fn indent(&self) -> &str {
        &self.indent
    }

    /// The key delimiter, if any.
    #[must_use]
    pub fn delimiter(&self) -> Option<char> {
        self.delimiter
    }

    /// The key/value separator. Without a delimiter the separator must be
    /// whitespace for the output to stay readable, so a space is returned
    /// regardless of the configured character.
    #[must_use]
    pub fn separator(&self) -> char {
        match self.delimiter {
            Some(_) => self.separator,
            None => ' ',
        }
    }

    /// The character enclosing escaped strings.
    #[must_use]
    pub fn escape_char(&self) -> char {
        self.escape
    }
}

impl Default for Format {
    fn default() -> Self {
        Format::standard()
    }
}
