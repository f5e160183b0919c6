//! Configuration options for the four codec operations.
//!
//! Each operation takes its own option struct so the security envelope is
//! explicit at every entry point:
//!
//! - [`ParseOptions`]: depth and input-length limits for text parsing
//! - [`StringifyOptions`]: indentation and newline for text output
//! - [`EncodeOptions`]: depth limit for binary encoding
//! - [`DecodeOptions`]: depth, dictionary, and string-length limits for
//!   binary decoding
//!
//! The limits exist to bound the cost of adversarial inputs; every overflow
//! raises a distinct named error before any proportional allocation.
//!
//! ## Examples
//!
//! ```rust
//! use koda::{parse_with_options, ParseOptions};
//!
//! let options = ParseOptions::new().with_max_depth(8);
//! let value = parse_with_options("a: [1, 2, 3]", &options).unwrap();
//! assert!(value.is_object());
//! ```

/// Options for [`parse`](crate::parse).
#[derive(Clone, Debug)]
pub struct ParseOptions {
    /// Maximum nesting depth; the root sits at depth 0.
    pub max_depth: usize,
    /// Maximum input length in bytes, checked before tokenizing.
    pub max_input_length: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_depth: 256,
            max_input_length: 1_000_000,
        }
    }
}

impl ParseOptions {
    /// Creates the default options (`max_depth` 256, `max_input_length` 1 000 000).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum nesting depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the maximum input length in bytes.
    #[must_use]
    pub fn with_max_input_length(mut self, max_input_length: usize) -> Self {
        self.max_input_length = max_input_length;
        self
    }
}

/// Options for [`stringify`](crate::stringify).
///
/// With the default empty `indent`, output is compact on a single line.
/// A non-empty `indent` switches to pretty mode: one entry per line,
/// indented by `indent` repeated per nesting level.
///
/// # Examples
///
/// ```rust
/// use koda::{koda, stringify_with_options, StringifyOptions};
///
/// let value = koda!({"a": 1});
/// let pretty = stringify_with_options(&value, &StringifyOptions::pretty());
/// assert_eq!(pretty, "{\n  a: 1\n}");
/// ```
#[derive(Clone, Debug)]
pub struct StringifyOptions {
    /// Indentation unit; empty selects compact mode.
    pub indent: String,
    /// Line separator used in pretty mode.
    pub newline: String,
}

impl Default for StringifyOptions {
    fn default() -> Self {
        StringifyOptions {
            indent: String::new(),
            newline: "\n".to_string(),
        }
    }
}

impl StringifyOptions {
    /// Creates the default options (compact output).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for pretty-printed output with two-space indentation.
    #[must_use]
    pub fn pretty() -> Self {
        StringifyOptions {
            indent: "  ".to_string(),
            ..Default::default()
        }
    }

    /// Sets the indentation unit.
    #[must_use]
    pub fn with_indent(mut self, indent: &str) -> Self {
        self.indent = indent.to_string();
        self
    }

    /// Sets the line separator for pretty mode.
    #[must_use]
    pub fn with_newline(mut self, newline: &str) -> Self {
        self.newline = newline.to_string();
        self
    }
}

/// Options for [`encode`](crate::encode).
#[derive(Clone, Debug)]
pub struct EncodeOptions {
    /// Maximum nesting depth; the root sits at depth 0.
    pub max_depth: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions { max_depth: 256 }
    }
}

impl EncodeOptions {
    /// Creates the default options (`max_depth` 256).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum nesting depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Options for [`decode`](crate::decode).
#[derive(Clone, Debug)]
pub struct DecodeOptions {
    /// Maximum nesting depth; the root sits at depth 0.
    pub max_depth: usize,
    /// Maximum number of key-dictionary entries.
    pub max_dictionary_size: usize,
    /// Maximum declared length of any string or dictionary key, in bytes.
    pub max_string_length: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            max_depth: 256,
            max_dictionary_size: 65_536,
            max_string_length: 1_000_000,
        }
    }
}

impl DecodeOptions {
    /// Creates the default options (`max_depth` 256, `max_dictionary_size`
    /// 65 536, `max_string_length` 1 000 000).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum nesting depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the maximum number of dictionary entries.
    #[must_use]
    pub fn with_max_dictionary_size(mut self, max_dictionary_size: usize) -> Self {
        self.max_dictionary_size = max_dictionary_size;
        self
    }

    /// Sets the maximum string length in bytes.
    #[must_use]
    pub fn with_max_string_length(mut self, max_string_length: usize) -> Self {
        self.max_string_length = max_string_length;
        self
    }
}
