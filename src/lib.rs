//! # koda
//!
//! A codec for the KODA data-interchange format: a human-editable textual
//! syntax (`.koda`) coupled with a canonical binary encoding (`.kod`).
//!
//! ## What is KODA?
//!
//! KODA documents describe trees of nulls, booleans, 64-bit integers,
//! binary64 floats, UTF-8 strings, arrays, and ordered objects. The text
//! form is relaxed about punctuation (colons and commas are optional, and
//! comments nest); the binary form is deterministic: structurally equal
//! values always encode to byte-identical output, so `.kod` blobs can serve
//! as content-addressed artifacts, cache keys, or database blobs.
//!
//! ## Key features
//!
//! - **Canonical binary encoding**: a global sorted key dictionary plus
//!   sorted object entries make encoded bytes a pure function of the value
//! - **Forgiving text syntax**: brace-less root objects, optional
//!   separators, bare identifier strings, nested comments; any input that
//!   happens to be JSON parses to the equivalent value
//! - **Bounded everything**: depth, input-length, dictionary, and
//!   string-length limits stop adversarial inputs before they cost memory
//! - **Serde compatible**: works with existing Rust types via
//!   `#[derive(Serialize, Deserialize)]`
//! - **No unsafe code**
//!
//! ## Quick start
//!
//! ```rust
//! use koda::{parse, stringify, encode, decode};
//!
//! let value = parse("name: \"my-app\" version: 1 enabled: true").unwrap();
//!
//! // Canonical binary round-trip
//! let bytes = encode(&value).unwrap();
//! assert!(bytes.starts_with(b"KODA\x01"));
//! assert_eq!(decode(&bytes).unwrap(), value);
//!
//! // Back to text
//! let text = stringify(&value);
//! assert_eq!(parse(&text).unwrap(), value);
//! ```
//!
//! ### Typed values via serde
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use koda::{from_str, to_string, from_slice, to_vec};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Config {
//!     name: String,
//!     version: i64,
//!     enabled: bool,
//! }
//!
//! let config: Config = from_str("name: \"my-app\" version: 1 enabled: true").unwrap();
//! assert_eq!(config.version, 1);
//!
//! let text = to_string(&config).unwrap();
//! let back: Config = from_str(&text).unwrap();
//! assert_eq!(config, back);
//!
//! // The same pair exists for the binary surface
//! let bytes = to_vec(&config).unwrap();
//! let back: Config = from_slice(&bytes).unwrap();
//! assert_eq!(config, back);
//! ```
//!
//! ### Dynamic values with the koda! macro
//!
//! ```rust
//! use koda::{koda, Value};
//!
//! let data = koda!({
//!     "name": "my-app",
//!     "tags": ["rust", "codec"]
//! });
//!
//! if let Value::Object(obj) = data {
//!     assert_eq!(obj.get("name").and_then(|v| v.as_str()), Some("my-app"));
//! }
//! ```
//!
//! ## Determinism
//!
//! ```rust
//! use koda::{encode, parse};
//!
//! let a = parse("{b: 1, a: 2}").unwrap();
//! let b = parse("{a: 2, b: 1}").unwrap();
//! assert_eq!(encode(&a).unwrap(), encode(&b).unwrap());
//! ```
//!
//! ## Errors
//!
//! Every failure names its cause and carries a location: text errors a
//! source position, binary errors a byte offset. No operation returns a
//! partial value. See [`Error`].

pub mod error;
pub mod macros;
pub mod map;
pub mod options;
pub mod spec;
pub mod value;

mod de;
mod decode;
mod encode;
mod lexer;
mod ser;

pub use error::{Error, Result};
pub use map::KodaMap;
pub use options::{DecodeOptions, EncodeOptions, ParseOptions, StringifyOptions};
pub use ser::ValueSerializer;
pub use value::Value;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Parses KODA text into a [`Value`] using default options.
///
/// # Examples
///
/// ```rust
/// use koda::parse;
///
/// let value = parse("x: [1, 2, 3]").unwrap();
/// let xs = value.as_object().unwrap().get("x").unwrap();
/// assert_eq!(xs.as_array().unwrap().len(), 3);
/// ```
///
/// # Errors
///
/// Returns [`Error::Parse`] with the source position of the first problem:
/// malformed tokens, duplicate keys, exceeded depth, or over-long input.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse(text: &str) -> Result<Value> {
    parse_with_options(text, &ParseOptions::default())
}

/// Parses KODA text into a [`Value`] with explicit limits.
///
/// # Errors
///
/// Returns [`Error::Parse`] as [`parse`] does.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_with_options(text: &str, options: &ParseOptions) -> Result<Value> {
    de::parse_document(text, options)
}

/// Serializes a [`Value`] as compact KODA text.
///
/// Object entries are written in insertion order; the text form never
/// re-sorts keys.
///
/// # Examples
///
/// ```rust
/// use koda::{koda, stringify};
///
/// assert_eq!(stringify(&koda!([1, 2])), "[1 2 ]");
/// assert_eq!(stringify(&koda!({"a": 1})), "{a: 1 }");
/// ```
#[must_use]
pub fn stringify(value: &Value) -> String {
    stringify_with_options(value, &StringifyOptions::default())
}

/// Serializes a [`Value`] as pretty-printed KODA text with two-space
/// indentation.
///
/// # Examples
///
/// ```rust
/// use koda::{koda, stringify_pretty};
///
/// let text = stringify_pretty(&koda!({"a": 1, "b": 2}));
/// assert_eq!(text, "{\n  a: 1\n  b: 2\n}");
/// ```
#[must_use]
pub fn stringify_pretty(value: &Value) -> String {
    stringify_with_options(value, &StringifyOptions::pretty())
}

/// Serializes a [`Value`] as KODA text with custom formatting.
#[must_use]
pub fn stringify_with_options(value: &Value, options: &StringifyOptions) -> String {
    ser::stringify_value(value, options)
}

/// Encodes a [`Value`] into the canonical binary form using default options.
///
/// Structurally equal values produce byte-identical output regardless of
/// object key insertion order.
///
/// # Examples
///
/// ```rust
/// use koda::{encode, koda};
///
/// let bytes = encode(&koda!(null)).unwrap();
/// assert_eq!(bytes, b"KODA\x01\x00\x00\x00\x00\x01");
/// ```
///
/// # Errors
///
/// Returns [`Error::Encode`] when the tree exceeds the depth limit.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn encode(value: &Value) -> Result<Vec<u8>> {
    encode_with_options(value, &EncodeOptions::default())
}

/// Encodes a [`Value`] into the canonical binary form with an explicit
/// depth limit.
///
/// # Errors
///
/// Returns [`Error::Encode`] when the tree exceeds the depth limit.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn encode_with_options(value: &Value, options: &EncodeOptions) -> Result<Vec<u8>> {
    encode::encode_value(value, options)
}

/// Decodes canonical binary bytes into a [`Value`] using default options.
///
/// # Examples
///
/// ```rust
/// use koda::{decode, encode, koda};
///
/// let value = koda!({"x": [1, 2, 3]});
/// let bytes = encode(&value).unwrap();
/// assert_eq!(decode(&bytes).unwrap(), value);
/// ```
///
/// # Errors
///
/// Returns [`Error::Decode`] with the failing byte offset: truncated or
/// trailing input, a bad magic or version, limit overflows, unknown tags,
/// invalid key indices, ill-formed UTF-8, or duplicate keys.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode(bytes: &[u8]) -> Result<Value> {
    decode_with_options(bytes, &DecodeOptions::default())
}

/// Decodes canonical binary bytes into a [`Value`] with explicit limits.
///
/// # Errors
///
/// Returns [`Error::Decode`] as [`decode`] does.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode_with_options(bytes: &[u8], options: &DecodeOptions) -> Result<Value> {
    decode::decode_value(bytes, options)
}

/// Converts any `T: Serialize` into a [`Value`].
///
/// # Examples
///
/// ```rust
/// use koda::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_object());
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented (e.g. a map with
/// non-string keys).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

/// Converts a [`Value`] into any `T: Deserialize`.
///
/// # Examples
///
/// ```rust
/// use koda::{from_value, koda};
///
/// let xs: Vec<i64> = from_value(koda!([1, 2, 3])).unwrap();
/// assert_eq!(xs, vec![1, 2, 3]);
/// ```
///
/// # Errors
///
/// Returns an error if the value's shape does not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(value)
}

/// Serializes any `T: Serialize` to compact KODA text.
///
/// # Errors
///
/// Returns an error if the value cannot be represented as a KODA tree.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    Ok(stringify(&to_value(value)?))
}

/// Serializes any `T: Serialize` to pretty-printed KODA text.
///
/// # Errors
///
/// Returns an error if the value cannot be represented as a KODA tree.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    Ok(stringify_pretty(&to_value(value)?))
}

/// Deserializes an instance of `T` from KODA text.
///
/// # Examples
///
/// ```rust
/// use koda::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i64, y: i64 }
///
/// let point: Point = from_str("x: 1 y: 2").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid KODA text or does not match
/// the shape of `T`. Parse errors include line and column information.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(text: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(parse(text)?)
}

/// Serializes any `T: Serialize` to canonical binary bytes.
///
/// # Errors
///
/// Returns an error if the value cannot be represented or exceeds the
/// default depth limit.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec<T>(value: &T) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    encode(&to_value(value)?)
}

/// Deserializes an instance of `T` from canonical binary bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not a valid KODA document or do not
/// match the shape of `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(bytes: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value(decode(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Point {
        x: i64,
        y: i64,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Service {
        name: String,
        port: u16,
        enabled: bool,
        tags: Vec<String>,
    }

    #[test]
    fn test_parse_stringify_roundtrip() {
        let value = parse("name: \"my-app\" version: 1").unwrap();
        let text = stringify(&value);
        assert_eq!(parse(&text).unwrap(), value);
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let value = parse("a: [1, 2.5, true, null] b: {c: x}").unwrap();
        let bytes = encode(&value).unwrap();
        assert_eq!(decode(&bytes).unwrap(), value);
    }

    #[test]
    fn test_serde_text_roundtrip() {
        let service = Service {
            name: "gateway".to_string(),
            port: 8080,
            enabled: true,
            tags: vec!["edge".to_string(), "public".to_string()],
        };

        let text = to_string(&service).unwrap();
        let back: Service = from_str(&text).unwrap();
        assert_eq!(service, back);

        let pretty = to_string_pretty(&service).unwrap();
        let back: Service = from_str(&pretty).unwrap();
        assert_eq!(service, back);
    }

    #[test]
    fn test_serde_binary_roundtrip() {
        let point = Point { x: -3, y: 7 };
        let bytes = to_vec(&point).unwrap();
        let back: Point = from_slice(&bytes).unwrap();
        assert_eq!(point, back);
    }

    #[test]
    fn test_to_value() {
        let value = to_value(&Point { x: 1, y: 2 }).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.get("x"), Some(&Value::Int(1)));
        assert_eq!(obj.get("y"), Some(&Value::Int(2)));
    }

    #[test]
    fn test_from_value_mismatch() {
        let result: Result<Point> = from_value(koda!([1, 2]));
        assert!(result.is_err());
    }
}
