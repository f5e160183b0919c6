//! KODA text serialization.
//!
//! Turns a [`Value`] back into `.koda` text. Identifier-shaped strings are
//! emitted bare; everything else is double-quoted with escapes. Object
//! entries are written in the map's insertion order: canonicalization is a
//! binary-encoding concern, the text form stays faithful to the tree it was
//! given.
//!
//! This module also hosts [`ValueSerializer`], the [`serde::Serializer`]
//! that turns any `T: Serialize` into a [`Value`]; it backs
//! [`to_value`](crate::to_value) and, through it, the generic text and
//! binary conveniences in the crate root.
//!
//! ```rust
//! use koda::{koda, stringify};
//!
//! let value = koda!({"name": "my-app", "tags": ["a", "b"]});
//! assert_eq!(stringify(&value), "{name: my-app tags: [a b ] }");
//! ```

use crate::options::StringifyOptions;
use crate::{Error, KodaMap, Result, Value};
use serde::{ser, Serialize};
use std::fmt::Write;

pub(crate) fn stringify_value(value: &Value, options: &StringifyOptions) -> String {
    let mut out = String::with_capacity(256);
    write_value(value, options, 0, &mut out);
    out
}

fn write_value(value: &Value, options: &StringifyOptions, level: usize, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Int(i) => {
            let _ = write!(out, "{}", i);
        }
        Value::Float(f) => write_float(*f, out),
        Value::String(s) => write_string(s, out),
        Value::Array(arr) => {
            if arr.is_empty() {
                out.push_str("[]");
            } else if options.indent.is_empty() {
                out.push('[');
                for (i, element) in arr.iter().enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    write_value(element, options, level + 1, out);
                }
                out.push_str(" ]");
            } else {
                out.push('[');
                for element in arr {
                    push_line(options, level + 1, out);
                    write_value(element, options, level + 1, out);
                }
                push_line(options, level, out);
                out.push(']');
            }
        }
        Value::Object(obj) => {
            if obj.is_empty() {
                out.push_str("{}");
            } else if options.indent.is_empty() {
                out.push('{');
                for (i, (key, entry)) in obj.iter().enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    write_string(key, out);
                    out.push_str(": ");
                    write_value(entry, options, level + 1, out);
                }
                out.push_str(" }");
            } else {
                out.push('{');
                for (key, entry) in obj.iter() {
                    push_line(options, level + 1, out);
                    write_string(key, out);
                    out.push_str(": ");
                    write_value(entry, options, level + 1, out);
                }
                push_line(options, level, out);
                out.push('}');
            }
        }
    }
}

fn push_line(options: &StringifyOptions, level: usize, out: &mut String) {
    out.push_str(&options.newline);
    for _ in 0..level {
        out.push_str(&options.indent);
    }
}

/// Integral finite floats keep a `.0` suffix so they re-parse as floats,
/// not integers. Non-finite floats render with the host spelling; they are
/// not expected to round-trip through text.
fn write_float(f: f64, out: &mut String) {
    let start = out.len();
    let _ = write!(out, "{}", f);
    if f.is_finite() && !out[start..].contains('.') {
        out.push_str(".0");
    }
}

/// A string is emitted bare when it has identifier shape and is not a
/// reserved spelling; object keys use the same rule.
fn is_bare(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some('A'..='Z' | 'a'..='z' | '_') => {}
        _ => return false,
    }
    if !chars.all(|c| matches!(c, 'A'..='Z' | 'a'..='z' | '0'..='9' | '_' | '-')) {
        return false;
    }
    !s.eq_ignore_ascii_case("true") && !s.eq_ignore_ascii_case("false")
        && !s.eq_ignore_ascii_case("null")
}

fn write_string(s: &str, out: &mut String) {
    if is_bare(s) {
        out.push_str(s);
        return;
    }
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if (ch as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", ch as u32);
            }
            ch => out.push(ch),
        }
    }
    out.push('"');
}

/// A [`serde::Serializer`] whose output is a [`Value`] tree.
///
/// # Examples
///
/// ```rust
/// use koda::{Value, ValueSerializer};
/// use serde::Serialize;
///
/// let value = 42i32.serialize(ValueSerializer).unwrap();
/// assert_eq!(value, Value::Int(42));
/// ```
pub struct ValueSerializer;

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeSeq;
    type SerializeTuple = SerializeSeq;
    type SerializeTupleStruct = SerializeSeq;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Int(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        if v <= i64::MAX as u64 {
            Ok(Value::Int(v as i64))
        } else {
            Ok(Value::Float(v as f64))
        }
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::Float(v as f64))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::Array(v.iter().map(|b| Value::Int(*b as i64)).collect()))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        let mut object = KodaMap::new();
        object.insert(variant.to_string(), value.serialize(ValueSerializer)?);
        Ok(Value::Object(object))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(SerializeSeq {
            elements: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Ok(SerializeTupleVariant {
            variant,
            elements: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(SerializeMap {
            object: KodaMap::new(),
            next_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        self.serialize_map(None)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Ok(SerializeStructVariant {
            variant,
            object: KodaMap::new(),
        })
    }
}

pub struct SerializeSeq {
    elements: Vec<Value>,
}

impl ser::SerializeSeq for SerializeSeq {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.elements.push(value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.elements))
    }
}

impl ser::SerializeTuple for SerializeSeq {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeSeq {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

pub struct SerializeTupleVariant {
    variant: &'static str,
    elements: Vec<Value>,
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.elements.push(value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        let mut object = KodaMap::new();
        object.insert(self.variant.to_string(), Value::Array(self.elements));
        Ok(Value::Object(object))
    }
}

pub struct SerializeMap {
    object: KodaMap,
    next_key: Option<String>,
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match key.serialize(ValueSerializer)? {
            Value::String(s) => {
                self.next_key = Some(s);
                Ok(())
            }
            _ => Err(Error::custom("object keys must be strings")),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .next_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called before serialize_key"))?;
        self.object.insert(key, value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.object))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.object
            .insert(key.to_string(), value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.object))
    }
}

pub struct SerializeStructVariant {
    variant: &'static str,
    object: KodaMap,
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.object
            .insert(key.to_string(), value.serialize(ValueSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        let mut wrapper = KodaMap::new();
        wrapper.insert(self.variant.to_string(), Value::Object(self.object));
        Ok(Value::Object(wrapper))
    }
}
