//! Canonical binary encoding.
//!
//! Produces the `.kod` byte stream: a `KODA` magic, a version byte, the
//! global key dictionary, then the tagged root value. Structurally equal
//! trees always produce byte-identical output, whatever the in-memory key
//! order of their objects, because both the dictionary and every object's
//! entry list are sorted by UTF-8 byte comparison before emission.
//!
//! All multi-byte integers are big-endian. There is no trailer, checksum,
//! or alignment padding.

use crate::options::EncodeOptions;
use crate::{Error, Result, Value};
use std::collections::{BTreeSet, HashMap};

pub(crate) const MAGIC: [u8; 4] = *b"KODA";
pub(crate) const VERSION: u8 = 1;

pub(crate) const TAG_NULL: u8 = 0x01;
pub(crate) const TAG_FALSE: u8 = 0x02;
pub(crate) const TAG_TRUE: u8 = 0x03;
pub(crate) const TAG_INTEGER: u8 = 0x04;
pub(crate) const TAG_FLOAT: u8 = 0x05;
pub(crate) const TAG_STRING: u8 = 0x06;
/// Reserved for byte strings in a future version; never emitted.
pub(crate) const TAG_BINARY: u8 = 0x07;
pub(crate) const TAG_ARRAY: u8 = 0x10;
pub(crate) const TAG_OBJECT: u8 = 0x11;

pub(crate) fn encode_value(value: &Value, options: &EncodeOptions) -> Result<Vec<u8>> {
    let mut keys = BTreeSet::new();
    collect_keys(value, 0, options.max_depth, &mut keys)?;

    // BTreeSet iteration order over &str is UTF-8 byte order.
    let dictionary: Vec<&str> = keys.into_iter().collect();
    let index: HashMap<&str, u32> = dictionary
        .iter()
        .enumerate()
        .map(|(i, k)| (*k, i as u32))
        .collect();

    let mut enc = Encoder {
        buf: Vec::with_capacity(64),
        max_depth: options.max_depth,
        index,
    };
    enc.buf.extend_from_slice(&MAGIC);
    enc.u8(VERSION);
    enc.length(dictionary.len(), "Dictionary too large")?;
    for key in &dictionary {
        enc.length(key.len(), "Key string too long")?;
        enc.buf.extend_from_slice(key.as_bytes());
    }
    enc.value(value, 0)?;
    Ok(enc.buf)
}

/// Gathers every object key in the tree into one deduplicated, sorted set.
/// Shares the encoder's depth budget: key collection walks the same tree.
fn collect_keys<'a>(
    value: &'a Value,
    depth: usize,
    max_depth: usize,
    out: &mut BTreeSet<&'a str>,
) -> Result<()> {
    if depth > max_depth {
        return Err(Error::encode(0, "Maximum nesting depth exceeded"));
    }
    match value {
        Value::Array(arr) => {
            for element in arr {
                collect_keys(element, depth + 1, max_depth, out)?;
            }
        }
        Value::Object(obj) => {
            for (key, entry) in obj.iter() {
                out.insert(key);
                collect_keys(entry, depth + 1, max_depth, out)?;
            }
        }
        _ => {}
    }
    Ok(())
}

struct Encoder<'a> {
    buf: Vec<u8>,
    max_depth: usize,
    index: HashMap<&'a str, u32>,
}

impl Encoder<'_> {
    fn u8(&mut self, x: u8) {
        self.buf.push(x);
    }

    fn u32_be(&mut self, x: u32) {
        self.buf.extend_from_slice(&x.to_be_bytes());
    }

    fn length(&mut self, len: usize, overflow_msg: &str) -> Result<()> {
        let len = u32::try_from(len).map_err(|_| Error::encode(self.buf.len(), overflow_msg))?;
        self.u32_be(len);
        Ok(())
    }

    fn value(&mut self, value: &Value, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            return Err(Error::encode(self.buf.len(), "Maximum nesting depth exceeded"));
        }
        match value {
            Value::Null => self.u8(TAG_NULL),
            Value::Bool(false) => self.u8(TAG_FALSE),
            Value::Bool(true) => self.u8(TAG_TRUE),
            Value::Int(i) => {
                self.u8(TAG_INTEGER);
                self.buf.extend_from_slice(&i.to_be_bytes());
            }
            Value::Float(f) => {
                self.u8(TAG_FLOAT);
                self.buf.extend_from_slice(&f.to_bits().to_be_bytes());
            }
            Value::String(s) => {
                self.u8(TAG_STRING);
                self.length(s.len(), "String too long")?;
                self.buf.extend_from_slice(s.as_bytes());
            }
            Value::Array(arr) => {
                self.u8(TAG_ARRAY);
                self.length(arr.len(), "Array too large")?;
                for element in arr {
                    self.value(element, depth + 1)?;
                }
            }
            Value::Object(obj) => {
                self.u8(TAG_OBJECT);
                let mut entries: Vec<(&String, &Value)> = obj.iter().collect();
                entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
                self.length(entries.len(), "Object too large")?;
                for (key, entry) in entries {
                    let idx = self
                        .index
                        .get(key.as_str())
                        .copied()
                        .ok_or_else(|| Error::encode(self.buf.len(), "Key not in dictionary"))?;
                    self.u32_be(idx);
                    self.value(entry, depth + 1)?;
                }
            }
        }
        Ok(())
    }
}
