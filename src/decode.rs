//! Binary decoding.
//!
//! Rebuilds a [`Value`] from a `.kod` byte stream. The decoder validates the
//! header, loads the key dictionary, then descends recursively through the
//! tagged values. Every limit is checked before any allocation proportional
//! to a declared length, so adversarial inputs fail fast; every error
//! carries the read offset at the point of failure.

use crate::encode::{
    MAGIC, TAG_ARRAY, TAG_BINARY, TAG_FALSE, TAG_FLOAT, TAG_INTEGER, TAG_NULL, TAG_OBJECT,
    TAG_STRING, TAG_TRUE, VERSION,
};
use crate::options::DecodeOptions;
use crate::{Error, KodaMap, Result, Value};

pub(crate) fn decode_value(data: &[u8], options: &DecodeOptions) -> Result<Value> {
    let mut dec = Decoder {
        data,
        offset: 0,
        options,
        dictionary: Vec::new(),
    };
    dec.header()?;
    dec.dictionary()?;
    let value = dec.value(0)?;
    if dec.offset != dec.data.len() {
        return Err(dec.error("Trailing bytes after root value"));
    }
    Ok(value)
}

struct Decoder<'a> {
    data: &'a [u8],
    offset: usize,
    options: &'a DecodeOptions,
    dictionary: Vec<String>,
}

impl Decoder<'_> {
    fn error(&self, msg: &str) -> Error {
        Error::decode(self.offset, msg)
    }

    fn ensure(&self, n: usize) -> Result<()> {
        if self.data.len() - self.offset < n {
            Err(self.error("Truncated input"))
        } else {
            Ok(())
        }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    fn u8(&mut self) -> Result<u8> {
        self.ensure(1)?;
        let x = self.data[self.offset];
        self.offset += 1;
        Ok(x)
    }

    fn u32_be(&mut self) -> Result<u32> {
        self.ensure(4)?;
        let b = &self.data[self.offset..self.offset + 4];
        self.offset += 4;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn bytes8(&mut self) -> Result<[u8; 8]> {
        self.ensure(8)?;
        let b = &self.data[self.offset..self.offset + 8];
        self.offset += 8;
        Ok([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]])
    }

    fn utf8(&mut self, len: usize) -> Result<String> {
        self.ensure(len)?;
        let slice = &self.data[self.offset..self.offset + len];
        let s = std::str::from_utf8(slice).map_err(|_| self.error("Invalid UTF-8 in string"))?;
        self.offset += len;
        Ok(s.to_string())
    }

    fn header(&mut self) -> Result<()> {
        self.ensure(5)?;
        for (i, expected) in MAGIC.iter().enumerate() {
            if self.data[i] != *expected {
                self.offset = i;
                return Err(self.error("Invalid magic number"));
            }
        }
        self.offset = 4;
        if self.u8()? != VERSION {
            self.offset = 4;
            return Err(self.error("Unsupported version"));
        }
        Ok(())
    }

    fn dictionary(&mut self) -> Result<()> {
        let dict_len = self.u32_be()? as usize;
        if dict_len > self.options.max_dictionary_size {
            return Err(self.error("Dictionary too large"));
        }
        // Each entry takes at least its 4-byte length prefix, so the
        // remaining input bounds a safe reservation.
        self.dictionary = Vec::with_capacity(dict_len.min(self.remaining() / 4));
        for _ in 0..dict_len {
            let key_len = self.u32_be()? as usize;
            if key_len > self.options.max_string_length {
                return Err(self.error("Key string too long"));
            }
            let key = self.utf8(key_len)?;
            self.dictionary.push(key);
        }
        Ok(())
    }

    fn value(&mut self, depth: usize) -> Result<Value> {
        if depth > self.options.max_depth {
            return Err(self.error("Maximum nesting depth exceeded"));
        }
        match self.u8()? {
            TAG_NULL => Ok(Value::Null),
            TAG_FALSE => Ok(Value::Bool(false)),
            TAG_TRUE => Ok(Value::Bool(true)),
            TAG_INTEGER => Ok(Value::Int(i64::from_be_bytes(self.bytes8()?))),
            TAG_FLOAT => Ok(Value::Float(f64::from_bits(u64::from_be_bytes(
                self.bytes8()?,
            )))),
            TAG_STRING => {
                let len = self.u32_be()? as usize;
                if len > self.options.max_string_length {
                    return Err(self.error("String too long"));
                }
                Ok(Value::String(self.utf8(len)?))
            }
            TAG_BINARY => Err(self.error("Binary type not supported")),
            TAG_ARRAY => {
                let count = self.u32_be()? as usize;
                // Every element is at least one tag byte.
                let mut elements = Vec::with_capacity(count.min(self.remaining()));
                for _ in 0..count {
                    elements.push(self.value(depth + 1)?);
                }
                Ok(Value::Array(elements))
            }
            TAG_OBJECT => {
                let count = self.u32_be()? as usize;
                // Every entry is at least a 4-byte index plus a tag byte.
                let mut object = KodaMap::with_capacity(count.min(self.remaining() / 5));
                for _ in 0..count {
                    let idx = self.u32_be()? as usize;
                    let key = match self.dictionary.get(idx) {
                        Some(key) => key.clone(),
                        None => return Err(self.error("Invalid key index")),
                    };
                    let entry = self.value(depth + 1)?;
                    if object.insert(key, entry).is_some() {
                        return Err(self.error("Duplicate key"));
                    }
                }
                Ok(Value::Object(object))
            }
            _ => Err(self.error("Unknown type tag")),
        }
    }
}
