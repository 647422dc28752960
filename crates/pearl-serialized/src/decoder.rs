//! Recursive-descent decoder for the serialized-value grammar.
//!
//! ```text
//! N;                                   null
//! b:0;  b:1;  b:false;                 bool
//! i:<digits>;                          int
//! d:<decimal>;                         float
//! s:<byteLen>:"<bytes>";               string
//! a:<pairCount>:{<key><value>...}      ordered array
//! O:<nameLen>:"<name>":<count>:{...}   object
//! ```
//!
//! Each call to [`Decoder::parse`] owns a fresh [`Cursor`] over the input's
//! bytes; the cursor is threaded by `&mut` through the recursive calls.

use crate::error::{ParseError, Result};
use crate::value::SerializedValue;
use indexmap::IndexMap;
use regex::Regex;
use tracing::trace;

/// Maximum container nesting accepted by the decoder.
pub const MAX_DEPTH: usize = 512;

/// Byte cursor over one input string.
#[derive(Debug)]
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    const fn new(input: &'a str) -> Self {
        Self {
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    fn next_byte(&mut self, expected: &'static str) -> Result<u8> {
        let byte = *self.bytes.get(self.pos).ok_or(ParseError::TruncatedInput {
            position: self.pos,
            expected,
        })?;
        self.pos += 1;
        Ok(byte)
    }

    fn expect(&mut self, delimiter: u8) -> Result<()> {
        let position = self.pos;
        let found = self.next_byte(delimiter_name(delimiter))?;
        if found == delimiter {
            Ok(())
        } else {
            Err(ParseError::UnexpectedByte {
                position,
                expected: char::from(delimiter),
                found: char::from(found),
            })
        }
    }

    /// Consume bytes up to (not including) `delimiter`, then skip it.
    fn until(&mut self, delimiter: u8) -> Result<&'a str> {
        let start = self.pos;
        let rest = &self.bytes[start..];
        let len = rest
            .iter()
            .position(|b| *b == delimiter)
            .ok_or(ParseError::TruncatedInput {
                position: self.bytes.len(),
                expected: delimiter_name(delimiter),
            })?;
        self.pos = start + len + 1;
        std::str::from_utf8(&rest[..len]).map_err(|_| ParseError::InvalidUtf8 { position: start })
    }

    /// Consume exactly `len` bytes and decode them as UTF-8.
    fn take(&mut self, len: usize) -> Result<&'a str> {
        let start = self.pos;
        let end = start
            .checked_add(len)
            .filter(|end| *end <= self.bytes.len())
            .ok_or(ParseError::TruncatedInput {
                position: self.bytes.len(),
                expected: "string payload",
            })?;
        self.pos = end;
        std::str::from_utf8(&self.bytes[start..end])
            .map_err(|_| ParseError::InvalidUtf8 { position: start })
    }

    /// Read a decimal length terminated by `:`.
    fn length(&mut self) -> Result<usize> {
        let position = self.pos;
        let text = self.until(b':')?;
        if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseError::MalformedLength {
                position,
                found: text.to_string(),
            });
        }
        text.parse().map_err(|_| ParseError::MalformedLength {
            position,
            found: text.to_string(),
        })
    }

    /// Read a `"<len bytes>"` quoted payload.
    fn quoted(&mut self, len: usize) -> Result<&'a str> {
        self.expect(b'"')?;
        let payload = self.take(len)?;
        self.expect(b'"')?;
        Ok(payload)
    }
}

const fn delimiter_name(delimiter: u8) -> &'static str {
    match delimiter {
        b';' => "';'",
        b':' => "':'",
        b'"' => "'\"'",
        b'{' => "'{'",
        b'}' => "'}'",
        _ => "delimiter",
    }
}

/// Decoder for serialized values.
///
/// The decoder itself only carries configuration (the accepted attribute
/// filter); it can be reused for any number of inputs.
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    accepted_attributes: Option<Regex>,
}

impl Decoder {
    /// Create a decoder that keeps every attribute.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            accepted_attributes: None,
        }
    }

    /// Create a decoder with an accepted-attribute filter.
    pub fn with_attribute_filter(pattern: &str) -> Result<Self> {
        let mut decoder = Self::new();
        decoder.set_accepted_attribute_filter(pattern)?;
        Ok(decoder)
    }

    /// Only keep attributes whose whole name matches `pattern`.
    ///
    /// Applies to string keys of objects and arrays decoded afterwards;
    /// integer keys are always kept. Rejected pairs are still consumed.
    pub fn set_accepted_attribute_filter(&mut self, pattern: &str) -> Result<()> {
        self.accepted_attributes = Some(Regex::new(&format!("^(?:{pattern})$"))?);
        Ok(())
    }

    /// Remove the accepted-attribute filter.
    pub fn clear_accepted_attribute_filter(&mut self) {
        self.accepted_attributes = None;
    }

    /// Decode one value from the start of `input`.
    ///
    /// Bytes after the first complete value are ignored; use
    /// [`parse_prefix`](Self::parse_prefix) to find out how many were used.
    pub fn parse(&self, input: &str) -> Result<SerializedValue> {
        self.parse_prefix(input).map(|(value, _)| value)
    }

    /// Decode one value and return it with the number of bytes consumed.
    pub fn parse_prefix(&self, input: &str) -> Result<(SerializedValue, usize)> {
        let mut cursor = Cursor::new(input);
        let value = self.value(&mut cursor, 0)?;
        trace!(consumed = cursor.pos, total = input.len(), "decoded value");
        Ok((value, cursor.pos))
    }

    fn accepts(&self, key: &SerializedValue) -> bool {
        match (&self.accepted_attributes, key) {
            (Some(filter), SerializedValue::Str(name)) => filter.is_match(name),
            _ => true,
        }
    }

    fn value(&self, cursor: &mut Cursor<'_>, depth: usize) -> Result<SerializedValue> {
        let position = cursor.pos;
        let tag = cursor.next_byte("type tag")?;
        match tag {
            b'N' => {
                cursor.expect(b';')?;
                Ok(SerializedValue::Null)
            }
            b'b' => {
                cursor.expect(b':')?;
                let literal = cursor.until(b';')?;
                match literal {
                    "1" | "true" => Ok(SerializedValue::Bool(true)),
                    "0" | "false" => Ok(SerializedValue::Bool(false)),
                    other => Err(invalid_literal("bool", other, position)),
                }
            }
            b'i' => {
                cursor.expect(b':')?;
                let literal = cursor.until(b';')?;
                literal
                    .parse()
                    .map(SerializedValue::Int)
                    .map_err(|_| invalid_literal("int", literal, position))
            }
            b'd' => {
                cursor.expect(b':')?;
                let literal = cursor.until(b';')?;
                parse_float(literal)
                    .map(SerializedValue::Float)
                    .ok_or_else(|| invalid_literal("float", literal, position))
            }
            b's' => {
                cursor.expect(b':')?;
                let len = cursor.length()?;
                let payload = cursor.quoted(len)?;
                cursor.expect(b';')?;
                Ok(SerializedValue::Str(payload.to_string()))
            }
            b'a' => {
                cursor.expect(b':')?;
                let count = cursor.length()?;
                let pairs = self.pairs(cursor, count, depth)?;
                Ok(SerializedValue::Array(pairs))
            }
            b'O' => {
                cursor.expect(b':')?;
                let name_len = cursor.length()?;
                let type_name = cursor.quoted(name_len)?.to_string();
                cursor.expect(b':')?;
                let count = cursor.length()?;
                let attributes = self.attributes(cursor, count, depth)?;
                Ok(SerializedValue::Object {
                    type_name,
                    attributes,
                })
            }
            other => Err(ParseError::UnknownType {
                tag: char::from(other),
                position,
            }),
        }
    }

    fn enter(depth: usize) -> Result<usize> {
        if depth >= MAX_DEPTH {
            Err(ParseError::DepthExceeded { limit: MAX_DEPTH })
        } else {
            Ok(depth + 1)
        }
    }

    fn pairs(
        &self,
        cursor: &mut Cursor<'_>,
        count: usize,
        depth: usize,
    ) -> Result<Vec<(SerializedValue, SerializedValue)>> {
        let depth = Self::enter(depth)?;
        cursor.expect(b'{')?;
        let mut pairs = Vec::with_capacity(count.min(1024));
        for _ in 0..count {
            let key = self.value(cursor, depth)?;
            let value = self.value(cursor, depth)?;
            if self.accepts(&key) {
                pairs.push((key, value));
            }
        }
        cursor.expect(b'}')?;
        Ok(pairs)
    }

    fn attributes(
        &self,
        cursor: &mut Cursor<'_>,
        count: usize,
        depth: usize,
    ) -> Result<IndexMap<String, SerializedValue>> {
        let depth = Self::enter(depth)?;
        cursor.expect(b'{')?;
        let mut attributes = IndexMap::with_capacity(count.min(1024));
        for _ in 0..count {
            let position = cursor.pos;
            let key = self.value(cursor, depth)?;
            let accepted = self.accepts(&key);
            let name = match key {
                SerializedValue::Str(name) => name,
                SerializedValue::Int(i) => i.to_string(),
                _ => return Err(ParseError::InvalidAttributeName { position }),
            };
            let value = self.value(cursor, depth)?;
            if accepted {
                attributes.insert(name, value);
            } else {
                trace!(attribute = %name, "attribute rejected by filter");
            }
        }
        cursor.expect(b'}')?;
        Ok(attributes)
    }
}

fn invalid_literal(kind: &'static str, value: &str, position: usize) -> ParseError {
    ParseError::InvalidLiteral {
        kind,
        value: value.to_string(),
        position,
    }
}

fn parse_float(literal: &str) -> Option<f64> {
    match literal {
        "INF" => Some(f64::INFINITY),
        "-INF" => Some(f64::NEG_INFINITY),
        "NAN" => Some(f64::NAN),
        _ => literal.parse().ok(),
    }
}
