//! Decoder for the PHP serialized-value format.
//!
//! PEAR stores its configuration (and answers some remote calls) using PHP's
//! `serialize()` format: a length-prefixed, tag-driven text encoding of
//! scalars, ordered arrays and objects. This crate decodes it into a
//! [`SerializedValue`] tree.
//!
//! ```
//! use pearl_serialized::{Decoder, SerializedValue};
//!
//! let value = Decoder::new().parse(r#"a:1:{s:3:"foo";i:42;}"#).unwrap();
//! assert_eq!(value.get("foo"), Some(&SerializedValue::Int(42)));
//! ```
//!
//! String lengths in the wire format count bytes, not characters, so
//! multi-byte UTF-8 content is sliced by byte offset before it is decoded.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod decoder;
pub mod error;
pub mod value;

pub use decoder::{Decoder, MAX_DEPTH};
pub use error::{ParseError, Result};
pub use value::SerializedValue;

/// Decode `input` with a default [`Decoder`] (no attribute filter).
pub fn from_str(input: &str) -> Result<SerializedValue> {
    Decoder::new().parse(input)
}
