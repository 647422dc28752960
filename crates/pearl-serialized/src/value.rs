//! Decoded value tree.

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// A decoded PHP value.
///
/// `Array` keeps its pairs in wire order; keys are usually integers or
/// strings but are not required to be unique. `Object` attributes keep their
/// wire order as well.
#[derive(Debug, Clone, PartialEq)]
pub enum SerializedValue {
    /// `N;`
    Null,
    /// `b:0;`, `b:1;` (and the non-conformant `b:false;`)
    Bool(bool),
    /// `i:<digits>;`
    Int(i64),
    /// `d:<decimal>;`
    Float(f64),
    /// `s:<byteLen>:"<bytes>";`
    Str(String),
    /// `a:<pairCount>:{...}`
    Array(Vec<(SerializedValue, SerializedValue)>),
    /// `O:<nameLen>:"<name>":<attrCount>:{...}`
    Object {
        /// PHP class name.
        type_name: String,
        /// Attributes that passed the decoder's filter.
        attributes: IndexMap<String, SerializedValue>,
    },
}

impl SerializedValue {
    /// Whether this is `Null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The string payload, if this is a `Str`.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The integer payload, if this is an `Int`.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// The float payload, if this is a `Float`.
    #[must_use]
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// The boolean payload, if this is a `Bool`.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Array pairs, if this is an `Array`.
    #[must_use]
    pub fn entries(&self) -> Option<&[(Self, Self)]> {
        match self {
            Self::Array(pairs) => Some(pairs),
            _ => None,
        }
    }

    /// Look up a string key in an `Array` or an attribute of an `Object`.
    ///
    /// Arrays with duplicate keys resolve to the last pair, as PHP does.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Array(pairs) => pairs
                .iter()
                .rev()
                .find(|(k, _)| k.as_str() == Some(key))
                .map(|(_, v)| v),
            Self::Object { attributes, .. } => attributes.get(key),
            _ => None,
        }
    }

    /// Look up an integer key in an `Array`.
    #[must_use]
    pub fn get_int(&self, key: i64) -> Option<&Self> {
        self.entries()?
            .iter()
            .rev()
            .find(|(k, _)| k.as_int() == Some(key))
            .map(|(_, v)| v)
    }

    /// Number of pairs (arrays) or attributes (objects); zero for scalars.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Array(pairs) => pairs.len(),
            Self::Object { attributes, .. } => attributes.len(),
            _ => 0,
        }
    }

    /// Whether [`len`](Self::len) is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn key_string(&self) -> String {
        match self {
            Self::Str(s) => s.clone(),
            Self::Int(i) => i.to_string(),
            other => other.to_string(),
        }
    }
}

fn write_str(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    write!(f, "s:{}:\"{s}\";", s.len())
}

/// Formats the value back into the wire format.
impl fmt::Display for SerializedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("N;"),
            Self::Bool(b) => write!(f, "b:{};", u8::from(*b)),
            Self::Int(i) => write!(f, "i:{i};"),
            Self::Float(x) if x.is_nan() => f.write_str("d:NAN;"),
            Self::Float(x) if x.is_infinite() => {
                write!(f, "d:{}INF;", if *x < 0.0 { "-" } else { "" })
            }
            Self::Float(x) => write!(f, "d:{x};"),
            Self::Str(s) => write_str(f, s),
            Self::Array(pairs) => {
                write!(f, "a:{}:{{", pairs.len())?;
                for (k, v) in pairs {
                    write!(f, "{k}{v}")?;
                }
                f.write_str("}")
            }
            Self::Object {
                type_name,
                attributes,
            } => {
                write!(
                    f,
                    "O:{}:\"{type_name}\":{}:{{",
                    type_name.len(),
                    attributes.len()
                )?;
                for (k, v) in attributes {
                    write_str(f, k)?;
                    write!(f, "{v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl Serialize for SerializedValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Float(x) => serializer.serialize_f64(*x),
            Self::Str(s) => serializer.serialize_str(s),
            Self::Array(pairs) => {
                let mut map = serializer.serialize_map(Some(pairs.len()))?;
                for (k, v) in pairs {
                    map.serialize_entry(&k.key_string(), v)?;
                }
                map.end()
            }
            Self::Object {
                type_name,
                attributes,
            } => {
                let mut map = serializer.serialize_map(Some(attributes.len() + 1))?;
                map.serialize_entry("__class", type_name)?;
                for (k, v) in attributes {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SerializedValue {
        SerializedValue::Array(vec![
            (
                SerializedValue::Str("php_dir".into()),
                SerializedValue::Str("/usr/share/php".into()),
            ),
            (SerializedValue::Int(0), SerializedValue::Bool(true)),
            (
                SerializedValue::Str("php_dir".into()),
                SerializedValue::Str("/opt/php".into()),
            ),
        ])
    }

    #[test]
    fn lookup_prefers_last_duplicate() {
        let value = sample();
        assert_eq!(value.get("php_dir").and_then(|v| v.as_str()), Some("/opt/php"));
        assert_eq!(value.get_int(0), Some(&SerializedValue::Bool(true)));
        assert!(value.get("missing").is_none());
        assert_eq!(value.len(), 3);
    }

    #[test]
    fn display_uses_byte_lengths() {
        let value = SerializedValue::Str("strä€g".into());
        assert_eq!(value.to_string(), "s:9:\"strä€g\";");
    }

    #[test]
    fn display_object() {
        let mut attributes = IndexMap::new();
        attributes.insert("foo".to_string(), SerializedValue::Str("bar".into()));
        let value = SerializedValue::Object {
            type_name: "TypeName".into(),
            attributes,
        };
        assert_eq!(
            value.to_string(),
            "O:8:\"TypeName\":1:{s:3:\"foo\";s:3:\"bar\";}"
        );
    }

    #[test]
    fn serialize_to_json() {
        let json = sonic_rs::to_string(&sample()).unwrap();
        assert!(json.contains("\"0\":true"));
        assert!(json.contains("/opt/php"));
    }
}
