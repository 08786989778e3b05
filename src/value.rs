//! Generic value tree for VDF data.
//!
//! Every VDF document parses into a [`Value`]: either a string leaf or an
//! ordered object of further values. There are no other node kinds; numbers,
//! booleans and dates only exist once a tree is bound onto a typed target.
//!
//! ## Usage Patterns
//!
//! ### Untyped access
//!
//! ```rust
//! use serde_vdf::parse;
//!
//! let text = r#"
//! "UserRoamingConfigStore"
//! {
//!     "Software"
//!     {
//!         "Valve" { "Steam" { "SurveyDate" "2017-07-03" } }
//!     }
//! }
//! "#;
//!
//! let root = parse(text).unwrap();
//! let date = root
//!     .get_path(&["UserRoamingConfigStore", "Software", "Valve", "Steam", "SurveyDate"])
//!     .and_then(|v| v.as_str());
//! assert_eq!(date, Some("2017-07-03"));
//! ```
//!
//! ### Converting from Rust types
//!
//! ```rust
//! use serde_vdf::{to_value, Value};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct App { name: String, installed: bool }
//!
//! let value = to_value(&App { name: "Portal".into(), installed: true }).unwrap();
//! assert_eq!(value.get("installed").and_then(Value::as_str), Some("1"));
//! ```

use crate::VdfMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A node of a parsed VDF document.
///
/// # Examples
///
/// ```rust
/// use serde_vdf::{Value, VdfMap};
///
/// let leaf = Value::from("Survival & Horror");
/// assert!(leaf.is_leaf());
///
/// let mut tags = VdfMap::new();
/// tags.insert("0".to_string(), leaf);
/// let object = Value::Object(tags);
/// assert!(object.is_object());
/// assert_eq!(object.get("0").and_then(|v| v.as_str()), Some("Survival & Horror"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Leaf(String),
    Object(VdfMap),
}

impl Default for Value {
    fn default() -> Self {
        Value::Object(VdfMap::new())
    }
}

impl Value {
    /// Returns `true` if the value is a string leaf.
    #[inline]
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Value::Leaf(_))
    }

    /// Returns `true` if the value is an object.
    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// If the value is a leaf, returns its text. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Leaf(s) => Some(s),
            Value::Object(_) => None,
        }
    }

    /// If the value is an object, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&VdfMap> {
        match self {
            Value::Object(obj) => Some(obj),
            Value::Leaf(_) => None,
        }
    }

    /// If the value is an object, returns a mutable reference to it.
    #[inline]
    pub fn as_object_mut(&mut self) -> Option<&mut VdfMap> {
        match self {
            Value::Object(obj) => Some(obj),
            Value::Leaf(_) => None,
        }
    }

    /// Looks up `key` in an object, case-sensitively. Leaves have no children.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|obj| obj.get(key))
    }

    /// Follows a chain of keys from this node.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_vdf::parse;
    ///
    /// let root = parse("\"a\" { \"b\" { \"c\" \"d\" } }").unwrap();
    /// assert_eq!(root.get_path(&["a", "b", "c"]).and_then(|v| v.as_str()), Some("d"));
    /// assert!(root.get_path(&["a", "x"]).is_none());
    /// ```
    #[must_use]
    pub fn get_path(&self, path: &[&str]) -> Option<&Value> {
        path.iter().try_fold(self, |node, key| node.get(key))
    }

    /// Short description of the node kind, used in error messages.
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Value::Leaf(_) => "string leaf",
            Value::Object(_) => "object",
        }
    }
}

impl fmt::Display for Value {
    /// Leaves display as their raw text; objects display as VDF.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Leaf(s) => f.write_str(s),
            Value::Object(_) => {
                let text = crate::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&text)
            }
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Leaf(s) => serializer.serialize_str(s),
            Value::Object(obj) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (k, v) in obj.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a VDF string or object")
            }

            // Scalars from self-describing formats are folded into leaves the
            // same way the writer renders them.
            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Value::from(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Value::Leaf(value.to_string()))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                Ok(Value::Leaf(value.to_string()))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Value::Leaf(value.to_string()))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Value::Leaf(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Value::Leaf(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Leaf(String::new()))
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Leaf(String::new()))
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut values = VdfMap::new();
                let mut index = 0usize;
                while let Some(elem) = seq.next_element()? {
                    values.insert(index.to_string(), elem);
                    index += 1;
                }
                Ok(Value::Object(values))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = VdfMap::new();
                while let Some((key, value)) = map.next_entry()? {
                    values.insert(key, value);
                }
                Ok(Value::Object(values))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Leaf(s) => Ok(s),
            other => Err(crate::Error::type_mismatch("string leaf", other.kind())),
        }
    }
}

impl TryFrom<Value> for VdfMap {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Object(obj) => Ok(obj),
            other => Err(crate::Error::type_mismatch("object", other.kind())),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Leaf(if value { "1" } else { "0" }.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Leaf(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Leaf(value.to_string())
    }
}

impl From<VdfMap> for Value {
    fn from(value: VdfMap) -> Self {
        Value::Object(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tryfrom_string() {
        let result: String = TryFrom::try_from(Value::from("hello")).unwrap();
        assert_eq!(result, "hello");
        assert!(String::try_from(Value::Object(VdfMap::new())).is_err());
    }

    #[test]
    fn test_bool_leaves_use_digits() {
        assert_eq!(Value::from(true), Value::Leaf("1".to_string()));
        assert_eq!(Value::from(false), Value::Leaf("0".to_string()));
    }

    #[test]
    fn test_from_json_value() {
        let json = serde_json::json!({
            "name": "Portal",
            "appid": 400,
            "tags": ["Puzzle", "Sci-fi"]
        });
        let value: Value = serde_json::from_value(json).unwrap();
        assert_eq!(value.get("appid").and_then(Value::as_str), Some("400"));
        assert_eq!(
            value.get_path(&["tags", "1"]).and_then(Value::as_str),
            Some("Sci-fi")
        );
    }

    #[test]
    fn test_display_leaf_and_object() {
        assert_eq!(Value::from("raw").to_string(), "raw");

        let mut obj = VdfMap::new();
        obj.insert("key".to_string(), Value::from("value"));
        assert_eq!(Value::Object(obj).to_string(), "\"key\"\t\t\"value\"\r\n");
    }

    #[test]
    fn test_default_is_empty_object() {
        assert_eq!(Value::default(), Value::Object(VdfMap::new()));
    }
}
