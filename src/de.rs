//! VDF parsing.
//!
//! This module provides the [`Deserializer`], which reads VDF text into a
//! generic [`Value`] tree and then binds that tree onto the requested type.
//!
//! ## Grammar
//!
//! A document is a sequence of key/value pairs. Keys and string values are
//! either quoted (`"like this"`) or bare runs of non-whitespace. A value that
//! starts with `{` is a nested object closed by `}`.
//!
//! ```text
//! "Steam"
//! {
//!     "DesktopShortcutCheck"    "1"
//!     "Apps" { "400" { "name" "Portal" } }
//! }
//! ```
//!
//! The only escape sequence is `\"`, a literal quote inside a string.
//! A later key in the same object replaces the value of an earlier identical
//! key in place.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde_vdf::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Steam {
//!     #[serde(rename = "DesktopShortcutCheck")]
//!     desktop_shortcut_check: bool,
//! }
//!
//! #[derive(Deserialize)]
//! struct Config {
//!     steam: Steam,
//! }
//!
//! let config: Config = from_str("\"Steam\" { \"DesktopShortcutCheck\" \"1\" }").unwrap();
//! assert!(config.steam.desktop_shortcut_check);
//! ```

use crate::bind::ValueDeserializer;
use crate::read::{is_whitespace, Reader, BACKSLASH, CLOSE_BRACE, OPEN_BRACE, QUOTE};
use crate::{Error, Result, Value, VdfMap};
use serde::de;

/// The VDF deserializer.
///
/// Created via [`Deserializer::from_str`]. Parsing always reads the whole
/// document into memory before any binding happens.
///
/// Binding through this deserializer is strict. Skipping type mismatches
/// needs the target type up front, which
/// [`from_str_with_options`](crate::from_str_with_options) has.
pub struct Deserializer<'de> {
    reader: Reader<'de>,
    // Keys of the objects currently open, outermost first.
    open: Vec<String>,
}

impl<'de> Deserializer<'de> {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'de str) -> Self {
        Deserializer {
            reader: Reader::new(input),
            open: Vec::new(),
        }
    }

    /// Parses the whole document into an untyped tree.
    ///
    /// The root of the returned tree is always an object.
    ///
    /// # Errors
    ///
    /// Returns a format error if an object or quoted string is left open at
    /// the end of the input, or if a stray `}` appears at the top level.
    pub fn parse(&mut self) -> Result<Value> {
        self.reader.skip_whitespace();
        if self.reader.peek_char() == Some(OPEN_BRACE) {
            // Anonymous root object: `{ "a" "1" }`.
            self.reader.next_char();
            self.open.push(String::new());
            let root = self.parse_object()?;
            self.open.pop();
            self.reader.skip_whitespace();
            if let Some(ch) = self.reader.peek_char() {
                return Err(Error::syntax(
                    self.reader.line(),
                    self.reader.column(),
                    &format!("unexpected '{}' after the root object", ch),
                ));
            }
            return Ok(Value::Object(root));
        }
        Ok(Value::Object(self.parse_object()?))
    }

    fn parse_object(&mut self) -> Result<VdfMap> {
        let mut map = VdfMap::new();
        while let Some((key, value)) = self.read_key_value()? {
            if map.insert(key, value).is_some() {
                trace!("duplicate key replaced in object at depth {}", self.open.len());
            }
        }
        Ok(map)
    }

    /// Reads one pair, or `None` once the current object has ended.
    fn read_key_value(&mut self) -> Result<Option<(String, Value)>> {
        let key = match self.read_next_key()? {
            Some(key) => key,
            None => return Ok(None),
        };

        self.reader.skip_whitespace();
        match self.reader.next_char() {
            Some(OPEN_BRACE) => {
                self.open.push(key);
                trace!("object opened, depth now {}", self.open.len());
                let object = self.parse_object()?;
                let key = self.open.pop().unwrap_or_default();
                trace!("object closed, depth now {}", self.open.len());
                Ok(Some((key, Value::Object(object))))
            }
            Some(CLOSE_BRACE) => {
                debug!("dropping key {:?} with no value before '}}'", key);
                self.end_object(CLOSE_BRACE)?;
                Ok(None)
            }
            Some(QUOTE) => {
                let value = self.read_string(true)?;
                Ok(Some((key, Value::Leaf(value))))
            }
            Some(first) => {
                let mut value = first.to_string();
                value.push_str(&self.read_string(false)?);
                Ok(Some((key, Value::Leaf(value))))
            }
            None => Err(Error::unexpected_eof(
                self.reader.line(),
                self.reader.column(),
                "a value",
                &format!("key \"{}\"", key),
            )),
        }
    }

    /// Reads the next key, or `None` when the object ends here.
    fn read_next_key(&mut self) -> Result<Option<String>> {
        self.reader.skip_whitespace();
        match self.reader.next_char() {
            Some(brace @ (OPEN_BRACE | CLOSE_BRACE)) => {
                self.end_object(brace)?;
                Ok(None)
            }
            Some(QUOTE) => self.read_string(true).map(Some),
            Some(first) => {
                let mut key = first.to_string();
                key.push_str(&self.read_string(false)?);
                Ok(Some(key))
            }
            None if self.open.is_empty() => Ok(None),
            None => Err(Error::unexpected_eof(
                self.reader.line(),
                self.reader.column(),
                "'}' (unterminated object)",
                &format!("object \"{}\"", self.open.join("/")),
            )),
        }
    }

    /// A brace in key position ends the current object; there is nothing to
    /// end at the top level.
    fn end_object(&self, brace: char) -> Result<()> {
        if self.open.is_empty() {
            return Err(Error::syntax(
                self.reader.line(),
                self.reader.column(),
                &format!("unexpected '{}' at top level", brace),
            ));
        }
        Ok(())
    }

    /// Reads string content after its first character has been consumed.
    ///
    /// Quoted strings end at the next unescaped quote; bare strings end at
    /// whitespace or end of input.
    fn read_string(&mut self, quoted: bool) -> Result<String> {
        let mut result = String::new();
        loop {
            match self.reader.next_char() {
                Some(QUOTE) if quoted => return Ok(result),
                Some(ch) if !quoted && is_whitespace(ch) => return Ok(result),
                Some(BACKSLASH) if self.reader.peek_char() == Some(QUOTE) => {
                    self.reader.next_char();
                    result.push(QUOTE);
                }
                Some(ch) => result.push(ch),
                None if quoted => {
                    return Err(Error::unexpected_eof(
                        self.reader.line(),
                        self.reader.column(),
                        "closing '\"'",
                        &format!("string \"{}", result),
                    ))
                }
                None => return Ok(result),
            }
        }
    }

    fn binder(&mut self) -> Result<ValueDeserializer<'static>> {
        let value = self.parse()?;
        Ok(ValueDeserializer::new(value))
    }
}

macro_rules! forward_to_binder {
    ($($method:ident($($arg:ident: $ty:ty),*))*) => {
        $(
            fn $method<V>(self, $($arg: $ty,)* visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                de::Deserializer::$method(self.binder()?, $($arg,)* visitor)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for &mut Deserializer<'de> {
    type Error = Error;

    forward_to_binder! {
        deserialize_any()
        deserialize_bool()
        deserialize_i8()
        deserialize_i16()
        deserialize_i32()
        deserialize_i64()
        deserialize_i128()
        deserialize_u8()
        deserialize_u16()
        deserialize_u32()
        deserialize_u64()
        deserialize_u128()
        deserialize_f32()
        deserialize_f64()
        deserialize_char()
        deserialize_str()
        deserialize_string()
        deserialize_bytes()
        deserialize_byte_buf()
        deserialize_option()
        deserialize_unit()
        deserialize_unit_struct(name: &'static str)
        deserialize_newtype_struct(name: &'static str)
        deserialize_seq()
        deserialize_tuple(len: usize)
        deserialize_tuple_struct(name: &'static str, len: usize)
        deserialize_map()
        deserialize_struct(name: &'static str, fields: &'static [&'static str])
        deserialize_enum(name: &'static str, variants: &'static [&'static str])
        deserialize_identifier()
        deserialize_ignored_any()
    }
}
