//! VDF serialization.
//!
//! This module provides the [`Serializer`], which writes Rust values as VDF
//! text with tab indentation and CRLF line endings:
//!
//! ```text
//! "Steam"
//! {
//!     "DesktopShortcutCheck"        "1"
//! }
//! ```
//!
//! Every value is written under a key, so the root must serialize as a
//! struct, map or sequence; its entries are written without surrounding
//! braces. Within it:
//!
//! - strings, numbers and chars are quoted leaves
//! - booleans are `"1"` or `"0"`
//! - `None` omits the key altogether, `()` is an empty leaf
//! - sequences become objects keyed `"0"`, `"1"`, …
//! - enum variants are externally tagged: a unit variant is a leaf holding
//!   its name, any other variant is an object with the name as single key
//!
//! Quotes inside strings are written as they are. The reader turns `\"` into
//! `"` but the writer never adds the backslash, so text containing quotes
//! does not survive a round trip.
//!
//! ## Usage
//!
//! ```rust
//! use serde::Serialize;
//! use serde_vdf::Serializer;
//!
//! #[derive(Serialize)]
//! struct Steam {
//!     #[serde(rename = "DesktopShortcutCheck")]
//!     desktop_shortcut_check: bool,
//! }
//!
//! #[derive(Serialize)]
//! struct Config {
//!     #[serde(rename = "Steam")]
//!     steam: Steam,
//! }
//!
//! let mut serializer = Serializer::new();
//! Config { steam: Steam { desktop_shortcut_check: true } }
//!     .serialize(&mut serializer)
//!     .unwrap();
//!
//! assert_eq!(
//!     serializer.into_inner(),
//!     "\"Steam\"\r\n{\r\n\t\"DesktopShortcutCheck\"\t\t\"1\"\r\n}\r\n"
//! );
//! ```

use crate::{Error, Result, Value, VdfMap};
use serde::{ser, Serialize};

const NEWLINE: &str = "\r\n";

/// The VDF serializer.
///
/// Writes into an in-memory string; take it with [`Serializer::into_inner`].
#[derive(Default)]
pub struct Serializer {
    output: String,
    depth: usize,
    // Key the next value is written under. Only empty at the document root.
    key: Option<String>,
}

impl Serializer {
    #[must_use]
    pub fn new() -> Self {
        Serializer {
            output: String::with_capacity(256),
            depth: 0,
            key: None,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    fn write_indent(&mut self) {
        for _ in 0..self.depth {
            self.output.push('\t');
        }
    }

    fn write_quoted(&mut self, text: &str) {
        self.output.push('"');
        self.output.push_str(text);
        self.output.push('"');
    }

    fn write_leaf(&mut self, value: &str) -> Result<()> {
        let key = self.key.take().ok_or_else(|| {
            Error::unsupported_type("a bare value at the top level; the root must be an object")
        })?;
        self.write_indent();
        self.write_quoted(&key);
        self.output.push_str("\t\t");
        self.write_quoted(value);
        self.output.push_str(NEWLINE);
        Ok(())
    }

    /// Opens an object under the pending key. The root object has no braces,
    /// so this returns how many closing braces are owed.
    fn begin_object(&mut self) -> usize {
        match self.key.take() {
            Some(key) => {
                self.write_indent();
                self.write_quoted(&key);
                self.output.push_str(NEWLINE);
                self.write_indent();
                self.output.push('{');
                self.output.push_str(NEWLINE);
                self.depth += 1;
                1
            }
            None => 0,
        }
    }

    fn end_object(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.write_indent();
        self.output.push('}');
        self.output.push_str(NEWLINE);
    }

    fn begin_variant(&mut self, variant: &'static str) -> usize {
        let outer = self.begin_object();
        self.key = Some(variant.to_string());
        outer + self.begin_object()
    }
}

macro_rules! serialize_display {
    ($($method:ident($ty:ty))*) => {
        $(
            fn $method(self, v: $ty) -> Result<()> {
                self.write_leaf(&v.to_string())
            }
        )*
    };
}

impl<'a> ser::Serializer for &'a mut Serializer {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Compound<'a>;
    type SerializeTuple = Compound<'a>;
    type SerializeTupleStruct = Compound<'a>;
    type SerializeTupleVariant = Compound<'a>;
    type SerializeMap = Compound<'a>;
    type SerializeStruct = Compound<'a>;
    type SerializeStructVariant = Compound<'a>;

    fn serialize_bool(self, v: bool) -> Result<()> {
        self.write_leaf(if v { "1" } else { "0" })
    }

    serialize_display! {
        serialize_i8(i8)
        serialize_i16(i16)
        serialize_i32(i32)
        serialize_i64(i64)
        serialize_i128(i128)
        serialize_u8(u8)
        serialize_u16(u16)
        serialize_u32(u32)
        serialize_u64(u64)
        serialize_u128(u128)
        serialize_f32(f32)
        serialize_f64(f64)
        serialize_char(char)
    }

    fn serialize_str(self, v: &str) -> Result<()> {
        self.write_leaf(v)
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<()> {
        self.write_leaf(&String::from_utf8_lossy(v))
    }

    fn serialize_none(self) -> Result<()> {
        self.key = None;
        Ok(())
    }

    fn serialize_some<T>(self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<()> {
        self.write_leaf("")
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<()> {
        self.write_leaf(variant)
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<()>
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
    ) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let closes = self.begin_object();
        self.key = Some(variant.to_string());
        value.serialize(&mut *self)?;
        for _ in 0..closes {
            self.end_object();
        }
        Ok(())
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        let closes = self.begin_object();
        Ok(Compound::new(self, closes))
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
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        let closes = self.begin_variant(variant);
        Ok(Compound::new(self, closes))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        let closes = self.begin_object();
        Ok(Compound::new(self, closes))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        let closes = self.begin_object();
        Ok(Compound::new(self, closes))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        let closes = self.begin_variant(variant);
        Ok(Compound::new(self, closes))
    }
}

/// Writes the entries of one object and closes it on `end`.
pub struct Compound<'a> {
    ser: &'a mut Serializer,
    closes: usize,
    index: usize,
    key: Option<String>,
}

impl<'a> Compound<'a> {
    fn new(ser: &'a mut Serializer, closes: usize) -> Self {
        Compound {
            ser,
            closes,
            index: 0,
            key: None,
        }
    }

    fn entry<T>(&mut self, key: String, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.ser.key = Some(key);
        value.serialize(&mut *self.ser)
    }

    fn element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self.index.to_string();
        self.index += 1;
        self.entry(key, value)
    }

    fn finish(self) -> Result<()> {
        for _ in 0..self.closes {
            self.ser.end_object();
        }
        Ok(())
    }
}

impl<'a> ser::SerializeSeq for Compound<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl<'a> ser::SerializeTuple for Compound<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl<'a> ser::SerializeTupleStruct for Compound<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl<'a> ser::SerializeTupleVariant for Compound<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl<'a> ser::SerializeMap for Compound<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.key = Some(key_to_string(key)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.entry(key, value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl<'a> ser::SerializeStruct for Compound<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.entry(key.to_string(), value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl<'a> ser::SerializeStructVariant for Compound<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.entry(key.to_string(), value)
    }

    fn end(self) -> Result<()> {
        self.finish()
    }
}

/// Renders a map key. Anything that serializes to a leaf is accepted.
fn key_to_string<T>(key: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    match key.serialize(ValueSerializer)? {
        Some(Value::Leaf(text)) => Ok(text),
        Some(Value::Object(_)) => Err(Error::unsupported_type(
            "map key that is not a string, number, char or bool",
        )),
        None => Err(Error::unsupported_type("map key that is None")),
    }
}

/// Builds a [`Value`] tree instead of text. `None` means "write nothing".
pub(crate) struct ValueSerializer;

macro_rules! value_display {
    ($($method:ident($ty:ty))*) => {
        $(
            fn $method(self, v: $ty) -> Result<Option<Value>> {
                Ok(Some(Value::Leaf(v.to_string())))
            }
        )*
    };
}

impl ser::Serializer for ValueSerializer {
    type Ok = Option<Value>;
    type Error = Error;

    type SerializeSeq = ValueCompound;
    type SerializeTuple = ValueCompound;
    type SerializeTupleStruct = ValueCompound;
    type SerializeTupleVariant = ValueCompound;
    type SerializeMap = ValueCompound;
    type SerializeStruct = ValueCompound;
    type SerializeStructVariant = ValueCompound;

    fn serialize_bool(self, v: bool) -> Result<Option<Value>> {
        Ok(Some(Value::from(v)))
    }

    value_display! {
        serialize_i8(i8)
        serialize_i16(i16)
        serialize_i32(i32)
        serialize_i64(i64)
        serialize_i128(i128)
        serialize_u8(u8)
        serialize_u16(u16)
        serialize_u32(u32)
        serialize_u64(u64)
        serialize_u128(u128)
        serialize_f32(f32)
        serialize_f64(f64)
        serialize_char(char)
        serialize_str(&str)
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Option<Value>> {
        Ok(Some(Value::Leaf(String::from_utf8_lossy(v).into_owned())))
    }

    fn serialize_none(self) -> Result<Option<Value>> {
        Ok(None)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Option<Value>>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Option<Value>> {
        Ok(Some(Value::Leaf(String::new())))
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Option<Value>> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Option<Value>> {
        Ok(Some(Value::from(variant)))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Option<Value>>
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
    ) -> Result<Option<Value>>
    where
        T: ?Sized + Serialize,
    {
        let mut obj = VdfMap::new();
        if let Some(inner) = value.serialize(ValueSerializer)? {
            obj.insert(variant.to_string(), inner);
        }
        Ok(Some(Value::Object(obj)))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(ValueCompound::new(None, len.unwrap_or(0)))
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
        Ok(ValueCompound::new(Some(variant), len))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(ValueCompound::new(None, len.unwrap_or(0)))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<Self::SerializeStruct> {
        Ok(ValueCompound::new(None, len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Ok(ValueCompound::new(Some(variant), len))
    }
}

pub(crate) struct ValueCompound {
    variant: Option<&'static str>,
    entries: VdfMap,
    index: usize,
    key: Option<String>,
}

impl ValueCompound {
    fn new(variant: Option<&'static str>, len: usize) -> Self {
        ValueCompound {
            variant,
            entries: VdfMap::with_capacity(len),
            index: 0,
            key: None,
        }
    }

    fn entry<T>(&mut self, key: String, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        if let Some(value) = value.serialize(ValueSerializer)? {
            self.entries.insert(key, value);
        }
        Ok(())
    }

    fn element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self.index.to_string();
        self.index += 1;
        self.entry(key, value)
    }

    fn finish(self) -> Result<Option<Value>> {
        let object = Value::Object(self.entries);
        Ok(Some(match self.variant {
            Some(variant) => {
                let mut outer = VdfMap::with_capacity(1);
                outer.insert(variant.to_string(), object);
                Value::Object(outer)
            }
            None => object,
        }))
    }
}

impl ser::SerializeSeq for ValueCompound {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}

impl ser::SerializeTuple for ValueCompound {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}

impl ser::SerializeTupleStruct for ValueCompound {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}

impl ser::SerializeTupleVariant for ValueCompound {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}

impl ser::SerializeMap for ValueCompound {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.key = Some(key_to_string(key)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.entry(key, value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}

impl ser::SerializeStruct for ValueCompound {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.entry(key.to_string(), value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}

impl ser::SerializeStructVariant for ValueCompound {
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.entry(key.to_string(), value)
    }

    fn end(self) -> Result<Option<Value>> {
        self.finish()
    }
}
