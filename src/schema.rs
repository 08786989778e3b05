//! The node kinds a target type expects, learned before binding.
//!
//! Lenient binding must decide whether a source node fits a field before the
//! key is handed to serde. Once a derived `Deserialize` impl has seen the key,
//! the field can no longer fall back to its default. [`Schema::of`] runs the
//! type's `Deserialize` impl against a [`Recorder`] that answers every request
//! with a neutral value and writes down what was asked for.
//!
//! A request that cannot be answered (an enum, an untyped value, a validating
//! impl that rejects the neutral value) stops the run. The failing position is
//! remembered and skipped on the next run, so the rest of the type is still
//! learned.

use crate::hybrid;
use crate::{Error, Result, Value};
use serde::de::{self, Deserialize, DeserializeOwned, DeserializeSeed, IntoDeserializer, Visitor};
use std::collections::HashMap;

/// Nesting depth after which recording gives up. Keeps recursive types finite.
const DEPTH_LIMIT: usize = 32;

const MAX_RUNS: usize = 64;

pub(crate) static ANY: Schema = Schema::Any;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Numeric {
    I8,
    I16,
    I32,
    I64,
    I128,
    U8,
    U16,
    U32,
    U64,
    U128,
    F32,
    F64,
}

impl Numeric {
    fn parses(self, text: &str) -> bool {
        match self {
            Numeric::I8 => text.parse::<i8>().is_ok(),
            Numeric::I16 => text.parse::<i16>().is_ok(),
            Numeric::I32 => text.parse::<i32>().is_ok(),
            Numeric::I64 => text.parse::<i64>().is_ok(),
            Numeric::I128 => text.parse::<i128>().is_ok(),
            Numeric::U8 => text.parse::<u8>().is_ok(),
            Numeric::U16 => text.parse::<u16>().is_ok(),
            Numeric::U32 => text.parse::<u32>().is_ok(),
            Numeric::U64 => text.parse::<u64>().is_ok(),
            Numeric::U128 => text.parse::<u128>().is_ok(),
            Numeric::F32 => text.parse::<f32>().is_ok(),
            Numeric::F64 => text.parse::<f64>().is_ok(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Schema {
    /// Nothing known; every node fits.
    Any,
    Leaf,
    Char,
    Number(Numeric),
    Unit,
    Record {
        names: &'static [&'static str],
        fields: Vec<(&'static str, Schema)>,
    },
    Map(Box<Schema>),
    Seq(Box<Schema>),
    Tuple,
    /// The two parts of a [`Hybrid`](crate::Hybrid), keyed like a record.
    Hybrid(Vec<(&'static str, Schema)>),
}

impl Schema {
    /// Learns the full shape of `T`.
    pub(crate) fn of<T: DeserializeOwned>() -> Schema {
        Schema::learn::<T>(DEPTH_LIMIT)
    }

    /// The declared field names of `T`, or nothing if `T` is not a struct.
    pub(crate) fn field_names<'de, T: Deserialize<'de>>() -> &'static [&'static str] {
        match Schema::learn::<T>(0) {
            Schema::Record { names, .. } => names,
            _ => &[],
        }
    }

    fn learn<'de, T: Deserialize<'de>>(limit: usize) -> Schema {
        let mut session = Session {
            limit,
            known: HashMap::new(),
            failed: false,
        };
        let mut schema = Schema::Any;
        for _ in 0..MAX_RUNS {
            session.failed = false;
            let recorder = Recorder {
                session: &mut session,
                out: &mut schema,
                path: String::new(),
                depth: 0,
            };
            let _ = T::deserialize(recorder);
            if !session.failed {
                break;
            }
        }
        schema
    }

    /// Whether `value` can bind to a type of this shape.
    pub(crate) fn fits(&self, value: &Value) -> bool {
        match (self, value) {
            (Schema::Any, _) => true,
            (Schema::Leaf, Value::Leaf(_)) => true,
            (Schema::Char, Value::Leaf(text)) => text.chars().count() == 1,
            (Schema::Number(numeric), Value::Leaf(text)) => numeric.parses(text),
            (Schema::Unit, Value::Leaf(_)) => true,
            (Schema::Unit, Value::Object(obj)) => obj.is_empty(),
            (
                Schema::Record { .. }
                | Schema::Map(_)
                | Schema::Seq(_)
                | Schema::Tuple
                | Schema::Hybrid(_),
                Value::Object(_),
            ) => true,
            _ => false,
        }
    }

    /// The shape expected under `key` of an object of this shape.
    pub(crate) fn child(&self, key: &str) -> &Schema {
        match self {
            Schema::Record { fields, .. } | Schema::Hybrid(fields) => fields
                .iter()
                .find(|(name, _)| *name == key)
                .map_or(&ANY, |(_, schema)| schema),
            Schema::Map(element) | Schema::Seq(element) => element,
            _ => &ANY,
        }
    }
}

struct Session {
    limit: usize,
    // Positions that failed in an earlier run, with what was learned there.
    known: HashMap<String, Schema>,
    failed: bool,
}

impl Session {
    /// Keeps the innermost failure of a run; the enclosing ones just unwind.
    fn fail(&mut self, path: String, learned: &Schema) {
        if !self.failed {
            self.failed = true;
            self.known.insert(path, learned.clone());
        }
    }
}

fn record_child<'de, T>(
    session: &mut Session,
    out: &mut Schema,
    path: String,
    depth: usize,
    seed: T,
) -> Result<T::Value>
where
    T: DeserializeSeed<'de>,
{
    let recorder = Recorder {
        session: &mut *session,
        out: &mut *out,
        path: path.clone(),
        depth,
    };
    let result = seed.deserialize(recorder);
    if result.is_err() {
        session.fail(path, out);
    }
    result
}

/// A deserializer that binds neutral values and notes what was asked of it.
struct Recorder<'a> {
    session: &'a mut Session,
    out: &'a mut Schema,
    path: String,
    depth: usize,
}

impl<'a> Recorder<'a> {
    fn stop<T>(self, schema: Schema) -> Result<T> {
        *self.out = schema;
        Err(Error::custom("recording stopped"))
    }
}

macro_rules! record_number {
    ($($method:ident => $numeric:ident)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: Visitor<'de>,
            {
                *self.out = Schema::Number(Numeric::$numeric);
                visitor.visit_u64(0)
            }
        )*
    };
}

impl<'de, 'a> de::Deserializer<'de> for Recorder<'a> {
    type Error = Error;

    fn deserialize_any<V>(self, _visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.stop(Schema::Any)
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        *self.out = Schema::Leaf;
        visitor.visit_bool(false)
    }

    record_number! {
        deserialize_i8 => I8
        deserialize_i16 => I16
        deserialize_i32 => I32
        deserialize_i64 => I64
        deserialize_i128 => I128
        deserialize_u8 => U8
        deserialize_u16 => U16
        deserialize_u32 => U32
        deserialize_u64 => U64
        deserialize_u128 => U128
        deserialize_f32 => F32
        deserialize_f64 => F64
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        *self.out = Schema::Char;
        visitor.visit_char('0')
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        *self.out = Schema::Leaf;
        visitor.visit_str("")
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        *self.out = Schema::Leaf;
        visitor.visit_bytes(b"")
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_bytes(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        *self.out = Schema::Unit;
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        if self.depth >= self.session.limit {
            return self.stop(Schema::Seq(Box::new(Schema::Any)));
        }
        let Recorder {
            session,
            out,
            path,
            depth,
        } = self;
        let mut sample = Sample::new(session, format!("{}/#", path), depth + 1);
        let result = visitor.visit_seq(&mut sample);
        *out = Schema::Seq(Box::new(sample.element));
        result
    }

    fn deserialize_tuple<V>(self, _len: usize, _visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.stop(Schema::Tuple)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        _visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.stop(Schema::Tuple)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        if self.depth >= self.session.limit {
            return self.stop(Schema::Map(Box::new(Schema::Any)));
        }
        let Recorder {
            session,
            out,
            path,
            depth,
        } = self;
        let mut sample = Sample::new(session, format!("{}/*", path), depth + 1);
        let result = visitor.visit_map(&mut sample);
        *out = Schema::Map(Box::new(sample.element));
        result
    }

    fn deserialize_struct<V>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        let is_hybrid = name == hybrid::TOKEN;
        let keys = if is_hybrid { hybrid::PARTS } else { fields };
        let build = move |slots: Vec<(&'static str, Schema)>| {
            if is_hybrid {
                Schema::Hybrid(slots)
            } else {
                Schema::Record {
                    names: fields,
                    fields: slots,
                }
            }
        };
        let slots: Vec<_> = keys.iter().map(|key| (*key, Schema::Any)).collect();

        if self.depth >= self.session.limit {
            return self.stop(build(slots));
        }
        let Recorder {
            session,
            out,
            path,
            depth,
        } = self;
        let mut access = Fields {
            session,
            path,
            depth: depth + 1,
            fields: slots,
            next: 0,
            current: 0,
        };
        let result = visitor.visit_map(&mut access);
        *out = build(access.fields);
        result
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.stop(Schema::Any)
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        *self.out = Schema::Any;
        visitor.visit_unit()
    }
}

/// Offers a collection a single element to learn the element type.
struct Sample<'a> {
    session: &'a mut Session,
    path: String,
    depth: usize,
    element: Schema,
    done: bool,
}

impl<'a> Sample<'a> {
    fn new(session: &'a mut Session, path: String, depth: usize) -> Self {
        Sample {
            session,
            path,
            depth,
            element: Schema::Any,
            done: false,
        }
    }

    /// Claims the one turn. Returns false if the element is already known.
    fn take_turn(&mut self) -> bool {
        if self.done {
            return false;
        }
        self.done = true;
        match self.session.known.get(&self.path) {
            Some(known) => {
                self.element = known.clone();
                false
            }
            None => true,
        }
    }
}

impl<'de, 'a> de::SeqAccess<'de> for Sample<'a> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: DeserializeSeed<'de>,
    {
        if !self.take_turn() {
            return Ok(None);
        }
        record_child(
            self.session,
            &mut self.element,
            self.path.clone(),
            self.depth,
            seed,
        )
        .map(Some)
    }
}

impl<'de, 'a> de::MapAccess<'de> for Sample<'a> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: DeserializeSeed<'de>,
    {
        if !self.take_turn() {
            return Ok(None);
        }
        // The key's own shape is not kept; keys bind strictly.
        let mut key = Schema::Any;
        let recorder = Recorder {
            session: &mut *self.session,
            out: &mut key,
            path: self.path.clone(),
            depth: self.depth,
        };
        let result = seed.deserialize(recorder);
        if result.is_err() {
            self.session.fail(self.path.clone(), &Schema::Any);
        }
        result.map(Some)
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: DeserializeSeed<'de>,
    {
        record_child(
            self.session,
            &mut self.element,
            self.path.clone(),
            self.depth,
            seed,
        )
    }
}

/// Hands a struct visitor each declared field name in turn.
struct Fields<'a> {
    session: &'a mut Session,
    path: String,
    depth: usize,
    fields: Vec<(&'static str, Schema)>,
    next: usize,
    current: usize,
}

impl<'a> Fields<'a> {
    fn child_path(&self, index: usize) -> String {
        format!("{}/{}", self.path, self.fields[index].0)
    }
}

impl<'de, 'a> de::MapAccess<'de> for Fields<'a> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: DeserializeSeed<'de>,
    {
        while self.next < self.fields.len() {
            let index = self.next;
            self.next += 1;
            if let Some(known) = self.session.known.get(&self.child_path(index)) {
                self.fields[index].1 = known.clone();
                continue;
            }
            self.current = index;
            let name: de::value::StrDeserializer<'static, Error> =
                self.fields[index].0.into_deserializer();
            return seed.deserialize(name).map(Some);
        }
        Ok(None)
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: DeserializeSeed<'de>,
    {
        let path = self.child_path(self.current);
        record_child(
            self.session,
            &mut self.fields[self.current].1,
            path,
            self.depth,
            seed,
        )
    }
}
