//! Binding of parsed trees onto Rust types.
//!
//! [`ValueDeserializer`] is a `serde::Deserializer` over an owned [`Value`].
//! The method a type's `Deserialize` impl calls tells the binder which shape
//! is wanted:
//!
//! | Requested | Source | Result |
//! |-----------|--------|--------|
//! | string | leaf | the leaf text |
//! | bool | leaf | `true` only for `"1"` |
//! | integer, float | leaf | parsed from the leaf text |
//! | struct | object | fields matched ignoring case |
//! | map | object | every entry, in order |
//! | seq, tuple | object | every value, in order, keys ignored |
//! | [`Hybrid`](crate::Hybrid) | object | declared fields, then entries |
//!
//! Any other combination is a type mismatch.
//!
//! With [`VdfOptions::ignore_type_mismatches`] set, every object is first
//! checked against the shape the target type expects for each key. A record
//! field whose node cannot fit is left out, so serde applies the field's
//! default (`None`, `#[serde(default)]`, or a missing-field error). An entry
//! of a map, sequence or hybrid that cannot fit is dropped. That shape comes
//! from the target type, so only [`from_str_with_options`] and
//! [`from_value_with_options`] can skip; a bare [`ValueDeserializer`] always
//! binds strictly. Map keys are always bound strictly.
//!
//! Errors raised inside a record are annotated with the key being bound and
//! with the keys of the record.
//!
//! [`from_str_with_options`]: crate::from_str_with_options
//! [`from_value_with_options`]: crate::from_value_with_options

use crate::hybrid;
use crate::map::eq_ignore_case;
use crate::schema::{Schema, ANY};
use crate::{Error, Result, Value, VdfMap, VdfOptions};
use serde::de::{self, IntoDeserializer, Visitor};

/// What the target type asked for, for mismatch messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Shape {
    String,
    Boolean,
    Number,
    Unit,
    Record,
    OrderedMap,
    Sequence,
    Hybrid,
}

impl Shape {
    fn describe(self) -> &'static str {
        match self {
            Shape::String => "string leaf",
            Shape::Boolean => "boolean leaf",
            Shape::Number => "numeric leaf",
            Shape::Unit => "empty leaf",
            Shape::Record => "record object",
            Shape::OrderedMap => "ordered map object",
            Shape::Sequence => "sequence object",
            Shape::Hybrid => "hybrid object",
        }
    }
}

fn found(value: &Value) -> String {
    match value {
        Value::Leaf(text) => format!("string leaf \"{}\"", text),
        Value::Object(obj) => format!("object with {} entries", obj.len()),
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::Leaf(text) => text.clone(),
        Value::Object(_) => "{ ... }".to_string(),
    }
}

/// Finds the declared name a source key binds to. Exact matches win over
/// case-insensitive ones.
fn match_field(key: &str, fields: &'static [&'static str]) -> Option<&'static str> {
    fields
        .iter()
        .find(|field| **field == key)
        .or_else(|| fields.iter().find(|field| eq_ignore_case(field, key)))
        .copied()
}

fn canonicalize(map: VdfMap, fields: &'static [&'static str]) -> VdfMap {
    map.into_iter()
        .map(|(key, value)| match match_field(&key, fields) {
            Some(field) => (field.to_string(), value),
            None => (key, value),
        })
        .collect()
}

/// Splits a hybrid source object into the record's fields and the entries.
fn split_fields(map: VdfMap, fields: &'static [&'static str]) -> (VdfMap, VdfMap) {
    let mut named = VdfMap::new();
    let mut rest = VdfMap::new();
    for (key, value) in map {
        match match_field(&key, fields) {
            Some(field) => {
                named.insert(field.to_string(), value);
            }
            None => {
                rest.insert(key, value);
            }
        }
    }
    (named, rest)
}

/// In lenient mode, leaves out every entry whose node cannot fit the shape
/// expected under its key.
fn keep_fitting(map: VdfMap, schema: &Schema, options: VdfOptions) -> VdfMap {
    if !options.ignore_type_mismatches {
        return map;
    }
    map.into_iter()
        .filter(|(key, value)| {
            let fits = schema.child(key).fits(value);
            if !fits {
                debug!("skipping key {:?}: found {}", key, found(value));
            }
            fits
        })
        .collect()
}

/// Deserializes Rust values out of a parsed [`Value`] tree.
///
/// # Examples
///
/// ```rust
/// use serde::Deserialize;
/// use serde_vdf::{parse, ValueDeserializer};
///
/// #[derive(Deserialize)]
/// struct App {
///     name: String,
/// }
///
/// let tree = parse("\"Name\" \"Portal\"").unwrap();
/// let app = App::deserialize(ValueDeserializer::new(tree)).unwrap();
/// assert_eq!(app.name, "Portal");
/// ```
pub struct ValueDeserializer<'s> {
    value: Value,
    options: VdfOptions,
    schema: &'s Schema,
}

impl ValueDeserializer<'static> {
    /// Creates a strict deserializer over `value`.
    #[must_use]
    pub fn new(value: Value) -> Self {
        ValueDeserializer::with_schema(value, VdfOptions::default(), &ANY)
    }
}

impl<'s> ValueDeserializer<'s> {
    /// `schema` is the shape of the target type, consulted in lenient mode.
    pub(crate) fn with_schema(value: Value, options: VdfOptions, schema: &'s Schema) -> Self {
        ValueDeserializer {
            value,
            options,
            schema,
        }
    }

    fn mismatch<T>(&self, shape: Shape) -> Result<T> {
        Err(Error::type_mismatch(shape.describe(), &found(&self.value)))
    }
}

macro_rules! deserialize_number {
    ($($method:ident => $visit:ident($ty:ty))*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: Visitor<'de>,
            {
                let parsed = match &self.value {
                    Value::Leaf(text) => text.parse::<$ty>().ok(),
                    Value::Object(_) => None,
                };
                match parsed {
                    Some(n) => visitor.$visit(n),
                    None => self.mismatch(Shape::Number),
                }
            }
        )*
    };
}

impl<'de, 's> de::Deserializer<'de> for ValueDeserializer<'s> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Leaf(text) => visitor.visit_string(text),
            Value::Object(obj) => {
                visitor.visit_map(MapDeserializer::new(obj, self.options, self.schema))
            }
        }
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        if let Value::Leaf(text) = &self.value {
            return visitor.visit_bool(text == "1");
        }
        self.mismatch(Shape::Boolean)
    }

    deserialize_number! {
        deserialize_i8 => visit_i8(i8)
        deserialize_i16 => visit_i16(i16)
        deserialize_i32 => visit_i32(i32)
        deserialize_i64 => visit_i64(i64)
        deserialize_i128 => visit_i128(i128)
        deserialize_u8 => visit_u8(u8)
        deserialize_u16 => visit_u16(u16)
        deserialize_u32 => visit_u32(u32)
        deserialize_u64 => visit_u64(u64)
        deserialize_u128 => visit_u128(u128)
        deserialize_f32 => visit_f32(f32)
        deserialize_f64 => visit_f64(f64)
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Leaf(text) => visitor.visit_string(text),
            _ => self.mismatch(Shape::String),
        }
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_byte_buf(visitor)
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        match self.value {
            Value::Leaf(text) => visitor.visit_byte_buf(text.into_bytes()),
            _ => self.mismatch(Shape::String),
        }
    }

    /// VDF has no null: a present value is always `Some`.
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
        let empty = match &self.value {
            Value::Leaf(_) => true,
            Value::Object(obj) => obj.is_empty(),
        };
        if empty {
            return visitor.visit_unit();
        }
        self.mismatch(Shape::Unit)
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
        let (options, schema) = (self.options, self.schema);
        match self.value {
            Value::Object(obj) => visitor.visit_seq(SeqDeserializer::new(
                keep_fitting(obj, schema, options),
                options,
                schema,
            )),
            _ => self.mismatch(Shape::Sequence),
        }
    }

    fn deserialize_tuple<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        _len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        let (options, schema) = (self.options, self.schema);
        match self.value {
            Value::Object(obj) => visitor.visit_map(MapDeserializer::new(
                keep_fitting(obj, schema, options),
                options,
                schema,
            )),
            _ => self.mismatch(Shape::OrderedMap),
        }
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
        let (options, schema) = (self.options, self.schema);
        match self.value {
            Value::Object(obj) if name == hybrid::TOKEN => {
                // Each part is bound as a record or map of its own, which
                // does its own lenient filtering.
                let (named, rest) = split_fields(obj, fields);
                let mut parts = VdfMap::with_capacity(2);
                parts.insert(hybrid::FIELDS_KEY.to_string(), Value::Object(named));
                parts.insert(hybrid::ENTRIES_KEY.to_string(), Value::Object(rest));
                visitor.visit_map(MapDeserializer::new(parts, options, schema))
            }
            Value::Object(obj) => {
                let obj = keep_fitting(canonicalize(obj, fields), schema, options);
                let mut access = MapDeserializer::new(obj, options, schema);
                let result = visitor.visit_map(&mut access);
                result.map_err(|err| err.with_pairs(|| access.pairs()))
            }
            _ if name == hybrid::TOKEN => self.mismatch(Shape::Hybrid),
            _ => self.mismatch(Shape::Record),
        }
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        let (variant, value) = match self.value {
            Value::Leaf(variant) => (variant, None),
            Value::Object(obj) => {
                let len = obj.len();
                let mut iter = obj.into_iter();
                match (iter.next(), iter.next()) {
                    (Some((variant, value)), None) => (variant, Some(value)),
                    _ => {
                        return Err(Error::type_mismatch(
                            "enum as a leaf or single-key object",
                            &format!("object with {} entries", len),
                        ))
                    }
                }
            }
        };
        let variant = match match_field(&variant, variants) {
            Some(declared) => declared.to_string(),
            None => variant,
        };
        visitor.visit_enum(EnumDeserializer {
            variant,
            value,
            options: self.options,
        })
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        self.deserialize_string(visitor)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        visitor.visit_unit()
    }
}

impl<'de> IntoDeserializer<'de, Error> for Value {
    type Deserializer = ValueDeserializer<'static>;

    fn into_deserializer(self) -> Self::Deserializer {
        ValueDeserializer::new(self)
    }
}

/// Yields every value of an object in order; the keys only label errors.
struct SeqDeserializer<'s> {
    iter: indexmap::map::IntoIter<String, Value>,
    options: VdfOptions,
    schema: &'s Schema,
}

impl<'s> SeqDeserializer<'s> {
    fn new(map: VdfMap, options: VdfOptions, schema: &'s Schema) -> Self {
        SeqDeserializer {
            iter: map.into_iter(),
            options,
            schema,
        }
    }
}

impl<'de, 's> de::SeqAccess<'de> for SeqDeserializer<'s> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                let element = self.schema.child(&key);
                seed.deserialize(ValueDeserializer::with_schema(value, self.options, element))
                    .map(Some)
                    .map_err(|err| err.at(&key))
            }
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct MapDeserializer<'s> {
    iter: indexmap::map::IntoIter<String, Value>,
    pending: Option<(String, Value)>,
    // Keys whose values have been handed over, in order.
    bound: Vec<String>,
    options: VdfOptions,
    schema: &'s Schema,
}

impl<'s> MapDeserializer<'s> {
    fn new(map: VdfMap, options: VdfOptions, schema: &'s Schema) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            pending: None,
            bound: Vec::new(),
            options,
            schema,
        }
    }

    /// The object's pairs, for an error message. Values already handed over
    /// are gone, so those keys are listed alone.
    fn pairs(&mut self) -> Vec<(String, Option<String>)> {
        let bound = self.bound.drain(..).map(|key| (key, None));
        let unbound = self
            .pending
            .take()
            .into_iter()
            .chain(self.iter.by_ref())
            .map(|(key, value)| {
                let rendered = render(&value);
                (key, Some(rendered))
            });
        bound.chain(unbound).collect()
    }
}

impl<'de, 's> de::MapAccess<'de> for MapDeserializer<'s> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                // Keys are always bound strictly.
                let result = seed
                    .deserialize(ValueDeserializer::new(Value::Leaf(key.clone())))
                    .map_err(|err| err.at(&key));
                self.pending = Some((key, value));
                result.map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.pending.take() {
            Some((key, value)) => {
                let schema = self.schema.child(&key);
                let result = seed
                    .deserialize(ValueDeserializer::with_schema(value, self.options, schema))
                    .map_err(|err| err.at(&key));
                self.bound.push(key);
                result
            }
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

struct EnumDeserializer {
    variant: String,
    value: Option<Value>,
    options: VdfOptions,
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(ValueDeserializer::new(Value::Leaf(self.variant)))?;
        let access = VariantDeserializer {
            value: self.value,
            options: self.options,
        };
        Ok((variant, access))
    }
}

struct VariantDeserializer {
    value: Option<Value>,
    options: VdfOptions,
}

impl VariantDeserializer {
    fn payload(self, expected: &str) -> Result<ValueDeserializer<'static>> {
        match self.value {
            Some(value) => Ok(ValueDeserializer::with_schema(value, self.options, &ANY)),
            None => Err(Error::type_mismatch(expected, "unit variant")),
        }
    }
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            None | Some(Value::Leaf(_)) => Ok(()),
            Some(Value::Object(obj)) if obj.is_empty() => Ok(()),
            Some(other) => Err(Error::type_mismatch("unit variant", &found(&other))),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(self.payload("newtype variant")?)
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        de::Deserializer::deserialize_seq(self.payload("tuple variant")?, visitor)
    }

    fn struct_variant<V>(self, fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: Visitor<'de>,
    {
        de::Deserializer::deserialize_struct(self.payload("struct variant")?, "", fields, visitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use serde::Deserialize;

    fn tree(text: &str) -> Value {
        crate::parse(text).unwrap()
    }

    fn bind<T: de::DeserializeOwned>(text: &str) -> Result<T> {
        T::deserialize(ValueDeserializer::new(tree(text)))
    }

    fn bind_lenient<T: de::DeserializeOwned>(text: &str) -> Result<T> {
        let schema = Schema::of::<T>();
        T::deserialize(ValueDeserializer::with_schema(
            tree(text),
            VdfOptions::lenient(),
            &schema,
        ))
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Survey {
        #[serde(rename = "surveyDate")]
        survey_date: String,
        enabled: bool,
    }

    #[test]
    fn test_fields_match_ignoring_case() {
        let survey: Survey = bind("\"SurveyDate\" \"2017-07-03\" \"ENABLED\" \"1\"").unwrap();
        assert_eq!(survey.survey_date, "2017-07-03");
        assert!(survey.enabled);
    }

    #[test]
    fn test_case_variants_collapse_onto_one_field() {
        #[derive(Deserialize)]
        struct Pair {
            name: String,
        }
        let pair: Pair = bind("\"name\" \"exact\" \"NAME\" \"shouted\"").unwrap();
        assert_eq!(pair.name, "shouted");
    }

    #[test]
    fn test_bool_is_true_only_for_one() {
        for (text, expected) in [("1", true), ("0", false), ("yes", false), ("", false)] {
            let flag: bool = bool::deserialize(ValueDeserializer::new(Value::from(text))).unwrap();
            assert_eq!(flag, expected, "{text:?}");
        }
    }

    #[test]
    fn test_numbers_parse_from_leaves() {
        #[derive(Deserialize)]
        struct App {
            appid: u32,
            size: i64,
            ratio: f64,
        }
        let app: App = bind("\"appid\" \"400\" \"size\" \"-12\" \"ratio\" \"0.5\"").unwrap();
        assert_eq!(app.appid, 400);
        assert_eq!(app.size, -12);
        assert_eq!(app.ratio, 0.5);
    }

    #[test]
    fn test_unparseable_number_is_mismatch() {
        #[derive(Debug, Deserialize, Default)]
        #[serde(default)]
        struct App {
            appid: u32,
        }
        let err = bind::<App>("\"appid\" \"portal\"").unwrap_err();
        assert!(err.is_type_bind());
        assert!(err.to_string().contains("\"appid\""), "{err}");

        // Left out, so the struct default applies.
        let app: App = bind_lenient("\"appid\" \"portal\"").unwrap();
        assert_eq!(app.appid, 0);
    }

    #[test]
    fn test_mismatch_carries_key_and_pairs() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Folder {
            path: String,
            apps: IndexMap<String, String>,
            label: String,
        }
        let text = "\"path\" \"C:\\Steam\" \"apps\" \"none\" \"label\" \"games\"";
        let err = bind::<Folder>(text).unwrap_err();
        match &err {
            Error::TypeMismatch { key, pairs, .. } => {
                assert_eq!(key.as_deref(), Some("apps"));
                assert_eq!(
                    pairs,
                    &vec![
                        ("path".to_string(), None),
                        ("apps".to_string(), None),
                        ("label".to_string(), Some("games".to_string())),
                    ]
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("Key: label - Value: games"), "{err}");
    }

    #[test]
    fn test_sequence_ignores_keys() {
        let tags: Vec<String> = bind("\"0\" \"a\" \"7\" \"b\" \"x\" \"c\"").unwrap();
        assert_eq!(tags, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_map_with_integer_keys() {
        let apps: IndexMap<u32, String> = bind("\"400\" \"Portal\" \"620\" \"Portal 2\"").unwrap();
        let keys: Vec<_> = apps.keys().copied().collect();
        assert_eq!(keys, vec![400, 620]);
    }

    #[test]
    fn test_bad_map_key_fails_even_when_lenient() {
        let result: Result<IndexMap<u32, String>> = bind_lenient("\"abc\" \"x\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_lenient_skips_misfit_record_fields() {
        #[derive(Debug, Deserialize, Default, PartialEq)]
        #[serde(default)]
        struct Inner {
            name: String,
        }
        #[derive(Debug, Deserialize)]
        struct Outer {
            #[serde(default)]
            inner: Inner,
            tags: Option<Vec<String>>,
            name: Option<String>,
        }
        let text = "\"inner\" \"flat\" \"tags\" \"flat\" \"name\" { \"first\" \"Gordon\" }";
        let outer: Outer = bind_lenient(text).unwrap();
        assert_eq!(outer.inner, Inner::default());
        assert!(outer.tags.is_none());
        assert!(outer.name.is_none());
    }

    #[test]
    fn test_lenient_misfit_required_field_is_missing() {
        #[derive(Debug, Deserialize)]
        #[allow(dead_code)]
        struct Named {
            name: String,
        }
        let err = bind_lenient::<Named>("\"name\" { \"first\" \"Gordon\" }").unwrap_err();
        assert!(err.to_string().contains("missing field `name`"), "{err}");
    }

    #[test]
    fn test_lenient_drops_misfit_elements() {
        let ids: Vec<u8> = bind_lenient("\"0\" \"1\" \"1\" \"300\" \"2\" { } \"3\" \"3\"").unwrap();
        assert_eq!(ids, vec![1, 3]);

        let sizes: IndexMap<String, u64> = bind_lenient("\"400\" \"12\" \"620\" \"big\"").unwrap();
        assert_eq!(sizes.len(), 1);
        assert_eq!(sizes["400"], 12);
    }

    #[test]
    fn test_misfit_element_is_error_when_strict() {
        let err = bind::<Vec<u32>>("\"0\" \"1\" \"1\" \"x\"").unwrap_err();
        assert!(err.is_type_bind());
        assert!(err.to_string().contains("\"1\""), "{err}");
    }

    #[test]
    fn test_absent_option_is_none() {
        #[derive(Deserialize)]
        struct App {
            name: Option<String>,
            label: Option<String>,
        }
        let app: App = bind("\"name\" \"Portal\"").unwrap();
        assert_eq!(app.name.as_deref(), Some("Portal"));
        assert!(app.label.is_none());
    }

    #[derive(Debug, Deserialize, PartialEq)]
    enum State {
        Installed,
        Updating(u8),
        Moved { from: String },
    }

    #[test]
    fn test_enum_forms() {
        let leaf = ValueDeserializer::new(Value::from("installed"));
        let state = State::deserialize(leaf).unwrap();
        assert_eq!(state, State::Installed);

        let state: State = bind("\"Updating\" \"42\"").unwrap();
        assert_eq!(state, State::Updating(42));

        let state: State = bind("\"Moved\" { \"From\" \"D:\\Games\" }").unwrap();
        assert_eq!(
            state,
            State::Moved {
                from: "D:\\Games".to_string()
            }
        );
    }

    #[test]
    fn test_enum_from_multi_key_object_fails() {
        let err = bind::<State>("\"Installed\" \"\" \"Updating\" \"1\"").unwrap_err();
        assert!(err.is_type_bind());
    }

    #[test]
    fn test_any_yields_leaves_and_objects() {
        let value: Value = bind("\"a\" { \"b\" \"c\" }").unwrap();
        assert_eq!(value.get_path(&["a", "b"]).and_then(Value::as_str), Some("c"));
    }
}
