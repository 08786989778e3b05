//! # serde_vdf
//!
//! A Serde-compatible reader and writer for Valve's KeyValues text format,
//! better known as VDF.
//!
//! ## What is VDF?
//!
//! VDF is the nested key/value notation Steam uses for its configuration and
//! metadata files (`config.vdf`, `libraryfolders.vdf`, `appmanifest_*.acf`).
//! Every value is either a quoted string or a brace-delimited object:
//!
//! ```text
//! "Steam"
//! {
//!     "DesktopShortcutCheck"    "1"
//!     "SurveyDateVersion"       "42"
//! }
//! ```
//!
//! The format is untyped. Numbers, booleans and dates are strings until a
//! Rust type says otherwise.
//!
//! ## Key Features
//!
//! - **Two-stage reading**: text is parsed into an order-preserving [`Value`]
//!   tree, which is then bound onto any `Deserialize` type
//! - **Forgiving field names**: struct fields match source keys ignoring case
//! - **Lenient mode**: optionally skip keys whose values do not fit their
//!   type instead of failing, see [`VdfOptions`]
//! - **Hybrid objects**: [`Hybrid`] binds objects that carry named fields and
//!   keyed entries side by side
//! - **Dates**: [`date`] reads and writes `chrono::NaiveDate` leaves
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_vdf::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Steam {
//!     #[serde(rename = "DesktopShortcutCheck")]
//!     desktop_shortcut_check: bool,
//!     #[serde(rename = "SurveyDateVersion")]
//!     survey_date_version: String,
//! }
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Config {
//!     #[serde(rename = "Steam")]
//!     steam: Steam,
//! }
//!
//! let text = "\"Steam\"\n{\n\t\"DesktopShortcutCheck\"\t\"1\"\n\
//!             \t\"SurveyDateVersion\"\t\"42\"\n}";
//! let config: Config = from_str(text).unwrap();
//! assert!(config.steam.desktop_shortcut_check);
//! assert_eq!(config.steam.survey_date_version, "42");
//!
//! let written = to_string(&config).unwrap();
//! assert_eq!(from_str::<Config>(&written).unwrap(), config);
//! ```
//!
//! ### Untyped access
//!
//! ```rust
//! let root = serde_vdf::parse("\"AppState\" { \"appid\" \"400\" }").unwrap();
//! assert_eq!(root.get_path(&["AppState", "appid"]).and_then(|v| v.as_str()), Some("400"));
//! ```
//!
//! ## Missing and mismatched keys
//!
//! A struct field with no matching key follows serde's rules: an `Option`
//! field becomes `None`, a field with `#[serde(default)]` takes its default,
//! and any other field fails with a missing-field error. Declare fields that
//! a file may leave out accordingly.
//!
//! ```rust
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! struct App {
//!     name: String,
//!     #[serde(default)]
//!     installdir: String,
//!     last_owner: Option<u64>,
//! }
//!
//! let app: App = serde_vdf::from_str("\"name\" \"Portal\"").unwrap();
//! assert_eq!(app.installdir, "");
//! assert!(app.last_owner.is_none());
//!
//! let err = serde_vdf::from_str::<App>("\"installdir\" \"Portal\"").unwrap_err();
//! assert!(err.to_string().contains("missing field `name`"));
//! ```
//!
//! In lenient mode a key whose value cannot fit its field is treated as if
//! it were missing, so the same rules decide what the field ends up as.
//!
//! ## Output layout
//!
//! The writer puts a tab pair between a key and its leaf, a CRLF after every
//! line, and a tab per nesting level. An object's key is followed directly by
//! a line break and the opening brace; no tabs trail the key. Other writers
//! emit `"key"\t\t` before the brace, and both forms read back identically.
//!
//! ```rust
//! let tree = serde_vdf::parse("\"Steam\"\t\t\r\n{\r\n\t\"a\"\t\t\"1\"\r\n}\r\n").unwrap();
//! assert_eq!(
//!     serde_vdf::to_string(&tree).unwrap(),
//!     "\"Steam\"\r\n{\r\n\t\"a\"\t\t\"1\"\r\n}\r\n"
//! );
//! ```
//!
//! ## Known Limitations
//!
//! - The writer does not escape quotes inside strings, although the reader
//!   understands `\"`. Text containing quotes does not round-trip.
//! - Source keys only match fields case-insensitively through
//!   `deserialize_struct`; structs using `#[serde(flatten)]` match exactly.
//!
//! ## Logging
//!
//! With the `tracing` feature enabled, the parser traces object nesting and
//! the binder reports keys skipped in lenient mode at debug level.

#[cfg(feature = "tracing")]
#[allow(unused_macros)]
macro_rules! trace {
    ($($arg:tt)*) => {
        ::tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
#[allow(unused_macros)]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "tracing")]
#[allow(unused_macros)]
macro_rules! debug {
    ($($arg:tt)*) => {
        ::tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
#[allow(unused_macros)]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

#[allow(unused_imports)]
pub(crate) use debug;
#[allow(unused_imports)]
pub(crate) use trace;

mod bind;
pub mod date;
pub mod de;
pub mod error;
pub mod hybrid;
mod macros;
pub mod map;
pub mod options;
mod read;
mod schema;
pub mod ser;
pub mod value;

pub use bind::ValueDeserializer;
pub use de::Deserializer;
pub use error::{Category, Error, Result};
pub use hybrid::Hybrid;
pub use map::VdfMap;
pub use options::VdfOptions;
pub use ser::Serializer;
pub use value::Value;

use schema::Schema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Parses VDF text into an untyped tree.
///
/// The returned value is always an [`Value::Object`].
///
/// # Examples
///
/// ```rust
/// use serde_vdf::parse;
///
/// let root = parse("{ \"a\" \"1\" \"a\" \"2\" }").unwrap();
/// assert_eq!(root.get("a").and_then(|v| v.as_str()), Some("2"));
/// ```
///
/// # Errors
///
/// Returns a format error if an object or quoted string is not terminated.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse(text: &str) -> Result<Value> {
    Deserializer::from_str(text).parse()
}

/// Parses VDF text from an I/O stream into an untyped tree.
///
/// # Errors
///
/// Returns an error if reading fails, the bytes are not UTF-8, or the text
/// is not well-formed VDF.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_reader<R>(mut reader: R) -> Result<Value>
where
    R: io::Read,
{
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| Error::io(&e.to_string()))?;
    parse(&text)
}

/// Serialize any `T: Serialize` to a VDF string.
///
/// # Examples
///
/// ```rust
/// use serde_vdf::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct App { appid: u32, name: String }
///
/// let app = App { appid: 400, name: "Portal".to_string() };
/// assert_eq!(
///     to_string(&app).unwrap(),
///     "\"appid\"\t\t\"400\"\r\n\"name\"\t\t\"Portal\"\r\n"
/// );
/// ```
///
/// # Errors
///
/// Returns an error if the value is not an object at the top level, or if a
/// map key does not serialize to a leaf.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let mut serializer = Serializer::new();
    value.serialize(&mut serializer)?;
    Ok(serializer.into_inner())
}

/// Serialize any `T: Serialize` to a writer in VDF format.
///
/// # Examples
///
/// ```rust
/// use serde_vdf::to_writer;
/// use std::collections::BTreeMap;
///
/// let mut apps = BTreeMap::new();
/// apps.insert(400, "Portal");
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &apps).unwrap();
/// assert_eq!(buffer, b"\"400\"\t\t\"Portal\"\r\n");
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(mut writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let text = to_string(value)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Convert any `T: Serialize` to a [`Value`] tree.
///
/// `None` fields are left out. A top-level `None` gives an empty object.
///
/// # Examples
///
/// ```rust
/// use serde_vdf::{to_value, Value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct App { appid: u32, tags: Vec<&'static str> }
///
/// let value = to_value(&App { appid: 400, tags: vec!["Puzzle"] }).unwrap();
/// assert_eq!(value.get_path(&["tags", "0"]).and_then(Value::as_str), Some("Puzzle"));
/// ```
///
/// # Errors
///
/// Returns an error if a map key does not serialize to a leaf.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    Ok(value.serialize(ser::ValueSerializer)?.unwrap_or_default())
}

/// Deserialize an instance of type `T` from a string of VDF text.
///
/// Type mismatches are errors; see [`from_str_with_options`] to ignore them.
///
/// # Examples
///
/// ```rust
/// use serde_vdf::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct App { appid: u32, name: String }
///
/// let app: App = from_str("\"AppID\" \"400\"\n\"Name\" \"Portal\"").unwrap();
/// assert_eq!(app, App { appid: 400, name: "Portal".to_string() });
/// ```
///
/// # Errors
///
/// Returns a format error if the text is not well-formed VDF, or a
/// type-binding error if the tree does not fit `T`. Syntax errors carry line
/// and column information.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    from_str_with_options(s, VdfOptions::default())
}

/// Deserialize an instance of type `T` from VDF text with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_vdf::{from_str_with_options, VdfOptions};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct App {
///     #[serde(default)]
///     appid: u32,
///     name: Option<String>,
/// }
///
/// let text = "\"appid\" { }\n\"name\" { }";
/// let app: App = from_str_with_options(text, VdfOptions::lenient()).unwrap();
/// assert_eq!(app.appid, 0);
/// assert!(app.name.is_none());
/// ```
///
/// # Errors
///
/// As [`from_str`], except that when
/// [`VdfOptions::ignore_type_mismatches`] is set, keys whose values cannot
/// fit are skipped instead of reported. A required field skipped this way
/// is still a missing-field error.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options<T>(s: &str, options: VdfOptions) -> Result<T>
where
    T: DeserializeOwned,
{
    let value = Deserializer::from_str(s).parse()?;
    from_value_with_options(value, options)
}

/// Deserialize an instance of type `T` from an I/O stream of VDF.
///
/// # Examples
///
/// ```rust
/// use serde_vdf::from_reader;
/// use serde::Deserialize;
/// use std::io::Cursor;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct App { appid: u32 }
///
/// let cursor = Cursor::new(b"\"appid\" \"400\"");
/// let app: App = from_reader(cursor).unwrap();
/// assert_eq!(app, App { appid: 400 });
/// ```
///
/// # Errors
///
/// Returns an error if reading from the reader fails, the input is not valid
/// VDF, or the data cannot be bound to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Deserialize an instance of type `T` from bytes of VDF text.
///
/// A leading UTF-8 byte order mark is skipped.
///
/// # Errors
///
/// Returns a format error if the bytes are not valid UTF-8, and otherwise
/// fails as [`from_str`] does.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let s = std::str::from_utf8(v)
        .map_err(|e| Error::invalid_format(&format!("input is not valid UTF-8: {}", e)))?;
    from_str(s)
}

/// Bind an already parsed tree onto type `T`.
///
/// # Examples
///
/// ```rust
/// use serde_vdf::{from_value, parse};
///
/// let root = parse("\"0\" \"a\" \"1\" \"b\"").unwrap();
/// let letters: Vec<String> = from_value(root).unwrap();
/// assert_eq!(letters, vec!["a", "b"]);
/// ```
///
/// # Errors
///
/// Returns a type-binding error if the tree does not fit `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    from_value_with_options(value, VdfOptions::default())
}

/// Bind an already parsed tree onto type `T` with custom options.
///
/// # Errors
///
/// As [`from_value`], except that keys whose values cannot fit are skipped
/// when [`VdfOptions::ignore_type_mismatches`] is set.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value_with_options<T>(value: Value, options: VdfOptions) -> Result<T>
where
    T: DeserializeOwned,
{
    if !options.ignore_type_mismatches {
        return T::deserialize(ValueDeserializer::new(value));
    }
    let schema = Schema::of::<T>();
    T::deserialize(ValueDeserializer::with_schema(value, options, &schema))
}
