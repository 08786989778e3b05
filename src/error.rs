//! Error types for VDF parsing, binding and serialization.
//!
//! Errors fall into two families:
//!
//! - **Format errors**: the text violates the KeyValues grammar (unterminated
//!   object or string) or a scalar cannot be read in its fixed representation
//!   (an unparseable date).
//! - **Type-binding errors**: the parsed tree cannot be mapped onto the
//!   requested Rust type. These carry the key being bound and, when known, the
//!   pairs of the source record. Values already bound when the error happened
//!   are no longer available, so those pairs carry only their key.
//!
//! [`Error::category`] tells the two apart.
//!
//! ## Examples
//!
//! ```rust
//! use serde_vdf::{from_str, Category, Value};
//!
//! let result: Result<Value, _> = from_str("\"root\" { \"key\" \"value\"");
//! let err = result.unwrap_err();
//! assert_eq!(err.category(), Category::Format);
//! assert!(err.to_string().contains("unterminated object"));
//! ```

use std::fmt;
use thiserror::Error;

/// Every failure the crate can report.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Malformed VDF text
    #[error("Syntax error at line {line}, column {col}: {msg}{context}")]
    Syntax {
        line: usize,
        col: usize,
        msg: String,
        context: String,
    },

    /// Input ended while an object or string was still open
    #[error("Unexpected end of input at line {line}, column {col}: expected {expected}{context}")]
    UnexpectedEof {
        line: usize,
        col: usize,
        expected: String,
        context: String,
    },

    /// A leaf could not be read in its fixed textual representation
    #[error("Invalid VDF format{}: {msg}", at_key(.key))]
    InvalidFormat { key: Option<String>, msg: String },

    /// The tree does not fit the requested Rust type
    #[error("Type mismatch{}: expected {expected}, found {found}{}", at_key(.key), pair_list(.pairs))]
    TypeMismatch {
        key: Option<String>,
        expected: String,
        found: String,
        pairs: Vec<(String, Option<String>)>,
    },

    /// Unsupported type for serialization
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Custom error raised by a `Serialize` or `Deserialize` impl
    #[error("{0}")]
    Custom(String),
}

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// The text is not valid VDF, or a leaf is not in its expected representation.
    Format,
    /// The tree could not be bound to the requested type.
    TypeBind,
    /// Reading or writing the underlying stream failed.
    Io,
}

fn at_key(key: &Option<String>) -> String {
    match key {
        Some(key) => format!(" for key \"{}\"", key),
        None => String::new(),
    }
}

fn pair_list(pairs: &[(String, Option<String>)]) -> String {
    if pairs.is_empty() {
        return String::new();
    }
    let rendered: Vec<String> = pairs
        .iter()
        .map(|(k, v)| match v {
            Some(v) => format!("Key: {} - Value: {}", k, v),
            None => format!("Key: {}", k),
        })
        .collect();
    format!(" (while binding {})", rendered.join(" | "))
}

impl Error {
    /// Creates a syntax error at the given position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_vdf::Error;
    ///
    /// let err = Error::syntax(3, 7, "unexpected '}' at top level");
    /// assert!(err.to_string().contains("line 3"));
    /// ```
    pub fn syntax(line: usize, col: usize, msg: &str) -> Self {
        Error::Syntax {
            line,
            col,
            msg: msg.to_string(),
            context: String::new(),
        }
    }

    /// Creates an end-of-input error. `context` is typically the key and
    /// partial value being read when the input ran out.
    pub fn unexpected_eof(line: usize, col: usize, expected: &str, context: &str) -> Self {
        Error::UnexpectedEof {
            line,
            col,
            expected: expected.to_string(),
            context: if context.is_empty() {
                String::new()
            } else {
                format!(" (while reading {})", context)
            },
        }
    }

    /// Creates a format error for a leaf that is not in its fixed representation.
    pub fn invalid_format(msg: &str) -> Self {
        Error::InvalidFormat {
            key: None,
            msg: msg.to_string(),
        }
    }

    /// Creates a type mismatch error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_vdf::{Category, Error};
    ///
    /// let err = Error::type_mismatch("ordered map", "string leaf");
    /// assert_eq!(err.category(), Category::TypeBind);
    /// assert!(err.to_string().contains("expected ordered map"));
    /// ```
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            key: None,
            expected: expected.to_string(),
            found: found.to_string(),
            pairs: Vec::new(),
        }
    }

    /// Creates an unsupported type error for values the writer cannot express.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for stream reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns whether this is a format, type-binding or I/O failure.
    #[must_use]
    pub fn category(&self) -> Category {
        match self {
            Error::Io(_) => Category::Io,
            Error::Syntax { .. } | Error::UnexpectedEof { .. } | Error::InvalidFormat { .. } => {
                Category::Format
            }
            Error::TypeMismatch { .. } | Error::UnsupportedType(_) | Error::Custom(_) => {
                Category::TypeBind
            }
        }
    }

    /// Returns `true` for errors in the [`Category::Format`] family.
    #[must_use]
    pub fn is_format(&self) -> bool {
        self.category() == Category::Format
    }

    /// Returns `true` for errors in the [`Category::TypeBind`] family.
    #[must_use]
    pub fn is_type_bind(&self) -> bool {
        self.category() == Category::TypeBind
    }

    /// Attaches the key being bound, unless a deeper key was already recorded.
    pub(crate) fn at(mut self, key: &str) -> Self {
        match &mut self {
            Error::InvalidFormat { key: slot, .. } | Error::TypeMismatch { key: slot, .. } => {
                if slot.is_none() {
                    *slot = Some(key.to_string());
                }
            }
            _ => {}
        }
        self
    }

    /// Attaches the source record's pairs to a mismatch that has none yet.
    /// `pairs` only runs when it is needed.
    pub(crate) fn with_pairs<F>(mut self, pairs: F) -> Self
    where
        F: FnOnce() -> Vec<(String, Option<String>)>,
    {
        if let Error::TypeMismatch { pairs: slot, .. } = &mut self {
            if slot.is_empty() {
                *slot = pairs();
            }
        }
        self
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    fn invalid_type(unexp: serde::de::Unexpected, exp: &dyn serde::de::Expected) -> Self {
        Error::type_mismatch(&exp.to_string(), &unexp.to_string())
    }

    fn invalid_value(unexp: serde::de::Unexpected, exp: &dyn serde::de::Expected) -> Self {
        Error::invalid_format(&format!("invalid value: {}, expected {}", unexp, exp))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_recorded_once() {
        let err = Error::type_mismatch("record", "string leaf")
            .at("inner")
            .at("outer");
        match err {
            Error::TypeMismatch { key, .. } => assert_eq!(key.as_deref(), Some("inner")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_pairs_render_in_message() {
        let err = Error::type_mismatch("record", "string leaf").with_pairs(|| {
            vec![
                ("path".to_string(), None),
                ("label".to_string(), Some("games".to_string())),
            ]
        });
        let msg = err.to_string();
        assert!(msg.contains("(while binding Key: path | Key: label - Value: games)"), "{msg}");

        let err = Error::custom("missing field `path`").with_pairs(|| unreachable!());
        assert!(matches!(err, Error::Custom(_)));
    }

    #[test]
    fn test_categories() {
        assert_eq!(Error::syntax(1, 1, "x").category(), Category::Format);
        assert_eq!(
            Error::unexpected_eof(1, 1, "'}'", "").category(),
            Category::Format
        );
        assert_eq!(Error::invalid_format("bad date").category(), Category::Format);
        assert_eq!(Error::custom("missing field").category(), Category::TypeBind);
        assert_eq!(Error::io("closed").category(), Category::Io);
    }

    #[test]
    fn test_serde_invalid_value_is_format_error() {
        use serde::de::{Error as _, Unexpected};
        let err = Error::invalid_value(Unexpected::Str("2017-13-45"), &"a date");
        assert!(err.is_format());
        let err = Error::invalid_type(Unexpected::Str("x"), &"a map");
        assert!(err.is_type_bind());
    }
}
