//! Configuration for binding parsed VDF onto Rust types.
//!
//! The only knob is whether type mismatches abort the bind (strict, the
//! default) or skip the offending key and carry on (lenient). A skipped
//! record field is treated as missing, so `None` or its `#[serde(default)]`
//! applies. A skipped map or sequence entry is simply absent.
//!
//! ## Examples
//!
//! ```rust
//! use serde_vdf::{from_str_with_options, VdfOptions};
//! use serde::Deserialize;
//! use indexmap::IndexMap;
//!
//! fn default_port() -> u16 {
//!     27015
//! }
//!
//! #[derive(Deserialize)]
//! struct Server {
//!     #[serde(default)]
//!     tags: IndexMap<String, String>,
//!     #[serde(default = "default_port")]
//!     port: u16,
//!     maps: Vec<u32>,
//!     name: String,
//! }
//!
//! let text = "\"tags\" \"oops\"\n\"port\" \"any\"\n\
//!             \"maps\" { \"0\" \"400\" \"1\" \"none\" \"2\" \"620\" }\n\"name\" \"Portal\"";
//!
//! assert!(serde_vdf::from_str::<Server>(text).is_err());
//!
//! let server: Server = from_str_with_options(text, VdfOptions::lenient()).unwrap();
//! assert!(server.tags.is_empty());
//! assert_eq!(server.port, 27015);
//! assert_eq!(server.maps, vec![400, 620]);
//! assert_eq!(server.name, "Portal");
//! ```

/// Options controlling how a parsed tree is bound onto a target type.
///
/// # Examples
///
/// ```rust
/// use serde_vdf::VdfOptions;
///
/// let strict = VdfOptions::new();
/// assert!(!strict.ignore_type_mismatches);
///
/// let lenient = VdfOptions::new().with_ignore_type_mismatches(true);
/// assert!(lenient.ignore_type_mismatches);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VdfOptions {
    pub ignore_type_mismatches: bool,
}

impl VdfOptions {
    /// Creates the default, strict options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that skip type mismatches instead of failing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_vdf::VdfOptions;
    ///
    /// assert!(VdfOptions::lenient().ignore_type_mismatches);
    /// ```
    #[must_use]
    pub fn lenient() -> Self {
        VdfOptions {
            ignore_type_mismatches: true,
        }
    }

    /// Sets whether type mismatches are skipped.
    #[must_use]
    pub fn with_ignore_type_mismatches(mut self, ignore: bool) -> Self {
        self.ignore_type_mismatches = ignore;
        self
    }
}
