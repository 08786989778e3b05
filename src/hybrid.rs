//! Records that are also keyed collections.
//!
//! Some VDF objects mix a few named settings with an open-ended set of
//! entries. Steam's `libraryfolders.vdf` is the usual example: one
//! `contentstatsid` leaf next to numbered library objects.
//!
//! ```text
//! "libraryfolders"
//! {
//!     "contentstatsid"    "-1882263624787241560"
//!     "0" { "path" "C:\Program Files (x86)\Steam" "label" "" }
//!     "1" { "path" "D:\SteamLibrary" "label" "" }
//! }
//! ```
//!
//! [`Hybrid`] binds such an object: every source key is first matched,
//! ignoring case, against the declared fields of the record `R`; whatever
//! does not match becomes an entry of the map.
//!
//! ## Examples
//!
//! ```rust
//! use serde::Deserialize;
//! use serde_vdf::Hybrid;
//!
//! #[derive(Deserialize, Default)]
//! struct Stats {
//!     #[serde(default)]
//!     contentstatsid: String,
//! }
//!
//! #[derive(Deserialize)]
//! struct Folder {
//!     path: String,
//! }
//!
//! #[derive(Deserialize)]
//! struct Library {
//!     libraryfolders: Hybrid<Stats, Folder, u32>,
//! }
//!
//! let text = r#"
//! "libraryfolders"
//! {
//!     "ContentStatsID" "-1882263624787241560"
//!     "0" { "path" "C:\Steam" }
//!     "1" { "path" "D:\SteamLibrary" }
//! }
//! "#;
//!
//! let library: Library = serde_vdf::from_str(text).unwrap();
//! let folders = &library.libraryfolders;
//! assert_eq!(folders.fields.contentstatsid, "-1882263624787241560");
//! assert_eq!(folders.len(), 2);
//! assert_eq!(folders[&1].path, "D:\\SteamLibrary");
//! ```
//!
//! When writing, the record's fields come first and the entries follow.
//! An entry whose key equals a field name is written twice; nothing
//! deduplicates them.

use crate::bind::ValueDeserializer;
use crate::map::eq_ignore_case;
use crate::schema::Schema;
use crate::{Value, VdfMap};
use indexmap::IndexMap;
use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, Serializer};
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};

/// Struct name [`Hybrid`] passes to `deserialize_struct`, so the binder can
/// tell it apart from a plain record.
pub(crate) const TOKEN: &str = "$serde_vdf::Hybrid";
pub(crate) const FIELDS_KEY: &str = "$serde_vdf::Hybrid::fields";
pub(crate) const ENTRIES_KEY: &str = "$serde_vdf::Hybrid::entries";
/// The keys the binder hands a hybrid's visitor, in order.
pub(crate) static PARTS: &[&str] = &[FIELDS_KEY, ENTRIES_KEY];

/// A record `R` plus ordered entries keyed by `K`, bound from one object.
///
/// Dereferences to the entry map.
#[derive(Clone, Debug)]
pub struct Hybrid<R, V, K = String> {
    pub fields: R,
    pub entries: IndexMap<K, V>,
}

impl<R, V, K> Hybrid<R, V, K> {
    /// Creates a hybrid with the given fields and no entries.
    #[must_use]
    pub fn new(fields: R) -> Self {
        Hybrid {
            fields,
            entries: IndexMap::new(),
        }
    }

    /// Splits into the record and the entry map.
    pub fn into_parts(self) -> (R, IndexMap<K, V>) {
        (self.fields, self.entries)
    }
}

impl<R: Default, V, K> Default for Hybrid<R, V, K> {
    fn default() -> Self {
        Hybrid::new(R::default())
    }
}

impl<R, V, K> PartialEq for Hybrid<R, V, K>
where
    R: PartialEq,
    V: PartialEq,
    K: Hash + Eq,
{
    fn eq(&self, other: &Self) -> bool {
        self.fields == other.fields && self.entries == other.entries
    }
}

impl<R: Eq, V: Eq, K: Hash + Eq> Eq for Hybrid<R, V, K> {}

impl<R, V, K> Deref for Hybrid<R, V, K> {
    type Target = IndexMap<K, V>;

    fn deref(&self) -> &Self::Target {
        &self.entries
    }
}

impl<R, V, K> DerefMut for Hybrid<R, V, K> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.entries
    }
}

impl<R, V, K> Serialize for Hybrid<R, V, K>
where
    R: Serialize,
    V: Serialize,
    K: Serialize + Hash + Eq,
{
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[derive(serde::Serialize)]
        #[serde(bound = "R: Serialize, V: Serialize, K: Serialize + Hash + Eq")]
        struct Parts<'a, R, V, K> {
            #[serde(flatten)]
            fields: &'a R,
            #[serde(flatten)]
            entries: &'a IndexMap<K, V>,
        }

        Parts {
            fields: &self.fields,
            entries: &self.entries,
        }
        .serialize(serializer)
    }
}

impl<'de, R, V, K> Deserialize<'de> for Hybrid<R, V, K>
where
    R: Deserialize<'de>,
    V: Deserialize<'de>,
    K: Deserialize<'de> + Hash + Eq,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let fields = Schema::field_names::<R>();
        deserializer.deserialize_struct(
            TOKEN,
            fields,
            HybridVisitor {
                fields,
                marker: PhantomData,
            },
        )
    }
}

struct HybridVisitor<R, V, K> {
    fields: &'static [&'static str],
    marker: PhantomData<fn() -> (R, V, K)>,
}

impl<'de, R, V, K> Visitor<'de> for HybridVisitor<R, V, K>
where
    R: Deserialize<'de>,
    V: Deserialize<'de>,
    K: Deserialize<'de> + Hash + Eq,
{
    type Value = Hybrid<R, V, K>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object with named fields and keyed entries")
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut record = None;
        let mut entries = IndexMap::new();
        // Other formats hand over the raw keys, so the split happens here.
        let mut named = VdfMap::new();

        while let Some(key) = map.next_key::<String>()? {
            if key == FIELDS_KEY {
                record = Some(map.next_value::<R>()?);
            } else if key == ENTRIES_KEY {
                entries.extend(map.next_value::<IndexMap<K, V>>()?);
            } else if self.fields.iter().any(|field| eq_ignore_case(field, &key)) {
                let value = map.next_value::<Value>()?;
                named.insert(key, value);
            } else {
                let entry_key = K::deserialize(ValueDeserializer::new(Value::Leaf(key)))
                    .map_err(<A::Error as de::Error>::custom)?;
                let entry = map.next_value::<V>()?;
                entries.insert(entry_key, entry);
            }
        }

        let fields = match record {
            Some(fields) => fields,
            None => R::deserialize(ValueDeserializer::new(Value::Object(named)))
                .map_err(<A::Error as de::Error>::custom)?,
        };
        Ok(Hybrid { fields, entries })
    }
}
