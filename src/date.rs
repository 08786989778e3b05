//! Dates as VDF leaves.
//!
//! Steam writes dates as `YYYY-MM-DD` text. Use this module with
//! `#[serde(with = "serde_vdf::date")]` on a [`NaiveDate`] field, or
//! [`date::option`](option) on an `Option<NaiveDate>`.
//!
//! Reading also accepts `YYYY-MM-DD HH:MM:SS` and RFC 3339 timestamps and
//! keeps only the date. Text that is none of these is a format error, even
//! when type mismatches are being ignored.
//!
//! ## Examples
//!
//! ```rust
//! use chrono::NaiveDate;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, Debug)]
//! struct Steam {
//!     #[serde(rename = "SurveyDate", with = "serde_vdf::date")]
//!     survey_date: NaiveDate,
//! }
//!
//! let steam: Steam = serde_vdf::from_str("\"surveydate\" \"2017-07-03\"").unwrap();
//! assert_eq!(steam.survey_date, NaiveDate::from_ymd_opt(2017, 7, 3).unwrap());
//!
//! let text = serde_vdf::to_string(&steam).unwrap();
//! assert_eq!(text, "\"SurveyDate\"\t\t\"2017-07-03\"\r\n");
//!
//! let err = serde_vdf::from_str::<Steam>("\"SurveyDate\" \"yesterday\"").unwrap_err();
//! assert!(err.is_format());
//! ```

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::{self, Deserialize, Deserializer, Unexpected};
use serde::ser::Serializer;

/// The representation dates are written in.
pub const FORMAT: &str = "%Y-%m-%d";

const EXPECTED: &str = "a date in YYYY-MM-DD form";

/// Parses a date leaf.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use serde_vdf::date::parse;
///
/// let day = NaiveDate::from_ymd_opt(2017, 7, 3);
/// assert_eq!(parse("2017-07-03"), day);
/// assert_eq!(parse("2017-07-03 18:40:00"), day);
/// assert_eq!(parse("2017-07-03T18:40:00+02:00"), day);
/// assert_eq!(parse("03/07/2017"), None);
/// ```
#[must_use]
pub fn parse(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
        .or_else(|_| DateTime::parse_from_rfc3339(text).map(|dt| dt.date_naive()))
        .ok()
}

pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&date.format(FORMAT))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    parse(&text).ok_or_else(|| de::Error::invalid_value(Unexpected::Str(&text), &EXPECTED))
}

/// The same representation for `Option<NaiveDate>` fields.
///
/// `None` is not written at all, and a missing key reads back as `None`
/// when the field also carries `#[serde(default)]`.
pub mod option {
    use super::*;

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.serialize_some(&date.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(text) => parse(&text)
                .map(Some)
                .ok_or_else(|| de::Error::invalid_value(Unexpected::Str(&text), &EXPECTED)),
            None => Ok(None),
        }
    }
}
