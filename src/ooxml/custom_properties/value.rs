//! Caller-facing custom property values.
//!
//! The variant catalogue has 33 kinds; callers only ever see the five in
//! [`PropertyValue`] or no value at all. Projection from the catalogue and
//! construction back into it live here.

use super::variant::{Variant, VariantKind};
use crate::ooxml::error::ValueError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// 100-nanosecond intervals between 1601-01-01 and the Unix epoch.
const WINDOWS_EPOCH_OFFSET: i64 = 116_444_736_000_000_000;

/// A custom document property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    /// 32-bit signed integer (i4 in OOXML)
    Integer(i32),
    /// 64-bit floating point (r8 in OOXML)
    Double(f64),
    /// String value (lpwstr in OOXML)
    String(String),
    /// Boolean value (bool in OOXML)
    Boolean(bool),
    /// DateTime value (date in OOXML)
    DateTime(DateTime<Utc>),
}

impl PropertyValue {
    /// Variant kind this value is written as.
    pub const fn kind(&self) -> VariantKind {
        match self {
            PropertyValue::Integer(_) => VariantKind::I4,
            PropertyValue::Double(_) => VariantKind::R8,
            PropertyValue::String(_) => VariantKind::LpwStr,
            PropertyValue::Boolean(_) => VariantKind::Bool,
            PropertyValue::DateTime(_) => VariantKind::Date,
        }
    }

    /// Build the variant written for this value.
    pub fn to_variant(&self) -> Variant {
        match self {
            PropertyValue::Integer(i) => Variant::I4(*i),
            PropertyValue::Double(d) => Variant::R8(*d),
            PropertyValue::String(s) => Variant::LpwStr(s.clone()),
            PropertyValue::Boolean(b) => Variant::Bool(*b),
            PropertyValue::DateTime(dt) => Variant::Date(format_timestamp(dt)),
        }
    }

    /// Project a variant onto the public value kinds.
    ///
    /// Integers of any width become [`PropertyValue::Integer`] when they fit
    /// 32 bits and fail with [`ValueError::OutOfRange`] otherwise. Reals
    /// become doubles, the three string kinds become strings, and `date` /
    /// `filetime` are parsed as timestamps. Structural kinds (vector, blob,
    /// storage, clsid, decimal, cy, error, ...) have no public form and
    /// project to `Ok(None)`.
    pub fn from_variant(variant: &Variant) -> Result<Option<Self>, ValueError> {
        let kind = variant.kind();
        let value = match variant {
            Variant::I1(v) => narrow(kind, *v)?,
            Variant::I2(v) => narrow(kind, *v)?,
            Variant::I4(v) => narrow(kind, *v)?,
            Variant::I8(v) | Variant::Int(v) => narrow(kind, *v)?,
            Variant::UI1(v) => narrow(kind, *v)?,
            Variant::UI2(v) => narrow(kind, *v)?,
            Variant::UI4(v) => narrow(kind, *v)?,
            Variant::UI8(v) | Variant::UInt(v) => narrow(kind, *v)?,
            Variant::R4(v) => PropertyValue::Double(f64::from(*v)),
            Variant::R8(v) => PropertyValue::Double(*v),
            Variant::LpStr(s) | Variant::LpwStr(s) | Variant::BStr(s) => {
                PropertyValue::String(s.clone())
            },
            Variant::Bool(b) => PropertyValue::Boolean(*b),
            Variant::Date(text) | Variant::FileTime(text) => {
                PropertyValue::DateTime(parse_timestamp(kind, text)?)
            },
            _ => return Ok(None),
        };
        Ok(Some(value))
    }
}

#[inline]
fn narrow<T>(kind: VariantKind, value: T) -> Result<PropertyValue, ValueError>
where
    T: TryInto<i32> + Copy + std::fmt::Display,
{
    value
        .try_into()
        .map(PropertyValue::Integer)
        .map_err(|_| ValueError::OutOfRange {
            kind,
            value: value.to_string(),
        })
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        PropertyValue::Integer(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Double(value)
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::String(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::String(value.to_string())
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Boolean(value)
    }
}

impl From<DateTime<Utc>> for PropertyValue {
    fn from(value: DateTime<Utc>) -> Self {
        PropertyValue::DateTime(value)
    }
}

/// A named custom property as seen by callers.
///
/// `value` is `None` when the stored variant has no public form or could
/// not be converted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomProperty {
    /// Property name
    pub name: String,
    /// Property value
    pub value: Option<PropertyValue>,
}

impl CustomProperty {
    /// Create a property with a value.
    pub fn new(name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    /// Create a property without a usable value.
    pub fn absent(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }
}

/// Format a timestamp as xsd:dateTime text.
///
/// Always UTC with a `Z` suffix; fractional seconds appear only when
/// non-zero, e.g. `2024-05-06T07:08:09Z`.
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parse `date` or `filetime` text into a UTC timestamp.
///
/// Accepts RFC 3339, naive `YYYY-MM-DDTHH:MM:SS[.f]` (taken as UTC) and a
/// bare `YYYY-MM-DD`. For `filetime` a plain integer is also accepted as a
/// count of 100-nanosecond ticks since 1601-01-01.
pub fn parse_timestamp(kind: VariantKind, text: &str) -> Result<DateTime<Utc>, ValueError> {
    let s = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(dt.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        && let Some(dt) = date.and_hms_opt(0, 0, 0)
    {
        return Ok(dt.and_utc());
    }

    if kind == VariantKind::FileTime
        && let Ok(ticks) = s.parse::<i64>()
        && let Some(dt) = filetime_to_datetime(ticks)
    {
        return Ok(dt);
    }

    Err(ValueError::InvalidDate {
        kind,
        text: text.to_string(),
    })
}

fn filetime_to_datetime(ticks: i64) -> Option<DateTime<Utc>> {
    let unix_ticks = ticks.checked_sub(WINDOWS_EPOCH_OFFSET)?;
    let secs = unix_ticks.div_euclid(10_000_000);
    let nanos = (unix_ticks.rem_euclid(10_000_000) * 100) as u32;
    DateTime::from_timestamp(secs, nanos)
}
