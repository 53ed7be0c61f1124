use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::Value;

use crate::domain::value_objects::EntityId;

/// A raw, schema-less row as returned by the remote table service.
pub type RawRecord = serde_json::Map<String, Value>;

/// Read-only view over a [`RawRecord`] that resolves historical field names.
///
/// Every accessor takes a list of aliases and returns the first one that is
/// present and non-null. Values are coerced leniently: numbers may arrive as
/// strings, dates may arrive as full timestamps, flags as `"sim"`/`"1"`.
/// Nothing here fails; an unusable value is treated as absent.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    raw: &'a RawRecord,
}

impl<'a> Fields<'a> {
    pub fn new(raw: &'a RawRecord) -> Self {
        Self { raw }
    }

    pub fn raw(&self) -> &'a RawRecord {
        self.raw
    }

    fn first(&self, keys: &[&str]) -> Option<&'a Value> {
        keys.iter()
            .filter_map(|key| self.raw.get(*key))
            .find(|value| !value.is_null())
    }

    /// The record identity, from a string or integer `id`.
    pub fn id(&self) -> Option<EntityId> {
        match self.raw.get("id")? {
            Value::String(s) if !s.trim().is_empty() => Some(EntityId::new(s.trim())),
            Value::Number(n) => Some(EntityId::new(n.to_string())),
            _ => None,
        }
    }

    /// Non-empty trimmed text. Numbers are rendered as text.
    pub fn text(&self, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| match self.raw.get(*key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    pub fn text_or_default(&self, keys: &[&str]) -> String {
        self.text(keys).unwrap_or_default()
    }

    /// Whole number. `78.0` counts; `78.9` is absent rather than truncated.
    pub fn int(&self, keys: &[&str]) -> Option<i64> {
        keys.iter().find_map(|key| match self.raw.get(*key)? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole)),
            Value::String(s) => {
                let s = s.trim();
                s.parse().ok().or_else(|| s.parse().ok().and_then(whole))
            }
            _ => None,
        })
    }

    /// Non-negative integer; negative or out-of-range values count as absent.
    pub fn non_negative(&self, keys: &[&str]) -> Option<u32> {
        self.int(keys).and_then(|n| u32::try_from(n).ok())
    }

    pub fn float(&self, keys: &[&str]) -> Option<f64> {
        keys.iter().find_map(|key| match self.raw.get(*key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().replace(',', ".").parse().ok(),
            _ => None,
        })
    }

    /// Boolean flag, `false` when absent.
    pub fn flag(&self, keys: &[&str]) -> bool {
        match self.first(keys) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_i64().is_some_and(|n| n != 0),
            Some(Value::String(s)) => matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "true" | "1" | "yes" | "sim"
            ),
            _ => false,
        }
    }

    /// Calendar date from `YYYY-MM-DD`, `DD/MM/YYYY` or a full timestamp.
    pub fn date(&self, keys: &[&str]) -> Option<NaiveDate> {
        keys.iter()
            .filter_map(|key| self.raw.get(*key)?.as_str())
            .find_map(parse_date)
    }

    /// Time of day from `HH:MM` or `HH:MM:SS`.
    pub fn time(&self, keys: &[&str]) -> Option<NaiveTime> {
        keys.iter()
            .filter_map(|key| self.raw.get(*key)?.as_str())
            .find_map(|s| {
                let s = s.trim();
                NaiveTime::parse_from_str(s, "%H:%M:%S")
                    .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
                    .ok()
            })
    }

    /// Instant from RFC 3339, `YYYY-MM-DD HH:MM:SS` or a bare date (midnight UTC).
    pub fn timestamp(&self, keys: &[&str]) -> Option<DateTime<Utc>> {
        keys.iter()
            .filter_map(|key| self.raw.get(*key)?.as_str())
            .find_map(parse_timestamp)
    }

    /// `updated_at`, defaulting to now when the row never carried one.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.timestamp(&["updated_at", "modified_at", "created_at"])
            .unwrap_or_else(Utc::now)
    }

    /// Tag list from a JSON array or a comma-separated string.
    pub fn tags(&self, keys: &[&str]) -> Vec<String> {
        match self.first(keys) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str())
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            Some(Value::String(s)) => s
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Parse a vocabulary field, falling back to the default on unknown values.
    pub fn vocabulary<T>(&self, keys: &[&str]) -> T
    where
        T: std::str::FromStr<Err = crate::domain::DomainError> + Default,
    {
        match self.text(keys) {
            Some(value) => value.parse().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "unrecognised status, using default");
                T::default()
            }),
            None => T::default(),
        }
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%d/%m/%Y"))
        .ok()
        .or_else(|| parse_timestamp(s).map(|ts| ts.date_naive()))
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn whole(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64).then_some(f as i64)
}
