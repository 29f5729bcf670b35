//! Serde adapter for `createdAt`.
//!
//! Writes RFC 3339 with millisecond precision and a `Z` suffix. Reads that
//! form, offset-less ISO strings (taken as UTC), and integer or fractional
//! epoch milliseconds, so the load path always yields a real timestamp.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Text(String),
    Millis(i64),
    FractionalMillis(f64),
}

pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    match RawTimestamp::deserialize(deserializer)? {
        RawTimestamp::Text(text) => parse_text(&text).map_err(de::Error::custom),
        RawTimestamp::Millis(millis) => from_millis(millis).map_err(de::Error::custom),
        RawTimestamp::FractionalMillis(millis) => {
            if !millis.is_finite() {
                return Err(de::Error::custom("createdAt is not a finite number"));
            }
            from_millis(millis.trunc() as i64).map_err(de::Error::custom)
        }
    }
}

/// Parses the textual forms accepted for `createdAt`.
pub fn parse_text(text: &str) -> Result<DateTime<Utc>, String> {
    let text = text.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| format!("invalid createdAt timestamp '{}': {}", text, e))
}

fn from_millis(millis: i64) -> Result<DateTime<Utc>, String> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| format!("createdAt epoch milliseconds out of range: {}", millis))
}
