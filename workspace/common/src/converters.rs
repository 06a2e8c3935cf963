//! Converters between the wire representation used by the remote table store
//! and the chrono types used everywhere else.
//!
//! The store is not consistent about timestamp shapes: `timestamptz` columns
//! come back as RFC 3339, seeded fixtures often use naive timestamps, and
//! hand-written rows sometimes carry a bare date. All three are accepted.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Parses a timestamp from RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.f]`
/// (taken as UTC), or a bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Ok(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|e| format!("Failed to parse timestamp '{}': {}", raw, e))
}

/// Parses a wall-clock time written as `HH:MM` or `HH:MM:SS`.
pub fn parse_wall_time(raw: &str) -> Result<NaiveTime, String> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .map_err(|e| format!("Failed to parse time '{}': {}", raw, e))
}

/// Renders a wall-clock time as `HH:MM`.
pub fn format_wall_time(time: &NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Serde adapter for timestamp columns, see [`parse_timestamp`].
pub mod serde_timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for `time` columns, see [`parse_wall_time`].
pub mod serde_wall_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_wall_time(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_wall_time(&raw).map_err(serde::de::Error::custom)
    }
}
