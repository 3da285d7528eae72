//! Serializes database timestamps, stored as naive UTC, in RFC 3339 form.
use chrono::{DateTime, NaiveDateTime};
use serde::{self, Deserialize, Deserializer, Serializer};

pub fn serialize<S>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&dt.and_utc().to_rfc3339())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.naive_utc())
        .map_err(serde::de::Error::custom)
}
