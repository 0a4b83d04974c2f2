//! JSON form of an [`ElapsedTime`].
//!
//! ```json
//! { "start": "2021-06-01T12:34:56.789012345Z", "stop": "2021-06-01T12:35:00.000000000Z" }
//! ```
//!
//! A timestamp is present only when it is set; an unset tracker is `{}`.

use crate::elapsed::ElapsedTime;
use crate::errors::{ElapsedTimeError, Field};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_with::skip_serializing_none;
use std::fmt;
use std::str::FromStr;

#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ElapsedTimeRecord {
    pub start: Option<String>,
    pub stop: Option<String>,
}

/// Only a map of string values is a record. Keys other than `start` and
/// `stop` are skipped, but their values must still be strings.
impl<'de> Deserialize<'de> for ElapsedTimeRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RecordVisitor)
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = ElapsedTimeRecord;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object with string values")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut record = ElapsedTimeRecord::default();

        while let Some((key, value)) = map.next_entry::<String, String>()? {
            if key == Field::Start.name() {
                record.start = Some(value);
            } else if key == Field::Stop.name() {
                record.stop = Some(value);
            }
        }

        Ok(record)
    }
}

/// RFC3339 with nanosecond precision and a `Z` offset.
pub fn format_timestamp(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Accepts any RFC3339 timestamp and normalises it to UTC.
pub fn parse_timestamp(
    field: Field,
    s: &str,
) -> Result<DateTime<Utc>, ElapsedTimeError> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|source| ElapsedTimeError::Parse { field, source })
}

impl From<&ElapsedTime> for ElapsedTimeRecord {
    fn from(elapsed: &ElapsedTime) -> Self {
        let (start, stop) = elapsed.times();
        ElapsedTimeRecord {
            start: start.as_ref().map(format_timestamp),
            stop: stop.as_ref().map(format_timestamp),
        }
    }
}

impl TryFrom<ElapsedTimeRecord> for ElapsedTime {
    type Error = ElapsedTimeError;

    fn try_from(record: ElapsedTimeRecord) -> Result<Self, Self::Error> {
        let start = record
            .start
            .map(|s| parse_timestamp(Field::Start, &s))
            .transpose()?;
        let stop = record
            .stop
            .map(|s| parse_timestamp(Field::Stop, &s))
            .transpose()?;

        Ok(ElapsedTime::with_times(start, stop))
    }
}

impl ElapsedTime {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&ElapsedTimeRecord::from(self))
    }

    pub fn from_json(s: &str) -> Result<Self, ElapsedTimeError> {
        Self::from_slice(s.as_bytes())
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, ElapsedTimeError> {
        let record: ElapsedTimeRecord =
            serde_json::from_slice(bytes).map_err(|e| {
                tracing::debug!(error = %e, "rejected elapsed time record");
                e
            })?;

        ElapsedTime::try_from(record).map_err(|e| {
            tracing::debug!(error = %e, "rejected elapsed time field");
            e
        })
    }
}

impl FromStr for ElapsedTime {
    type Err = ElapsedTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json(s)
    }
}

impl Serialize for ElapsedTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        ElapsedTimeRecord::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ElapsedTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let record = ElapsedTimeRecord::deserialize(deserializer)?;
        ElapsedTime::try_from(record).map_err(de::Error::custom)
    }
}
