//! SensorThings time values.
//!
//! Times travel as ISO 8601 strings: an instant (`2024-05-01T12:00:00Z`) or
//! an interval (`2024-05-01T12:00:00Z/2024-05-01T13:00:00Z`).

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// A closed time interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeInterval {
    /// Create an interval.
    ///
    /// # Errors
    ///
    /// Returns error if `end` is before `start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, TimeError> {
        if end < start {
            return Err(TimeError::EndBeforeStart);
        }
        Ok(Self { start, end })
    }

    /// Start of the interval.
    #[must_use]
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// End of the interval.
    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }
}

/// Either an instant or an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeObject {
    /// A single point in time
    Instant(DateTime<Utc>),
    /// A time span
    Interval(TimeInterval),
}

impl From<DateTime<Utc>> for TimeObject {
    fn from(instant: DateTime<Utc>) -> Self {
        TimeObject::Instant(instant)
    }
}

impl From<TimeInterval> for TimeObject {
    fn from(interval: TimeInterval) -> Self {
        TimeObject::Interval(interval)
    }
}

fn parse_instant(s: &str) -> Result<DateTime<Utc>, TimeError> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| TimeError::Invalid(format!("{s}: {e}")))
}

fn format_instant(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

impl FromStr for TimeInterval {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once('/')
            .ok_or_else(|| TimeError::Invalid(format!("{s}: not an interval")))?;
        Self::new(parse_instant(start)?, parse_instant(end)?)
    }
}

impl FromStr for TimeObject {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.contains('/') {
            s.parse().map(TimeObject::Interval)
        } else {
            parse_instant(s).map(TimeObject::Instant)
        }
    }
}

impl std::fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}",
            format_instant(&self.start),
            format_instant(&self.end)
        )
    }
}

impl std::fmt::Display for TimeObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeObject::Instant(t) => f.write_str(&format_instant(t)),
            TimeObject::Interval(interval) => std::fmt::Display::fmt(interval, f),
        }
    }
}

impl Serialize for TimeInterval {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeInterval {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl Serialize for TimeObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeObject {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur with time values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeError {
    /// Not an ISO 8601 instant or interval
    #[error("invalid time: {0}")]
    Invalid(String),
    /// Interval end precedes its start
    #[error("interval end is before its start")]
    EndBeforeStart,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_instant_with_offset() {
        let time: TimeObject = "2024-05-01T14:00:00+02:00".parse().unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(time, TimeObject::Instant(expected));
        assert_eq!(time.to_string(), "2024-05-01T12:00:00Z");
    }

    #[test]
    fn parses_interval() {
        let time: TimeObject = "2024-05-01T12:00:00Z/2024-05-01T13:00:00Z"
            .parse()
            .unwrap();
        let TimeObject::Interval(interval) = time else {
            panic!("expected interval");
        };
        assert_eq!(
            interval.end() - interval.start(),
            chrono::Duration::hours(1)
        );
    }

    #[test]
    fn rejects_reversed_interval() {
        let err = "2024-05-01T13:00:00Z/2024-05-01T12:00:00Z"
            .parse::<TimeInterval>()
            .unwrap_err();
        assert_eq!(err, TimeError::EndBeforeStart);
    }

    #[test]
    fn rejects_garbage() {
        assert!("yesterday".parse::<TimeObject>().is_err());
        assert!("2024-05-01T12:00:00Z".parse::<TimeInterval>().is_err());
    }

    #[test]
    fn serde_uses_strings() {
        let time: TimeObject =
            serde_json::from_value(serde_json::json!("2024-05-01T12:00:00.5Z")).unwrap();
        assert_eq!(
            serde_json::to_value(time).unwrap(),
            serde_json::json!("2024-05-01T12:00:00.500Z")
        );
    }
}
