//! # Temporal Types — Date or Instant
//!
//! Issuance and expiry dates of identity credentials are given either as a
//! calendar date or as a full UTC instant, depending on the issuer. The
//! [`LocalDateOrInstant`] type carries both shapes and keeps track of which
//! one was received, so re-encoding reproduces the original form.
//!
//! ## Wire Format
//!
//! - Calendar date: `YYYY-MM-DD` (ISO 8601 full-date).
//! - Instant: RFC 3339 in UTC with `Z` suffix, e.g. `2026-01-15T12:00:00Z`.
//!   Sub-second digits are written only when present.
//!
//! Instants with a non-UTC offset are accepted and converted to UTC. On
//! decode, an integer is read as Unix seconds, the JWT `NumericDate` form.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::VckError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A calendar date or a UTC instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LocalDateOrInstant {
    /// Date without time of day.
    LocalDate(NaiveDate),
    /// Point in time, UTC.
    Instant(DateTime<Utc>),
}

impl LocalDateOrInstant {
    /// Parse either a full-date or an RFC 3339 instant.
    pub fn parse(s: &str) -> Result<Self, VckError> {
        if s.contains('T') {
            DateTime::parse_from_rfc3339(s)
                .map(|dt| Self::Instant(dt.with_timezone(&Utc)))
                .map_err(|e| VckError::invalid_claim("date", format!("invalid RFC 3339 instant {s:?}: {e}")))
        } else {
            parse_date(s).map(Self::LocalDate)
        }
    }

    /// Instant at `secs` seconds after the Unix epoch.
    pub fn from_epoch_secs(secs: i64) -> Result<Self, VckError> {
        DateTime::from_timestamp(secs, 0)
            .map(Self::Instant)
            .ok_or_else(|| VckError::invalid_claim("date", format!("invalid Unix timestamp: {secs}")))
    }

    /// The calendar date; for instants, the UTC date.
    pub fn date(&self) -> NaiveDate {
        match self {
            Self::LocalDate(d) => *d,
            Self::Instant(dt) => dt.date_naive(),
        }
    }

    /// Whether this value carries a time of day.
    pub fn is_instant(&self) -> bool {
        matches!(self, Self::Instant(_))
    }

    /// Render in wire format.
    pub fn to_wire_string(&self) -> String {
        match self {
            Self::LocalDate(d) => format_date(d),
            Self::Instant(dt) => dt.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        }
    }
}

impl From<NaiveDate> for LocalDateOrInstant {
    fn from(d: NaiveDate) -> Self {
        Self::LocalDate(d)
    }
}

impl From<DateTime<Utc>> for LocalDateOrInstant {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::Instant(dt)
    }
}

impl std::fmt::Display for LocalDateOrInstant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_wire_string())
    }
}

impl Serialize for LocalDateOrInstant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_wire_string())
    }
}

impl<'de> Deserialize<'de> for LocalDateOrInstant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(LocalDateOrInstantVisitor)
    }
}

/// Accepts wire strings and, as JWT `iat`/`exp` do, Unix seconds.
struct LocalDateOrInstantVisitor;

impl<'de> Visitor<'de> for LocalDateOrInstantVisitor {
    type Value = LocalDateOrInstant;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("a full-date, an RFC 3339 instant or Unix seconds")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        LocalDateOrInstant::parse(v).map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        LocalDateOrInstant::from_epoch_secs(v).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        let secs = i64::try_from(v).map_err(|_| E::custom(format!("Unix timestamp out of range: {v}")))?;
        self.visit_i64(secs)
    }
}

/// Parse an ISO 8601 full-date (`YYYY-MM-DD`).
pub fn parse_date(s: &str) -> Result<NaiveDate, VckError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| VckError::invalid_claim("date", format!("invalid full-date {s:?}: {e}")))
}

/// Render an ISO 8601 full-date (`YYYY-MM-DD`).
pub fn format_date(d: &NaiveDate) -> String {
    d.format(DATE_FORMAT).to_string()
}
