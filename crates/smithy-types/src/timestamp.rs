// SPDX-License-Identifier: Apache-2.0
//! Timestamp representation shared by the schema/serde kernel and the
//! event-stream header codec, which needs millisecond-since-epoch `i64`
//! on the wire.

use chrono::{DateTime as ChronoDateTime, Utc};

/// A point in time, stored as milliseconds since the Unix epoch.
///
/// Event-stream `timestamp` headers are exactly this representation on
/// the wire ("timestamp (i64 ms since epoch)"), so this type
/// is the canonical in-memory form rather than a protocol-specific one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTime {
    epoch_millis: i64,
}

impl DateTime {
    /// Construct from milliseconds since the Unix epoch.
    #[must_use]
    pub fn from_epoch_millis(epoch_millis: i64) -> Self {
        Self { epoch_millis }
    }

    /// Milliseconds since the Unix epoch.
    #[must_use]
    pub fn epoch_millis(&self) -> i64 {
        self.epoch_millis
    }

    /// Seconds since the Unix epoch (truncating toward zero).
    #[must_use]
    pub fn epoch_seconds(&self) -> i64 {
        self.epoch_millis.div_euclid(1000)
    }

    /// Build from a `chrono` UTC timestamp.
    #[must_use]
    pub fn from_chrono(dt: ChronoDateTime<Utc>) -> Self {
        Self::from_epoch_millis(dt.timestamp_millis())
    }

    /// View as a `chrono` UTC timestamp.
    #[must_use]
    pub fn to_chrono(self) -> ChronoDateTime<Utc> {
        ChronoDateTime::from_timestamp_millis(self.epoch_millis).unwrap_or_default()
    }

    /// Format using the SigV4 `YYYYMMDDTHHMMSSZ` request-time format
    ///.
    #[must_use]
    pub fn to_amz_date(self) -> String {
        self.to_chrono().format("%Y%m%dT%H%M%SZ").to_string()
    }

    /// Format using the SigV4 credential-scope date format `YYYYMMDD`
    ///.
    #[must_use]
    pub fn to_amz_short_date(self) -> String {
        self.to_chrono().format("%Y%m%d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amz_date_formatting_matches_sigv4_examples() {
        // A well-known timestamp from the published SigV4 test suite.
        let dt = DateTime::from_chrono(
            chrono::DateTime::parse_from_rfc3339("2015-08-30T12:36:00Z")
                .unwrap()
                .with_timezone(&Utc),
        );
        assert_eq!(dt.to_amz_date(), "20150830T123600Z");
        assert_eq!(dt.to_amz_short_date(), "20150830");
    }
}
