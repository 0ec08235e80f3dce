//! # Temporal Types: Numeric Timestamps and Clocks
//!
//! Defines `Timestamp`, a UTC instant truncated to seconds that travels on
//! the wire as a JSON integer (seconds since the Unix epoch), and the
//! `Clock` abstraction that validity checks read the current instant from.
//!
//! ## Invariants
//!
//! - Every `Timestamp` has zero sub-second component. Truncation happens at
//!   construction, so a claim set built from `Utc::now()` compares equal to
//!   the claim set decoded from its own token.
//! - Serialization always emits an integer. Deserialization also accepts a
//!   JSON float (some issuers emit fractional `exp`), flooring it to whole
//!   seconds.
//!
//! ## Clocks
//!
//! - [`SystemClock`] reads wall time. This is the default everywhere.
//! - [`ManualClock`] holds an instant that the caller sets or advances.
//!   It is `Sync` through an atomic, so a single instance can be shared
//!   with a verifier that is itself shared across threads.

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, Timelike, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ClaimsError;

/// A UTC timestamp with second precision.
///
/// # Construction
///
/// - [`Timestamp::now()`]: current UTC time, truncated.
/// - [`Timestamp::from_utc()`] / `From<DateTime<Utc>>`: truncating sub-seconds.
/// - [`Timestamp::from_epoch_secs()`]: from a Unix epoch value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp from the current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self::from_utc(Utc::now())
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`, truncating sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// Create a timestamp from a Unix epoch timestamp (seconds).
    pub fn from_epoch_secs(secs: i64) -> Result<Self, ClaimsError> {
        DateTime::from_timestamp(secs, 0)
            .map(Self)
            .ok_or(ClaimsError::TimestampOutOfRange(secs))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the Unix epoch timestamp in seconds.
    pub fn epoch_secs(&self) -> i64 {
        self.0.timestamp()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::from_utc(dt)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.epoch_secs())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(EpochVisitor)
    }
}

struct EpochVisitor;

impl<'de> Visitor<'de> for EpochVisitor {
    type Value = Timestamp;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("seconds since the Unix epoch")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Timestamp, E> {
        Timestamp::from_epoch_secs(v).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Timestamp, E> {
        let secs = i64::try_from(v).map_err(|_| E::custom(format!("timestamp out of range: {v}")))?;
        self.visit_i64(secs)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Timestamp, E> {
        if !v.is_finite() || v < i64::MIN as f64 || v >= i64::MAX as f64 {
            return Err(E::custom(format!("timestamp out of range: {v}")));
        }
        self.visit_i64(v.floor() as i64)
    }
}

/// Truncate a `DateTime<Utc>` to seconds precision (discard nanoseconds).
fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}

// ---------------------------------------------------------------------------
// Clocks
// ---------------------------------------------------------------------------

/// Source of the current instant for validity-window checks.
pub trait Clock: Send + Sync {
    /// The current UTC instant, at whatever precision the source offers.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time from the operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
///
/// Stores milliseconds since the epoch.
#[derive(Debug)]
pub struct ManualClock {
    millis: AtomicI64,
}

impl ManualClock {
    /// Create a clock frozen at `start`.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            millis: AtomicI64::new(start.timestamp_millis()),
        }
    }

    /// Create a clock frozen at the current wall-clock instant.
    pub fn starting_now() -> Self {
        Self::new(Utc::now())
    }

    /// Jump to `instant`.
    pub fn set(&self, instant: DateTime<Utc>) {
        self.millis
            .store(instant.timestamp_millis(), Ordering::SeqCst);
    }

    /// Move the clock forward (or backward, for a negative duration).
    ///
    /// Saturates at the representable range instead of wrapping.
    pub fn advance(&self, by: Duration) {
        let delta = by.num_milliseconds();
        // The closure always returns `Some`, so this cannot fail.
        let _ = self
            .millis
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |millis| {
                Some(millis.saturating_add(delta))
            });
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let millis = self.millis.load(Ordering::SeqCst);
        // Out of range only after advancing past chrono's bounds.
        DateTime::from_timestamp_millis(millis).unwrap_or(if millis < 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_now_has_no_subseconds() {
        let ts = Timestamp::now();
        assert_eq!(ts.as_datetime().nanosecond(), 0);
    }

    #[test]
    fn test_from_utc_truncates() {
        let dt = Utc.with_ymd_and_hms(2026, 1, 15, 12, 30, 45).unwrap();
        let dt_with_nanos = dt.with_nanosecond(999_999_999).unwrap();
        let ts = Timestamp::from(dt_with_nanos);
        assert_eq!(ts.as_datetime(), &dt);
        assert_eq!(ts.to_string(), "2026-01-15T12:30:45Z");
    }

    #[test]
    fn test_epoch_roundtrip() {
        let ts = Timestamp::from_epoch_secs(1_700_000_000).unwrap();
        assert_eq!(ts.epoch_secs(), 1_700_000_000);
    }

    #[test]
    fn test_epoch_out_of_range() {
        assert!(matches!(
            Timestamp::from_epoch_secs(i64::MAX),
            Err(ClaimsError::TimestampOutOfRange(_))
        ));
    }

    #[test]
    fn test_serializes_as_integer() {
        let ts = Timestamp::from_epoch_secs(1_700_000_000).unwrap();
        assert_eq!(serde_json::to_string(&ts).unwrap(), "1700000000");
    }

    #[test]
    fn test_deserializes_integer() {
        let ts: Timestamp = serde_json::from_str("1700000000").unwrap();
        assert_eq!(ts.epoch_secs(), 1_700_000_000);
    }

    #[test]
    fn test_deserializes_negative_integer() {
        let ts: Timestamp = serde_json::from_str("-60").unwrap();
        assert_eq!(ts.epoch_secs(), -60);
    }

    #[test]
    fn test_deserializes_float_floored() {
        let ts: Timestamp = serde_json::from_str("1700000000.75").unwrap();
        assert_eq!(ts.epoch_secs(), 1_700_000_000);
    }

    #[test]
    fn test_rejects_string() {
        assert!(serde_json::from_str::<Timestamp>(r#""2026-01-15T12:00:00Z""#).is_err());
    }

    #[test]
    fn test_rejects_huge_float() {
        assert!(serde_json::from_str::<Timestamp>("1e300").is_err());
    }

    #[test]
    fn test_ordering() {
        let earlier = Timestamp::from_epoch_secs(100).unwrap();
        let later = Timestamp::from_epoch_secs(101).unwrap();
        assert!(earlier < later);
    }

    // ---- clocks ----

    #[test]
    fn test_system_clock_tracks_wall_time() {
        let before = Utc::now();
        let now = SystemClock.now();
        let after = Utc::now();
        assert!(before <= now && now <= after);
    }

    #[test]
    fn test_manual_clock_is_frozen() {
        let start = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
        let clock = ManualClock::new(start);
        assert_eq!(clock.now(), start);
        assert_eq!(clock.now(), start);
    }

    #[test]
    fn test_manual_clock_advance_and_set() {
        let start = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
        let clock = ManualClock::new(start);
        clock.advance(Duration::seconds(90));
        assert_eq!(clock.now(), start + Duration::seconds(90));
        clock.advance(Duration::milliseconds(-500));
        assert_eq!(clock.now(), start + Duration::milliseconds(89_500));
        clock.set(start);
        assert_eq!(clock.now(), start);
    }

    #[test]
    fn test_manual_clock_advance_saturates() {
        let start = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
        let clock = ManualClock::new(start);

        clock.advance(Duration::milliseconds(i64::MAX));
        clock.advance(Duration::milliseconds(i64::MAX));
        assert_eq!(clock.now(), DateTime::<Utc>::MAX_UTC);

        clock.set(start);
        clock.advance(Duration::milliseconds(-i64::MAX));
        clock.advance(Duration::milliseconds(-i64::MAX));
        assert_eq!(clock.now(), DateTime::<Utc>::MIN_UTC);
    }

    #[test]
    fn test_clocks_usable_as_trait_objects() {
        let clocks: Vec<Box<dyn Clock>> =
            vec![Box::new(SystemClock), Box::new(ManualClock::starting_now())];
        for clock in clocks {
            assert!(clock.now().timestamp() > 0);
        }
    }
}
