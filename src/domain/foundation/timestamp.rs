//! Wall-clock instants with whole-second resolution.

use std::fmt;

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A UTC instant truncated to whole seconds.
///
/// Attestations carry seconds since the Unix epoch and session expiry is
/// persisted the same way, so sub-second precision is dropped on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Self::from_unix_secs(Self::epoch_secs(&Utc::now()))
    }

    /// Instant `secs` after the epoch. Out-of-range values clamp to the epoch.
    pub fn from_unix_secs(secs: u64) -> Self {
        let dt = i64::try_from(secs)
            .ok()
            .and_then(|s| DateTime::from_timestamp(s, 0))
            .unwrap_or_default();
        Self(dt)
    }

    pub fn unix_secs(&self) -> u64 {
        Self::epoch_secs(&self.0)
    }

    /// `secs` later, saturating at the latest representable instant.
    pub fn plus_secs(&self, secs: u64) -> Self {
        let later = i64::try_from(secs)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|d| self.0.checked_add_signed(d))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self(later)
    }

    /// Whole seconds from `self` until `later`, zero if `later` has passed.
    pub fn secs_until(&self, later: &Timestamp) -> u64 {
        u64::try_from((later.0 - self.0).num_seconds()).unwrap_or(0)
    }

    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    fn epoch_secs(dt: &DateTime<Utc>) -> u64 {
        u64::try_from(dt.timestamp()).unwrap_or(0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}
