//! Time windows used by the progression and trend computations.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Length of the "recent" window, in days.
pub const RECENT_WINDOW_DAYS: i64 = 30;

/// Milliseconds in a day, for fractional day arithmetic.
pub(crate) const MS_PER_DAY: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

/// A time period with start and end timestamps.
///
/// Uses a half-open interval `[start, end)` - start is inclusive, end is exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimePeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimePeriod {
    /// A period with no upper bound.
    #[must_use]
    pub fn open_ended(start: DateTime<Utc>) -> Self {
        Self {
            start,
            end: DateTime::<Utc>::MAX_UTC,
        }
    }

    /// Returns the duration of this time period.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Returns true if the given instant falls within this period.
    ///
    /// Uses half-open interval semantics: `[start, end)`
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant < self.end
    }
}

/// The recent window and the window right before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrendWindows {
    /// `[now - 30d, +inf)`: future bookings fall in the recent window too.
    pub recent: TimePeriod,
    /// `[now - 60d, now - 30d)`.
    pub previous: TimePeriod,
}

impl TrendWindows {
    #[must_use]
    pub fn ending_at(now: DateTime<Utc>) -> Self {
        let recent_cutoff = recent_cutoff(now);
        let previous_cutoff = now - Duration::days(2 * RECENT_WINDOW_DAYS);
        Self {
            recent: TimePeriod::open_ended(recent_cutoff),
            previous: TimePeriod {
                start: previous_cutoff,
                end: recent_cutoff,
            },
        }
    }
}

/// Start of the recent window.
#[must_use]
pub fn recent_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::days(RECENT_WINDOW_DAYS)
}

/// Fractional number of days from `earlier` to `later`.
pub(crate) fn days_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> f64 {
    (later - earlier).num_milliseconds() as f64 / MS_PER_DAY
}
