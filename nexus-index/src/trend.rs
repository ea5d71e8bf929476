//! Trend detection: the recent 30-day window against the 30 days before it.

use chrono::{DateTime, Utc};
use tracing::trace;

use crate::period::{TimePeriod, TrendWindows};
use crate::pillars::normalize_rating;
use crate::types::{ReportData, SessionData, Trend};

/// Weight of the completion-rate delta in the trend signal.
pub const COMPLETION_SIGNAL_WEIGHT: f64 = 0.6;

/// Weight of the rating delta in the trend signal.
pub const RATING_SIGNAL_WEIGHT: f64 = 0.4;

/// Signal magnitude below which the trend is stable.
pub const TREND_THRESHOLD: f64 = 5.0;

/// Rate used for a window without data.
const EMPTY_WINDOW_RATE: f64 = 50.0;

/// Completion rate (0-100) of the sessions scheduled within `window`.
fn completion_rate(sessions: &[SessionData], window: &TimePeriod) -> f64 {
    let (completed, total) = sessions
        .iter()
        .filter(|s| window.contains(s.scheduled_date))
        .fold((0usize, 0usize), |(completed, total), s| {
            (completed + usize::from(s.is_completed()), total + 1)
        });

    if total == 0 {
        return EMPTY_WINDOW_RATE;
    }
    completed as f64 / total as f64 * 100.0
}

/// Normalized mean rating (0-100) of the reports created within `window`.
fn average_rating(reports: &[ReportData], window: &TimePeriod) -> f64 {
    let (sum, count) = reports
        .iter()
        .filter(|r| window.contains(r.created_at))
        .fold((0.0, 0usize), |(sum, count), r| {
            (sum + f64::from(r.performance_rating), count + 1)
        });

    if count == 0 {
        return EMPTY_WINDOW_RATE;
    }
    normalize_rating(sum / count as f64)
}

/// Weighted trend signal: positive when the recent window is better.
pub fn trend_signal(sessions: &[SessionData], reports: &[ReportData], now: DateTime<Utc>) -> f64 {
    let windows = TrendWindows::ending_at(now);

    let completion_delta =
        completion_rate(sessions, &windows.recent) - completion_rate(sessions, &windows.previous);
    let rating_delta =
        average_rating(reports, &windows.recent) - average_rating(reports, &windows.previous);

    let signal = completion_delta * COMPLETION_SIGNAL_WEIGHT + rating_delta * RATING_SIGNAL_WEIGHT;
    trace!(completion_delta, rating_delta, signal, "trend signal");
    signal
}

/// Classify a signal against the threshold.
#[must_use]
pub fn classify_signal(signal: f64) -> Trend {
    if signal > TREND_THRESHOLD {
        Trend::Up
    } else if signal < -TREND_THRESHOLD {
        Trend::Down
    } else {
        Trend::Stable
    }
}

/// Trend relative to the current time.
pub fn compute_trend(sessions: &[SessionData], reports: &[ReportData]) -> Trend {
    compute_trend_at(sessions, reports, Utc::now())
}

/// Trend of sessions and reports as seen at `now`.
pub fn compute_trend_at(
    sessions: &[SessionData],
    reports: &[ReportData],
    now: DateTime<Utc>,
) -> Trend {
    classify_signal(trend_signal(sessions, reports, now))
}
