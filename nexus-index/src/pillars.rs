//! The four independent pillar scorers.
//!
//! Each pillar scores 0-100 and falls back to a fixed baseline when the
//! snapshot holds no usable data for it:
//!
//! | Pillar | Baseline |
//! |---|---|
//! | Assiduité | 50 without past sessions |
//! | Progression | 50 without reports |
//! | Engagement | none (0 without activity) |
//! | Régularité | 30 with fewer than 2 completed sessions |

use chrono::{DateTime, Utc};
use tracing::trace;

use crate::period::{MS_PER_DAY, days_between, recent_cutoff};
use crate::types::{ReportData, SessionData, SessionStatus};

/// Neutral score when there is nothing to judge attendance or ratings on.
pub const NEUTRAL_SCORE: u32 = 50;

/// Régularité score with fewer than two completed sessions.
pub const LOW_REGULARITY_BASELINE: u32 = 30;

/// Gap between consecutive sessions, in days, counted as a long gap.
pub const LONG_GAP_DAYS: f64 = 14.0;

/// Round to the nearest integer and clamp into `[0, 100]`.
pub(crate) fn clamp_score(value: f64) -> u32 {
    value.round().clamp(0.0, 100.0) as u32
}

/// Map a 1-5 rating onto 0-100.
pub(crate) fn normalize_rating(rating: f64) -> f64 {
    (rating - 1.0) / 4.0 * 100.0
}

/// Completed sessions of the snapshot.
pub fn completed_sessions(sessions: &[SessionData]) -> Vec<&SessionData> {
    sessions.iter().filter(|s| s.is_completed()).collect()
}

/// Attendance credit of a past session.
fn attendance_credit(session: &SessionData) -> f64 {
    let credit = match (session.status, session.student_attended) {
        (SessionStatus::Completed, Some(true)) => 1.0,
        (SessionStatus::Completed, None) => 0.8,
        _ => 0.0,
    };
    trace!(
        status = %session.status,
        attended = ?session.student_attended,
        credit,
        "session credit"
    );
    credit
}

/// Assiduité: mean attendance credit over past sessions.
///
/// Scheduled, confirmed, in-progress and rescheduled sessions are ignored.
pub fn compute_assiduite(sessions: &[SessionData]) -> u32 {
    let past: Vec<&SessionData> = sessions.iter().filter(|s| s.status.is_past()).collect();
    if past.is_empty() {
        return NEUTRAL_SCORE;
    }

    let credit: f64 = past.iter().map(|s| attendance_credit(s)).sum();
    let score = clamp_score(credit / past.len() as f64 * 100.0);
    trace!(past = past.len(), credit, score, "assiduite");
    score
}

/// Progression relative to the current time.
pub fn compute_progression(reports: &[ReportData]) -> u32 {
    compute_progression_at(reports, Utc::now())
}

/// Progression: weighted mean of normalized coach ratings, reports from
/// the last 30 days counting double.
pub fn compute_progression_at(reports: &[ReportData], now: DateTime<Utc>) -> u32 {
    if reports.is_empty() {
        return NEUTRAL_SCORE;
    }

    let cutoff = recent_cutoff(now);
    let (weighted_sum, total_weight) =
        reports
            .iter()
            .fold((0.0, 0.0), |(sum, total), report| {
                let weight = if report.created_at >= cutoff { 2.0 } else { 1.0 };
                let normalized = normalize_rating(f64::from(report.performance_rating));
                (sum + normalized * weight, total + weight)
            });

    let score = clamp_score(weighted_sum / total_weight);
    trace!(reports = reports.len(), score, "progression");
    score
}

/// Engagement: capped contributions of platform activity.
///
/// | Signal | Cap | Points |
/// |---|---|---|
/// | completed sessions | 10 | 40 |
/// | ARIA conversations | 5 | 25 |
/// | ARIA feedback | 10 | 15 |
/// | diagnostics | 2 | 10 |
/// | reports | 5 | 10 |
pub fn compute_engagement(
    completed_sessions: u32,
    aria_conversations: u32,
    aria_feedback: u32,
    diagnostics: u32,
    reports: u32,
) -> u32 {
    fn capped(count: u32, cap: f64, points: f64) -> f64 {
        (f64::from(count) / cap).min(1.0) * points
    }

    clamp_score(
        capped(completed_sessions, 10.0, 40.0)
            + capped(aria_conversations, 5.0, 25.0)
            + capped(aria_feedback, 10.0, 15.0)
            + capped(diagnostics, 2.0, 10.0)
            + capped(reports, 5.0, 10.0),
    )
}

/// Régularité relative to the current time.
pub fn compute_regularite(sessions: &[SessionData], student_created_at: DateTime<Utc>) -> u32 {
    compute_regularite_at(sessions, student_created_at, Utc::now())
}

/// Régularité: session frequency over the account lifetime (up to 60
/// points) plus 40 points reduced by the share of long gaps between
/// consecutive completed sessions.
///
/// Only completed sessions are considered.
pub fn compute_regularite_at(
    sessions: &[SessionData],
    student_created_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> u32 {
    let mut completed = completed_sessions(sessions);
    if completed.len() < 2 {
        return LOW_REGULARITY_BASELINE;
    }
    completed.sort_by_key(|s| s.scheduled_date);

    let account_age_days = days_between(student_created_at, now).max(1.0);
    let account_age_weeks = (account_age_days / 7.0).max(1.0);
    let sessions_per_week = completed.len() as f64 / account_age_weeks;
    let frequency_score = (sessions_per_week / 1.0).min(1.0) * 60.0;

    let long_gaps = completed
        .windows(2)
        .filter(|pair| {
            let gap_ms = (pair[1].scheduled_date - pair[0].scheduled_date).num_milliseconds();
            gap_ms as f64 / MS_PER_DAY > LONG_GAP_DAYS
        })
        .count();
    let max_gaps = (completed.len() - 1).max(1);
    let gap_penalty = long_gaps as f64 / max_gaps as f64 * 40.0;

    let score = clamp_score(frequency_score + (40.0 - gap_penalty));
    trace!(
        completed = completed.len(),
        sessions_per_week, long_gaps, score, "regularite"
    );
    score
}
