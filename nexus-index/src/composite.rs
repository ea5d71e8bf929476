//! Composite aggregation of the four pillars into the Nexus Index.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::pillars::{
    completed_sessions, compute_assiduite, compute_engagement, compute_progression_at,
    compute_regularite_at,
};
use crate::trend::compute_trend_at;
use crate::types::{IndexLevel, NexusIndexData, NexusIndexResult, PillarKey, PillarScore, Trend};

/// Weight of each pillar in the global score. Sums to exactly 1.0.
pub const PILLAR_WEIGHTS: [(PillarKey, f64); 4] = [
    (PillarKey::Assiduite, 0.30),
    (PillarKey::Progression, 0.30),
    (PillarKey::Engagement, 0.20),
    (PillarKey::Regularite, 0.20),
];

/// Below this many sessions every pillar is forced to 0.
pub const MIN_SESSIONS_FOR_INDEX: usize = 3;

/// Minimum global score per level, highest first.
pub const LEVEL_THRESHOLDS: [(u32, IndexLevel); 4] = [
    (80, IndexLevel::Excellent),
    (60, IndexLevel::Bon),
    (40, IndexLevel::EnProgression),
    (20, IndexLevel::ARenforcer),
];

/// Level of a global score: first threshold reached, else débutant.
#[must_use]
pub fn level_for(score: u32) -> IndexLevel {
    LEVEL_THRESHOLDS
        .iter()
        .find_map(|(min, level)| (score >= *min).then_some(*level))
        .unwrap_or(IndexLevel::Debutant)
}

/// Raw pillar scores, before weighting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PillarInputs {
    pub assiduite: u32,
    pub progression: u32,
    pub engagement: u32,
    pub regularite: u32,
}

impl PillarInputs {
    fn score(&self, key: PillarKey) -> u32 {
        match key {
            PillarKey::Assiduite => self.assiduite,
            PillarKey::Progression => self.progression,
            PillarKey::Engagement => self.engagement,
            PillarKey::Regularite => self.regularite,
        }
    }
}

/// Saturating `u32` view of a collection length.
fn count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

/// Weight the pillars and assemble the result.
pub fn build_result(
    inputs: PillarInputs,
    trend: Trend,
    data_points: u32,
    computed_at: DateTime<Utc>,
) -> NexusIndexResult {
    let pillars: Vec<PillarScore> = PILLAR_WEIGHTS
        .iter()
        .map(|&(key, weight)| {
            let score = inputs.score(key);
            PillarScore {
                key,
                label: key.label().to_string(),
                score,
                weight,
                weighted: (f64::from(score) * weight).round() as u32,
            }
        })
        .collect();

    let global_score = pillars.iter().map(|p| p.weighted).sum::<u32>().min(100);

    NexusIndexResult {
        global_score,
        level: level_for(global_score),
        trend,
        pillars,
        computed_at,
        data_points,
    }
}

/// Compute the index as of the current time.
pub fn compute_from_data(data: &NexusIndexData) -> Option<NexusIndexResult> {
    compute_from_data_at(data, Utc::now())
}

/// Compute the index of a snapshot as seen at `now`.
///
/// Returns `None` when the snapshot has no student.
pub fn compute_from_data_at(
    data: &NexusIndexData,
    now: DateTime<Utc>,
) -> Option<NexusIndexResult> {
    let student = data.student.as_ref()?;

    if data.sessions.len() < MIN_SESSIONS_FOR_INDEX {
        debug!(
            student = %student.id,
            sessions = data.sessions.len(),
            "not enough sessions for an index"
        );
        return Some(build_result(
            PillarInputs::default(),
            Trend::Stable,
            count(data.sessions.len()),
            now,
        ));
    }

    let completed = count(completed_sessions(&data.sessions).len());
    let inputs = PillarInputs {
        assiduite: compute_assiduite(&data.sessions),
        progression: compute_progression_at(&data.reports, now),
        engagement: compute_engagement(
            completed,
            data.aria_conversation_count,
            data.aria_feedback_count,
            data.diagnostic_count,
            count(data.reports.len()),
        ),
        regularite: compute_regularite_at(&data.sessions, student.created_at, now),
    };
    let trend = compute_trend_at(&data.sessions, &data.reports, now);

    let data_points = count(data.sessions.len())
        .saturating_add(count(data.reports.len()))
        .saturating_add(data.aria_conversation_count)
        .saturating_add(data.diagnostic_count);

    let result = build_result(inputs, trend, data_points, now);
    debug!(
        student = %student.id,
        global_score = result.global_score,
        level = %result.level,
        trend = %result.trend,
        data_points,
        "nexus index computed"
    );
    Some(result)
}
