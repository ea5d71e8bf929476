//! Snapshot inputs and index outputs.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a session booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    Scheduled,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
    Rescheduled,
}

impl SessionStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "SCHEDULED",
            Self::Confirmed => "CONFIRMED",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
            Self::NoShow => "NO_SHOW",
            Self::Rescheduled => "RESCHEDULED",
        }
    }

    /// Whether the session is over and counts towards attendance.
    #[must_use]
    pub fn is_past(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::NoShow)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One session booking of the student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    pub status: SessionStatus,
    pub scheduled_date: DateTime<Utc>,
    #[serde(default)]
    pub rating: Option<u8>,
    /// `None` when the coach did not record attendance.
    #[serde(default)]
    pub student_attended: Option<bool>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl SessionData {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == SessionStatus::Completed
    }
}

/// A session report written by a coach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    /// Coach rating from 1 to 5.
    pub performance_rating: u8,
    #[serde(default)]
    pub engagement_level: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// The student the snapshot belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRecord {
    pub id: String,
    pub created_at: DateTime<Utc>,
}

/// Everything the index is computed from, fetched upstream in one go.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NexusIndexData {
    #[serde(default)]
    pub sessions: Vec<SessionData>,
    #[serde(default)]
    pub reports: Vec<ReportData>,
    #[serde(default)]
    pub aria_conversation_count: u32,
    #[serde(default)]
    pub aria_feedback_count: u32,
    #[serde(default)]
    pub diagnostic_count: u32,
    /// `None` when the student is unknown upstream.
    #[serde(default)]
    pub student: Option<StudentRecord>,
}

/// Pillar identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PillarKey {
    Assiduite,
    Progression,
    Engagement,
    Regularite,
}

impl PillarKey {
    /// Every pillar, in reporting order.
    pub const ALL: [PillarKey; 4] = [
        Self::Assiduite,
        Self::Progression,
        Self::Engagement,
        Self::Regularite,
    ];

    /// Human-readable label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Assiduite => "Assiduité",
            Self::Progression => "Progression",
            Self::Engagement => "Engagement",
            Self::Regularite => "Régularité",
        }
    }
}

/// Score of one pillar and its contribution to the global index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PillarScore {
    pub key: PillarKey,
    pub label: String,
    /// 0-100.
    pub score: u32,
    pub weight: f64,
    /// `round(score * weight)`.
    pub weighted: u32,
}

/// Qualitative level derived from the global score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexLevel {
    #[serde(rename = "excellent")]
    Excellent,
    #[serde(rename = "bon")]
    Bon,
    #[serde(rename = "en_progression")]
    EnProgression,
    #[serde(rename = "a_renforcer")]
    ARenforcer,
    #[serde(rename = "debutant")]
    Debutant,
}

impl IndexLevel {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Bon => "bon",
            Self::EnProgression => "en_progression",
            Self::ARenforcer => "a_renforcer",
            Self::Debutant => "debutant",
        }
    }
}

impl fmt::Display for IndexLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of recent performance against the previous window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Stable => "stable",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The computed Nexus Index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NexusIndexResult {
    /// 0-100, clamped.
    pub global_score: u32,
    pub level: IndexLevel,
    pub trend: Trend,
    pub pillars: Vec<PillarScore>,
    pub computed_at: DateTime<Utc>,
    /// Number of raw inputs consumed.
    pub data_points: u32,
}

impl NexusIndexResult {
    /// Pillar with the given key.
    pub fn pillar(&self, key: PillarKey) -> Option<&PillarScore> {
        self.pillars.iter().find(|p| p.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_status_uses_upstream_literals() {
        for status in [
            SessionStatus::Scheduled,
            SessionStatus::Confirmed,
            SessionStatus::InProgress,
            SessionStatus::Completed,
            SessionStatus::Cancelled,
            SessionStatus::NoShow,
            SessionStatus::Rescheduled,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{status}\""));
            assert_eq!(serde_json::from_str::<SessionStatus>(&json).unwrap(), status);
        }
        assert!(serde_json::from_str::<SessionStatus>("\"completed\"").is_err());
    }

    #[test]
    fn only_finished_sessions_are_past() {
        assert!(SessionStatus::Completed.is_past());
        assert!(SessionStatus::Cancelled.is_past());
        assert!(SessionStatus::NoShow.is_past());
        assert!(!SessionStatus::Scheduled.is_past());
        assert!(!SessionStatus::Confirmed.is_past());
        assert!(!SessionStatus::InProgress.is_past());
        assert!(!SessionStatus::Rescheduled.is_past());
    }

    #[test]
    fn levels_and_trends_use_wire_literals() {
        assert_eq!(
            serde_json::to_string(&IndexLevel::ARenforcer).unwrap(),
            "\"a_renforcer\""
        );
        assert_eq!(
            serde_json::to_string(&IndexLevel::EnProgression).unwrap(),
            "\"en_progression\""
        );
        assert_eq!(serde_json::to_string(&Trend::Up).unwrap(), "\"up\"");
        assert_eq!(
            serde_json::to_string(&PillarKey::Regularite).unwrap(),
            "\"regularite\""
        );
    }

    #[test]
    fn snapshot_parses_upstream_json() {
        let json = r#"{
            "sessions": [{
                "status": "NO_SHOW",
                "scheduledDate": "2026-01-15T10:00:00Z",
                "rating": null,
                "studentAttended": null,
                "completedAt": null
            }],
            "reports": [{
                "performanceRating": 4,
                "engagementLevel": "HIGH",
                "createdAt": "2026-01-15T12:00:00Z"
            }],
            "ariaConversationCount": 3,
            "ariaFeedbackCount": 1,
            "diagnosticCount": 0,
            "student": {"id": "s1", "createdAt": "2025-12-01T00:00:00Z"}
        }"#;

        let data: NexusIndexData = serde_json::from_str(json).unwrap();

        assert_eq!(data.sessions[0].status, SessionStatus::NoShow);
        assert_eq!(data.reports[0].performance_rating, 4);
        assert_eq!(data.aria_conversation_count, 3);
        assert_eq!(data.student.unwrap().id, "s1");
    }

    #[test]
    fn missing_student_parses_as_none() {
        let data: NexusIndexData = serde_json::from_str(r#"{"student": null}"#).unwrap();

        assert!(data.student.is_none());
        assert!(data.sessions.is_empty());
    }
}
