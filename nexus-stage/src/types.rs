//! Input and output records of the stage scorer.
//!
//! Wire names are camelCase and match the records consumed by report
//! generators and dashboards; renaming a field is a breaking change.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::InvalidWeight;

/// Subject a question belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Subject {
    Maths,
    Nsi,
}

impl Subject {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Maths => "MATHS",
            Self::Nsi => "NSI",
        }
    }
}

/// Competency level tested by a question (simplified Bloom taxonomy).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Competence {
    Restituer,
    Appliquer,
    Raisonner,
}

/// Outcome of a single submitted answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerStatus {
    Correct,
    Incorrect,
    /// "Je ne sais pas": an explicit non-answer.
    Nsp,
}

/// Kind of mistake an incorrect NSI answer reveals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NsiErrorType {
    Syntax,
    Logic,
    Conceptual,
}

/// Difficulty weight of a question. Serialized as the integer 1, 2 or 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum QuestionWeight {
    Basic,
    Intermediate,
    Expert,
}

impl QuestionWeight {
    /// Points awarded for a correct answer.
    #[must_use]
    pub fn points(&self) -> u32 {
        match self {
            Self::Basic => 1,
            Self::Intermediate => 2,
            Self::Expert => 3,
        }
    }
}

impl TryFrom<u8> for QuestionWeight {
    type Error = InvalidWeight;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Basic),
            2 => Ok(Self::Intermediate),
            3 => Ok(Self::Expert),
            other => Err(InvalidWeight(other)),
        }
    }
}

impl From<QuestionWeight> for u8 {
    fn from(weight: QuestionWeight) -> Self {
        weight.points() as u8
    }
}

/// Scoring metadata of a question, defined by the assessment configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionMetadata {
    pub id: String,
    pub subject: Subject,
    pub category: String,
    pub competence: Competence,
    pub weight: QuestionWeight,
    /// Only meaningful for NSI questions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nsi_error_type: Option<NsiErrorType>,
    pub label: String,
}

/// A submitted answer. One per question per attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentAnswer {
    pub question_id: String,
    pub status: AnswerStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_spent_seconds: Option<u32>,
}

impl StudentAnswer {
    pub fn new(question_id: impl Into<String>, status: AnswerStatus) -> Self {
        Self {
            question_id: question_id.into(),
            status,
            time_spent_seconds: None,
        }
    }
}

/// Diagnostic tag, exactly one per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryTag {
    #[serde(rename = "Maîtrisé")]
    Maitrise,
    #[serde(rename = "En progression")]
    EnProgression,
    #[serde(rename = "Bases Fragiles")]
    BasesFragiles,
    #[serde(rename = "Confusions")]
    Confusions,
    #[serde(rename = "Notion non abordée")]
    NotionNonAbordee,
    #[serde(rename = "À découvrir")]
    ADecouvrir,
    #[serde(rename = "Insuffisant")]
    Insuffisant,
}

impl CategoryTag {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Maitrise => "Maîtrisé",
            Self::EnProgression => "En progression",
            Self::BasesFragiles => "Bases Fragiles",
            Self::Confusions => "Confusions",
            Self::NotionNonAbordee => "Notion non abordée",
            Self::ADecouvrir => "À découvrir",
            Self::Insuffisant => "Insuffisant",
        }
    }

    /// Tags that mark a category as a weakness.
    #[must_use]
    pub fn is_weakness(&self) -> bool {
        matches!(
            self,
            Self::Confusions | Self::Insuffisant | Self::BasesFragiles
        )
    }
}

impl fmt::Display for CategoryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score breakdown for a single category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScore {
    pub category: String,
    pub subject: Subject,
    /// Correct among attempted (0-100).
    pub precision: u32,
    /// Attempted among total (0-100).
    pub confidence: u32,
    pub total_questions: u32,
    /// Always `correct_answers + incorrect_answers`.
    pub attempted_questions: u32,
    pub correct_answers: u32,
    pub incorrect_answers: u32,
    pub nsp_answers: u32,
    pub weighted_score: u32,
    /// Sum of the weights of every question in the category.
    pub weighted_max: u32,
    pub tag: CategoryTag,
}

/// One radar-chart point per category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadarDataPoint {
    pub subject: String,
    pub score: u32,
    pub confidence: u32,
}

/// Incorrect NSI answers broken down by error type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NsiErrorBreakdown {
    pub syntax_errors: u32,
    pub logic_errors: u32,
    pub conceptual_errors: u32,
    pub total_errors: u32,
}

/// Raised when a student fails basic questions but passes expert ones in a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasesFragilesFlag {
    pub category: String,
    pub basics_failed: u32,
    pub expert_passed: u32,
    pub message: String,
}

/// Complete result of a stage assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageScoringResult {
    pub global_score: u32,
    pub confidence_index: u32,
    pub precision_index: u32,
    pub radar_data: Vec<RadarDataPoint>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub category_scores: Vec<CategoryScore>,
    /// `None` (serialized as `null`) when the bank has no NSI question.
    pub nsi_errors: Option<NsiErrorBreakdown>,
    pub bases_fragiles: Vec<BasesFragilesFlag>,
    pub diagnostic_text: String,
    pub lucidity_text: String,
    pub total_questions: u32,
    pub total_attempted: u32,
    pub total_correct: u32,
    #[serde(rename = "totalNSP")]
    pub total_nsp: u32,
    pub scored_at: DateTime<Utc>,
}
