//! Question bank with renderable content and option-level answer evaluation.
//!
//! A [`StageQuestion`] carries the scoring metadata plus the text and options
//! shown to the student. Selections made in the QCM are turned into
//! [`StudentAnswer`]s here; leaving a question on "Je ne sais pas" is an
//! absent option id.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BankError, Result};
use crate::types::{AnswerStatus, QuestionMetadata, StudentAnswer, Subject};

/// One answer option of a QCM question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOption {
    pub id: String,
    pub text: String,
    pub is_correct: bool,
}

/// A full stage question: scoring metadata plus rendering content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageQuestion {
    #[serde(flatten)]
    pub metadata: QuestionMetadata,
    pub question_text: String,
    pub options: Vec<QuestionOption>,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// What the student picked for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub question_id: String,
    /// `None` means "Je ne sais pas".
    #[serde(default)]
    pub option_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_spent_seconds: Option<u32>,
}

/// Classify a selection against a question's options.
pub fn evaluate_selection(
    question: &StageQuestion,
    selected_option_id: Option<&str>,
) -> Result<AnswerStatus> {
    let Some(option_id) = selected_option_id else {
        return Ok(AnswerStatus::Nsp);
    };

    let option = question
        .options
        .iter()
        .find(|o| o.id == option_id)
        .ok_or_else(|| BankError::UnknownOption {
            question: question.metadata.id.clone(),
            option: option_id.to_string(),
        })?;

    Ok(if option.is_correct {
        AnswerStatus::Correct
    } else {
        AnswerStatus::Incorrect
    })
}

/// An ordered collection of stage questions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionBank {
    questions: Vec<StageQuestion>,
}

impl QuestionBank {
    /// Build a bank, validating it.
    pub fn new(questions: Vec<StageQuestion>) -> Result<Self> {
        let bank = Self { questions };
        bank.validate()?;
        Ok(bank)
    }

    /// Parse a JSON array of questions.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let questions: Vec<StageQuestion> = serde_json::from_str(json)?;
        Self::new(questions)
    }

    /// Load a JSON question bank from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let bank = Self::from_json_str(&contents)?;
        debug!(path = %path.display(), questions = bank.len(), "question bank loaded");
        Ok(bank)
    }

    /// Reject duplicate ids and NSI error types on non-NSI questions.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.questions.len());
        for question in &self.questions {
            let meta = &question.metadata;
            if !seen.insert(meta.id.as_str()) {
                return Err(BankError::DuplicateQuestion(meta.id.clone()));
            }
            if meta.nsi_error_type.is_some() && meta.subject != Subject::Nsi {
                return Err(BankError::MisplacedNsiErrorType(meta.id.clone()));
            }
        }
        Ok(())
    }

    pub fn questions(&self) -> &[StageQuestion] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, question_id: &str) -> Option<&StageQuestion> {
        self.questions.iter().find(|q| q.metadata.id == question_id)
    }

    /// Scoring metadata of every question, in bank order.
    pub fn metadata(&self) -> Vec<QuestionMetadata> {
        self.questions.iter().map(|q| q.metadata.clone()).collect()
    }

    /// Distinct subjects in first-appearance order.
    pub fn subjects(&self) -> Vec<Subject> {
        let mut subjects = Vec::new();
        for question in &self.questions {
            if !subjects.contains(&question.metadata.subject) {
                subjects.push(question.metadata.subject);
            }
        }
        subjects
    }

    /// Distinct categories in first-appearance order.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for question in &self.questions {
            let category = question.metadata.category.as_str();
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
        categories
    }

    /// Turn QCM selections into scorable answers.
    pub fn evaluate_submission(&self, selections: &[Selection]) -> Result<Vec<StudentAnswer>> {
        selections
            .iter()
            .map(|selection| {
                let question = self
                    .get(&selection.question_id)
                    .ok_or_else(|| BankError::UnknownQuestion(selection.question_id.clone()))?;
                let status = evaluate_selection(question, selection.option_id.as_deref())?;
                Ok(StudentAnswer {
                    question_id: selection.question_id.clone(),
                    status,
                    time_spent_seconds: selection.time_spent_seconds,
                })
            })
            .collect()
    }
}
