//! Answer evaluation and per-category accumulation.
//!
//! Each question of a category is looked up in the submitted answers and
//! classified as correct, incorrect or NSP. A missing answer is an NSP.
//! Counts are accumulated incrementally in a [`CategoryTally`] from which
//! the precision, confidence and NSP rate are derived.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::warn;

use crate::types::{AnswerStatus, QuestionMetadata, StudentAnswer, Subject};

/// Answers keyed by question id.
///
/// When the same question is answered twice the first answer wins.
#[derive(Debug, Default)]
pub struct AnswerIndex<'a> {
    by_question: HashMap<&'a str, &'a StudentAnswer>,
}

impl<'a> AnswerIndex<'a> {
    /// Build the index from a slice of answers.
    pub fn new(answers: &'a [StudentAnswer]) -> Self {
        let mut by_question = HashMap::with_capacity(answers.len());
        for answer in answers {
            match by_question.entry(answer.question_id.as_str()) {
                Entry::Vacant(slot) => {
                    slot.insert(answer);
                }
                Entry::Occupied(_) => {
                    warn!(
                        question_id = %answer.question_id,
                        "duplicate answer ignored"
                    );
                }
            }
        }
        Self { by_question }
    }

    /// Answer submitted for a question, if any.
    pub fn get(&self, question_id: &str) -> Option<&'a StudentAnswer> {
        self.by_question.get(question_id).copied()
    }

    /// Outcome for a question, treating a missing answer as NSP.
    pub fn outcome(&self, question_id: &str) -> AnswerStatus {
        self.get(question_id)
            .map_or(AnswerStatus::Nsp, |answer| answer.status)
    }

    /// Question ids answered but absent from the bank.
    pub fn unknown_ids(&self, questions: &[QuestionMetadata]) -> Vec<&'a str> {
        let mut unknown: Vec<&str> = self
            .by_question
            .keys()
            .copied()
            .filter(|id| !questions.iter().any(|q| q.id == *id))
            .collect();
        unknown.sort_unstable();
        unknown
    }
}

/// Integer percentage `round(numerator / denominator * 100)`, 0 when the
/// denominator is 0.
#[must_use]
pub fn percent(numerator: u32, denominator: u32) -> u32 {
    if denominator == 0 {
        return 0;
    }
    (f64::from(numerator) / f64::from(denominator) * 100.0).round() as u32
}

/// Running counts for one category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTally {
    pub total: u32,
    pub attempted: u32,
    pub correct: u32,
    pub incorrect: u32,
    pub nsp: u32,
    pub weighted_score: u32,
    pub weighted_max: u32,
}

impl CategoryTally {
    /// Record one question and its outcome.
    ///
    /// Incorrect and NSP both contribute 0 points; there is no negative scoring.
    pub fn record(&mut self, question: &QuestionMetadata, status: AnswerStatus) {
        let points = question.weight.points();
        self.total += 1;
        self.weighted_max += points;

        match status {
            AnswerStatus::Correct => {
                self.attempted += 1;
                self.correct += 1;
                self.weighted_score += points;
            }
            AnswerStatus::Incorrect => {
                self.attempted += 1;
                self.incorrect += 1;
            }
            AnswerStatus::Nsp => self.nsp += 1,
        }
    }

    /// Correct answers among attempted ones (0-100).
    #[must_use]
    pub fn precision(&self) -> u32 {
        percent(self.correct, self.attempted)
    }

    /// Attempted questions among all questions (0-100).
    #[must_use]
    pub fn confidence(&self) -> u32 {
        percent(self.attempted, self.total)
    }

    /// NSP (or unanswered) questions among all questions (0-100).
    #[must_use]
    pub fn nsp_rate(&self) -> u32 {
        percent(self.nsp, self.total)
    }

    /// Fold another tally into this one.
    pub fn absorb(&mut self, other: &CategoryTally) {
        self.total += other.total;
        self.attempted += other.attempted;
        self.correct += other.correct;
        self.incorrect += other.incorrect;
        self.nsp += other.nsp;
        self.weighted_score += other.weighted_score;
        self.weighted_max += other.weighted_max;
    }
}

/// Questions of a single category, in bank order.
#[derive(Debug, Clone)]
pub struct CategoryGroup<'a> {
    pub category: &'a str,
    /// Subject of the first question of the category.
    pub subject: Subject,
    pub questions: Vec<&'a QuestionMetadata>,
}

impl CategoryGroup<'_> {
    /// Tally every question of the group against the answers.
    pub fn tally(&self, answers: &AnswerIndex<'_>) -> CategoryTally {
        let mut tally = CategoryTally::default();
        for question in &self.questions {
            tally.record(question, answers.outcome(&question.id));
        }
        tally
    }
}

/// Group questions by category, categories in first-appearance order.
pub fn group_by_category(questions: &[QuestionMetadata]) -> Vec<CategoryGroup<'_>> {
    let mut groups: Vec<CategoryGroup<'_>> = Vec::new();
    for question in questions {
        match groups
            .iter_mut()
            .find(|group| group.category == question.category)
        {
            Some(group) => group.questions.push(question),
            None => groups.push(CategoryGroup {
                category: &question.category,
                subject: question.subject,
                questions: vec![question],
            }),
        }
    }
    groups
}
