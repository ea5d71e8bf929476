//! Breakdown of incorrect NSI answers by error type.

use crate::evaluator::AnswerIndex;
use crate::types::{
    AnswerStatus, NsiErrorBreakdown, NsiErrorType, QuestionMetadata, StudentAnswer, Subject,
};

impl NsiErrorBreakdown {
    fn record(&mut self, error_type: NsiErrorType) {
        match error_type {
            NsiErrorType::Syntax => self.syntax_errors += 1,
            NsiErrorType::Logic => self.logic_errors += 1,
            NsiErrorType::Conceptual => self.conceptual_errors += 1,
        }
        self.total_errors += 1;
    }
}

/// Whether the bank contains at least one NSI question.
pub fn has_nsi_questions(questions: &[QuestionMetadata]) -> bool {
    questions.iter().any(|q| q.subject == Subject::Nsi)
}

/// Count incorrect NSI answers per error type.
///
/// Questions without an error type are ignored.
pub fn compute_nsi_errors(
    answers: &[StudentAnswer],
    questions: &[QuestionMetadata],
) -> NsiErrorBreakdown {
    nsi_errors_with(&AnswerIndex::new(answers), questions)
}

pub(crate) fn nsi_errors_with(
    answers: &AnswerIndex<'_>,
    questions: &[QuestionMetadata],
) -> NsiErrorBreakdown {
    let mut breakdown = NsiErrorBreakdown::default();
    for question in questions.iter().filter(|q| q.subject == Subject::Nsi) {
        if let Some(error_type) = question.nsi_error_type
            && answers.outcome(&question.id) == AnswerStatus::Incorrect
        {
            breakdown.record(error_type);
        }
    }
    breakdown
}

/// Breakdown for the scoring result: `None` for Maths-only banks.
pub(crate) fn optional_breakdown(
    answers: &AnswerIndex<'_>,
    questions: &[QuestionMetadata],
) -> Option<NsiErrorBreakdown> {
    has_nsi_questions(questions).then(|| nsi_errors_with(answers, questions))
}
