//! "Bases Fragiles" detection.
//!
//! Flags categories where a student fails at least half of the basic
//! (weight 1) questions while passing at least half of the expert
//! (weight 3) ones. Categories lacking either kind are never flagged.

use tracing::trace;

use crate::evaluator::AnswerIndex;
use crate::types::{
    AnswerStatus, BasesFragilesFlag, QuestionMetadata, QuestionWeight, StudentAnswer,
};

/// Detect the pattern for `category` over the full question bank.
pub fn detect_bases_fragiles(
    answers: &[StudentAnswer],
    questions: &[QuestionMetadata],
    category: &str,
) -> Option<BasesFragilesFlag> {
    let index = AnswerIndex::new(answers);
    let in_category: Vec<&QuestionMetadata> =
        questions.iter().filter(|q| q.category == category).collect();
    detect_in_category(&index, category, &in_category)
}

/// Detect the pattern over questions already restricted to one category.
pub(crate) fn detect_in_category(
    answers: &AnswerIndex<'_>,
    category: &str,
    questions: &[&QuestionMetadata],
) -> Option<BasesFragilesFlag> {
    let basic: Vec<&QuestionMetadata> = questions
        .iter()
        .copied()
        .filter(|q| q.weight == QuestionWeight::Basic)
        .collect();
    let expert: Vec<&QuestionMetadata> = questions
        .iter()
        .copied()
        .filter(|q| q.weight == QuestionWeight::Expert)
        .collect();

    if basic.is_empty() || expert.is_empty() {
        return None;
    }

    let basics_failed = count_with(answers, &basic, AnswerStatus::Incorrect);
    let expert_passed = count_with(answers, &expert, AnswerStatus::Correct);

    let fragile = f64::from(basics_failed) >= basic.len() as f64 * 0.5
        && f64::from(expert_passed) >= expert.len() as f64 * 0.5;

    trace!(
        category,
        basics_failed, expert_passed, fragile, "bases fragiles check"
    );

    fragile.then(|| BasesFragilesFlag {
        category: category.to_string(),
        basics_failed,
        expert_passed,
        message: format!(
            "{category} : réussit les questions expertes mais échoue sur les bases — automatismes à consolider"
        ),
    })
}

/// Questions whose answer has exactly `status`. Missing answers never match.
fn count_with(answers: &AnswerIndex<'_>, questions: &[&QuestionMetadata], status: AnswerStatus) -> u32 {
    questions
        .iter()
        .filter(|q| answers.get(&q.id).is_some_and(|a| a.status == status))
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Competence, Subject};

    fn question(id: &str, category: &str, weight: u8) -> QuestionMetadata {
        QuestionMetadata {
            id: id.to_string(),
            subject: Subject::Maths,
            category: category.to_string(),
            competence: Competence::Restituer,
            weight: QuestionWeight::try_from(weight).unwrap(),
            nsi_error_type: None,
            label: id.to_string(),
        }
    }

    fn bank() -> Vec<QuestionMetadata> {
        vec![
            question("b1", "Analyse", 1),
            question("b2", "Analyse", 1),
            question("m1", "Analyse", 2),
            question("e1", "Analyse", 3),
            question("e2", "Analyse", 3),
        ]
    }

    #[test]
    fn flags_failed_basics_with_passed_experts() {
        let answers = vec![
            StudentAnswer::new("b1", AnswerStatus::Incorrect),
            StudentAnswer::new("b2", AnswerStatus::Correct),
            StudentAnswer::new("e1", AnswerStatus::Correct),
            StudentAnswer::new("e2", AnswerStatus::Incorrect),
        ];

        let flag = detect_bases_fragiles(&answers, &bank(), "Analyse").unwrap();

        assert_eq!(flag.category, "Analyse");
        assert_eq!(flag.basics_failed, 1);
        assert_eq!(flag.expert_passed, 1);
        assert_eq!(
            flag.message,
            "Analyse : réussit les questions expertes mais échoue sur les bases — automatismes à consolider"
        );
    }

    #[test]
    fn does_not_flag_when_basics_are_passed() {
        let answers = vec![
            StudentAnswer::new("b1", AnswerStatus::Correct),
            StudentAnswer::new("b2", AnswerStatus::Correct),
            StudentAnswer::new("e1", AnswerStatus::Correct),
            StudentAnswer::new("e2", AnswerStatus::Correct),
        ];

        assert!(detect_bases_fragiles(&answers, &bank(), "Analyse").is_none());
    }

    #[test]
    fn nsp_on_basics_is_not_a_failure() {
        let answers = vec![
            StudentAnswer::new("b1", AnswerStatus::Nsp),
            StudentAnswer::new("e1", AnswerStatus::Correct),
            StudentAnswer::new("e2", AnswerStatus::Correct),
        ];

        assert!(detect_bases_fragiles(&answers, &bank(), "Analyse").is_none());
    }

    #[test]
    fn requires_both_basic_and_expert_questions() {
        let questions = vec![
            question("m1", "Probabilités", 2),
            question("m2", "Probabilités", 2),
        ];
        let answers = vec![
            StudentAnswer::new("m1", AnswerStatus::Incorrect),
            StudentAnswer::new("m2", AnswerStatus::Correct),
        ];

        assert!(detect_bases_fragiles(&answers, &questions, "Probabilités").is_none());
    }

    #[test]
    fn only_looks_at_the_requested_category() {
        let mut questions = bank();
        questions.push(question("x1", "Géométrie", 1));
        questions.push(question("x2", "Géométrie", 3));
        let answers = vec![
            StudentAnswer::new("x1", AnswerStatus::Incorrect),
            StudentAnswer::new("x2", AnswerStatus::Correct),
        ];

        assert!(detect_bases_fragiles(&answers, &questions, "Analyse").is_none());
        assert!(detect_bases_fragiles(&answers, &questions, "Géométrie").is_some());
    }
}
