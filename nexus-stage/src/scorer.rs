//! Stage scoring entry point.
//!
//! Rolls answers up per category, tags each category, then aggregates
//! global indices, strengths/weaknesses and narrative text.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::evaluator::{AnswerIndex, CategoryTally, group_by_category, percent};
use crate::fragile::detect_in_category;
use crate::narrative::{generate_diagnostic_text, generate_lucidity_text};
use crate::nsi::optional_breakdown;
use crate::tags::compute_category_tag;
use crate::types::{
    CategoryScore, CategoryTag, QuestionMetadata, RadarDataPoint, StageScoringResult,
    StudentAnswer,
};

/// Whether a scored category counts as a strength.
#[must_use]
pub fn is_strength(tag: CategoryTag, precision: u32, confidence: u32) -> bool {
    tag == CategoryTag::Maitrise || (precision >= 70 && confidence >= 50)
}

/// Score a stage assessment, stamping the result with the current time.
pub fn compute_stage_score(
    answers: &[StudentAnswer],
    questions: &[QuestionMetadata],
) -> StageScoringResult {
    compute_stage_score_at(answers, questions, Utc::now())
}

/// Score a stage assessment with an explicit `scored_at` timestamp.
///
/// Output depends only on the inputs: answer order does not matter, and
/// categories are reported in question-bank order.
pub fn compute_stage_score_at(
    answers: &[StudentAnswer],
    questions: &[QuestionMetadata],
    scored_at: DateTime<Utc>,
) -> StageScoringResult {
    let index = AnswerIndex::new(answers);
    let unknown = index.unknown_ids(questions);
    if !unknown.is_empty() {
        warn!(?unknown, "answers reference questions outside the bank");
    }

    let groups = group_by_category(questions);

    let mut category_scores = Vec::with_capacity(groups.len());
    let mut radar_data = Vec::with_capacity(groups.len());
    let mut bases_fragiles = Vec::new();
    let mut strengths = Vec::new();
    let mut weaknesses = Vec::new();
    let mut totals = CategoryTally::default();

    for group in &groups {
        let tally = group.tally(&index);
        let precision = tally.precision();
        let confidence = tally.confidence();

        let fragile = detect_in_category(&index, group.category, &group.questions);
        let tag = compute_category_tag(precision, confidence, tally.nsp_rate(), fragile.is_some());
        if let Some(flag) = fragile {
            bases_fragiles.push(flag);
        }

        if is_strength(tag, precision, confidence) {
            strengths.push(group.category.to_string());
        } else if tag.is_weakness() {
            weaknesses.push(group.category.to_string());
        }

        radar_data.push(RadarDataPoint {
            subject: group.category.to_string(),
            score: precision,
            confidence,
        });

        category_scores.push(CategoryScore {
            category: group.category.to_string(),
            subject: group.subject,
            precision,
            confidence,
            total_questions: tally.total,
            attempted_questions: tally.attempted,
            correct_answers: tally.correct,
            incorrect_answers: tally.incorrect,
            nsp_answers: tally.nsp,
            weighted_score: tally.weighted_score,
            weighted_max: tally.weighted_max,
            tag,
        });

        totals.absorb(&tally);
    }

    let global_score = percent(totals.weighted_score, totals.weighted_max);
    let confidence_index = percent(totals.attempted, totals.total);
    let precision_index = percent(totals.correct, totals.attempted);

    debug!(
        categories = category_scores.len(),
        global_score, confidence_index, precision_index, "stage scored"
    );

    let diagnostic_text = generate_diagnostic_text(
        global_score,
        confidence_index,
        &strengths,
        &weaknesses,
        &bases_fragiles,
    );
    let lucidity_text = generate_lucidity_text(confidence_index, precision_index).to_string();

    StageScoringResult {
        global_score,
        confidence_index,
        precision_index,
        radar_data,
        strengths,
        weaknesses,
        category_scores,
        nsi_errors: optional_breakdown(&index, questions),
        bases_fragiles,
        diagnostic_text,
        lucidity_text,
        total_questions: totals.total,
        total_attempted: totals.attempted,
        total_correct: totals.correct,
        total_nsp: totals.nsp,
        scored_at,
    }
}
