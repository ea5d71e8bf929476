//! Stage diagnostic scorer.
//!
//! Turns a set of question-bank answers into per-category precision and
//! confidence metrics, one diagnostic tag per category, and fixed-template
//! narrative text. "Did not answer" (NSP) is kept distinct from "answered
//! incorrectly": both score 0 points, but only the latter counts as an
//! attempt.
//!
//! # Pipeline
//!
//! - [`evaluator`] classifies answers and accumulates per-category tallies
//! - [`fragile`] cross-checks basic against expert questions
//! - [`tags`] assigns a tag from an ordered rule table
//! - [`nsi`] breaks incorrect NSI answers down by error type
//! - [`narrative`] renders the diagnostic and lucidity text
//! - [`scorer`] rolls everything into a [`StageScoringResult`]
//!
//! [`bank`] holds the renderable question bank used upstream to turn QCM
//! selections into [`StudentAnswer`]s.
//!
//! Every computation is a pure function of its inputs.

pub mod bank;
pub mod error;
pub mod evaluator;
pub mod fragile;
pub mod narrative;
pub mod nsi;
pub mod scorer;
pub mod tags;
pub mod types;

pub use bank::{QuestionBank, QuestionOption, Selection, StageQuestion, evaluate_selection};
pub use error::{BankError, InvalidWeight, Result};
pub use fragile::detect_bases_fragiles;
pub use narrative::{generate_diagnostic_text, generate_lucidity_text};
pub use nsi::{compute_nsi_errors, has_nsi_questions};
pub use scorer::{compute_stage_score, compute_stage_score_at, is_strength};
pub use tags::{TAG_RULES, TagInputs, TagRule, compute_category_tag};
pub use types::*;
