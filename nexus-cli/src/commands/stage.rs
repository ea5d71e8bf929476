use crate::config::NexusConfig;
use crate::output::render;
use anyhow::{Context, Result, bail};
use clap::Args;
use nexus_stage::{
    QuestionBank, QuestionMetadata, Selection, StageQuestion, StudentAnswer,
    compute_stage_score,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Args)]
pub struct StageArgs {
    /// JSON file with the student's answers or QCM selections
    #[arg(short, long)]
    pub answers: PathBuf,

    /// JSON question bank (defaults to stage.question_bank from config)
    #[arg(short, long)]
    pub questions: Option<PathBuf>,
}

/// A question file: either a full bank or bare scoring metadata.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum QuestionsFile {
    Bank(Vec<StageQuestion>),
    Metadata(Vec<QuestionMetadata>),
}

/// An answers file: scored answers or raw QCM selections.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AnswersFile {
    Answers(Vec<StudentAnswer>),
    Selections(Vec<Selection>),
}

enum Questions {
    Bank(QuestionBank),
    Metadata(Vec<QuestionMetadata>),
}

impl Questions {
    fn metadata(&self) -> Vec<QuestionMetadata> {
        match self {
            Self::Bank(bank) => bank.metadata(),
            Self::Metadata(metadata) => metadata.clone(),
        }
    }
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path, what: &str) -> Result<T> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {what} file {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("invalid {what} file {}", path.display()))
}

fn load_questions(path: &Path) -> Result<Questions> {
    let questions = match read_json(path, "question")? {
        QuestionsFile::Bank(questions) => Questions::Bank(QuestionBank::new(questions)?),
        QuestionsFile::Metadata(metadata) => Questions::Metadata(metadata),
    };
    Ok(questions)
}

/// Resolve both input files into scorable answers and question metadata.
fn load_inputs(
    args: &StageArgs,
    config: &NexusConfig,
) -> Result<(Vec<StudentAnswer>, Vec<QuestionMetadata>)> {
    let questions_path = args
        .questions
        .as_ref()
        .or(config.stage.question_bank.as_ref())
        .context("no question bank given: pass --questions or set stage.question_bank")?;
    let questions = load_questions(questions_path)?;

    let answers = match read_json(&args.answers, "answers")? {
        AnswersFile::Answers(answers) => answers,
        AnswersFile::Selections(selections) => match &questions {
            Questions::Bank(bank) => bank.evaluate_submission(&selections)?,
            Questions::Metadata(_) => {
                bail!("QCM selections need a question bank with options, not bare metadata")
            }
        },
    };
    debug!(
        answers = answers.len(),
        questions_path = %questions_path.display(),
        "stage inputs loaded"
    );

    Ok((answers, questions.metadata()))
}

pub fn run(args: StageArgs, config: &NexusConfig) -> Result<()> {
    let (answers, questions) = load_inputs(&args, config)?;
    let result = compute_stage_score(&answers, &questions);
    println!("{}", render(&result, &config.output)?);
    Ok(())
}
