use crate::config::NexusConfig;
use crate::output::render;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Args;
use nexus_index::{
    JsonFileSource, NexusIndexData, NexusIndexResult, compute_from_data_at,
    compute_nexus_index_at,
};
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct IndexArgs {
    /// JSON snapshot of a single student
    #[arg(short, long, conflicts_with_all = ["dir", "student"])]
    pub snapshot: Option<PathBuf>,

    /// Directory of `<student_id>.json` snapshots
    #[arg(short, long, requires = "student")]
    pub dir: Option<PathBuf>,

    /// Student id to look up in --dir
    #[arg(long, requires = "dir")]
    pub student: Option<String>,

    /// Reference instant (RFC 3339) instead of the current time
    #[arg(long)]
    pub now: Option<DateTime<Utc>>,
}

fn from_snapshot(path: &Path, now: DateTime<Utc>) -> Result<NexusIndexResult> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    let data: NexusIndexData = serde_json::from_str(&contents)
        .with_context(|| format!("invalid snapshot {}", path.display()))?;
    compute_from_data_at(&data, now)
        .with_context(|| format!("snapshot {} has no student", path.display()))
}

async fn compute(args: &IndexArgs) -> Result<NexusIndexResult> {
    let now = args.now.unwrap_or_else(Utc::now);

    match (&args.snapshot, &args.dir, &args.student) {
        (Some(path), _, _) => from_snapshot(path, now),
        (None, Some(dir), Some(student)) => {
            let source = JsonFileSource::new(dir);
            Ok(compute_nexus_index_at(&source, student, now).await?)
        }
        _ => anyhow::bail!("pass either --snapshot <file> or --dir <dir> --student <id>"),
    }
}

pub async fn run(args: IndexArgs, config: &NexusConfig) -> Result<()> {
    let result = compute(&args).await?;
    println!("{}", render(&result, &config.output)?);
    Ok(())
}
