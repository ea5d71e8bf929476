//! Snapshot sources.
//!
//! The index is a pure function of a [`NexusIndexData`] snapshot. Sources
//! assemble that snapshot for one student in a single read; the index
//! never reaches back into them during computation.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::composite::compute_from_data_at;
use crate::error::{FetchError, Result};
use crate::types::{NexusIndexData, NexusIndexResult};

/// Read access to per-student snapshots.
#[async_trait]
pub trait IndexDataSource: Send + Sync {
    /// Fetch the snapshot of a student.
    ///
    /// An unknown student may be reported either as
    /// [`FetchError::StudentNotFound`] or as a snapshot without student.
    async fn fetch(&self, student_id: &str) -> Result<NexusIndexData>;
}

/// Snapshots held in memory.
#[derive(Default)]
pub struct InMemorySource {
    snapshots: RwLock<HashMap<String, NexusIndexData>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store or replace the snapshot of a student.
    pub async fn insert(&self, student_id: impl Into<String>, data: NexusIndexData) {
        self.snapshots.write().await.insert(student_id.into(), data);
    }

    pub async fn len(&self) -> usize {
        self.snapshots.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.snapshots.read().await.is_empty()
    }
}

#[async_trait]
impl IndexDataSource for InMemorySource {
    async fn fetch(&self, student_id: &str) -> Result<NexusIndexData> {
        Ok(self
            .snapshots
            .read()
            .await
            .get(student_id)
            .cloned()
            .unwrap_or_default())
    }
}

/// Snapshots stored as `<dir>/<student_id>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    dir: PathBuf,
}

impl JsonFileSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of a student's snapshot file.
    pub fn snapshot_path(&self, student_id: &str) -> Result<PathBuf> {
        let invalid = student_id.is_empty()
            || student_id == "."
            || student_id == ".."
            || student_id.contains(['/', '\\']);
        if invalid {
            return Err(FetchError::InvalidStudentId(student_id.to_string()));
        }
        Ok(self.dir.join(format!("{student_id}.json")))
    }
}

#[async_trait]
impl IndexDataSource for JsonFileSource {
    async fn fetch(&self, student_id: &str) -> Result<NexusIndexData> {
        let path = self.snapshot_path(student_id)?;
        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(FetchError::StudentNotFound(student_id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let data: NexusIndexData = serde_json::from_str(&contents)?;
        debug!(
            path = %path.display(),
            sessions = data.sessions.len(),
            reports = data.reports.len(),
            "snapshot loaded"
        );
        Ok(data)
    }
}

/// Fetch a student's snapshot and compute the index as of now.
pub async fn compute_nexus_index(
    source: &dyn IndexDataSource,
    student_id: &str,
) -> Result<NexusIndexResult> {
    compute_nexus_index_at(source, student_id, Utc::now()).await
}

/// Fetch a student's snapshot and compute the index as seen at `now`.
pub async fn compute_nexus_index_at(
    source: &dyn IndexDataSource,
    student_id: &str,
    now: DateTime<Utc>,
) -> Result<NexusIndexResult> {
    let data = source.fetch(student_id).await.inspect_err(|e| {
        warn!(
            student = student_id,
            transient = e.is_transient(),
            error = %e,
            "failed to fetch index snapshot"
        );
    })?;

    compute_from_data_at(&data, now)
        .ok_or_else(|| FetchError::StudentNotFound(student_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StudentRecord;

    fn student(id: &str) -> NexusIndexData {
        NexusIndexData {
            student: Some(StudentRecord {
                id: id.to_string(),
                created_at: DateTime::<Utc>::default(),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn snapshot_path_rejects_traversal() {
        let source = JsonFileSource::new("/data");

        for id in ["", ".", "..", "../etc", "a/b", "a\\b"] {
            assert!(
                matches!(source.snapshot_path(id), Err(FetchError::InvalidStudentId(_))),
                "accepted {id:?}"
            );
        }
        assert_eq!(
            source.snapshot_path("s1").unwrap(),
            PathBuf::from("/data/s1.json")
        );
    }

    #[tokio::test]
    async fn in_memory_source_returns_stored_snapshot() {
        let source = InMemorySource::new();
        source.insert("s1", student("s1")).await;

        let data = source.fetch("s1").await.unwrap();

        assert_eq!(data.student.unwrap().id, "s1");
        assert_eq!(source.len().await, 1);
    }

    #[tokio::test]
    async fn in_memory_source_returns_empty_snapshot_for_unknown_student() {
        let source = InMemorySource::new();

        let data = source.fetch("ghost").await.unwrap();

        assert!(data.student.is_none());
        assert!(source.is_empty().await);
    }

    #[tokio::test]
    async fn unknown_student_is_not_found() {
        let source = InMemorySource::new();

        let result = compute_nexus_index(&source, "ghost").await;

        assert!(matches!(result, Err(FetchError::StudentNotFound(id)) if id == "ghost"));
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let dir = tempfile::TempDir::new().unwrap();
        let source = JsonFileSource::new(dir.path());

        let result = source.fetch("absent").await;

        assert!(matches!(result, Err(FetchError::StudentNotFound(id)) if id == "absent"));
    }

    #[tokio::test]
    async fn malformed_file_is_a_serialization_error() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("s1.json"), "{ not json").unwrap();
        let source = JsonFileSource::new(dir.path());

        let result = source.fetch("s1").await;

        assert!(matches!(result, Err(FetchError::Serialization(_))));
    }
}
