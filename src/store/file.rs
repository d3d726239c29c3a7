use super::ScoreStore;
use crate::error::{Result, TallyError};
use crate::types::scoring::{EventId, JudgeId};
use crate::types::snapshot::{ScoreRecord, Snapshot};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A snapshot kept as one JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory that holds the snapshot; config and receipts live here.
    pub fn root(&self) -> PathBuf {
        self.path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    fn read(&self) -> Result<String> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(content),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                Err(TallyError::SnapshotNotFound(self.path.display().to_string()))
            }
            Err(error) => Err(TallyError::Io(error)),
        }
    }

    fn parse_error(&self, detail: impl std::fmt::Display) -> TallyError {
        TallyError::SnapshotParse(format!("{}: {}", self.path.display(), detail))
    }

    fn write(&self, document: &Value) -> Result<()> {
        let json = serde_json::to_string_pretty(document)?;
        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        let staging = PathBuf::from(staging);

        fs::write(&staging, json).map_err(TallyError::Io)?;
        fs::rename(&staging, &self.path).map_err(TallyError::Io)?;
        Ok(())
    }
}

/// True when a raw score row belongs to the given judge in the given event.
fn owned_by(row: &Value, event_id: EventId, judge_id: JudgeId) -> bool {
    let id = |key: &str| row.get(key).and_then(Value::as_u64);
    id("eventId") == Some(u64::from(event_id)) && id("judgeId") == Some(u64::from(judge_id))
}

impl ScoreStore for JsonFileStore {
    fn snapshot(&self) -> Result<Snapshot> {
        let content = self.read()?;
        let snapshot: Snapshot =
            serde_json::from_str(&content).map_err(|e| self.parse_error(e))?;
        debug!(
            path = %self.path.display(),
            events = snapshot.events.len(),
            scores = snapshot.scores.len(),
            "loaded snapshot"
        );
        Ok(snapshot)
    }

    fn replace_judge_scores(
        &self,
        event_id: EventId,
        judge_id: JudgeId,
        scores: Vec<ScoreRecord>,
    ) -> Result<usize> {
        // Only the scores array is rewritten; every other key is written back
        // exactly as it was read.
        let mut document: Value =
            serde_json::from_str(&self.read()?).map_err(|e| self.parse_error(e))?;
        let root = document
            .as_object_mut()
            .ok_or_else(|| self.parse_error("snapshot must be a JSON object"))?;
        let rows = match root.remove("scores") {
            Some(Value::Array(rows)) => rows,
            None | Some(Value::Null) => Vec::new(),
            Some(_) => return Err(self.parse_error("scores must be an array")),
        };

        let before = rows.len();
        let mut rows = rows
            .into_iter()
            .filter(|row| !owned_by(row, event_id, judge_id))
            .collect::<Vec<_>>();
        let removed = before - rows.len();

        let written = scores.len();
        for score in scores {
            rows.push(serde_json::to_value(score)?);
        }
        root.insert("scores".to_string(), Value::Array(rows));
        self.write(&document)?;

        info!(event_id, judge_id, removed, written, "replaced judge scores");
        Ok(written)
    }
}
