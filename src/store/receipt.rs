use crate::error::{Result, TallyError};
use crate::types::scoring::EventId;
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReceipt {
    pub version: String,
    pub submitted_at: String,
    pub event_id: EventId,
    pub judge_number: u32,
    pub scores: usize,
    pub digest_before: String,
    pub digest_after: String,
}

impl SubmissionReceipt {
    pub fn new(
        event_id: EventId,
        judge_number: u32,
        scores: usize,
        digest_before: String,
        digest_after: String,
    ) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            submitted_at: Utc::now().to_rfc3339(),
            event_id,
            judge_number,
            scores,
            digest_before,
            digest_after,
        }
    }
}

pub fn write_receipt(root: &Path, receipt: &SubmissionReceipt) -> Result<PathBuf> {
    let dir = root.join(".tally/receipts");
    fs::create_dir_all(&dir).map_err(TallyError::Io)?;
    let stamp = Utc::now().format("%Y%m%dT%H%M%S%.3fZ");
    let out_path = dir.join(format!("{stamp}-judge-{}.json", receipt.judge_number));
    let json = serde_json::to_string_pretty(receipt)?;
    fs::write(&out_path, json).map_err(TallyError::Io)?;
    Ok(out_path)
}
