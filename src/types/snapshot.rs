//! Records as the raw score store hands them over.

use crate::types::scoring::{ContestantId, CriterionId, EventId, JudgeId, Score};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub events: Vec<EventRecord>,
    #[serde(default)]
    pub contestants: Vec<ContestantRecord>,
    #[serde(default)]
    pub judges: Vec<JudgeRecord>,
    #[serde(default)]
    pub criteria: Vec<CriterionRecord>,
    #[serde(default)]
    pub scores: Vec<ScoreRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub id: EventId,
    pub name: String,
    pub date: NaiveDate,
    pub status: EventStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestantRecord {
    pub id: ContestantId,
    pub event_id: EventId,
    pub number: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JudgeRecord {
    pub id: JudgeId,
    pub event_id: EventId,
    pub number: u32,
    pub name: String,
    #[serde(default)]
    pub locked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionRecord {
    pub id: CriterionId,
    pub event_id: EventId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Score>,
    #[serde(default, alias = "autoAssignToAllContestants")]
    pub auto_assign: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CriterionId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub contestant_id: ContestantId,
    pub judge_id: JudgeId,
    pub criteria_id: CriterionId,
    pub event_id: EventId,
    pub value: Score,
}

/// One row of a judge's submission batch.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub contestant_id: ContestantId,
    pub sub_criteria_id: CriterionId,
    pub value: Score,
}
