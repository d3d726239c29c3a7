//! Shared snapshot for unit tests.
//!
//! Event 1 (ACTIVE): contestants #1..#3, judges #1 and #2,
//! Talent (`best-in-talent`, subs 11 and 12 at 50/50) and
//! Interview (`best-in-interview`, subs 21 and 22 at 60/40).
//!
//! | judge | contestant | talent | interview | overall |
//! |-------|------------|--------|-----------|---------|
//! | 1     | 1          | 100    | 80        | 180     |
//! | 1     | 2          | 70     | 90        | 160     |
//! | 1     | 3          | 30     | 60        | 90      |
//! | 2     | 1          | 85     | 80        | 165     |
//! | 2     | 2          | 85     | 80        | 165     |
//! | 2     | 3          | 60     | (none)    | 60      |
//!
//! Event 2 (INACTIVE) holds one contestant, judge, criterion and score.

use crate::types::snapshot::{
    ContestantRecord, CriterionRecord, EventRecord, EventStatus, JudgeRecord, ScoreRecord, Snapshot,
};
use chrono::NaiveDate;

pub fn event(id: u32, date: &str, status: EventStatus) -> EventRecord {
    EventRecord {
        id,
        name: format!("Event {id}"),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").expect("fixture date should parse"),
        status,
    }
}

pub fn contestant(id: u32, event_id: u32, number: u32, name: &str) -> ContestantRecord {
    ContestantRecord {
        id,
        event_id,
        number,
        name: name.to_string(),
        sex: None,
    }
}

pub fn judge(id: u32, event_id: u32, number: u32, name: &str) -> JudgeRecord {
    JudgeRecord {
        id,
        event_id,
        number,
        name: name.to_string(),
        locked: false,
    }
}

pub fn category(id: u32, event_id: u32, name: &str, identifier: Option<&str>) -> CriterionRecord {
    CriterionRecord {
        id,
        event_id,
        name: name.to_string(),
        identifier: identifier.map(ToString::to_string),
        weight: None,
        auto_assign: false,
        parent_id: None,
    }
}

pub fn sub(id: u32, event_id: u32, name: &str, parent_id: u32, weight: f64) -> CriterionRecord {
    CriterionRecord {
        id,
        event_id,
        name: name.to_string(),
        identifier: None,
        weight: Some(weight),
        auto_assign: false,
        parent_id: Some(parent_id),
    }
}

pub fn score(contestant_id: u32, judge_id: u32, criteria_id: u32, value: f64) -> ScoreRecord {
    ScoreRecord {
        contestant_id,
        judge_id,
        criteria_id,
        event_id: 1,
        value,
    }
}

pub fn pageant_snapshot() -> Snapshot {
    let mut scores = vec![
        // judge 1
        score(1, 1, 11, 50.0),
        score(1, 1, 12, 50.0),
        score(2, 1, 11, 40.0),
        score(2, 1, 12, 30.0),
        score(3, 1, 11, 20.0),
        score(3, 1, 12, 10.0),
        score(1, 1, 21, 50.0),
        score(1, 1, 22, 30.0),
        score(2, 1, 21, 55.0),
        score(2, 1, 22, 35.0),
        score(3, 1, 21, 40.0),
        score(3, 1, 22, 20.0),
        // judge 2
        score(1, 2, 11, 45.0),
        score(1, 2, 12, 40.0),
        score(2, 2, 11, 45.0),
        score(2, 2, 12, 40.0),
        score(3, 2, 11, 30.0),
        score(3, 2, 12, 30.0),
        score(1, 2, 21, 50.0),
        score(1, 2, 22, 30.0),
        score(2, 2, 21, 50.0),
        score(2, 2, 22, 30.0),
    ];
    scores.push(ScoreRecord {
        contestant_id: 4,
        judge_id: 3,
        criteria_id: 31,
        event_id: 2,
        value: 99.0,
    });

    Snapshot {
        events: vec![
            event(1, "2025-03-01", EventStatus::Active),
            event(2, "2024-03-01", EventStatus::Inactive),
        ],
        contestants: vec![
            contestant(1, 1, 1, "Ana"),
            contestant(2, 1, 2, "Bea"),
            contestant(3, 1, 3, "Cora"),
            contestant(4, 2, 1, "Dina"),
        ],
        judges: vec![
            judge(1, 1, 1, "Chief"),
            judge(2, 1, 2, "Panel"),
            judge(3, 2, 1, "Guest"),
        ],
        criteria: vec![
            category(10, 1, "Talent", Some("best-in-talent")),
            sub(11, 1, "Mastery", 10, 50.0),
            sub(12, 1, "Stage Presence", 10, 50.0),
            category(20, 1, "Interview", Some("best-in-interview")),
            sub(21, 1, "Substance", 20, 60.0),
            sub(22, 1, "Delivery", 20, 40.0),
            category(30, 2, "Talent", Some("best-in-talent")),
            sub(31, 2, "Mastery", 30, 100.0),
        ],
        scores,
    }
}
