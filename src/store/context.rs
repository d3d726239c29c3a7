use crate::error::{Result, TallyError};
use crate::types::criteria::CriteriaTree;
use crate::types::report::EventSummary;
use crate::types::scoring::{ContestantId, CriterionId, EventId, JudgeId, Score};
use crate::types::snapshot::{
    ContestantRecord, CriterionRecord, EventRecord, EventStatus, JudgeRecord, ScoreRecord, Snapshot,
};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use tracing::debug;

pub type ScoreKey = (ContestantId, JudgeId, CriterionId);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSelector {
    Active,
    Id(EventId),
}

impl From<Option<EventId>> for EventSelector {
    fn from(id: Option<EventId>) -> Self {
        id.map(EventSelector::Id).unwrap_or(EventSelector::Active)
    }
}

/// Picks the event a computation runs against. With several ACTIVE events
/// the most recent date wins, then file order.
pub fn select_event(events: &[EventRecord], selector: EventSelector) -> Result<&EventRecord> {
    match selector {
        EventSelector::Id(id) => events
            .iter()
            .find(|event| event.id == id)
            .ok_or(TallyError::EventNotFound(id)),
        EventSelector::Active => events
            .iter()
            .filter(|event| event.status == EventStatus::Active)
            .fold(None::<&EventRecord>, |best, event| match best {
                Some(current) if event.date <= current.date => Some(current),
                _ => Some(event),
            })
            .ok_or(TallyError::NoActiveEvent),
    }
}

/// Immutable one-event view of a snapshot. Every engine function reads from
/// this and nothing mutates it.
#[derive(Debug, Clone)]
pub struct EventContext {
    pub event: EventRecord,
    /// Sorted by number, then id.
    pub contestants: Vec<ContestantRecord>,
    /// Sorted by number, then id.
    pub judges: Vec<JudgeRecord>,
    pub criteria: CriteriaTree,
    /// The event's score rows in file order, duplicates included.
    pub scores: Vec<ScoreRecord>,
    values: BTreeMap<ScoreKey, Score>,
    digest: String,
}

#[derive(Serialize)]
struct CanonicalEvent<'a> {
    event: &'a EventRecord,
    contestants: Vec<&'a ContestantRecord>,
    judges: Vec<&'a JudgeRecord>,
    criteria: Vec<&'a CriterionRecord>,
    scores: Vec<&'a ScoreRecord>,
}

impl EventContext {
    pub fn resolve(snapshot: &Snapshot, selector: EventSelector) -> Result<Self> {
        let event = select_event(&snapshot.events, selector)?;
        let event_id = event.id;

        let canonical = CanonicalEvent {
            event,
            contestants: of_event(&snapshot.contestants, |c| c.event_id, event_id),
            judges: of_event(&snapshot.judges, |j| j.event_id, event_id),
            criteria: of_event(&snapshot.criteria, |c| c.event_id, event_id),
            scores: of_event(&snapshot.scores, |s| s.event_id, event_id),
        };
        let digest = sha256_hex(&serde_json::to_vec(&canonical)?);

        let mut contestants = canonical
            .contestants
            .iter()
            .map(|record| (*record).clone())
            .collect::<Vec<_>>();
        contestants.sort_by_key(|contestant| (contestant.number, contestant.id));

        let mut judges = canonical
            .judges
            .iter()
            .map(|record| (*record).clone())
            .collect::<Vec<_>>();
        judges.sort_by_key(|judge| (judge.number, judge.id));

        let criteria = CriteriaTree::build(
            &canonical
                .criteria
                .iter()
                .map(|record| (*record).clone())
                .collect::<Vec<_>>(),
        );

        let scores = canonical
            .scores
            .iter()
            .map(|record| (*record).clone())
            .collect::<Vec<_>>();
        let values = scores
            .iter()
            .map(|score| {
                (
                    (score.contestant_id, score.judge_id, score.criteria_id),
                    score.value,
                )
            })
            .collect::<BTreeMap<_, _>>();

        debug!(
            event_id,
            contestants = contestants.len(),
            judges = judges.len(),
            categories = criteria.categories().len(),
            scores = scores.len(),
            "resolved event context"
        );

        Ok(Self {
            event: event.clone(),
            contestants,
            judges,
            criteria,
            scores,
            values,
            digest,
        })
    }

    /// The recorded value, if any. Later rows for the same key win.
    pub fn value(
        &self,
        contestant_id: ContestantId,
        judge_id: JudgeId,
        criterion_id: CriterionId,
    ) -> Option<Score> {
        self.values
            .get(&(contestant_id, judge_id, criterion_id))
            .copied()
    }

    /// The recorded value, or 0 when nothing was recorded.
    pub fn score(
        &self,
        contestant_id: ContestantId,
        judge_id: JudgeId,
        criterion_id: CriterionId,
    ) -> Score {
        self.value(contestant_id, judge_id, criterion_id)
            .unwrap_or(0.0)
    }

    pub fn values(&self) -> impl Iterator<Item = (&ScoreKey, &Score)> {
        self.values.iter()
    }

    pub fn contestant(&self, id: ContestantId) -> Option<&ContestantRecord> {
        self.contestants.iter().find(|contestant| contestant.id == id)
    }

    pub fn contestant_by_number(&self, number: u32) -> Option<&ContestantRecord> {
        self.contestants
            .iter()
            .find(|contestant| contestant.number == number)
    }

    pub fn judge_by_number(&self, number: u32) -> Option<&JudgeRecord> {
        self.judges.iter().find(|judge| judge.number == number)
    }

    pub fn contestant_ids(&self) -> Vec<ContestantId> {
        self.contestants
            .iter()
            .map(|contestant| contestant.id)
            .collect()
    }

    pub fn judge_ids(&self) -> Vec<JudgeId> {
        self.judges.iter().map(|judge| judge.id).collect()
    }

    /// Hex SHA-256 of the event's records as read from the store.
    pub fn digest(&self) -> &str {
        &self.digest
    }

    pub fn summary(&self) -> EventSummary {
        EventSummary {
            id: self.event.id,
            name: self.event.name.clone(),
            date: self.event.date,
        }
    }
}

fn of_event<T>(records: &[T], event_of: impl Fn(&T) -> EventId, event_id: EventId) -> Vec<&T> {
    records
        .iter()
        .filter(|record| event_of(*record) == event_id)
        .collect()
}

pub(crate) fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    format!("{digest:x}")
}
