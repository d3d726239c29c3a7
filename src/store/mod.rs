pub mod context;
pub mod file;
pub mod receipt;
pub mod submit;

#[cfg(test)]
pub(crate) mod fixtures;

use crate::error::Result;
use crate::types::scoring::{EventId, JudgeId};
use crate::types::snapshot::{ScoreRecord, Snapshot};

pub use context::{EventContext, EventSelector};
pub use file::JsonFileStore;

/// Where events, rosters, criteria and scores come from.
pub trait ScoreStore {
    /// Reads every record. A store that cannot be read is an error, never an
    /// empty snapshot.
    fn snapshot(&self) -> Result<Snapshot>;

    /// Replaces all of one judge's scores in one event and returns how many
    /// rows were written. Other judges and events are left alone.
    fn replace_judge_scores(
        &self,
        event_id: EventId,
        judge_id: JudgeId,
        scores: Vec<ScoreRecord>,
    ) -> Result<usize>;
}
