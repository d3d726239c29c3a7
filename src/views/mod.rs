//! Result tables built from one [`EventContext`].
//!
//! Builders are pure. Lookups that can miss (category identifier, contestant
//! number, judge number) return `None` so the caller can tell "not found"
//! apart from an empty table.

pub mod breakdown;
pub mod final_rank;
pub mod leaderboard;
pub mod rank_per_judge;
pub mod scoresheet;
pub mod winner;

use crate::store::EventContext;
use crate::types::report::{JudgeColumn, ResultReport, ResultView};
use crate::types::scoring::JudgeId;

/// Wraps a view with the event it was computed for and the snapshot digest.
pub fn report(ctx: &EventContext, view: ResultView) -> ResultReport {
    ResultReport {
        event: ctx.summary(),
        snapshot_digest: ctx.digest().to_string(),
        view,
    }
}

fn judge_columns(ctx: &EventContext, ids: &[JudgeId]) -> Vec<JudgeColumn> {
    ids.iter()
        .filter_map(|id| ctx.judges.iter().find(|judge| judge.id == *id))
        .map(JudgeColumn::from)
        .collect()
}
