use super::judge_columns;
use crate::engine::aggregate::{placements, standings};
use crate::engine::grouping::overall_matrix;
use crate::store::EventContext;
use crate::types::config::RankingSettings;
use crate::types::report::{ContestantLabel, RankPerJudge, RankPerJudgeRow};
use tracing::debug;

/// Full roster x contestant matrix of per-judge ranks over every category.
pub fn build(ctx: &EventContext, settings: RankingSettings) -> RankPerJudge {
    let judges = ctx.judge_ids();
    let matrix = overall_matrix(ctx, &judges);
    let standings = standings(&matrix, settings.judge_ties, settings.final_ties);
    let labels = placements(&standings.rank_sums);

    let rows = ctx
        .contestants
        .iter()
        .map(|contestant| RankPerJudgeRow {
            contestant: ContestantLabel::from(contestant),
            ranks: judges
                .iter()
                .map(|&judge| standings.judge_rank(contestant.id, judge))
                .collect(),
            rank_sum: standings.rank_sum(contestant.id),
            placement: labels.get(&contestant.id).copied(),
        })
        .collect::<Vec<_>>();

    debug!(judges = judges.len(), rows = rows.len(), "built rank-per-judge table");

    RankPerJudge {
        judges: judge_columns(ctx, &judges),
        rows,
    }
}
