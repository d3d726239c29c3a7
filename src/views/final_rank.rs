use crate::engine::aggregate::{on_podium, standings};
use crate::engine::grouping::overall_matrix;
use crate::store::EventContext;
use crate::types::config::RankingSettings;
use crate::types::report::{ContestantLabel, FinalRank, FinalRankRow};
use tracing::debug;

pub fn build(ctx: &EventContext, settings: RankingSettings) -> FinalRank {
    let judges = ctx.judge_ids();
    let matrix = overall_matrix(ctx, &judges);
    let standings = standings(&matrix, settings.judge_ties, settings.final_ties);

    let mut rows = ctx
        .contestants
        .iter()
        .map(|contestant| {
            let final_rank = standings.final_rank(contestant.id);
            FinalRankRow {
                contestant: ContestantLabel::from(contestant),
                total_score: matrix.row_total(contestant.id),
                rank_sum: standings.rank_sum(contestant.id),
                final_rank,
                podium: on_podium(final_rank),
            }
        })
        .collect::<Vec<_>>();
    // Stable: equal final ranks keep contestant-number order.
    rows.sort_by(|a, b| a.final_rank.total_cmp(&b.final_rank));

    debug!(rows = rows.len(), "built final-rank table");
    FinalRank { rows }
}
