use super::judge_columns;
use crate::engine::aggregate::standings;
use crate::engine::grouping::{category_matrix, resolve_judges, JudgeSelection};
use crate::store::EventContext;
use crate::types::config::RankingSettings;
use crate::types::report::{ContestantLabel, JudgeCell, Leaderboard, LeaderboardRow};
use tracing::debug;

/// Category leaderboard: every judge's raw category score and rank, the rank
/// sum, and the final rank. `None` when the identifier names no category.
pub fn build(
    ctx: &EventContext,
    identifier: &str,
    selection: JudgeSelection,
    settings: RankingSettings,
) -> Option<Leaderboard> {
    let category = ctx.criteria.find(identifier)?;
    let judges = resolve_judges(ctx, category, selection);
    let matrix = category_matrix(ctx, category, &judges);
    let standings = standings(&matrix, settings.category_ties, settings.final_ties);

    let rows = ctx
        .contestants
        .iter()
        .map(|contestant| {
            let cells = judges
                .iter()
                .map(|&judge_id| JudgeCell {
                    judge_id,
                    score: matrix.get(contestant.id, judge_id),
                    rank: standings.judge_rank(contestant.id, judge_id),
                })
                .collect();
            let final_rank = standings.final_rank(contestant.id);
            LeaderboardRow {
                contestant: ContestantLabel::from(contestant),
                cells,
                rank_sum: standings.rank_sum(contestant.id),
                final_rank,
                highlighted: final_rank == 1.0,
            }
        })
        .collect::<Vec<_>>();

    debug!(
        identifier,
        judges = judges.len(),
        rows = rows.len(),
        "built category leaderboard"
    );

    Some(Leaderboard {
        category: category.summary(),
        judge_ties: settings.category_ties,
        judges: judge_columns(ctx, &judges),
        rows,
    })
}
