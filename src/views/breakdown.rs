use crate::engine::aggregate::standings;
use crate::engine::grouping::{overall_matrix, sum_over};
use crate::store::EventContext;
use crate::types::config::RankingSettings;
use crate::types::criteria::Category;
use crate::types::report::{Breakdown, BreakdownRow, ContestantLabel, JudgeColumn};
use crate::types::scoring::total;
use tracing::debug;

/// One contestant's judge x category sheet. Per-judge ranks are computed
/// against every contestant over every category. `None` for an unknown number.
pub fn build(ctx: &EventContext, contestant_number: u32, settings: RankingSettings) -> Option<Breakdown> {
    let contestant = ctx.contestant_by_number(contestant_number)?;
    let categories = ctx.criteria.categories();

    let judges = ctx.judge_ids();
    let matrix = overall_matrix(ctx, &judges);
    let standings = standings(&matrix, settings.judge_ties, settings.final_ties);

    let rows = ctx
        .judges
        .iter()
        .map(|judge| {
            let scores = categories
                .iter()
                .map(|category| sum_over(ctx, contestant.id, judge.id, category.sub_ids()))
                .collect::<Vec<_>>();
            BreakdownRow {
                judge: JudgeColumn::from(judge),
                total: total(scores.iter().copied()),
                scores,
                rank: standings.judge_rank(contestant.id, judge.id),
            }
        })
        .collect::<Vec<_>>();

    let category_totals = (0..categories.len())
        .map(|index| total(rows.iter().map(|row| row.scores[index])))
        .collect::<Vec<_>>();

    debug!(
        contestant = contestant_number,
        judges = rows.len(),
        "built contestant breakdown"
    );

    Some(Breakdown {
        contestant: ContestantLabel::from(contestant),
        categories: categories.iter().map(Category::summary).collect(),
        grand_total: total(category_totals.iter().copied()),
        category_totals,
        rows,
        rank_sum: standings.rank_sum(contestant.id),
        final_rank: standings.final_rank(contestant.id),
    })
}
