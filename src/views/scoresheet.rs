use crate::store::EventContext;
use crate::types::report::{
    ContestantLabel, JudgeColumn, Scoresheet, ScoresheetCategory, ScoresheetRow, SubColumn,
};
use crate::types::scoring::{total, Score};
use tracing::debug;

/// A judge's raw submitted values, grouped by category. `None` for an
/// unknown judge number.
pub fn build(ctx: &EventContext, judge_number: u32) -> Option<Scoresheet> {
    let judge = ctx.judge_by_number(judge_number)?;
    let categories = ctx.criteria.categories();

    let rows = ctx
        .contestants
        .iter()
        .map(|contestant| {
            let mut values = Vec::new();
            let mut category_totals = Vec::with_capacity(categories.len());
            for category in categories {
                let mut subtotal: Score = 0.0;
                for sub in &category.subs {
                    let value = ctx.value(contestant.id, judge.id, sub.id);
                    subtotal += value.unwrap_or(0.0);
                    values.push(value);
                }
                category_totals.push(subtotal);
            }
            ScoresheetRow {
                contestant: ContestantLabel::from(contestant),
                values,
                total: total(category_totals.iter().copied()),
                category_totals,
            }
        })
        .collect::<Vec<_>>();

    debug!(judge = judge_number, rows = rows.len(), "built judge scoresheet");

    Some(Scoresheet {
        judge: JudgeColumn::from(judge),
        locked: judge.locked,
        categories: categories
            .iter()
            .map(|category| ScoresheetCategory {
                category: category.summary(),
                subs: category
                    .subs
                    .iter()
                    .map(|sub| SubColumn {
                        id: sub.id,
                        name: sub.name.clone(),
                        weight: sub.weight,
                    })
                    .collect(),
            })
            .collect(),
        rows,
    })
}
