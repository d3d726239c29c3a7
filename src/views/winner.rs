use crate::engine::ranking::TIE_EPSILON;
use crate::store::EventContext;
use crate::types::report::{ContestantLabel, Winner, WinnerEntry};
use crate::types::scoring::{total, Score};
use std::collections::BTreeSet;
use tracing::debug;

/// Highest summed raw score in a category across every judge. Ties go to the
/// contestant with the lowest id. Contestants without a single row in the
/// category are not candidates, so an unscored category has no winner.
pub fn build(ctx: &EventContext, identifier: &str) -> Option<Winner> {
    let category = ctx.criteria.find(identifier)?;
    let mut criteria = category.sub_ids().collect::<BTreeSet<_>>();
    criteria.insert(category.id);

    let mut contestants = ctx.contestants.iter().collect::<Vec<_>>();
    contestants.sort_by_key(|contestant| contestant.id);

    let mut best: Option<WinnerEntry> = None;
    for contestant in contestants {
        let values = ctx
            .values()
            .filter(|((id, _, criterion), _)| *id == contestant.id && criteria.contains(criterion))
            .map(|(_, value)| *value)
            .collect::<Vec<_>>();
        if values.is_empty() {
            continue;
        }
        let sum: Score = total(values);
        let leads = best
            .as_ref()
            .map_or(true, |current| sum > current.total + TIE_EPSILON);
        if leads {
            best = Some(WinnerEntry {
                contestant: ContestantLabel::from(contestant),
                total: sum,
            });
        }
    }

    debug!(
        identifier,
        winner = best.as_ref().map(|entry| entry.contestant.number),
        "picked category winner"
    );

    Some(Winner {
        category: category.summary(),
        winner: best,
    })
}
