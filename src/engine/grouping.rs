use crate::store::EventContext;
use crate::types::criteria::Category;
use crate::types::scoring::{total, ContestantId, CriterionId, JudgeId, Score};
use std::collections::{BTreeMap, BTreeSet};

/// Which judges get a column in a category leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JudgeSelection {
    /// Every judge of the event, by judge number.
    Roster,
    /// The first `limit` distinct judges met while walking contestants by
    /// number and each contestant's category scores by judge id.
    FirstSeen { limit: usize },
}

/// Contestant x judge totals, zero-filled for every pair in the two lists.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreMatrix {
    contestants: Vec<ContestantId>,
    judges: Vec<JudgeId>,
    cells: BTreeMap<(ContestantId, JudgeId), Score>,
}

impl ScoreMatrix {
    pub fn build(
        contestants: &[ContestantId],
        judges: &[JudgeId],
        mut cell: impl FnMut(ContestantId, JudgeId) -> Score,
    ) -> Self {
        let mut cells = BTreeMap::new();
        for &contestant in contestants {
            for &judge in judges {
                cells.insert((contestant, judge), cell(contestant, judge));
            }
        }
        Self {
            contestants: contestants.to_vec(),
            judges: judges.to_vec(),
            cells,
        }
    }

    pub fn contestants(&self) -> &[ContestantId] {
        &self.contestants
    }

    pub fn judges(&self) -> &[JudgeId] {
        &self.judges
    }

    pub fn get(&self, contestant: ContestantId, judge: JudgeId) -> Score {
        self.cells.get(&(contestant, judge)).copied().unwrap_or(0.0)
    }

    /// One judge's totals for every contestant, in contestant order.
    pub fn judge_column(&self, judge: JudgeId) -> Vec<(ContestantId, Score)> {
        self.contestants
            .iter()
            .map(|&contestant| (contestant, self.get(contestant, judge)))
            .collect()
    }

    /// A contestant's totals summed over every judge.
    pub fn row_total(&self, contestant: ContestantId) -> Score {
        total(self.judges.iter().map(|&judge| self.get(contestant, judge)))
    }
}

/// Sum of one judge's scores for one contestant over the given sub-criteria.
pub fn sum_over(
    ctx: &EventContext,
    contestant: ContestantId,
    judge: JudgeId,
    sub_ids: impl IntoIterator<Item = CriterionId>,
) -> Score {
    total(
        sub_ids
            .into_iter()
            .map(|sub| ctx.score(contestant, judge, sub)),
    )
}

/// Per judge totals under one category, for every contestant of the event.
pub fn category_matrix(ctx: &EventContext, category: &Category, judges: &[JudgeId]) -> ScoreMatrix {
    ScoreMatrix::build(&ctx.contestant_ids(), judges, |contestant, judge| {
        sum_over(ctx, contestant, judge, category.sub_ids())
    })
}

/// Per judge totals over every sub-criterion of every category.
pub fn overall_matrix(ctx: &EventContext, judges: &[JudgeId]) -> ScoreMatrix {
    ScoreMatrix::build(&ctx.contestant_ids(), judges, |contestant, judge| {
        sum_over(ctx, contestant, judge, ctx.criteria.sub_ids())
    })
}

pub fn first_seen_judges(ctx: &EventContext, category: &Category, limit: usize) -> Vec<JudgeId> {
    let subs = category.sub_ids().collect::<BTreeSet<_>>();
    let roster = ctx.judge_ids().into_iter().collect::<BTreeSet<_>>();

    let mut seen = Vec::new();
    for contestant in &ctx.contestants {
        // Keys are ordered (contestant, judge, criterion), so judges come out ascending.
        for ((_, judge, _), _) in ctx.values().filter(|((c, j, criterion), _)| {
            *c == contestant.id && roster.contains(j) && subs.contains(criterion)
        }) {
            if seen.len() == limit {
                return seen;
            }
            if !seen.contains(judge) {
                seen.push(*judge);
            }
        }
    }
    seen
}

pub fn resolve_judges(
    ctx: &EventContext,
    category: &Category,
    selection: JudgeSelection,
) -> Vec<JudgeId> {
    match selection {
        JudgeSelection::Roster => ctx.judge_ids(),
        JudgeSelection::FirstSeen { limit } => first_seen_judges(ctx, category, limit),
    }
}
