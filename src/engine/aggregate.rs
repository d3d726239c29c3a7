//! Score -> per-judge rank -> rank sum -> final rank.

use super::grouping::ScoreMatrix;
use super::ranking::{rank_scores, rank_sums, TiePolicy, TIE_EPSILON};
use crate::types::scoring::{total, ContestantId, JudgeId, Rank};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Standings {
    pub judge_ranks: BTreeMap<(ContestantId, JudgeId), Rank>,
    pub rank_sums: BTreeMap<ContestantId, Rank>,
    pub final_ranks: BTreeMap<ContestantId, Rank>,
}

impl Standings {
    pub fn judge_rank(&self, contestant: ContestantId, judge: JudgeId) -> Rank {
        self.judge_ranks
            .get(&(contestant, judge))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn rank_sum(&self, contestant: ContestantId) -> Rank {
        self.rank_sums.get(&contestant).copied().unwrap_or(0.0)
    }

    pub fn final_rank(&self, contestant: ContestantId) -> Rank {
        self.final_ranks.get(&contestant).copied().unwrap_or(0.0)
    }
}

/// Ranks every judge's column independently.
pub fn judge_ranks(
    matrix: &ScoreMatrix,
    policy: TiePolicy,
) -> BTreeMap<(ContestantId, JudgeId), Rank> {
    let mut ranks = BTreeMap::new();
    for &judge in matrix.judges() {
        for (contestant, rank) in rank_scores(&matrix.judge_column(judge), policy) {
            ranks.insert((contestant, judge), rank);
        }
    }
    ranks
}

/// Adds up each contestant's ranks across the matrix's judges.
pub fn sum_judge_ranks(
    matrix: &ScoreMatrix,
    ranks: &BTreeMap<(ContestantId, JudgeId), Rank>,
) -> BTreeMap<ContestantId, Rank> {
    matrix
        .contestants()
        .iter()
        .map(|&contestant| {
            let sum = total(
                matrix
                    .judges()
                    .iter()
                    .map(|&judge| ranks.get(&(contestant, judge)).copied().unwrap_or(0.0)),
            );
            (contestant, sum)
        })
        .collect()
}

pub fn final_ranks(sums: &BTreeMap<ContestantId, Rank>, policy: TiePolicy) -> BTreeMap<ContestantId, Rank> {
    let entries = sums
        .iter()
        .map(|(&contestant, &sum)| (contestant, sum))
        .collect::<Vec<_>>();
    rank_sums(&entries, policy)
}

pub fn standings(matrix: &ScoreMatrix, judge_policy: TiePolicy, final_policy: TiePolicy) -> Standings {
    let judge_ranks = judge_ranks(matrix, judge_policy);
    let rank_sums = sum_judge_ranks(matrix, &judge_ranks);
    let final_ranks = final_ranks(&rank_sums, final_policy);
    Standings {
        judge_ranks,
        rank_sums,
        final_ranks,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Placement {
    #[serde(rename = "1st")]
    First,
    #[serde(rename = "2nd")]
    Second,
    #[serde(rename = "3rd")]
    Third,
}

impl Placement {
    pub fn label(self) -> &'static str {
        match self {
            Placement::First => "1st",
            Placement::Second => "2nd",
            Placement::Third => "3rd",
        }
    }
}

/// Labels contestants holding one of the three lowest distinct rank sums.
pub fn placements(sums: &BTreeMap<ContestantId, Rank>) -> BTreeMap<ContestantId, Placement> {
    let mut distinct = sums.values().copied().collect::<Vec<_>>();
    distinct.sort_by(|a, b| a.total_cmp(b));
    distinct.dedup_by(|a, b| (*a - *b).abs() <= TIE_EPSILON);

    let podium = [Placement::First, Placement::Second, Placement::Third];
    sums.iter()
        .filter_map(|(&contestant, &sum)| {
            distinct
                .iter()
                .take(podium.len())
                .position(|&value| (value - sum).abs() <= TIE_EPSILON)
                .map(|index| (contestant, podium[index]))
        })
        .collect()
}

/// Final ranks 1, 2 and 3 are set apart in printouts.
pub fn on_podium(final_rank: Rank) -> bool {
    [1.0, 2.0, 3.0]
        .iter()
        .any(|place| (final_rank - place).abs() <= TIE_EPSILON)
}
