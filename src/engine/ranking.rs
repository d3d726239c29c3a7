//! Tie-aware rank assignment.
//!
//! Values are sorted (stable, so equal values keep input order), then walked
//! left to right in tie blocks. Every member of a block gets the same rank;
//! what that rank is depends on the [`TiePolicy`].

use crate::types::scoring::Rank;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Two totals closer than this belong to the same tie block.
pub const TIE_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TiePolicy {
    /// 1, 1, 2: ties share a rank, the next value gets the next integer.
    Dense,
    /// 1, 1, 3: ties share the block's first position, the next value
    /// resumes after the block.
    Competition,
    /// 1.5, 1.5, 3: ties share the mean of the positions they occupy.
    Fractional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Raw scores: the largest total ranks 1.
    HighestFirst,
    /// Rank sums: the smallest sum ranks 1.
    LowestFirst,
}

pub fn rank<K: Ord + Copy>(
    entries: &[(K, f64)],
    direction: Direction,
    policy: TiePolicy,
) -> BTreeMap<K, Rank> {
    let mut sorted = entries.to_vec();
    match direction {
        Direction::HighestFirst => sorted.sort_by(|a, b| b.1.total_cmp(&a.1)),
        Direction::LowestFirst => sorted.sort_by(|a, b| a.1.total_cmp(&b.1)),
    }

    let mut ranks = BTreeMap::new();
    let mut start = 0;
    let mut dense = 0.0;
    while start < sorted.len() {
        let head = sorted[start].1;
        let mut end = start;
        while end + 1 < sorted.len() && ties(head, sorted[end + 1].1) {
            end += 1;
        }

        dense += 1.0;
        let block_rank = match policy {
            TiePolicy::Dense => dense,
            TiePolicy::Competition => (start + 1) as Rank,
            TiePolicy::Fractional => (start + 1 + end + 1) as Rank / 2.0,
        };
        for (key, _) in &sorted[start..=end] {
            ranks.insert(*key, block_rank);
        }
        start = end + 1;
    }

    ranks
}

/// Ranks raw totals, highest first.
pub fn rank_scores<K: Ord + Copy>(entries: &[(K, f64)], policy: TiePolicy) -> BTreeMap<K, Rank> {
    rank(entries, Direction::HighestFirst, policy)
}

/// Ranks rank sums, lowest first.
pub fn rank_sums<K: Ord + Copy>(entries: &[(K, f64)], policy: TiePolicy) -> BTreeMap<K, Rank> {
    rank(entries, Direction::LowestFirst, policy)
}

fn ties(a: f64, b: f64) -> bool {
    (a - b).abs() <= TIE_EPSILON
}
