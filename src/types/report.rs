use crate::engine::{Placement, TiePolicy};
use crate::types::criteria::CategorySummary;
use crate::types::scoring::{ContestantId, CriterionId, EventId, JudgeId, Rank, Score};
use crate::types::snapshot::{ContestantRecord, JudgeRecord};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventSummary {
    pub id: EventId,
    pub name: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContestantLabel {
    pub id: ContestantId,
    pub number: u32,
    pub name: String,
}

impl From<&ContestantRecord> for ContestantLabel {
    fn from(record: &ContestantRecord) -> Self {
        Self {
            id: record.id,
            number: record.number,
            name: record.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JudgeColumn {
    pub id: JudgeId,
    pub number: u32,
    pub name: String,
}

impl From<&JudgeRecord> for JudgeColumn {
    fn from(record: &JudgeRecord) -> Self {
        Self {
            id: record.id,
            number: record.number,
            name: record.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JudgeCell {
    pub judge_id: JudgeId,
    pub score: Score,
    pub rank: Rank,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardRow {
    pub contestant: ContestantLabel,
    pub cells: Vec<JudgeCell>,
    pub rank_sum: Rank,
    pub final_rank: Rank,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leaderboard {
    pub category: CategorySummary,
    pub judge_ties: TiePolicy,
    pub judges: Vec<JudgeColumn>,
    pub rows: Vec<LeaderboardRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WinnerEntry {
    pub contestant: ContestantLabel,
    pub total: Score,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Winner {
    pub category: CategorySummary,
    /// `None` when no contestant has a score in the category yet.
    pub winner: Option<WinnerEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankPerJudgeRow {
    pub contestant: ContestantLabel,
    /// One per judge column, same order.
    pub ranks: Vec<Rank>,
    pub rank_sum: Rank,
    pub placement: Option<Placement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankPerJudge {
    pub judges: Vec<JudgeColumn>,
    pub rows: Vec<RankPerJudgeRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalRankRow {
    pub contestant: ContestantLabel,
    pub total_score: Score,
    pub rank_sum: Rank,
    pub final_rank: Rank,
    pub podium: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalRank {
    /// Ordered by final rank, then contestant number.
    pub rows: Vec<FinalRankRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownRow {
    pub judge: JudgeColumn,
    /// One per category, same order as `Breakdown::categories`.
    pub scores: Vec<Score>,
    pub total: Score,
    pub rank: Rank,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breakdown {
    pub contestant: ContestantLabel,
    pub categories: Vec<CategorySummary>,
    pub rows: Vec<BreakdownRow>,
    pub category_totals: Vec<Score>,
    pub grand_total: Score,
    pub rank_sum: Rank,
    pub final_rank: Rank,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubColumn {
    pub id: CriterionId,
    pub name: String,
    pub weight: Option<Score>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoresheetCategory {
    pub category: CategorySummary,
    pub subs: Vec<SubColumn>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoresheetRow {
    pub contestant: ContestantLabel,
    /// Raw values in sub-column order across all categories.
    pub values: Vec<Option<Score>>,
    pub category_totals: Vec<Score>,
    pub total: Score,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scoresheet {
    pub judge: JudgeColumn,
    pub locked: bool,
    pub categories: Vec<ScoresheetCategory>,
    pub rows: Vec<ScoresheetRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "kebab-case")]
pub enum ResultView {
    Leaderboard(Leaderboard),
    Winner(Winner),
    RankPerJudge(RankPerJudge),
    FinalRank(FinalRank),
    Breakdown(Breakdown),
    Scoresheet(Scoresheet),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultReport {
    pub event: EventSummary,
    pub snapshot_digest: String,
    #[serde(flatten)]
    pub view: ResultView,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    pub id: String,
    pub title: String,
    pub body: String,
    pub blocking: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}
