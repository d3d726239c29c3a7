use crate::engine::grouping::JudgeSelection;
use crate::engine::ranking::TiePolicy;
use crate::error::TallyError;
use crate::report::OutputFormat;
use crate::types::scoring::EventId;
use serde::Deserialize;

pub const DEFAULT_MAX_JUDGES: usize = 5;
pub const DEFAULT_DECIMALS: usize = 2;
pub const MAX_DECIMALS: usize = 6;
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TallyConfig {
    pub event: Option<EventConfig>,
    pub ranking: Option<RankingConfig>,
    pub leaderboard: Option<LeaderboardConfig>,
    pub output: Option<OutputConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventConfig {
    pub id: Option<EventId>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RankingConfig {
    pub judge_ties: Option<TiePolicy>,
    pub final_ties: Option<TiePolicy>,
    pub category_ties: Option<TiePolicy>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LeaderboardJudges {
    Roster,
    FirstSeen,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeaderboardConfig {
    pub judges: Option<LeaderboardJudges>,
    pub max_judges: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
    pub decimals: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankingSettings {
    pub judge_ties: TiePolicy,
    pub final_ties: TiePolicy,
    pub category_ties: TiePolicy,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            judge_ties: TiePolicy::Dense,
            final_ties: TiePolicy::Dense,
            category_ties: TiePolicy::Fractional,
        }
    }
}

impl TallyConfig {
    pub fn event_id(&self) -> Option<EventId> {
        self.event.as_ref().and_then(|event| event.id)
    }

    pub fn ranking_settings(&self) -> RankingSettings {
        let defaults = RankingSettings::default();
        match &self.ranking {
            Some(ranking) => RankingSettings {
                judge_ties: ranking.judge_ties.unwrap_or(defaults.judge_ties),
                final_ties: ranking.final_ties.unwrap_or(defaults.final_ties),
                category_ties: ranking.category_ties.unwrap_or(defaults.category_ties),
            },
            None => defaults,
        }
    }

    /// Judge columns for category leaderboards. `overrides` come from the command line.
    pub fn judge_selection(
        &self,
        mode_override: Option<LeaderboardJudges>,
        max_override: Option<usize>,
    ) -> JudgeSelection {
        let leaderboard = self.leaderboard.as_ref();
        let mode = mode_override
            .or_else(|| leaderboard.and_then(|cfg| cfg.judges))
            .unwrap_or(LeaderboardJudges::Roster);
        let limit = max_override
            .or_else(|| leaderboard.and_then(|cfg| cfg.max_judges))
            .unwrap_or(DEFAULT_MAX_JUDGES);

        match mode {
            LeaderboardJudges::Roster => JudgeSelection::Roster,
            LeaderboardJudges::FirstSeen => JudgeSelection::FirstSeen { limit },
        }
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output
            .as_ref()
            .and_then(|output| output.format)
            .unwrap_or(OutputFormat::Md)
    }

    pub fn decimals(&self) -> usize {
        self.output
            .as_ref()
            .and_then(|output| output.decimals)
            .unwrap_or(DEFAULT_DECIMALS)
    }

    pub fn log_level(&self) -> String {
        self.logging
            .as_ref()
            .and_then(|logging| logging.level.clone())
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
    }

    pub fn validate(&self) -> Result<(), TallyError> {
        if let Some(max_judges) = self
            .leaderboard
            .as_ref()
            .and_then(|leaderboard| leaderboard.max_judges)
        {
            if max_judges == 0 {
                return Err(TallyError::ConfigParse(
                    "leaderboard.max_judges must be greater than 0".to_string(),
                ));
            }
        }

        if self.decimals() > MAX_DECIMALS {
            return Err(TallyError::ConfigParse(format!(
                "output.decimals must be at most {MAX_DECIMALS} (found {})",
                self.decimals()
            )));
        }

        if self.log_level().trim().is_empty() {
            return Err(TallyError::ConfigParse(
                "logging.level cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
