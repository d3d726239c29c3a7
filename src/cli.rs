use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "tally",
    version,
    about = "Pageant score tally: rankings and result tables from a score snapshot"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Per-judge category scores and ranks with the final category rank
    Leaderboard(LeaderboardCommand),
    /// Highest summed raw score in a category
    Winner(WinnerCommand),
    /// Every judge's rank for every contestant, with 1st/2nd/3rd labels
    RankPerJudge(TableCommand),
    /// Total score, rank sum and final rank
    FinalRank(TableCommand),
    /// One contestant's judge x category sheet
    Breakdown(BreakdownCommand),
    /// One judge's raw score sheet
    Scoresheet(ScoresheetCommand),
    /// Check the snapshot for data problems
    Lint(LintCommand),
    /// Replace one judge's scores with a batch file
    Submit(SubmitCommand),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum JudgeMode {
    Roster,
    FirstSeen,
}

/// Options shared by every command that reads one event.
#[derive(Args)]
pub struct EventArgs {
    /// Snapshot JSON file
    pub snapshot: PathBuf,
    /// Event id (default: the active event)
    #[arg(long)]
    pub event: Option<u32>,
}

#[derive(Args)]
pub struct TableCommand {
    #[command(flatten)]
    pub target: EventArgs,
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
}

#[derive(Args)]
pub struct LeaderboardCommand {
    #[command(flatten)]
    pub target: EventArgs,
    /// Category identifier, e.g. best-in-talent
    #[arg(long)]
    pub category: String,
    #[arg(long, value_enum)]
    pub judges: Option<JudgeMode>,
    #[arg(long)]
    pub max_judges: Option<usize>,
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
}

#[derive(Args)]
pub struct WinnerCommand {
    #[command(flatten)]
    pub target: EventArgs,
    #[arg(long)]
    pub category: String,
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
}

#[derive(Args)]
pub struct BreakdownCommand {
    #[command(flatten)]
    pub target: EventArgs,
    /// Contestant number
    #[arg(long)]
    pub contestant: u32,
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
}

#[derive(Args)]
pub struct ScoresheetCommand {
    #[command(flatten)]
    pub target: EventArgs,
    /// Judge number
    #[arg(long)]
    pub judge: u32,
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
}

#[derive(Args)]
pub struct LintCommand {
    #[command(flatten)]
    pub target: EventArgs,
}

#[derive(Args)]
pub struct SubmitCommand {
    #[command(flatten)]
    pub target: EventArgs,
    /// Judge number
    #[arg(long)]
    pub judge: u32,
    /// JSON array of {contestantId, subCriteriaId, value}
    #[arg(long)]
    pub batch: PathBuf,
}

impl Commands {
    pub fn target(&self) -> &EventArgs {
        match self {
            Commands::Leaderboard(cmd) => &cmd.target,
            Commands::Winner(cmd) => &cmd.target,
            Commands::RankPerJudge(cmd) | Commands::FinalRank(cmd) => &cmd.target,
            Commands::Breakdown(cmd) => &cmd.target,
            Commands::Scoresheet(cmd) => &cmd.target,
            Commands::Lint(cmd) => &cmd.target,
            Commands::Submit(cmd) => &cmd.target,
        }
    }
}
