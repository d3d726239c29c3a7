mod cli;
mod config;
mod engine;
mod error;
mod report;
mod store;
mod telemetry;
mod types;
mod views;

use crate::error::TallyError;
use crate::report::OutputFormat;
use crate::store::receipt::{write_receipt, SubmissionReceipt};
use crate::store::{EventContext, EventSelector, JsonFileStore, ScoreStore};
use crate::types::config::{LeaderboardJudges, TallyConfig};
use crate::types::report::ResultView;
use crate::types::snapshot::ScoreEntry;
use clap::Parser;
use tracing::{debug, info};

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const BLOCKING: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
}

fn output_format(flag: Option<cli::ReportFormat>, cfg: &TallyConfig) -> OutputFormat {
    match flag {
        Some(cli::ReportFormat::Json) => OutputFormat::Json,
        Some(cli::ReportFormat::Md) => OutputFormat::Md,
        None => cfg.output_format(),
    }
}

fn emit(
    ctx: &EventContext,
    view: ResultView,
    flag: Option<cli::ReportFormat>,
    cfg: &TallyConfig,
) -> Result<i32, TallyError> {
    let rendered = report::render(
        &views::report(ctx, view),
        output_format(flag, cfg),
        cfg.decimals(),
    )?;
    println!("{rendered}");
    Ok(exit_code::SUCCESS)
}

fn run() -> Result<i32, TallyError> {
    let cli = cli::Cli::parse();
    let target = cli.command.target();
    let store = JsonFileStore::new(&target.snapshot);

    let cfg = config::load_config(&store.root())?.unwrap_or_default();
    telemetry::init(
        telemetry::flag_level(cli.verbose, cli.quiet),
        &cfg.log_level(),
    )?;

    let selector = EventSelector::from(target.event.or(cfg.event_id()));
    let snapshot = store.snapshot()?;
    let ctx = EventContext::resolve(&snapshot, selector)?;
    let settings = cfg.ranking_settings();
    debug!(
        snapshot = %store.path().display(),
        event_id = ctx.event.id,
        ?settings,
        "resolved run settings"
    );

    match &cli.command {
        cli::Commands::Leaderboard(cmd) => {
            if cmd.max_judges == Some(0) {
                return Err(TallyError::ConfigParse(
                    "--max-judges must be greater than 0".to_string(),
                ));
            }
            let mode = cmd.judges.map(|mode| match mode {
                cli::JudgeMode::Roster => LeaderboardJudges::Roster,
                cli::JudgeMode::FirstSeen => LeaderboardJudges::FirstSeen,
            });
            let selection = cfg.judge_selection(mode, cmd.max_judges);
            let view = views::leaderboard::build(&ctx, &cmd.category, selection, settings)
                .ok_or_else(|| TallyError::CategoryNotFound {
                    identifier: cmd.category.clone(),
                    event_id: ctx.event.id,
                })?;
            emit(&ctx, ResultView::Leaderboard(view), cmd.format, &cfg)
        }
        cli::Commands::Winner(cmd) => {
            let view = views::winner::build(&ctx, &cmd.category).ok_or_else(|| {
                TallyError::CategoryNotFound {
                    identifier: cmd.category.clone(),
                    event_id: ctx.event.id,
                }
            })?;
            emit(&ctx, ResultView::Winner(view), cmd.format, &cfg)
        }
        cli::Commands::RankPerJudge(cmd) => {
            let view = views::rank_per_judge::build(&ctx, settings);
            emit(&ctx, ResultView::RankPerJudge(view), cmd.format, &cfg)
        }
        cli::Commands::FinalRank(cmd) => {
            let view = views::final_rank::build(&ctx, settings);
            emit(&ctx, ResultView::FinalRank(view), cmd.format, &cfg)
        }
        cli::Commands::Breakdown(cmd) => {
            let view = views::breakdown::build(&ctx, cmd.contestant, settings)
                .ok_or(TallyError::ContestantNotFound(cmd.contestant))?;
            emit(&ctx, ResultView::Breakdown(view), cmd.format, &cfg)
        }
        cli::Commands::Scoresheet(cmd) => {
            let view = views::scoresheet::build(&ctx, cmd.judge)
                .ok_or(TallyError::JudgeNotFound(cmd.judge))?;
            emit(&ctx, ResultView::Scoresheet(view), cmd.format, &cfg)
        }
        cli::Commands::Lint(_) => {
            let findings = engine::lint::lint_findings(&snapshot, &ctx);

            if findings.is_empty() {
                println!("lint: no findings");
                return Ok(exit_code::SUCCESS);
            }

            for finding in &findings {
                let level = if finding.blocking { "BLOCKING" } else { "WARN" };
                println!("[{}] {}: {}", level, finding.id, finding.title);
                println!("  {}", finding.body);
            }

            if findings.iter().any(|finding| finding.blocking) {
                Ok(exit_code::BLOCKING)
            } else {
                Ok(exit_code::WARNINGS)
            }
        }
        cli::Commands::Submit(cmd) => {
            let content = std::fs::read_to_string(&cmd.batch)?;
            let entries: Vec<ScoreEntry> = serde_json::from_str(&content).map_err(|e| {
                TallyError::InvalidScore(format!("{}: {}", cmd.batch.display(), e))
            })?;

            let submission = store::submit::prepare_submission(&ctx, cmd.judge, &entries)?;
            let written = store.replace_judge_scores(
                ctx.event.id,
                submission.judge_id,
                submission.scores,
            )?;

            let after = EventContext::resolve(&store.snapshot()?, EventSelector::Id(ctx.event.id))?;
            let receipt = SubmissionReceipt::new(
                ctx.event.id,
                submission.judge_number,
                written,
                ctx.digest().to_string(),
                after.digest().to_string(),
            );
            let path = write_receipt(&store.root(), &receipt)?;
            info!(
                judge = cmd.judge,
                written,
                auto_assigned = submission.auto_assigned,
                "submission stored"
            );

            println!(
                "submitted {} score(s) for judge #{} in event {}",
                written, submission.judge_number, ctx.event.id
            );
            println!("receipt: {}", path.display());
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) if e.is_not_found() => {
            eprintln!("not found: {}", e);
            std::process::exit(exit_code::NOT_FOUND);
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
