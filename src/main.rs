mod cli;
mod config;
mod error;
mod ledger;
mod policy;
mod report;
mod store;
mod types;

use crate::error::KudosError;
use crate::ledger::window::Period;
use crate::ledger::Ledger;
use crate::policy::{RewardRules, ScoringPolicy};
use crate::store::SnapshotStore;
use crate::types::query::AwardRequest;
use chrono::Utc;
use clap::Parser;
use std::io::{self, Write};

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const REJECTED: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 2;
}

fn run() -> Result<i32, KudosError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let loaded = config::load_config(&cli.path)?;
    let settings = config::resolve_settings(&cli.path, loaded.as_ref());
    let policy = ScoringPolicy::new(RewardRules::resolve(loaded.as_ref()));
    let store = SnapshotStore::new(settings.data_file);
    let mut ledger = Ledger::open(store, policy, settings.history_cap);

    match cli.command {
        cli::Commands::Award(cmd) => {
            let bonus_signal = match &cmd.message {
                Some(text) => ledger.policy().count_bonus_signal(text),
                None => cmd.bonus_signal,
            };
            let request = AwardRequest {
                actor_id: cmd.actor.clone(),
                actor_name: cmd.actor_name.clone().unwrap_or_else(|| cmd.actor.clone()),
                target_id: cmd.target.clone(),
                target_name: cmd
                    .target_name
                    .clone()
                    .unwrap_or_else(|| cmd.target.clone()),
                emoji: cmd.emoji.clone(),
                channel_id: cmd.channel.clone(),
                message_ts: cmd.message_ts.clone(),
                bonus_signal,
                timestamp: None,
            };

            let outcome = ledger.award(&request, Utc::now())?;
            println!(
                "{}",
                report::render_outcome(&outcome, output_format(cmd.format))?
            );

            if outcome.points_awarded() {
                Ok(exit_code::SUCCESS)
            } else {
                Ok(exit_code::REJECTED)
            }
        }
        cli::Commands::Leaderboard(cmd) => {
            let (title, entries) = match &cmd.period {
                None => ("all-time", ledger.leaderboard(cmd.limit)),
                Some(raw) => {
                    let period = Period::parse(raw);
                    (
                        period.as_str(),
                        ledger.leaderboard_for_period(period, cmd.limit, Utc::now()),
                    )
                }
            };
            println!(
                "{}",
                report::render_leaderboard(title, &entries, output_format(cmd.format))?
            );
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Stats(cmd) => {
            let account = ledger.user_stats(&cmd.user);
            println!(
                "{}",
                report::render_stats(&cmd.user, account, output_format(cmd.format))?
            );
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Emojis(cmd) => {
            println!(
                "{}",
                report::render_emojis(ledger.policy(), output_format(cmd.format))?
            );
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Import(cmd) => {
            let raw = std::fs::read_to_string(&cmd.file)?;
            let now = Utc::now();
            let mut scored = 0u64;
            let mut skipped = 0u64;
            let mut rejected = 0u64;
            let mut errors = 0u64;

            for (idx, line) in raw.lines().enumerate() {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match serde_json::from_str::<AwardRequest>(line) {
                    Ok(request) => {
                        let outcome = ledger.award(&request, now)?;
                        if outcome.points_awarded() {
                            scored += 1;
                        } else if outcome.accepted {
                            skipped += 1;
                        } else {
                            rejected += 1;
                        }
                    }
                    Err(error) => {
                        errors += 1;
                        eprintln!("warning: line {}: {}", idx + 1, error);
                    }
                }
            }

            println!("import: scored={scored} skipped={skipped} rejected={rejected} errors={errors}");
            if errors > 0 {
                Ok(exit_code::REJECTED)
            } else {
                Ok(exit_code::SUCCESS)
            }
        }
        cli::Commands::Reset(cmd) => {
            if cmd.all {
                if !cmd.yes && !confirm_reset()? {
                    println!("reset cancelled");
                    return Ok(exit_code::SUCCESS);
                }
                ledger.reset_all()?;
                println!("reset: ledger cleared");
            } else if let Some(user) = &cmd.user {
                ledger.reset_user(user, Utc::now())?;
                println!("reset: {user} zeroed");
            }
            Ok(exit_code::SUCCESS)
        }
    }
}

fn output_format(format: cli::ReportFormat) -> report::OutputFormat {
    match format {
        cli::ReportFormat::Text => report::OutputFormat::Text,
        cli::ReportFormat::Json => report::OutputFormat::Json,
    }
}

fn confirm_reset() -> Result<bool, KudosError> {
    print!("Clear the entire rewards ledger? [y/N]: ");
    io::stdout().flush().map_err(KudosError::Io)?;
    let mut input = String::new();
    io::stdin().read_line(&mut input).map_err(KudosError::Io)?;
    Ok(matches!(input.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn init_tracing(verbose: u8, quiet: bool) {
    let default_directive = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
