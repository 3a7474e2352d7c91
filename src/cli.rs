use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "kudos",
    version,
    about = "Emoji reaction rewards ledger and leaderboard CLI"
)]
pub struct Cli {
    /// Root directory for config and data file discovery
    #[arg(long, global = true, default_value = ".")]
    pub path: PathBuf,

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
    Award(AwardCommand),
    Leaderboard(LeaderboardCommand),
    Stats(StatsCommand),
    Emojis(EmojisCommand),
    Import(ImportCommand),
    Reset(ResetCommand),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

#[derive(Args)]
pub struct AwardCommand {
    /// Reacting user id
    pub actor: String,
    /// Reacted-to message author id
    pub target: String,

    #[arg(long)]
    pub emoji: String,
    #[arg(long)]
    pub channel: String,
    /// Platform timestamp identifying the reacted-to message
    #[arg(long)]
    pub message_ts: String,

    /// Display name of the reacting user (defaults to the id)
    #[arg(long)]
    pub actor_name: Option<String>,
    /// Display name of the message author (defaults to the id)
    #[arg(long)]
    pub target_name: Option<String>,

    /// Pre-counted bonus signal
    #[arg(long, default_value_t = 0, conflicts_with = "message")]
    pub bonus_signal: u32,
    /// Message text to derive the bonus signal from instead
    #[arg(long)]
    pub message: Option<String>,

    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct LeaderboardCommand {
    #[arg(short, long, default_value_t = 10)]
    pub limit: usize,

    /// Named window (last-30-days, month-to-date, last-6-months,
    /// year-to-date, all-time); omit for the all-time account standings.
    /// Unrecognized names fall back to last-30-days.
    #[arg(long)]
    pub period: Option<String>,

    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct StatsCommand {
    pub user: String,

    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct EmojisCommand {
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct ImportCommand {
    /// Newline-delimited JSON award requests
    pub file: PathBuf,
}

#[derive(Args)]
pub struct ResetCommand {
    /// User whose standing is zeroed
    #[arg(required_unless_present = "all", conflicts_with = "all")]
    pub user: Option<String>,

    /// Clear the entire ledger: accounts, history and claims
    #[arg(long)]
    pub all: bool,

    /// Skip the confirmation prompt
    #[arg(long, short)]
    pub yes: bool,
}
