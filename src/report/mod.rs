pub mod json;
pub mod text;

use crate::error::KudosError;
use crate::policy::ScoringPolicy;
use crate::types::ledger::UserAccount;
use crate::types::query::{AwardOutcome, LeaderboardEntry};

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn render_outcome(outcome: &AwardOutcome, format: OutputFormat) -> Result<String, KudosError> {
    match format {
        OutputFormat::Text => Ok(text::outcome(outcome)),
        OutputFormat::Json => json::to_json(outcome).map_err(KudosError::Json),
    }
}

pub fn render_leaderboard(
    title: &str,
    entries: &[LeaderboardEntry],
    format: OutputFormat,
) -> Result<String, KudosError> {
    match format {
        OutputFormat::Text => Ok(text::leaderboard(title, entries)),
        OutputFormat::Json => json::leaderboard(title, entries).map_err(KudosError::Json),
    }
}

pub fn render_stats(
    user_id: &str,
    account: Option<&UserAccount>,
    format: OutputFormat,
) -> Result<String, KudosError> {
    match format {
        OutputFormat::Text => Ok(text::stats(user_id, account)),
        OutputFormat::Json => json::stats(user_id, account).map_err(KudosError::Json),
    }
}

pub fn render_emojis(policy: &ScoringPolicy, format: OutputFormat) -> Result<String, KudosError> {
    match format {
        OutputFormat::Text => Ok(text::emojis(policy)),
        OutputFormat::Json => json::emojis(policy).map_err(KudosError::Json),
    }
}
