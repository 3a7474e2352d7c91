use crate::policy::ScoringPolicy;
use crate::types::ledger::UserAccount;
use crate::types::query::{AwardOutcome, LeaderboardEntry};

const MEDALS: [&str; 3] = ["🥇", "🥈", "🥉"];

pub fn outcome(outcome: &AwardOutcome) -> String {
    if outcome.points_awarded() {
        format!(
            "scored: reactor +{}, author +{}",
            outcome.actor_points, outcome.target_points
        )
    } else if outcome.accepted {
        "not scored: already claimed or self-directed".to_string()
    } else {
        "not scored: emoji not tracked".to_string()
    }
}

pub fn leaderboard(title: &str, entries: &[LeaderboardEntry]) -> String {
    let mut output = String::new();
    output.push_str(&format!("# Rewards Leaderboard ({title})\n\n"));

    if entries.is_empty() {
        output.push_str("- no rewards recorded\n");
        return output;
    }

    for (idx, entry) in entries.iter().enumerate() {
        let rank = MEDALS
            .get(idx)
            .map(|medal| (*medal).to_string())
            .unwrap_or_else(|| format!("{}.", idx + 1));
        output.push_str(&format!(
            "{} {} ({}): {} point{} across {} reaction{}\n",
            rank,
            entry.username,
            entry.user_id,
            entry.points,
            plural(entry.points),
            entry.count,
            plural(entry.count as i64),
        ));
    }

    output
}

pub fn stats(user_id: &str, account: Option<&UserAccount>) -> String {
    match account {
        Some(account) => format!(
            "{} ({}): {} point{}, given {}, received {}, last active {}",
            account.username,
            account.user_id,
            account.total_points,
            plural(account.total_points),
            account.reactions_given,
            account.reactions_received,
            account.last_activity.to_rfc3339(),
        ),
        None => format!("no rewards recorded for {user_id}"),
    }
}

pub fn emojis(policy: &ScoringPolicy) -> String {
    let mut output = String::new();
    output.push_str("# Tracked Emojis\n\n");
    for emoji in policy.tracked_emojis() {
        output.push_str(&format!(":{emoji}:\n"));
    }
    output.push_str(&format!(
        "\nAuthors earn {} point{} per tracked reaction; reactors earn {}, or the {} count (2-{}) when the message carries bonus markers.\n",
        policy.target_points(),
        plural(policy.target_points()),
        policy.actor_points(0),
        policy.bonus_marker(),
        policy.bonus_cap(),
    ));
    output
}

fn plural(value: i64) -> &'static str {
    if value == 1 {
        ""
    } else {
        "s"
    }
}
