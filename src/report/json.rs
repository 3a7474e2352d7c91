use crate::policy::ScoringPolicy;
use crate::types::ledger::UserAccount;
use crate::types::query::LeaderboardEntry;
use serde::Serialize;

#[derive(Serialize)]
struct LeaderboardDoc<'a> {
    title: &'a str,
    entries: &'a [LeaderboardEntry],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsDoc<'a> {
    user_id: &'a str,
    account: Option<&'a UserAccount>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EmojisDoc {
    tracked_emojis: Vec<String>,
    actor_base_points: i64,
    target_points: i64,
    bonus_marker: String,
    bonus_cap: u32,
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

pub fn leaderboard(
    title: &str,
    entries: &[LeaderboardEntry],
) -> Result<String, serde_json::Error> {
    to_json(&LeaderboardDoc { title, entries })
}

pub fn stats(user_id: &str, account: Option<&UserAccount>) -> Result<String, serde_json::Error> {
    to_json(&StatsDoc { user_id, account })
}

pub fn emojis(policy: &ScoringPolicy) -> Result<String, serde_json::Error> {
    to_json(&EmojisDoc {
        tracked_emojis: policy.tracked_emojis(),
        actor_base_points: policy.actor_points(0),
        target_points: policy.target_points(),
        bonus_marker: policy.bonus_marker().to_string(),
        bonus_cap: policy.bonus_cap(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::query::AwardOutcome;

    #[test]
    fn leaderboard_doc_contains_title_and_entries() {
        let entries = vec![LeaderboardEntry {
            user_id: "U1".to_string(),
            username: "alice".to_string(),
            points: 4,
            count: 2,
        }];
        let rendered = leaderboard("last-30-days", &entries).expect("json should serialize");
        assert!(rendered.contains("\"title\": \"last-30-days\""));
        assert!(rendered.contains("\"points\": 4"));
    }

    #[test]
    fn stats_doc_uses_null_for_missing_accounts() {
        let rendered = stats("U9", None).expect("json should serialize");
        assert!(rendered.contains("\"account\": null"));
    }

    #[test]
    fn outcome_serializes_all_fields() {
        let rendered =
            to_json(&AwardOutcome::scored(3, 2)).expect("json should serialize");
        assert!(rendered.contains("\"actor_points\": 3"));
        assert!(rendered.contains("\"accepted\": true"));
    }

    #[test]
    fn emojis_doc_lists_the_tracked_set() {
        let rendered = emojis(&ScoringPolicy::default()).expect("json should serialize");
        assert!(rendered.contains("\"trackedEmojis\""));
        assert!(rendered.contains("\"fire\""));
        assert!(rendered.contains("\"bonusCap\": 5"));
    }
}
