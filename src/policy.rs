use crate::types::config::KudosConfig;
use std::collections::BTreeSet;

pub const DEFAULT_TRACKED_EMOJIS: [&str; 10] = [
    "+1",
    "thumbsup",
    "heart",
    "fire",
    "100",
    "trophy",
    "star",
    "clap",
    "raised_hands",
    "tada",
];

const DEFAULT_BASE_ACTOR_POINTS: i64 = 1;
const DEFAULT_BASE_TARGET_POINTS: i64 = 2;
const DEFAULT_BONUS_MARKER: &str = "++";
const DEFAULT_BONUS_CAP: u32 = 5;

/// Immutable scoring rules resolved from configuration once, at startup.
#[derive(Debug, Clone)]
pub struct RewardRules {
    tracked: BTreeSet<String>,
    base_actor_points: i64,
    base_target_points: i64,
    bonus_marker: String,
    bonus_cap: u32,
}

impl RewardRules {
    pub fn resolve(cfg: Option<&KudosConfig>) -> Self {
        let scoring = cfg.and_then(|value| value.scoring.as_ref());
        let tracked = scoring
            .and_then(|value| value.tracked_emojis.clone())
            .unwrap_or_else(|| {
                DEFAULT_TRACKED_EMOJIS
                    .iter()
                    .map(|emoji| emoji.to_string())
                    .collect()
            })
            .into_iter()
            .collect::<BTreeSet<_>>();
        let base_actor_points = scoring
            .and_then(|value| value.base_actor_points)
            .unwrap_or(DEFAULT_BASE_ACTOR_POINTS)
            .max(0);
        let base_target_points = scoring
            .and_then(|value| value.base_target_points)
            .unwrap_or(DEFAULT_BASE_TARGET_POINTS)
            .max(0);
        let bonus_marker = scoring
            .and_then(|value| value.bonus_marker.clone())
            .unwrap_or_else(|| DEFAULT_BONUS_MARKER.to_string());
        let bonus_cap = scoring
            .and_then(|value| value.bonus_cap)
            .unwrap_or(DEFAULT_BONUS_CAP)
            .max(1);

        Self {
            tracked,
            base_actor_points,
            base_target_points,
            bonus_marker,
            bonus_cap,
        }
    }
}

/// Pure eligibility and point-value decisions. Holds no mutable state; the
/// ledger owns one policy for its whole lifetime.
#[derive(Debug, Clone)]
pub struct ScoringPolicy {
    rules: RewardRules,
}

impl ScoringPolicy {
    pub fn new(rules: RewardRules) -> Self {
        Self { rules }
    }

    pub fn is_tracked(&self, emoji: &str) -> bool {
        self.rules.tracked.contains(emoji)
    }

    /// Counts exact occurrences of the bonus marker token in free text,
    /// capped. Only whole whitespace-delimited tokens match: `+++` or `a++`
    /// never count toward a `++` marker.
    pub fn count_bonus_signal(&self, text: &str) -> u32 {
        let hits = text
            .split_whitespace()
            .filter(|token| *token == self.rules.bonus_marker)
            .count() as u32;
        hits.min(self.rules.bonus_cap)
    }

    /// Base one point; a bonus signal of two or more pays the signal count,
    /// capped.
    pub fn actor_points(&self, bonus_signal: u32) -> i64 {
        if bonus_signal >= 2 {
            i64::from(bonus_signal.min(self.rules.bonus_cap))
        } else {
            self.rules.base_actor_points
        }
    }

    /// Fixed base for the message author, independent of the bonus signal.
    pub fn target_points(&self) -> i64 {
        self.rules.base_target_points
    }

    pub fn tracked_emojis(&self) -> Vec<String> {
        self.rules.tracked.iter().cloned().collect()
    }

    pub fn bonus_marker(&self) -> &str {
        &self.rules.bonus_marker
    }

    pub fn bonus_cap(&self) -> u32 {
        self.rules.bonus_cap
    }
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self::new(RewardRules::resolve(None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::config::KudosConfig;

    fn parse_config(toml_str: &str) -> KudosConfig {
        toml::from_str(toml_str).expect("config should parse")
    }

    #[test]
    fn default_rules_track_the_stock_emoji_set() {
        let policy = ScoringPolicy::default();
        assert!(policy.is_tracked("fire"));
        assert!(policy.is_tracked("+1"));
        assert!(!policy.is_tracked("eggplant"));
    }

    #[test]
    fn configured_tracked_set_replaces_the_default() {
        let config = parse_config(
            r#"
[scoring]
tracked_emojis = ["rocket"]
"#,
        );
        let policy = ScoringPolicy::new(RewardRules::resolve(Some(&config)));
        assert!(policy.is_tracked("rocket"));
        assert!(!policy.is_tracked("fire"));
    }

    #[test]
    fn bonus_signal_counts_exact_tokens_only() {
        let policy = ScoringPolicy::default();
        assert_eq!(policy.count_bonus_signal("great work ++ ++"), 2);
        assert_eq!(policy.count_bonus_signal("+++ a++ ++b"), 0);
        assert_eq!(policy.count_bonus_signal(""), 0);
    }

    #[test]
    fn bonus_signal_count_is_capped() {
        let policy = ScoringPolicy::default();
        assert_eq!(policy.count_bonus_signal("++ ++ ++ ++ ++ ++ ++"), 5);
    }

    #[test]
    fn actor_points_scale_with_bonus_and_cap() {
        let policy = ScoringPolicy::default();
        let cases = [(0, 1), (1, 1), (2, 2), (3, 3), (4, 4), (5, 5), (7, 5)];
        for (signal, expected) in cases {
            assert_eq!(policy.actor_points(signal), expected, "signal {signal}");
        }
    }

    #[test]
    fn target_points_ignore_the_bonus_signal() {
        let policy = ScoringPolicy::default();
        assert_eq!(policy.target_points(), 2);
    }

    #[test]
    fn tracked_emojis_are_listed_sorted() {
        let policy = ScoringPolicy::default();
        let listed = policy.tracked_emojis();
        let mut sorted = listed.clone();
        sorted.sort();
        assert_eq!(listed, sorted);
        assert_eq!(listed.len(), DEFAULT_TRACKED_EMOJIS.len());
    }
}
