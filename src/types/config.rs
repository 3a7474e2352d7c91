use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct KudosConfig {
    pub ledger: Option<LedgerConfig>,
    pub scoring: Option<ScoringConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    pub data_file: Option<String>,
    pub history_cap: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    pub tracked_emojis: Option<Vec<String>>,
    pub base_actor_points: Option<i64>,
    pub base_target_points: Option<i64>,
    pub bonus_marker: Option<String>,
    pub bonus_cap: Option<u32>,
}
