use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One award attempt as received at the ingestion boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AwardRequest {
    pub actor_id: String,
    pub actor_name: String,
    pub target_id: String,
    pub target_name: String,
    pub emoji: String,
    pub channel_id: String,
    pub message_ts: String,
    #[serde(default)]
    pub bonus_signal: u32,
    /// Backdated timestamp for batch imports; live awards leave this unset.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Result of one award attempt.
///
/// `accepted` means the emoji matched the scoring policy, not that points
/// were paid out: deduplicated and self-directed awards come back accepted
/// with zero points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AwardOutcome {
    pub actor_points: i64,
    pub target_points: i64,
    pub accepted: bool,
}

impl AwardOutcome {
    pub fn scored(actor_points: i64, target_points: i64) -> Self {
        Self {
            actor_points,
            target_points,
            accepted: true,
        }
    }

    /// Policy-matched but nothing paid out (self-award, repeat claim).
    pub fn skipped() -> Self {
        Self {
            actor_points: 0,
            target_points: 0,
            accepted: true,
        }
    }

    pub fn rejected() -> Self {
        Self {
            actor_points: 0,
            target_points: 0,
            accepted: false,
        }
    }

    pub fn points_awarded(&self) -> bool {
        self.actor_points > 0 || self.target_points > 0
    }
}

/// One row of a leaderboard, all-time or windowed.
///
/// `count` is the number of scoring participations: for the all-time board
/// reactions given plus received, for a windowed board one per role
/// occurrence inside the window.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub user_id: String,
    pub username: String,
    pub points: i64,
    pub count: u64,
}
