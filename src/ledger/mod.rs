pub mod accounts;
pub mod claims;
pub mod history;
pub mod window;

use crate::error::{KudosError, Result};
use crate::policy::ScoringPolicy;
use crate::store::SnapshotStore;
use crate::types::ledger::{ScoringEvent, UserAccount};
use crate::types::query::{AwardOutcome, AwardRequest, LeaderboardEntry};
use accounts::AccountTable;
use chrono::{DateTime, Utc};
use claims::ClaimLedger;
use history::EventHistory;
use serde::{Deserialize, Serialize};
use window::Period;

/// The full persisted ledger state. Loaded once at startup, mutated in
/// memory, written through on every mutation. The top-level keys match the
/// legacy rewards document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub users: AccountTable,
    #[serde(default, rename = "reactionHistory")]
    pub history: EventHistory,
    #[serde(default, rename = "claimedReactions")]
    pub claims: ClaimLedger,
}

/// Award processing and leaderboard queries over one snapshot.
///
/// Mutations take `&mut self`, which makes the whole check-claim-mutate-
/// append-persist sequence a critical section under the single-writer model:
/// no second award can interleave with it inside one process.
pub struct Ledger {
    policy: ScoringPolicy,
    store: SnapshotStore,
    history_cap: usize,
    snapshot: Snapshot,
}

impl Ledger {
    pub fn open(store: SnapshotStore, policy: ScoringPolicy, history_cap: usize) -> Self {
        let snapshot = store.load();
        Self {
            policy,
            store,
            history_cap,
            snapshot,
        }
    }

    /// Process one award attempt. Rejection paths return zero points without
    /// touching any state; the scored path claims first, then mutates, then
    /// persists. A persist failure is returned to the caller while the
    /// in-memory mutation stays applied (the divergence is surfaced, not
    /// rolled back, and never double-pays on retry).
    pub fn award(&mut self, request: &AwardRequest, now: DateTime<Utc>) -> Result<AwardOutcome> {
        if !self.policy.is_tracked(&request.emoji) {
            tracing::debug!(emoji = %request.emoji, "emoji not tracked, award rejected");
            return Ok(AwardOutcome::rejected());
        }
        if request.actor_id == request.target_id {
            tracing::debug!(user = %request.actor_id, "self-award skipped");
            return Ok(AwardOutcome::skipped());
        }

        let key = ClaimLedger::key(&request.actor_id, &request.channel_id, &request.message_ts);
        if self.snapshot.claims.contains(&key) {
            tracing::debug!(claim = %key, "message already scored for this actor");
            return Ok(AwardOutcome::skipped());
        }

        let actor_points = self.policy.actor_points(request.bonus_signal);
        let target_points = self.policy.target_points();
        let timestamp = request.timestamp.unwrap_or(now);

        // Claim before mutating: a crash past this point loses points but
        // never pays the same reaction twice.
        self.snapshot.claims.insert(key);
        self.snapshot.users.credit_given(
            &request.actor_id,
            &request.actor_name,
            actor_points,
            timestamp,
        );
        self.snapshot.users.credit_received(
            &request.target_id,
            &request.target_name,
            target_points,
            timestamp,
        );
        self.snapshot.history.append(
            ScoringEvent {
                actor_id: request.actor_id.clone(),
                actor_name: request.actor_name.clone(),
                emoji: request.emoji.clone(),
                target_id: request.target_id.clone(),
                target_name: request.target_name.clone(),
                message_ts: request.message_ts.clone(),
                channel_id: request.channel_id.clone(),
                timestamp,
                actor_points,
                target_points,
            },
            self.history_cap,
        );
        self.persist()?;

        Ok(AwardOutcome::scored(actor_points, target_points))
    }

    /// All-time standings, read from the account table alone.
    pub fn leaderboard(&self, limit: usize) -> Vec<LeaderboardEntry> {
        self.snapshot.users.top(limit)
    }

    /// Windowed standings, computed by scanning the event history.
    pub fn leaderboard_for_period(
        &self,
        period: Period,
        limit: usize,
        now: DateTime<Utc>,
    ) -> Vec<LeaderboardEntry> {
        window::aggregate(&self.snapshot.history, period.window_start(now), limit)
    }

    /// `None` is the defined "no data yet" outcome, not an error.
    pub fn user_stats(&self, user_id: &str) -> Option<&UserAccount> {
        self.snapshot.users.get(user_id)
    }

    pub fn tracked_emojis(&self) -> Vec<String> {
        self.policy.tracked_emojis()
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    /// Zero one user's standing. History and claims are retained, so
    /// windowed boards still reflect the user's past events.
    pub fn reset_user(&mut self, user_id: &str, now: DateTime<Utc>) -> Result<()> {
        if !self.snapshot.users.zero(user_id, now) {
            return Err(KudosError::UnknownUser(user_id.to_string()));
        }
        self.persist()
    }

    /// Clear the whole ledger: accounts, history and claims.
    pub fn reset_all(&mut self) -> Result<()> {
        self.snapshot.users.clear();
        self.snapshot.history.clear();
        self.snapshot.claims.clear();
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        self.store.save(&self.snapshot)
    }
}
