use crate::types::ledger::UserAccount;
use crate::types::query::LeaderboardEntry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Durable per-user totals, the system of record for all-time standings.
/// Decoupled from the event history so that evicting old events never
/// corrupts cumulative scores.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountTable {
    accounts: BTreeMap<String, UserAccount>,
}

impl AccountTable {
    /// Credit points to the reacting user.
    pub fn credit_given(
        &mut self,
        user_id: &str,
        username: &str,
        points: i64,
        now: DateTime<Utc>,
    ) {
        let account = self.entry_mut(user_id, username, now);
        account.total_points += points;
        account.reactions_given += 1;
    }

    /// Credit points to the message author.
    pub fn credit_received(
        &mut self,
        user_id: &str,
        username: &str,
        points: i64,
        now: DateTime<Utc>,
    ) {
        let account = self.entry_mut(user_id, username, now);
        account.total_points += points;
        account.reactions_received += 1;
    }

    pub fn get(&self, user_id: &str) -> Option<&UserAccount> {
        self.accounts.get(user_id)
    }

    /// Top accounts by total points descending, ties broken by user id
    /// ascending.
    pub fn top(&self, limit: usize) -> Vec<LeaderboardEntry> {
        let mut entries = self
            .accounts
            .values()
            .map(|account| LeaderboardEntry {
                user_id: account.user_id.clone(),
                username: account.username.clone(),
                points: account.total_points,
                count: account.reactions_given + account.reactions_received,
            })
            .collect::<Vec<_>>();
        entries.sort_by(|a, b| {
            b.points
                .cmp(&a.points)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });
        entries.truncate(limit);
        entries
    }

    /// Zero out one account, keeping it on record. Returns false when the
    /// user has no account.
    pub fn zero(&mut self, user_id: &str, now: DateTime<Utc>) -> bool {
        match self.accounts.get_mut(user_id) {
            Some(account) => {
                account.total_points = 0;
                account.reactions_given = 0;
                account.reactions_received = 0;
                account.last_activity = now;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.accounts.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    fn entry_mut(&mut self, user_id: &str, username: &str, now: DateTime<Utc>) -> &mut UserAccount {
        let account = self
            .accounts
            .entry(user_id.to_string())
            .or_insert_with(|| UserAccount::new(user_id, username, now));
        // Display names track renames on every mutation.
        account.username = username.to_string();
        account.last_activity = now;
        account
    }
}
