use crate::types::ledger::claim_map;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Idempotency guard: the set of (actor, channel, message) triples that have
/// already been scored. Claims are retained indefinitely, independent of
/// history eviction, so dedup never regresses when old events age out.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimLedger {
    #[serde(with = "claim_map")]
    claims: BTreeSet<String>,
}

impl ClaimLedger {
    pub fn key(actor_id: &str, channel_id: &str, message_ts: &str) -> String {
        format!("{actor_id}:{channel_id}:{message_ts}")
    }

    pub fn contains(&self, key: &str) -> bool {
        self.claims.contains(key)
    }

    pub fn insert(&mut self, key: String) -> bool {
        self.claims.insert(key)
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    pub fn clear(&mut self) {
        self.claims.clear();
    }
}
