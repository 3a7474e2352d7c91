use crate::types::ledger::ScoringEvent;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Append-only scoring record, bounded in length. Windowed leaderboards are
/// computed from this sequence; eviction is FIFO and never touches the claim
/// ledger, so dedup correctness does not depend on retention.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventHistory {
    events: VecDeque<ScoringEvent>,
}

impl EventHistory {
    /// Append one event, evicting from the front once the length exceeds
    /// `cap`.
    pub fn append(&mut self, event: ScoringEvent, cap: usize) {
        self.events.push_back(event);
        while self.events.len() > cap {
            self.events.pop_front();
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScoringEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
