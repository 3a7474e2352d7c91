use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Cumulative standing of one user. Accounts are created lazily on the first
/// award that involves the user and are never deleted.
///
/// The serialized keys match the legacy rewards document, which predates the
/// actor/target vocabulary used elsewhere in the crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub user_id: String,
    pub username: String,
    pub total_points: i64,
    pub reactions_given: u64,
    pub reactions_received: u64,
    pub last_activity: DateTime<Utc>,
}

impl UserAccount {
    pub fn new(user_id: &str, username: &str, now: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.to_string(),
            username: username.to_string(),
            total_points: 0,
            reactions_given: 0,
            reactions_received: 0,
            last_activity: now,
        }
    }
}

/// One successfully scored award. Immutable once appended.
///
/// In the document the actor is stored under `userId`/`username` and the
/// target under `messageUserId`/`messageUserName`; the renames keep old data
/// files loadable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringEvent {
    #[serde(rename = "userId")]
    pub actor_id: String,
    #[serde(rename = "username")]
    pub actor_name: String,
    pub emoji: String,
    #[serde(rename = "messageUserId")]
    pub target_id: String,
    #[serde(rename = "messageUserName")]
    pub target_name: String,
    #[serde(rename = "messageTs")]
    pub message_ts: String,
    #[serde(rename = "channelId")]
    pub channel_id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "giverPoints")]
    pub actor_points: i64,
    #[serde(rename = "receiverPoints")]
    pub target_points: i64,
}

/// Serializes the claim-key set as `{"<key>": true}` objects, the shape the
/// legacy document uses for `claimedReactions`. Keys mapped to `false` on
/// load are treated as unclaimed.
pub mod claim_map {
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::collections::{BTreeMap, BTreeSet};

    pub fn serialize<S>(claims: &BTreeSet<String>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(claims.len()))?;
        for key in claims {
            map.serialize_entry(key, &true)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, bool>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .filter_map(|(key, claimed)| claimed.then_some(key))
            .collect())
    }
}
