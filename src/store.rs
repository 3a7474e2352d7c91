use crate::error::Result;
use crate::ledger::Snapshot;
use std::fs;
use std::path::{Path, PathBuf};

/// Durable storage for the ledger snapshot: one JSON document, rewritten in
/// full on every mutation.
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the snapshot, substituting an empty one when the file is missing
    /// or unreadable. A corrupt document is an operator warning, never a
    /// startup failure.
    pub fn load(&self) -> Snapshot {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                return Snapshot::default();
            }
            Err(error) => {
                tracing::warn!(
                    path = %self.path.display(),
                    %error,
                    "snapshot unreadable, starting from an empty ledger"
                );
                return Snapshot::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(snapshot) => snapshot,
            Err(error) => {
                tracing::warn!(
                    path = %self.path.display(),
                    %error,
                    "snapshot corrupt, starting from an empty ledger"
                );
                Snapshot::default()
            }
        }
    }

    /// Write the full document through a temp file and rename, so a crash
    /// mid-write cannot truncate the previous good document.
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let rendered = serde_json::to_string_pretty(snapshot)?;
        let staged = staging_path(&self.path);
        fs::write(&staged, rendered)?;
        fs::rename(&staged, &self.path)?;
        Ok(())
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut staged = path.as_os_str().to_owned();
    staged.push(".tmp");
    PathBuf::from(staged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::claims::ClaimLedger;
    use chrono::Utc;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_as_empty() {
        let dir = TempDir::new().expect("temp dir should be created");
        let store = SnapshotStore::new(dir.path().join("rewards.json"));
        let snapshot = store.load();
        assert!(snapshot.users.is_empty());
        assert!(snapshot.history.is_empty());
        assert!(snapshot.claims.is_empty());
    }

    #[test]
    fn corrupt_file_loads_as_empty() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("rewards.json");
        fs::write(&path, "{ not json").expect("corrupt file should write");

        let store = SnapshotStore::new(path);
        let snapshot = store.load();
        assert!(snapshot.users.is_empty());
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join(".kudos/rewards.json");
        let store = SnapshotStore::new(path.clone());

        store
            .save(&Snapshot::default())
            .expect("save should succeed");
        assert!(path.exists());
    }

    #[test]
    fn save_leaves_no_staging_file_behind() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("rewards.json");
        let store = SnapshotStore::new(path.clone());

        store
            .save(&Snapshot::default())
            .expect("save should succeed");
        assert!(path.exists());
        assert!(!staging_path(&path).exists());
    }

    #[test]
    fn snapshot_round_trips() {
        let dir = TempDir::new().expect("temp dir should be created");
        let store = SnapshotStore::new(dir.path().join("rewards.json"));

        let mut snapshot = Snapshot::default();
        let now = Utc::now();
        snapshot.users.credit_given("U1", "alice", 3, now);
        snapshot.claims.insert(ClaimLedger::key("U1", "C1", "1.0"));
        store.save(&snapshot).expect("save should succeed");

        let reloaded = store.load();
        assert_eq!(
            reloaded.users.get("U1").map(|a| a.total_points),
            Some(3)
        );
        assert!(reloaded.claims.contains("U1:C1:1.0"));
    }

    #[test]
    fn document_uses_legacy_top_level_keys() {
        let dir = TempDir::new().expect("temp dir should be created");
        let path = dir.path().join("rewards.json");
        let store = SnapshotStore::new(path.clone());

        let mut snapshot = Snapshot::default();
        snapshot.users.credit_given("U1", "alice", 1, Utc::now());
        store.save(&snapshot).expect("save should succeed");

        let raw = fs::read_to_string(&path).expect("document should be readable");
        assert!(raw.contains("\"users\""));
        assert!(raw.contains("\"reactionHistory\""));
        assert!(raw.contains("\"claimedReactions\""));
    }

    #[test]
    fn save_fails_when_parent_path_is_a_file() {
        let dir = TempDir::new().expect("temp dir should be created");
        fs::write(dir.path().join("blocked"), "file").expect("blocking file should write");
        let store = SnapshotStore::new(dir.path().join("blocked/rewards.json"));

        assert!(store.save(&Snapshot::default()).is_err());
    }
}
