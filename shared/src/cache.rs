use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::RankedEntry;

/// The unit a cache provider persists between refreshes. Snapshots exist so
/// the caller can keep showing the last good leaderboard when a feed fetch
/// fails; they are never fed back into the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Snapshot {
    pub generated_at: DateTime<Utc>,
    pub entries: Vec<RankedEntry>,
}

#[cfg(feature = "client")]
pub use store::{FileStore, SnapshotStore};

#[cfg(feature = "client")]
mod store {
    use std::path::PathBuf;

    use tracing::warn;

    use super::Snapshot;

    /// Cache capability the refresh loop consults on fetch failure. The
    /// engine itself never loads or saves snapshots.
    pub trait SnapshotStore {
        fn load(&self, key: &str) -> Option<Snapshot>;
        fn save(&self, key: &str, snapshot: &Snapshot) -> anyhow::Result<()>;
    }

    /// One pretty-printed JSON file per key inside a directory.
    #[derive(Debug, Clone)]
    pub struct FileStore {
        dir: PathBuf,
    }

    impl FileStore {
        pub fn new(dir: impl Into<PathBuf>) -> Self {
            Self { dir: dir.into() }
        }

        fn path(&self, key: &str) -> PathBuf {
            self.dir.join(format!("{key}.json"))
        }
    }

    impl SnapshotStore for FileStore {
        fn load(&self, key: &str) -> Option<Snapshot> {
            let path = self.path(key);
            let raw = std::fs::read_to_string(&path).ok()?;
            match serde_json::from_str(&raw) {
                Ok(snapshot) => Some(snapshot),
                Err(e) => {
                    warn!("Discarding unreadable snapshot {}: {e}", path.display());
                    None
                }
            }
        }

        fn save(&self, key: &str, snapshot: &Snapshot) -> anyhow::Result<()> {
            std::fs::create_dir_all(&self.dir)?;
            std::fs::write(self.path(key), serde_json::to_string_pretty(snapshot)?)?;
            Ok(())
        }
    }
}
