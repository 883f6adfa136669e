use serde::{Deserialize, Serialize};

use crate::{normalized_handle, GithubHandle, LeagueTable, ScoringTable};

/// Everything the engine is parameterized by, injected explicitly by the
/// caller. Missing fields deserialize to the built-in defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RankingConfig {
    pub scoring: ScoringTable,
    pub leagues: LeagueTable,
    /// Repository owner; contributions under this handle never enter the
    /// ranking.
    pub excluded_handle: GithubHandle,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            scoring: ScoringTable::default(),
            leagues: LeagueTable::default(),
            excluded_handle: "sayeeg-11".to_string(),
        }
    }
}

impl RankingConfig {
    pub fn is_excluded(&self, handle: &str) -> bool {
        normalized_handle(handle) == normalized_handle(&self.excluded_handle)
    }
}
