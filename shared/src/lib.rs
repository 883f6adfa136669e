use serde::{Deserialize, Serialize};

mod achievements;
mod cache;
mod config;
mod event;
mod ingest;
mod league;
mod rank;
mod score;

#[cfg(feature = "github")]
pub mod github;

pub use achievements::*;
pub use cache::*;
pub use config::*;
pub use event::*;
pub use ingest::*;
pub use league::*;
pub use rank::*;
pub use score::*;

pub type GithubHandle = String;

/// Canonical form of a handle. Identity comparisons are case-insensitive
/// everywhere: accumulator keys, the excluded-owner check, and lookups.
pub fn normalized_handle(handle: &str) -> GithubHandle {
    handle.trim().to_lowercase()
}

/// Per-contributor accumulator. Created lazily on the first qualifying
/// record from either feed, mutated only during ingestion, read-only once
/// ranking starts.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Contributor {
    /// First-seen spelling of the handle, kept for display.
    pub handle: GithubHandle,
    pub experience_points: u32,
    pub pull_requests: u32,
    pub events_attended: u32,
    /// Highest complexity tier among this contributor's merged PRs.
    pub top_complexity: Option<PrComplexity>,
}

impl Contributor {
    pub fn new(handle: impl Into<GithubHandle>) -> Self {
        Self {
            handle: handle.into(),
            ..Self::default()
        }
    }

    pub fn record_pull(&mut self, complexity: PrComplexity, points: u32) {
        self.pull_requests += 1;
        self.experience_points += points;
        self.top_complexity = self.top_complexity.max(Some(complexity));
    }

    pub fn record_attendance(&mut self, points: u32) {
        self.events_attended += 1;
        self.experience_points += points;
    }
}

/// Full engine pass: normalize both feeds into contributor accumulators,
/// score them, and produce the ranked, tiered leaderboard.
pub fn build_leaderboard(
    pulls: impl IntoIterator<Item = PullRecord>,
    attendance: impl IntoIterator<Item = AttendanceRecord>,
    config: &RankingConfig,
) -> Leaderboard {
    let mut set = ContributorSet::default();
    set.ingest_pulls(pulls, config);
    set.ingest_attendance(attendance, config);
    Leaderboard::rank(set.into_contributors(), &config.leagues)
}
