use serde::{Deserialize, Serialize};

use crate::{normalized_handle, Contributor, GithubHandle, League, LeagueTable};

/// One row of the ranked leaderboard, ready for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RankedEntry {
    /// 1-based, dense; ties do not share a rank number.
    pub rank: u32,
    pub handle: GithubHandle,
    pub experience_points: u32,
    pub pull_requests: u32,
    pub events_attended: u32,
    pub league: League,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Leaderboard {
    entries: Vec<RankedEntry>,
}

impl Leaderboard {
    /// Sorts contributors by experience points, highest first, and assigns
    /// dense ranks. The sort is stable: equal scores keep the order they
    /// were ingested in.
    pub fn rank(mut contributors: Vec<Contributor>, leagues: &LeagueTable) -> Self {
        contributors.sort_by(|a, b| b.experience_points.cmp(&a.experience_points));
        let entries = contributors
            .into_iter()
            .enumerate()
            .map(|(position, contributor)| RankedEntry {
                rank: position as u32 + 1,
                league: leagues.league_for(contributor.experience_points).clone(),
                handle: contributor.handle,
                experience_points: contributor.experience_points,
                pull_requests: contributor.pull_requests,
                events_attended: contributor.events_attended,
            })
            .collect();
        Self { entries }
    }

    pub fn from_entries(entries: Vec<RankedEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[RankedEntry] {
        &self.entries
    }

    /// Prefix view (e.g. the homepage shows the top 5). Slicing only; the
    /// full list is always ranked first.
    pub fn top(&self, n: usize) -> &[RankedEntry] {
        &self.entries[..self.entries.len().min(n)]
    }

    pub fn find(&self, handle: &str) -> Option<&RankedEntry> {
        let key = normalized_handle(handle);
        self.entries
            .iter()
            .find(|entry| normalized_handle(&entry.handle) == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contributor(handle: &str, experience_points: u32) -> Contributor {
        Contributor {
            experience_points,
            ..Contributor::new(handle)
        }
    }

    #[test]
    fn ranks_are_dense_and_descending() {
        let leagues = LeagueTable::default();
        let board = Leaderboard::rank(
            vec![
                contributor("low", 100),
                contributor("high", 16000),
                contributor("mid", 5000),
            ],
            &leagues,
        );

        let handles: Vec<&str> = board.entries().iter().map(|e| e.handle.as_str()).collect();
        assert_eq!(handles, ["high", "mid", "low"]);
        let ranks: Vec<u32> = board.entries().iter().map(|e| e.rank).collect();
        assert_eq!(ranks, [1, 2, 3]);
    }

    #[test]
    fn ties_keep_input_order_and_distinct_ranks() {
        let leagues = LeagueTable::default();
        let board = Leaderboard::rank(
            vec![
                contributor("a", 500),
                contributor("b", 500),
                contributor("c", 500),
            ],
            &leagues,
        );

        let handles: Vec<&str> = board.entries().iter().map(|e| e.handle.as_str()).collect();
        assert_eq!(handles, ["a", "b", "c"]);
        let ranks: Vec<u32> = board.entries().iter().map(|e| e.rank).collect();
        assert_eq!(ranks, [1, 2, 3]);
    }

    #[test]
    fn ranking_is_idempotent() {
        let leagues = LeagueTable::default();
        let contributors = vec![
            contributor("a", 3000),
            contributor("b", 3000),
            contributor("c", 18000),
        ];
        let first = Leaderboard::rank(contributors.clone(), &leagues);
        let second = Leaderboard::rank(contributors, &leagues);
        assert_eq!(first, second);
    }

    #[test]
    fn leagues_follow_thresholds() {
        let leagues = LeagueTable::default();
        let board = Leaderboard::rank(
            vec![contributor("gold", 16000), contributor("rookie", 100)],
            &leagues,
        );
        assert_eq!(board.entries()[0].league.name, "Gold Class");
        assert_eq!(board.entries()[1].league.name, "Rookie Agent");
    }

    #[test]
    fn top_n_is_a_prefix_of_the_full_ranking() {
        let leagues = LeagueTable::default();
        let many: Vec<Contributor> = (0..8)
            .map(|i| contributor(&format!("user-{i}"), 1000 * (8 - i)))
            .collect();
        let full = Leaderboard::rank(many.clone(), &leagues);
        let only_first_five = Leaderboard::rank(many.into_iter().take(5).collect(), &leagues);

        assert_eq!(full.top(5), only_first_five.entries());
        assert_eq!(full.top(100).len(), 8);
    }

    #[test]
    fn find_ignores_case() {
        let leagues = LeagueTable::default();
        let board = Leaderboard::rank(vec![contributor("Alice", 500)], &leagues);
        assert_eq!(board.find("alice").unwrap().handle, "Alice");
        assert!(board.find("bob").is_none());
    }

    #[test]
    fn zero_point_contributors_still_rank() {
        let leagues = LeagueTable::default();
        let board = Leaderboard::rank(vec![contributor("quiet", 0)], &leagues);
        assert_eq!(board.entries()[0].rank, 1);
        assert_eq!(board.entries()[0].league.name, "Rookie Agent");
    }
}
