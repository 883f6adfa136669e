use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::{Contributor, IntoEnumIterator, PrComplexity};

/// Badges the profile and home pages unlock from contribution counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum Achievement {
    FirstPullRequest,
    PullRequestMaster,
    ComplexSolver,
    TeamPlayer,
}

impl Achievement {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FirstPullRequest => "First PR",
            Self::PullRequestMaster => "PR Master",
            Self::ComplexSolver => "Complex Solver",
            Self::TeamPlayer => "Team Player",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::FirstPullRequest => "Submitted your first pull request",
            Self::PullRequestMaster => "Submitted 10 pull requests",
            Self::ComplexSolver => "Submitted a Level 3 PR",
            Self::TeamPlayer => "Participated in 3 events",
        }
    }

    pub fn unlocked(&self, contributor: &Contributor) -> bool {
        match self {
            Self::FirstPullRequest => contributor.pull_requests >= 1,
            Self::PullRequestMaster => contributor.pull_requests >= 10,
            Self::ComplexSolver => contributor.top_complexity == Some(PrComplexity::High),
            Self::TeamPlayer => contributor.events_attended >= 3,
        }
    }

    pub fn unlocked_for(contributor: &Contributor) -> Vec<Self> {
        Self::iter()
            .filter(|achievement| achievement.unlocked(contributor))
            .collect()
    }
}
