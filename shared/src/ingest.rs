use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{normalized_handle, Contributor, GithubHandle, PrComplexity, RankingConfig};

/// A pull request reduced to the fields scoring cares about.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRecord {
    pub author: GithubHandle,
    /// `None` means not yet merged; such records contribute nothing.
    pub merged_at: Option<DateTime<Utc>>,
    pub labels: Vec<String>,
}

/// One row of the attendance sheet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub handle: GithubHandle,
    /// Informational only; scoring never reads it, so an unreadable date
    /// does not invalidate the row.
    pub date: Option<NaiveDate>,
    pub event: String,
}

/// Parses the attendance sheet (`GitHubUsername,Date,EventName`, one row per
/// attended event). The header row, short rows, and rows without a handle
/// are dropped without affecting the rest of the feed.
pub fn parse_attendance_csv(text: &str) -> Vec<AttendanceRecord> {
    text.lines().skip(1).filter_map(parse_attendance_row).collect()
}

fn parse_attendance_row(line: &str) -> Option<AttendanceRecord> {
    let mut fields = line.splitn(3, ',');
    let handle = fields.next()?.trim();
    let date = fields.next()?.trim();
    let event = fields.next()?.trim();
    if handle.is_empty() {
        return None;
    }
    Some(AttendanceRecord {
        handle: handle.to_string(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(),
        event: event.to_string(),
    })
}

/// Accumulator mapping contributor identity to its record. Keys are
/// normalized handles; insertion order is preserved so that equal scores
/// later rank in feed order.
///
/// Every engine invocation starts from a fresh set over full raw feeds;
/// totals are never folded into previously persisted state.
#[derive(Debug, Clone, Default)]
pub struct ContributorSet {
    contributors: Vec<Contributor>,
    index: HashMap<GithubHandle, usize>,
}

impl ContributorSet {
    /// Folds merged pull requests into the accumulator. Unmerged records and
    /// records by the excluded owner are skipped and create no contributor.
    pub fn ingest_pulls<I>(&mut self, pulls: I, config: &RankingConfig)
    where
        I: IntoIterator<Item = PullRecord>,
    {
        for pull in pulls {
            if pull.merged_at.is_none() || config.is_excluded(&pull.author) {
                continue;
            }
            let complexity = PrComplexity::from_labels(&pull.labels);
            let points = config.scoring.points_for(complexity);
            self.entry(&pull.author).record_pull(complexity, points);
        }
    }

    /// Folds attendance rows into the accumulator, one event per row. The
    /// excluded owner is skipped here too; either feed alone must never
    /// surface that identity.
    pub fn ingest_attendance<I>(&mut self, rows: I, config: &RankingConfig)
    where
        I: IntoIterator<Item = AttendanceRecord>,
    {
        for row in rows {
            if config.is_excluded(&row.handle) {
                continue;
            }
            self.entry(&row.handle)
                .record_attendance(config.scoring.attendance_points());
        }
    }

    fn entry(&mut self, handle: &str) -> &mut Contributor {
        let key = normalized_handle(handle);
        let slot = match self.index.get(&key) {
            Some(slot) => *slot,
            None => {
                let slot = self.contributors.len();
                self.contributors.push(Contributor::new(handle));
                self.index.insert(key, slot);
                slot
            }
        };
        &mut self.contributors[slot]
    }

    pub fn get(&self, handle: &str) -> Option<&Contributor> {
        self.index
            .get(&normalized_handle(handle))
            .map(|slot| &self.contributors[*slot])
    }

    pub fn len(&self) -> usize {
        self.contributors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contributors.is_empty()
    }

    pub fn contributors(&self) -> &[Contributor] {
        &self.contributors
    }

    /// Contributors in first-seen order, ready for ranking.
    pub fn into_contributors(self) -> Vec<Contributor> {
        self.contributors
    }
}
