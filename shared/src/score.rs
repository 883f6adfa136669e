use serde::{Deserialize, Serialize};
use strum::EnumIter;

pub use strum::IntoEnumIterator;

/// Complexity tier of a pull request, read from its labels.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, EnumIter,
)]
pub enum PrComplexity {
    Standard,
    Low,
    Medium,
    High,
}

impl PrComplexity {
    /// Scans labels case-insensitively for "level 1/2/3" markers. The
    /// highest tier mentioned anywhere wins, regardless of label order;
    /// no marker at all means a standard PR.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut result = PrComplexity::Standard;
        for label in labels {
            let name = label.as_ref().to_lowercase();
            let tier = if name.contains("level 3") {
                PrComplexity::High
            } else if name.contains("level 2") {
                PrComplexity::Medium
            } else if name.contains("level 1") {
                PrComplexity::Low
            } else {
                PrComplexity::Standard
            };
            result = result.max(tier);
        }
        result
    }
}

/// Point values per contribution type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScoringTable {
    pub high_complexity: u32,
    pub medium_complexity: u32,
    pub low_complexity: u32,
    /// Merged PR without a level label.
    pub standard: u32,
    /// Per attended event, independent of event type or date.
    pub attendance: u32,
}

impl Default for ScoringTable {
    fn default() -> Self {
        Self {
            high_complexity: 1100,
            medium_complexity: 500,
            low_complexity: 200,
            standard: 100,
            attendance: 250,
        }
    }
}

impl ScoringTable {
    pub fn points_for(&self, complexity: PrComplexity) -> u32 {
        match complexity {
            PrComplexity::High => self.high_complexity,
            PrComplexity::Medium => self.medium_complexity,
            PrComplexity::Low => self.low_complexity,
            PrComplexity::Standard => self.standard,
        }
    }

    pub fn points_for_labels<I, S>(&self, labels: I) -> u32
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.points_for(PrComplexity::from_labels(labels))
    }

    pub fn attendance_points(&self) -> u32 {
        self.attendance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_three_wins_in_any_case_and_position() {
        for labels in [
            vec!["Level 3"],
            vec!["needs-review", "LEVEL 3"],
            vec!["level 1", "level 3", "level 2"],
            vec!["good first issue", "level 3", "documentation"],
        ] {
            assert_eq!(PrComplexity::from_labels(labels), PrComplexity::High);
        }
    }

    #[test]
    fn higher_tier_beats_lower_regardless_of_order() {
        assert_eq!(
            PrComplexity::from_labels(["level 1", "level 2"]),
            PrComplexity::Medium
        );
        assert_eq!(
            PrComplexity::from_labels(["level 2", "level 1"]),
            PrComplexity::Medium
        );
    }

    #[test]
    fn no_level_label_means_standard() {
        assert_eq!(
            PrComplexity::from_labels(["bug", "help wanted"]),
            PrComplexity::Standard
        );
        assert_eq!(
            PrComplexity::from_labels(Vec::<String>::new()),
            PrComplexity::Standard
        );
    }

    #[test]
    fn marker_is_matched_as_substring() {
        assert_eq!(
            PrComplexity::from_labels(["Complexity: Level 2 (backend)"]),
            PrComplexity::Medium
        );
    }

    #[test]
    fn point_values_follow_tier_order() {
        let table = ScoringTable::default();
        let mut points: Vec<u32> = PrComplexity::iter()
            .map(|tier| table.points_for(tier))
            .collect();
        let unsorted = points.clone();
        points.sort_unstable();
        // Standard < Low < Medium < High, strictly
        assert_eq!(points, unsorted);
        points.dedup();
        assert_eq!(points.len(), 4);
    }

    #[test]
    fn empty_label_set_scores_standard_points() {
        let table = ScoringTable::default();
        assert_eq!(
            table.points_for_labels(Vec::<String>::new()),
            table.standard
        );
    }
}
