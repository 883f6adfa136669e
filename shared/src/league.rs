use serde::{Deserialize, Serialize};

/// A named, colored classification band assigned by experience-point
/// threshold.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct League {
    pub min_points: u32,
    pub name: String,
    pub color: String,
}

impl League {
    pub fn new(min_points: u32, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            min_points,
            name: name.into(),
            color: color.into(),
        }
    }
}

/// Ordered league tiers. Kept sorted highest threshold first; the lowest
/// tier acts as the catch-all so lookup never fails.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "Vec<League>", into = "Vec<League>")]
pub struct LeagueTable {
    tiers: Vec<League>,
}

impl Default for LeagueTable {
    fn default() -> Self {
        Self::new(vec![
            League::new(15000, "Gold Class", "#FFD700"),
            League::new(7500, "Silver Class", "#C0C0C0"),
            League::new(3000, "Bronze Class", "#CD7F32"),
            League::new(0, "Rookie Agent", "#00aaff"),
        ])
    }
}

impl LeagueTable {
    /// An empty tier list falls back to the default table.
    pub fn new(mut tiers: Vec<League>) -> Self {
        if tiers.is_empty() {
            return Self::default();
        }
        tiers.sort_by(|a, b| b.min_points.cmp(&a.min_points));
        Self { tiers }
    }

    /// First tier, scanned from the highest threshold down, whose threshold
    /// is at or below the given points.
    pub fn league_for(&self, points: u32) -> &League {
        self.tiers
            .iter()
            .find(|tier| points >= tier.min_points)
            .unwrap_or_else(|| &self.tiers[self.tiers.len() - 1])
    }

    pub fn tiers(&self) -> &[League] {
        &self.tiers
    }
}

impl From<Vec<League>> for LeagueTable {
    fn from(tiers: Vec<League>) -> Self {
        Self::new(tiers)
    }
}

impl From<LeagueTable> for Vec<League> {
    fn from(table: LeagueTable) -> Self {
        table.tiers
    }
}
