use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use shared::{Achievement, Contributor, Leaderboard, RankedEntry, Schedule, Snapshot};

/// The homepage widget shows this many rows.
pub const TOP_CONTRIBUTORS: usize = 5;

pub const LEADERBOARD_FILE: &str = "leaderboard.json";
pub const SCHEDULE_FILE: &str = "schedule.json";

#[derive(Serialize)]
struct LeaderboardArtifact<'a> {
    generated_at: DateTime<Utc>,
    /// True when the entries come from a snapshot instead of a fresh fetch.
    cached: bool,
    top: &'a [RankedEntry],
    entries: &'a [RankedEntry],
    achievements: BTreeMap<&'a str, Vec<Achievement>>,
}

#[derive(Serialize)]
struct ScheduleArtifact<'a> {
    generated_at: DateTime<Utc>,
    next_upcoming: Option<&'a str>,
    upcoming: &'a [shared::CommunityEvent],
    past: &'a [shared::CommunityEvent],
}

pub fn write_leaderboard(
    dir: &Path,
    leaderboard: &Leaderboard,
    contributors: &[Contributor],
    generated_at: DateTime<Utc>,
) -> anyhow::Result<()> {
    let achievements = contributors
        .iter()
        .map(|contributor| {
            (
                contributor.handle.as_str(),
                Achievement::unlocked_for(contributor),
            )
        })
        .filter(|(_, unlocked)| !unlocked.is_empty())
        .collect();

    write_json(
        dir,
        LEADERBOARD_FILE,
        &LeaderboardArtifact {
            generated_at,
            cached: false,
            top: leaderboard.top(TOP_CONTRIBUTORS),
            entries: leaderboard.entries(),
            achievements,
        },
    )
}

/// Re-publishes the last good snapshot, marked so the site can show its
/// cached-data indicator.
pub fn write_cached_leaderboard(dir: &Path, snapshot: &Snapshot) -> anyhow::Result<()> {
    write_json(
        dir,
        LEADERBOARD_FILE,
        &LeaderboardArtifact {
            generated_at: snapshot.generated_at,
            cached: true,
            top: &snapshot.entries[..snapshot.entries.len().min(TOP_CONTRIBUTORS)],
            entries: &snapshot.entries,
            achievements: BTreeMap::new(),
        },
    )
}

pub fn write_schedule(
    dir: &Path,
    schedule: &Schedule,
    generated_at: DateTime<Utc>,
) -> anyhow::Result<()> {
    write_json(
        dir,
        SCHEDULE_FILE,
        &ScheduleArtifact {
            generated_at,
            next_upcoming: schedule.next_upcoming().map(|event| event.title.as_str()),
            upcoming: &schedule.upcoming,
            past: &schedule.past,
        },
    )
}

// Write-then-rename so the site never reads a half-written file.
fn write_json(dir: &Path, name: &str, value: &impl Serialize) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output dir {}", dir.display()))?;
    let path = dir.join(name);
    let tmp = dir.join(format!("{name}.tmp"));
    std::fs::write(&tmp, serde_json::to_string_pretty(value)?)?;
    std::fs::rename(&tmp, &path)?;
    info!("Wrote {}", path.display());
    Ok(())
}
