use std::path::PathBuf;

use serde::Deserialize;
use tokio::signal;
use tracing::{error, info, instrument, warn};
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

use shared::{
    parse_attendance_csv, AttendanceRecord, CommunityEvent, ContributorSet, FileStore,
    Leaderboard, PullRecord, RankingConfig, Schedule, Snapshot, SnapshotStore,
};

mod api;
mod config;
mod output;

use api::GithubClient;

const LEADERBOARD_SNAPSHOT: &str = "leaderboard";

#[derive(Debug, Deserialize)]
struct Env {
    github_token: Option<String>,
    repo_owner: String,
    repo_name: String,
    attendance_url: Option<String>,
    attendance_file: Option<PathBuf>,
    events_file: Option<PathBuf>,
    ranking_config: Option<PathBuf>,
    #[serde(default = "default_output_dir")]
    output_dir: PathBuf,
    #[serde(default = "default_cache_dir")]
    cache_dir: PathBuf,
    #[serde(default = "default_refresh_minutes")]
    refresh_minutes: u64,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("site-data")
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from(".phantoms-cache")
}

fn default_refresh_minutes() -> u64 {
    30
}

struct Context {
    env: Env,
    config: RankingConfig,
    github: GithubClient,
    store: FileStore,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let env = envy::from_env::<Env>()?;

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer());
    tracing::subscriber::set_global_default(subscriber)?;

    let config = config::load(env.ranking_config.as_deref())?;
    let github = GithubClient::new(env.github_token.clone())?;
    let store = FileStore::new(&env.cache_dir);
    let context = Context {
        env,
        config,
        github,
        store,
    };

    tokio::select! {
        _ = run(&context) => {}
        _ = signal::ctrl_c() => {
            warn!("Received SIGINT. Exiting.");
        }
    }

    Ok(())
}

async fn run(context: &Context) {
    info!(
        "Syncing {}/{} every {} minutes",
        context.env.repo_owner, context.env.repo_name, context.env.refresh_minutes
    );

    let period = tokio::time::Duration::from_secs(context.env.refresh_minutes * 60);
    let mut interval = tokio::time::interval(period);
    loop {
        interval.tick().await;
        refresh(context).await;
    }
}

#[instrument(skip(context))]
async fn refresh(context: &Context) {
    let (pulls, attendance) = tokio::join!(fetch_pulls(context), fetch_attendance(context));

    match pulls {
        Ok(pulls) => {
            if let Err(e) = publish_leaderboard(context, pulls, attendance) {
                error!("Failed to publish leaderboard: {e:#}");
            }
        }
        // The engine never sees fetch failures; fall back to the last good
        // snapshot and keep going.
        Err(e) => {
            error!("Failed to fetch pull requests: {e:#}");
            match context.store.load(LEADERBOARD_SNAPSHOT) {
                Some(snapshot) => {
                    warn!("Republishing snapshot from {}", snapshot.generated_at);
                    if let Err(e) =
                        output::write_cached_leaderboard(&context.env.output_dir, &snapshot)
                    {
                        error!("Failed to write cached leaderboard: {e:#}");
                    }
                }
                None => warn!("No snapshot available; keeping previous artifacts"),
            }
        }
    }

    if let Err(e) = publish_schedule(context) {
        error!("Failed to publish event schedule: {e:#}");
    }
}

async fn fetch_pulls(context: &Context) -> anyhow::Result<Vec<PullRecord>> {
    context
        .github
        .pull_requests(&context.env.repo_owner, &context.env.repo_name)
        .await
}

/// An unavailable attendance sheet degrades to an empty feed; PR scoring
/// still goes out.
async fn fetch_attendance(context: &Context) -> Vec<AttendanceRecord> {
    let url = context.env.attendance_url.as_deref();
    let file = context.env.attendance_file.as_deref();
    if url.is_none() && file.is_none() {
        return Vec::new();
    }

    match api::attendance_text(url, file).await {
        Ok(text) => parse_attendance_csv(&text),
        Err(e) => {
            warn!("Attendance feed unavailable, treating as empty: {e:#}");
            Vec::new()
        }
    }
}

fn publish_leaderboard(
    context: &Context,
    pulls: Vec<PullRecord>,
    attendance: Vec<AttendanceRecord>,
) -> anyhow::Result<()> {
    let mut set = ContributorSet::default();
    set.ingest_pulls(pulls, &context.config);
    set.ingest_attendance(attendance, &context.config);
    let contributors = set.into_contributors();
    let leaderboard = Leaderboard::rank(contributors.clone(), &context.config.leagues);
    info!("Ranked {} contributors", leaderboard.len());

    let generated_at = chrono::Utc::now();
    let snapshot = Snapshot {
        generated_at,
        entries: leaderboard.entries().to_vec(),
    };
    if let Err(e) = context.store.save(LEADERBOARD_SNAPSHOT, &snapshot) {
        warn!("Failed to save snapshot: {e:#}");
    }

    output::write_leaderboard(
        &context.env.output_dir,
        &leaderboard,
        &contributors,
        generated_at,
    )
}

fn publish_schedule(context: &Context) -> anyhow::Result<()> {
    let Some(path) = context.env.events_file.as_deref() else {
        return Ok(());
    };

    let raw = std::fs::read_to_string(path)?;
    let events: Vec<CommunityEvent> = match serde_json::from_str(&raw) {
        Ok(events) => events,
        Err(e) => {
            warn!("Unreadable events file {}: {e}", path.display());
            return Ok(());
        }
    };

    let now = chrono::Utc::now();
    let schedule = Schedule::build(events, now.date_naive());
    output::write_schedule(&context.env.output_dir, &schedule, now)
}
