use std::path::Path;

use anyhow::Context as _;
use tracing::{error, info, instrument};

use shared::PullRecord;

/// Thin octocrab wrapper for the one listing this tool needs.
#[derive(Clone)]
pub struct GithubClient {
    octocrab: octocrab::Octocrab,
}

impl GithubClient {
    /// Works unauthenticated too, at a much lower rate limit.
    pub fn new(token: Option<String>) -> anyhow::Result<Self> {
        let mut builder = octocrab::Octocrab::builder();
        if let Some(token) = token {
            builder = builder.personal_token(token);
        }
        Ok(Self {
            octocrab: builder.build()?,
        })
    }

    /// Lists every pull request of the repository (all states, 100 per
    /// page) as canonical records. Records octocrab cannot account an
    /// author for are skipped.
    #[instrument(skip(self))]
    pub async fn pull_requests(&self, owner: &str, repo: &str) -> anyhow::Result<Vec<PullRecord>> {
        let page = self
            .octocrab
            .pulls(owner, repo)
            .list()
            .state(octocrab::params::State::All)
            .per_page(100)
            .send()
            .await
            .with_context(|| format!("Failed to list pull requests for {owner}/{repo}"))?;
        let pulls = self.octocrab.all_pages(page).await?;
        info!("Fetched {} pull requests for {owner}/{repo}", pulls.len());

        Ok(pulls
            .into_iter()
            .filter_map(|pr| match PullRecord::try_from(pr) {
                Ok(record) => Some(record),
                Err(e) => {
                    error!("Skipping pull request: {e}");
                    None
                }
            })
            .collect())
    }
}

/// The attendance sheet is published either over HTTP or as a file next to
/// the site data.
pub async fn attendance_text(url: Option<&str>, file: Option<&Path>) -> anyhow::Result<String> {
    if let Some(url) = url {
        let response = reqwest::get(url)
            .await
            .with_context(|| format!("Failed to fetch attendance sheet from {url}"))?
            .error_for_status()?;
        return Ok(response.text().await?);
    }
    if let Some(path) = file {
        return tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read attendance sheet {}", path.display()));
    }
    anyhow::bail!("No attendance source configured")
}
