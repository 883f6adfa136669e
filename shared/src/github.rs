use crate::PullRecord;

impl TryFrom<octocrab::models::pulls::PullRequest> for PullRecord {
    type Error = anyhow::Error;

    fn try_from(pr: octocrab::models::pulls::PullRequest) -> anyhow::Result<Self> {
        let author = pr
            .user
            .map(|user| user.login)
            .ok_or_else(|| anyhow::anyhow!("Pull request #{} has no author", pr.number))?;

        Ok(Self {
            author,
            merged_at: pr.merged_at,
            labels: pr
                .labels
                .unwrap_or_default()
                .into_iter()
                .map(|label| label.name)
                .collect(),
        })
    }
}
