use std::path::Path;

use anyhow::Context as _;
use tracing::info;

use shared::RankingConfig;

/// Loads the ranking configuration from a TOML file, falling back to the
/// built-in defaults when no file is configured. Missing keys inside the
/// file fall back field by field.
pub fn load(path: Option<&Path>) -> anyhow::Result<RankingConfig> {
    let Some(path) = path else {
        return Ok(RankingConfig::default());
    };

    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read ranking config {}", path.display()))?;
    let config: RankingConfig = toml::from_str(&raw)
        .with_context(|| format!("Failed to parse ranking config {}", path.display()))?;
    info!("Loaded ranking config from {}", path.display());
    Ok(config)
}
