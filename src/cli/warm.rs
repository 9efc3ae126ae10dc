//! Warm-cache command - one-shot cache population

use anyhow::Context;
use tracing::info;

/// Builds the application state and warms every supported language
///
/// Fails when the configured cache is unreachable or any language could not
/// be written, so schedulers see a non-zero exit.
pub async fn run() -> anyhow::Result<()> {
    let config = super::bootstrap()?;
    let state = crate::create_warmup_state(&config)
        .await
        .context("Cache warmup failed")?;

    let languages = state
        .faqs
        .warm_cache()
        .await
        .context("Cache warmup failed")?;

    let codes: Vec<&str> = languages.iter().map(|l| l.code()).collect();
    info!(languages = %codes.join(","), "Cache warmed successfully");

    Ok(())
}
