//! Release index infrastructure — latest-version lookup via the GitHub API.

use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::ports::ReleaseIndex;
use crate::domain::release::{latest_release_url, parse_latest_tag};

/// Timeout for the latest-release API call.
pub const INDEX_TIMEOUT: Duration = Duration::from_secs(10);

/// Uses the GitHub releases API to find the latest published version.
pub struct GithubReleaseIndex {
    api_base: String,
}

impl GithubReleaseIndex {
    #[must_use]
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
        }
    }
}

impl ReleaseIndex for GithubReleaseIndex {
    async fn latest_version(&self, repo: &str) -> Result<String> {
        let url = latest_release_url(&self.api_base, repo);
        tokio::task::spawn_blocking(move || fetch_latest(&url))
            .await
            .context("spawn_blocking for latest_version")?
    }
}

fn fetch_latest(url: &str) -> Result<String> {
    tracing::debug!(url, "querying latest release");
    let token = std::env::var("GITHUB_TOKEN").unwrap_or_default();

    let req = ureq::get(url)
        .timeout(INDEX_TIMEOUT)
        .set("Accept", "application/vnd.github+json")
        .set("User-Agent", concat!("fsm/", env!("CARGO_PKG_VERSION")));
    let req = if token.is_empty() {
        req
    } else {
        req.set("Authorization", &format!("Bearer {token}"))
    };

    let body = match req.call() {
        Ok(resp) => resp.into_string().context("reading release index response")?,
        Err(ureq::Error::Status(403, _)) => {
            anyhow::bail!("rate limited by the release index; try again later or set GITHUB_TOKEN")
        }
        Err(ureq::Error::Status(code, _)) => anyhow::bail!("release index returned HTTP {code}"),
        Err(e) => return Err(e).context("release index unreachable"),
    };
    Ok(parse_latest_tag(&body)?)
}
