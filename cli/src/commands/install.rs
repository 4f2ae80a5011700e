//! Install command — download frida-server and push it to the device.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::deploy;
use crate::domain::InstallRequest;
use crate::infra::artifact::HttpArtifactFetcher;
use crate::infra::release::GithubReleaseIndex;
use crate::output::progress;

/// Arguments for the install command.
#[derive(Args)]
#[command(disable_version_flag = true)]
pub struct InstallArgs {
    /// Release version to install (default: latest)
    #[arg(long)]
    pub version: Option<String>,

    /// Download from this URL instead of the release page
    #[arg(long)]
    pub url: Option<String>,

    /// GitHub repository publishing releases (owner/name)
    #[arg(long)]
    pub repo: Option<String>,

    /// Keep the plain binary name instead of appending the version
    #[arg(long)]
    pub keep_name: bool,

    /// Remote file name for the binary
    #[arg(long)]
    pub name: Option<String>,
}

impl InstallArgs {
    fn request(&self) -> InstallRequest {
        InstallRequest {
            version: self.version.clone(),
            url: self.url.clone(),
            keep_name: self.keep_name,
            custom_name: self.name.clone(),
        }
    }
}

/// Entry point for `fsm install`.
///
/// # Errors
///
/// Returns an error if the device is unreachable or any install step fails.
pub async fn run(app: &AppContext, args: &InstallArgs) -> Result<()> {
    let index = GithubReleaseIndex::new(&app.config.github.api_base);
    let mut fetcher = HttpArtifactFetcher::default();
    if app.output.show_progress() {
        fetcher = fetcher.with_progress(progress::bar);
    }

    let report = deploy::install(
        &app.bridge,
        &index,
        &fetcher,
        &app.reporter(),
        &app.config,
        &args.request(),
    )
    .await?;
    app.renderer().render_install(&report)
}
