//! Version command

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::release::resolve_version;
use crate::infra::release::GithubReleaseIndex;
use crate::output::progress;

/// Arguments for the version command.
#[derive(Args)]
pub struct VersionArgs {
    /// Also look up the latest frida-server release
    #[arg(long)]
    pub latest: bool,
}

/// Run the version command.
///
/// # Errors
///
/// Returns an error if `--latest` is given and the release index cannot be
/// queried.
pub async fn run(app: &AppContext, args: &VersionArgs) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    let latest = if args.latest {
        let index = GithubReleaseIndex::new(&app.config.github.api_base);
        let spinner = app
            .output
            .show_progress()
            .then(|| progress::spinner("Querying latest frida-server release..."));
        let resolved = resolve_version(&index, &app.config.repo, None).await;
        if let Some(pb) = spinner {
            match &resolved {
                Ok(v) => progress::finish_ok(&pb, &format!("Latest frida-server release: {v}")),
                Err(_) => pb.finish_and_clear(),
            }
        }
        Some(resolved?)
    } else {
        None
    };
    app.renderer().render_version(version, latest.as_deref())
}
