//! List command — frida-server binaries installed on the device.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::deploy;

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Directory on the device to list
    #[arg(long)]
    pub dir: Option<String>,
}

/// Entry point for `fsm list`.
///
/// # Errors
///
/// Returns an error if the device is unreachable or the directory is invalid.
pub async fn run(app: &AppContext, args: &ListArgs) -> Result<()> {
    let dir = args.dir.as_deref().unwrap_or(&app.config.install_dir);
    let binaries = deploy::list_installed(&app.bridge, dir, &app.config.server_name).await?;
    app.renderer().render_installed(dir, &binaries)
}
