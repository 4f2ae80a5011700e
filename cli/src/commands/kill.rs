//! Kill command — stop frida-server on the device.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::process;
use crate::domain::KillTarget;

/// Arguments for the kill command.
#[derive(Args)]
pub struct KillArgs {
    /// Kill this process id
    #[arg(long, conflicts_with = "name")]
    pub pid: Option<u32>,

    /// Kill processes matching this name (default: the server name)
    #[arg(long)]
    pub name: Option<String>,
}

/// Entry point for `fsm kill`.
///
/// # Errors
///
/// Returns an error if the device is unreachable or the name is invalid.
pub async fn run(app: &AppContext, args: KillArgs) -> Result<()> {
    let target = KillTarget::select(args.pid, args.name);
    let outcome = process::kill(&app.bridge, &app.reporter(), &app.config, &target).await?;
    app.renderer().render_kill(&outcome)
}
