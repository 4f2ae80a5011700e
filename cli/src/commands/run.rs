//! Run command — start frida-server on the device.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::process;
use crate::domain::LaunchRequest;

/// Arguments for the run command.
#[derive(Args)]
#[command(disable_version_flag = true)]
pub struct RunArgs {
    /// Directory on the device holding the binary
    #[arg(long)]
    pub dir: Option<String>,

    /// Extra frida-server arguments (e.g. "-l 0.0.0.0:27042"); a value
    /// starting with `/` is the binary path to launch instead
    #[arg(long, allow_hyphen_values = true)]
    pub params: Option<String>,

    /// Start the binary installed for this version
    #[arg(long)]
    pub version: Option<String>,

    /// Start the binary with this file name
    #[arg(long)]
    pub name: Option<String>,
}

/// Entry point for `fsm run`.
///
/// # Errors
///
/// Returns an error if the device is unreachable, the binary cannot be
/// selected, or the launch command fails.
pub async fn run(app: &AppContext, args: RunArgs) -> Result<()> {
    let request = LaunchRequest {
        dir: args.dir,
        name: args.name,
        version: args.version,
        params: args.params,
    };
    let outcome = process::start(&app.bridge, &app.reporter(), &app.config, &request).await?;
    app.renderer().render_start(&outcome)
}
