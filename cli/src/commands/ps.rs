//! Ps command — running frida-server processes.

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::process;

/// Arguments for the ps command.
#[derive(Args)]
pub struct PsArgs {
    /// Match processes containing this text (default: the server name)
    #[arg(long)]
    pub name: Option<String>,
}

/// Entry point for `fsm ps`.
///
/// # Errors
///
/// Returns an error if the device is unreachable.
pub async fn run(app: &AppContext, args: &PsArgs) -> Result<()> {
    let filter = args.name.as_deref().unwrap_or(&app.config.server_name);
    let processes = process::list_processes(&app.bridge, filter).await?;
    app.renderer().render_processes(&processes)
}
