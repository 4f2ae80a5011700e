//! CLI argument parsing with clap derive

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::app::{AppContext, OutputFlags};
use crate::commands;
use crate::domain::ConfigOverrides;
use crate::infra::config::YamlConfigStore;

/// Deploy and control frida-server on Android devices over adb
#[derive(Parser)]
#[command(
    name = "fsm",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Show debug logs (commands run, URLs, temp files)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Download frida-server and push it to the device
    Install(commands::install::InstallArgs),

    /// Start frida-server on the device
    Run(commands::run::RunArgs),

    /// List frida-server binaries on the device
    List(commands::list::ListArgs),

    /// Show running frida-server processes
    Ps(commands::ps::PsArgs),

    /// Stop frida-server
    Kill(commands::kill::KillArgs),

    /// Show version
    Version(commands::version::VersionArgs),
}

impl Command {
    fn overrides(&self) -> ConfigOverrides {
        match self {
            Self::Install(args) => ConfigOverrides {
                repo: args.repo.clone(),
                ..ConfigOverrides::default()
            },
            _ => ConfigOverrides::default(),
        }
    }
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is invalid or the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli {
            no_color,
            quiet,
            json,
            command,
            ..
        } = self;
        let flags = OutputFlags {
            no_color,
            quiet,
            json,
        };
        let app = AppContext::new(&flags, &YamlConfigStore, command.overrides())?;

        match command {
            Command::Install(args) => commands::install::run(&app, &args).await,
            Command::Run(args) => commands::run::run(&app, args).await,
            Command::List(args) => commands::list::run(&app, &args).await,
            Command::Ps(args) => commands::ps::run(&app, &args).await,
            Command::Kill(args) => commands::kill::run(&app, args).await,
            Command::Version(args) => commands::version::run(&app, &args).await,
        }
    }
}
