//! CLI entry and dispatch.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use prompter_core::config;
use prompter_core::core::{FontSize, ScrollSpeed, interrupt};
use prompter_core::logging::{self, LogConfig};
use tracing::info;

mod commands;

#[derive(Parser)]
#[command(name = "prompter")]
#[command(version)]
#[command(about = "Full-screen terminal teleprompter")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Preload the editor with this script (never written back)
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Scroll speed multiplier for this run (0.1 to 5.0)
    #[arg(long, value_name = "X")]
    speed: Option<f64>,

    /// Font size for this run (8 to 72)
    #[arg(long, value_name = "N")]
    font_size: Option<i64>,

    /// Write logs to this file (or directory)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Print a fresh config rendered from the defaults
    Generate,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = logging::init(LogConfig {
        log_file_path: cli.log_file.clone(),
    })?;

    interrupt::init()?;

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let mut config = config::Config::load().context("load config")?;

    if let Some(speed) = cli.speed {
        config.scroll.speed = ScrollSpeed::new(speed).get();
    }
    if let Some(size) = cli.font_size {
        config.font.size = FontSize::new(size).get();
    }

    let Cli { command, file, .. } = cli;

    let Some(command) = command else {
        info!(
            speed = config.scroll.speed,
            font_size = config.font.size,
            "starting teleprompter"
        );
        return commands::run::run(&config, file.as_deref()).await;
    };

    match command {
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::Generate => commands::config::generate(),
        },
    }
}
