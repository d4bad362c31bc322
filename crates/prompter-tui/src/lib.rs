//! Full-screen terminal teleprompter.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stderr};

use anyhow::Result;
use prompter_core::config::Config;
use prompter_core::core::TeleprompterSettings;
pub use runtime::TuiRuntime;
use tokio::runtime::Handle;
use tracing::{info, warn};

/// Runs the teleprompter until the close action, starting in edit mode with
/// `script` loaded.
///
/// # Errors
/// Returns an error if there is no terminal or the terminal fails.
pub async fn run_teleprompter(config: &Config, script: String) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!("The teleprompter requires a terminal.");
    }

    let settings = TeleprompterSettings::from_config(config);
    let mut runtime = TuiRuntime::new(settings, &script, Handle::current())?;
    let result = runtime.run();

    if !runtime.shutdown().await {
        warn!("scroll worker was aborted at close");
    }
    info!("teleprompter closed");
    result
}
