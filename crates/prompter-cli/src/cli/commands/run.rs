//! Default command: open the teleprompter.

use std::path::Path;

use anyhow::{Context, Result};
use prompter_core::config::Config;
use prompter_core::core::script;
use tracing::info;

use crate::modes;

pub async fn run(config: &Config, file: Option<&Path>) -> Result<()> {
    let script = script::initial(file)?;
    info!(
        file = file.map(|path| path.display().to_string()),
        chars = script.chars().count(),
        "script loaded"
    );

    modes::run_teleprompter(config, script)
        .await
        .context("teleprompter failed")
}
