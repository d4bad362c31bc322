//! Runtime execution modes.
//!
//! - `tui`: full-screen teleprompter (optional feature)

#[cfg(feature = "tui")]
pub use prompter_tui::run_teleprompter;

#[cfg(not(feature = "tui"))]
pub async fn run_teleprompter(
    _config: &prompter_core::config::Config,
    _script: String,
) -> anyhow::Result<()> {
    anyhow::bail!("TUI support is disabled in this build (feature \"tui\").");
}
