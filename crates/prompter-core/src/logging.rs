//! File logging for Prompter.
//!
//! The TUI owns the terminal, so events only ever go to a file.
//!
//! ## Environment Variables
//!
//! 1. **`PROMPTER_LOG`** (highest priority): a bare level such as `debug`
//!    applies to every prompter crate; anything with `=` or `,` is used as a
//!    full filter directive.
//! 2. **`RUST_LOG`**
//! 3. **Default**: `warn` globally, `info` for prompter crates
//!
//! ## Log File Location
//!
//! `--log-file <path>` > `PROMPTER_LOG_FILE` > `$PROMPTER_HOME/logs/prompter-<pid>.log`.
//! A path without an extension is treated as a directory.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

use crate::config::paths;

const CRATES: [&str; 3] = ["prompter", "prompter_core", "prompter_tui"];

/// Keeps the background writer alive; dropping it flushes the file.
#[derive(Debug)]
pub struct LogGuard {
    _file_guard: WorkerGuard,
    pub log_file: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    pub log_file_path: Option<PathBuf>,
}

/// Installs the global subscriber writing to the resolved log file.
///
/// # Errors
/// Fails if the log directory cannot be created or a global subscriber is
/// already set.
pub fn init(config: LogConfig) -> Result<LogGuard> {
    let override_path = config
        .log_file_path
        .or_else(|| env::var_os("PROMPTER_LOG_FILE").map(PathBuf::from));
    let (log_dir, filename) = resolve_log_path(override_path);

    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&log_dir, &filename);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_filter(create_filter());

    Registry::default()
        .with(file_layer)
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(LogGuard {
        _file_guard: file_guard,
        log_file: log_dir.join(filename),
    })
}

fn resolve_log_path(override_path: Option<PathBuf>) -> (PathBuf, String) {
    let filename = format!("prompter-{}.log", std::process::id());

    match override_path {
        Some(path) if path.extension().is_some() => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."))
                .to_path_buf();
            let name = path
                .file_name()
                .map_or(filename, |n| n.to_string_lossy().into_owned());
            (dir, name)
        }
        Some(dir) => (dir, filename),
        None => (paths::logs_dir(), filename),
    }
}

/// `PROMPTER_LOG` > `RUST_LOG` > defaults.
fn create_filter() -> EnvFilter {
    if let Ok(level) = env::var("PROMPTER_LOG") {
        return EnvFilter::new(expand_prompter_log(&level));
    }
    if let Ok(rust_log) = env::var("RUST_LOG") {
        return EnvFilter::new(rust_log);
    }
    EnvFilter::new(expand_prompter_log("info"))
}

fn expand_prompter_log(value: &str) -> String {
    if value.contains('=') || value.contains(',') || value.contains(':') {
        return value.to_string();
    }
    let mut directives = vec!["warn".to_string()];
    directives.extend(CRATES.iter().map(|krate| format!("{krate}={value}")));
    directives.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_level_expands_to_every_crate() {
        assert_eq!(
            expand_prompter_log("debug"),
            "warn,prompter=debug,prompter_core=debug,prompter_tui=debug"
        );
    }

    #[test]
    fn directive_syntax_is_used_as_is() {
        assert_eq!(expand_prompter_log("prompter_core=trace"), "prompter_core=trace");
    }

    #[test]
    fn file_path_override_splits_dir_and_name() {
        let (dir, name) = resolve_log_path(Some(PathBuf::from("/tmp/logs/run.log")));
        assert_eq!(dir, PathBuf::from("/tmp/logs"));
        assert_eq!(name, "run.log");
    }

    #[test]
    fn bare_file_name_lands_in_current_dir() {
        let (dir, name) = resolve_log_path(Some(PathBuf::from("run.log")));
        assert_eq!(dir, PathBuf::from("."));
        assert_eq!(name, "run.log");
    }

    #[test]
    fn directory_override_keeps_pid_name() {
        let (dir, name) = resolve_log_path(Some(PathBuf::from("/tmp/prompter-logs")));
        assert_eq!(dir, PathBuf::from("/tmp/prompter-logs"));
        assert_eq!(name, format!("prompter-{}.log", std::process::id()));
    }
}
