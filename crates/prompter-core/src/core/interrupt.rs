//! Process-wide close request raised by Ctrl+C, SIGTERM or SIGHUP.
//!
//! The signal handler only sets a flag; the event loop polls it and runs the
//! same orderly shutdown as the close action.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);
static RESTORE_HOOK: OnceLock<Box<dyn Fn() + Send + Sync>> = OnceLock::new();

/// Installs the signal handler.
///
/// With the `termination` feature of `ctrlc`, SIGTERM and SIGHUP arrive
/// through the same handler as Ctrl+C.
///
/// # Errors
/// Returns an error if a handler was already installed or registration fails.
pub fn init() -> Result<()> {
    ctrlc::set_handler(trigger).context("Error setting Ctrl+C handler")
}

/// Requests a close, force-exiting on the second request.
pub fn trigger() {
    if INTERRUPTED.swap(true, Ordering::SeqCst) {
        // process::exit() skips Drop, so put the terminal back first.
        if let Some(hook) = RESTORE_HOOK.get() {
            hook();
        }
        std::process::exit(130);
    }
}

pub fn is_interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

pub fn reset() {
    INTERRUPTED.store(false, Ordering::SeqCst);
}

/// Registers a hook run before a forced exit.
///
/// Only the first registration takes effect.
pub fn set_restore_hook<F>(hook: F)
where
    F: Fn() + Send + Sync + 'static,
{
    let _ = RESTORE_HOOK.set(Box::new(hook));
}
