//! Core teleprompter logic: mode state machine, scroll engine, parameter
//! controllers, plus the ambient config/logging/interrupt plumbing shared by
//! the terminal UI and the CLI.

pub mod config;
pub mod core;
pub mod logging;
