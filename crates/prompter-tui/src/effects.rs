//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! The reducer only mutates view state; anything that spawns or cancels
//! background work goes through here.

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEffect {
    /// Close action: leave the event loop and shut down.
    Quit,

    /// Scroll toggle control: start the worker if idle, stop it if running.
    ToggleScrolling,
}
