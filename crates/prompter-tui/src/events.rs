//! UI event types.
//!
//! Every input the reducer sees is a `UiEvent`: terminal input, the frame
//! size, pacing ticks from the scroll worker, and notifications raised by
//! core hooks through the runtime inbox.

use crossterm::event::Event as CrosstermEvent;
use prompter_core::core::{ScrollTick, Transition};

#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Render cadence tick.
    Tick,

    /// Current terminal size; always the first event of a loop iteration.
    Frame { width: u16, height: u16 },

    Terminal(CrosstermEvent),

    /// One pacing interval of the scroll worker elapsed.
    Scroll(ScrollTick),

    /// The mode state machine completed a transition.
    ModeChanged(Transition),

    /// Scrolling started or stopped, including natural completion.
    ScrollRunningChanged(bool),
}
