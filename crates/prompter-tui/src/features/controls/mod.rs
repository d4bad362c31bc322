//! Controls slice: mode and scroll buttons, font and speed sliders, speed entry.

mod render;
mod state;

pub use render::{CLOSE_LABEL, ControlsLayout, render_controls};
pub use state::SpeedEntry;
