//! Display slice: the high-contrast presentation view.

mod render;
mod state;

pub use render::render_display;
pub use state::DisplayView;
