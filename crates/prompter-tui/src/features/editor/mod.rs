//! Editor slice: the editable script view.

mod render;
mod state;
mod text_buffer;

pub use render::render_editor;
pub use state::{EditorState, VisualRow};
pub use text_buffer::{CursorMove, TextBuffer};
