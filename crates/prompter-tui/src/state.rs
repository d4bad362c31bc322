//! Application state composition.
//!
//! ```text
//! AppState
//! ├── prompter: Teleprompter   (mode, scroll engine, speed, font)
//! ├── editor: EditorState      (editable script view)
//! ├── display: DisplayView     (read-only presentation view)
//! ├── speed_entry: SpeedEntry  (speed text entry draft and focus)
//! └── chrome: Chrome           (control labels, visibility, notices)
//! ```
//!
//! The core owns behavior; everything here is view state the reducer
//! mutates and the renderer reads.

use prompter_core::core::scroll::{START_LABEL, STOP_LABEL};
use prompter_core::core::{Mode, Teleprompter, TeleprompterSettings, Transition};
use tokio::runtime::Handle;

use crate::features::controls::SpeedEntry;
use crate::features::display::DisplayView;
use crate::features::editor::EditorState;
use crate::render::AppLayout;

/// Shown in the status line once the script has scrolled to its end.
pub const END_NOTICE: &str = "End of script";

/// Labels and visibility of the controls.
///
/// Updated only from core notifications, so what is shown always matches
/// what the core last reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chrome {
    pub mode_label: &'static str,
    pub scroll_label: &'static str,
    pub scroll_visible: bool,
    pub notice: Option<&'static str>,
}

impl Default for Chrome {
    fn default() -> Self {
        Self {
            mode_label: Mode::Edit.toggle_label(),
            scroll_label: START_LABEL,
            scroll_visible: false,
            notice: None,
        }
    }
}

impl Chrome {
    pub fn on_mode_changed(&mut self, transition: &Transition) {
        self.mode_label = transition.to.toggle_label();
        self.scroll_visible = transition.entered_display();
        self.notice = None;
        if transition.stopped_scrolling {
            self.scroll_label = START_LABEL;
        }
    }

    pub fn on_running_changed(&mut self, is_running: bool) {
        self.scroll_label = if is_running { STOP_LABEL } else { START_LABEL };
        if is_running {
            self.notice = None;
        }
    }
}

pub struct AppState {
    pub prompter: Teleprompter,
    pub editor: EditorState,
    pub display: DisplayView,
    pub speed_entry: SpeedEntry,
    pub chrome: Chrome,
    /// Regions of the last frame, for mouse hit-testing.
    pub layout: AppLayout,
    pub should_quit: bool,
}

impl AppState {
    /// Starts in edit mode with `script` loaded into the editor.
    pub fn new(settings: TeleprompterSettings, script: &str, runtime: Handle) -> Self {
        let prompter = Teleprompter::new(settings, runtime);
        let mut editor = EditorState::new(script);
        let mut display = DisplayView::default();
        prompter.font.apply(&mut editor, &mut display);

        Self {
            prompter,
            editor,
            display,
            speed_entry: SpeedEntry::default(),
            chrome: Chrome::default(),
            layout: AppLayout::default(),
            should_quit: false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.prompter.current_mode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chrome_follows_transitions() {
        let mut chrome = Chrome::default();
        assert_eq!(chrome.mode_label, "Display Mode");
        assert!(!chrome.scroll_visible);

        chrome.on_mode_changed(&Transition {
            from: Mode::Edit,
            to: Mode::Display,
            stopped_scrolling: false,
        });
        assert_eq!(chrome.mode_label, "Edit Mode");
        assert!(chrome.scroll_visible);

        chrome.on_running_changed(true);
        assert_eq!(chrome.scroll_label, STOP_LABEL);

        chrome.on_mode_changed(&Transition {
            from: Mode::Display,
            to: Mode::Edit,
            stopped_scrolling: true,
        });
        assert_eq!(chrome.mode_label, "Display Mode");
        assert_eq!(chrome.scroll_label, START_LABEL);
        assert!(!chrome.scroll_visible);
    }

    #[test]
    fn starting_clears_the_end_notice() {
        let mut chrome = Chrome {
            notice: Some(END_NOTICE),
            ..Chrome::default()
        };
        chrome.on_running_changed(false);
        assert_eq!(chrome.notice, Some(END_NOTICE));
        chrome.on_running_changed(true);
        assert_eq!(chrome.notice, None);
    }

    #[tokio::test]
    async fn new_app_applies_font_to_both_views() {
        let settings = TeleprompterSettings {
            font_size: prompter_core::core::FontSize::new(30),
            ..TeleprompterSettings::default()
        };
        let app = AppState::new(settings, "hello", Handle::current());

        assert_eq!(app.mode(), Mode::Edit);
        assert_eq!(app.editor.font().size.get(), 30);
        assert_eq!(app.display.font().size.get(), 30);
        assert_eq!(app.editor.buffer.text(), "hello");
    }
}
