//! Edit ⇄ Display state machine.

use std::sync::Arc;

use tracing::info;

use crate::core::scroll::ScrollEngine;
use crate::core::shared::SharedState;
use crate::core::surface::{DisplaySurface, EditSurface};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Edit,
    Display,
}

impl Mode {
    /// Label of the mode toggle control: names the mode it switches *to*.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Mode::Edit => "Display Mode",
            Mode::Display => "Edit Mode",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Edit => "edit",
            Mode::Display => "display",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Mode,
    pub to: Mode,
    /// Scrolling was running and had to be stopped to leave display mode.
    pub stopped_scrolling: bool,
}

impl Transition {
    pub fn entered_display(&self) -> bool {
        self.to == Mode::Display
    }
}

/// Called after every completed transition.
pub type TransitionHook = Box<dyn FnMut(&Transition) + Send>;

/// Owns the current [`Mode`].
///
/// Entering display snapshots the editable content into the display view and
/// rewinds it. Leaving display stops the scroll engine before the mode flips,
/// and never writes to the editable view: the edit surface is only borrowed
/// immutably.
pub struct ModeStateMachine {
    shared: Arc<SharedState>,
    hook: Option<TransitionHook>,
}

impl std::fmt::Debug for ModeStateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModeStateMachine")
            .field("mode", &self.current_mode())
            .finish_non_exhaustive()
    }
}

impl ModeStateMachine {
    pub fn new(shared: Arc<SharedState>) -> Self {
        Self { shared, hook: None }
    }

    pub fn on_transition<F>(&mut self, hook: F)
    where
        F: FnMut(&Transition) + Send + 'static,
    {
        self.hook = Some(Box::new(hook));
    }

    pub fn current_mode(&self) -> Mode {
        self.shared.mode()
    }

    pub fn toggle(
        &mut self,
        edit: &dyn EditSurface,
        display: &mut dyn DisplaySurface,
        engine: &mut ScrollEngine,
    ) -> Transition {
        let from = self.current_mode();
        let transition = match from {
            Mode::Edit => {
                let snapshot = edit.content();
                display.set_content(&snapshot);
                engine.reset(display);
                display.set_interactive(false);
                self.shared.set_mode(Mode::Display);
                Transition {
                    from,
                    to: Mode::Display,
                    stopped_scrolling: false,
                }
            }
            Mode::Display => {
                // Must finish before the mode flips so no step can land on a
                // view the user already left.
                let stopped_scrolling = engine.stop();
                self.shared.set_mode(Mode::Edit);
                Transition {
                    from,
                    to: Mode::Edit,
                    stopped_scrolling,
                }
            }
        };

        info!(
            from = transition.from.name(),
            to = transition.to.name(),
            stopped_scrolling = transition.stopped_scrolling,
            "mode changed"
        );
        if let Some(hook) = self.hook.as_mut() {
            hook(&transition);
        }
        transition
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use tokio::runtime::Handle;

    use super::*;
    use crate::core::scroll::ScrollSettings;
    use crate::core::surface::testing::{FakeDisplay, FakeEditor};

    struct Fixture {
        machine: ModeStateMachine,
        engine: ScrollEngine,
        edit: FakeEditor,
        display: FakeDisplay,
    }

    fn fixture(text: &str) -> Fixture {
        let shared = Arc::new(SharedState::default());
        Fixture {
            machine: ModeStateMachine::new(Arc::clone(&shared)),
            engine: ScrollEngine::new(shared, Handle::current(), ScrollSettings::default()),
            edit: FakeEditor::new(text),
            display: FakeDisplay::new(5),
        }
    }

    impl Fixture {
        fn toggle(&mut self) -> Transition {
            self.machine
                .toggle(&self.edit, &mut self.display, &mut self.engine)
        }
    }

    #[tokio::test]
    async fn starts_in_edit_mode() {
        let f = fixture("");
        assert_eq!(f.machine.current_mode(), Mode::Edit);
        assert_eq!(f.machine.current_mode().toggle_label(), "Display Mode");
    }

    #[tokio::test]
    async fn entering_display_snapshots_content_verbatim() {
        let text = "  Line one\n\n\tline two with trailing space \nünïcödé\n";
        let mut f = fixture(text);

        let transition = f.toggle();

        assert!(transition.entered_display());
        assert_eq!(f.machine.current_mode(), Mode::Display);
        assert_eq!(f.display.text.as_bytes(), text.as_bytes());
        assert!(!f.display.interactive);
        assert_eq!(f.machine.current_mode().toggle_label(), "Edit Mode");
    }

    #[tokio::test]
    async fn snapshot_is_overwritten_on_every_entry() {
        let mut f = fixture("first");
        f.toggle();
        f.toggle();

        f.edit.text = "second".to_string();
        f.toggle();

        assert_eq!(f.display.text, "second");
    }

    #[tokio::test]
    async fn round_trip_leaves_edit_buffer_untouched() {
        let mut f = fixture("keep me");

        f.toggle();
        f.display.text = "display-side change".to_string();
        f.toggle();

        assert_eq!(f.edit.text, "keep me");
        assert_eq!(f.edit.writes, 0);
        assert_eq!(f.machine.current_mode(), Mode::Edit);
    }

    #[tokio::test(start_paused = true)]
    async fn leaving_display_stops_scrolling() {
        let mut f = fixture(&"line\n".repeat(100));
        f.toggle();
        assert!(f.engine.start());

        let transition = f.toggle();

        assert!(transition.stopped_scrolling);
        assert!(!f.engine.is_running());
        assert!(f.engine.shutdown(Duration::from_millis(10)).await);
    }

    #[tokio::test]
    async fn leaving_display_when_idle_reports_no_stop() {
        let mut f = fixture("text");
        f.toggle();
        let transition = f.toggle();
        assert!(!transition.stopped_scrolling);
        assert!(!f.engine.is_running());
    }

    #[tokio::test]
    async fn reentering_display_rewinds_to_top() {
        let mut f = fixture(&"line\n".repeat(100));
        f.toggle();
        f.engine.jump_to(&mut f.display, 0.5).unwrap();
        f.toggle();

        f.toggle();

        assert!((f.display.position - 0.0).abs() < f64::EPSILON);
        assert!((f.engine.position() - 0.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn hook_sees_every_transition() {
        let mut f = fixture("text");
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        f.machine
            .on_transition(move |t| sink.lock().unwrap().push((t.from, t.to)));

        f.toggle();
        f.toggle();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![(Mode::Edit, Mode::Display), (Mode::Display, Mode::Edit)]
        );
    }
}
