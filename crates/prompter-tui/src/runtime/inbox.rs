//! Event inbox and the core hooks that feed it.

use prompter_core::core::{Teleprompter, Transition};
use tokio::sync::mpsc;

use crate::events::UiEvent;

pub type UiEventSender = mpsc::UnboundedSender<UiEvent>;
pub type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;

pub fn channel() -> (UiEventSender, UiEventReceiver) {
    mpsc::unbounded_channel()
}

/// Routes mode transitions and scroll start/stop notifications into the inbox.
///
/// Hooks fire inside the reducer; the resulting events are handled on the
/// next loop iteration, so the reducer never re-enters itself.
pub fn connect(prompter: &mut Teleprompter, tx: &UiEventSender) {
    let transitions = tx.clone();
    prompter.mode.on_transition(move |transition: &Transition| {
        let _ = transitions.send(UiEvent::ModeChanged(*transition));
    });

    let running = tx.clone();
    prompter.engine.on_running_changed(move |is_running| {
        let _ = running.send(UiEvent::ScrollRunningChanged(is_running));
    });
}

#[cfg(test)]
mod tests {
    use prompter_core::core::{Mode, TeleprompterSettings};
    use tokio::runtime::Handle;

    use super::*;
    use crate::features::display::DisplayView;
    use crate::features::editor::EditorState;

    #[tokio::test]
    async fn hooks_forward_into_inbox() {
        let mut prompter = Teleprompter::new(TeleprompterSettings::default(), Handle::current());
        let (tx, mut rx) = channel();
        connect(&mut prompter, &tx);

        let editor = EditorState::new("script");
        let mut display = DisplayView::default();
        display.set_viewport(40, 10);
        prompter.toggle_mode(&editor, &mut display);

        match rx.try_recv() {
            Ok(UiEvent::ModeChanged(t)) => assert_eq!(t.to, Mode::Display),
            other => panic!("unexpected inbox content: {other:?}"),
        }

        assert!(prompter.toggle_scrolling());
        assert!(matches!(
            rx.try_recv(),
            Ok(UiEvent::ScrollRunningChanged(true))
        ));
        prompter.engine.stop();
    }
}
