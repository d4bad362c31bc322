//! Reducer.
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use prompter_core::core::{
    FontSize, Mode, ScrollSpeed, ScrollSpeedController, ScrollTick, StepOutcome,
};
use ratatui::layout::Rect;
use tracing::debug;

use crate::common::slider::value_at;
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::controls::{CLOSE_LABEL, ControlsLayout};
use crate::render;
use crate::state::{AppState, END_NOTICE};

/// Rows moved per mouse wheel notch.
const WHEEL_ROWS: isize = 3;

pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => vec![],
        UiEvent::Frame { width, height } => {
            handle_frame(app, width, height);
            vec![]
        }
        UiEvent::Terminal(event) => handle_terminal_event(app, event),
        UiEvent::Scroll(tick) => {
            handle_scroll_tick(app, tick);
            vec![]
        }
        UiEvent::ModeChanged(transition) => {
            app.chrome.on_mode_changed(&transition);
            vec![]
        }
        UiEvent::ScrollRunningChanged(is_running) => {
            app.chrome.on_running_changed(is_running);
            vec![]
        }
    }
}

fn handle_frame(app: &mut AppState, width: u16, height: u16) {
    let layout = render::layout(Rect::new(0, 0, width, height));
    app.layout = layout;
    app.editor.set_viewport(layout.text.width, layout.text.height);
    app.display.set_viewport(layout.text.width, layout.text.height);
}

fn handle_scroll_tick(app: &mut AppState, tick: ScrollTick) {
    match app.prompter.engine.step(tick, &mut app.display) {
        StepOutcome::Completed => app.chrome.notice = Some(END_NOTICE),
        StepOutcome::SurfaceLost => debug!("display view lost while scrolling"),
        StepOutcome::Advanced(_) | StepOutcome::Halted | StepOutcome::Stale => {}
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Mouse(mouse) => handle_mouse(app, mouse),
        Event::Paste(text) => {
            handle_paste(app, &text);
            vec![]
        }
        _ => vec![],
    }
}

// ============================================================================
// Keyboard
// ============================================================================

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('q' | 'c') if ctrl => return close(app),
        KeyCode::Char('t') if ctrl => {
            toggle_mode(app);
            return vec![];
        }
        KeyCode::F(2) => {
            toggle_mode(app);
            return vec![];
        }
        KeyCode::F(5) => {
            nudge_speed(app, -ScrollSpeedController::STEP);
            return vec![];
        }
        KeyCode::F(6) => {
            nudge_speed(app, ScrollSpeedController::STEP);
            return vec![];
        }
        KeyCode::F(7) => {
            step_font(app, -1);
            return vec![];
        }
        KeyCode::F(8) => {
            step_font(app, 1);
            return vec![];
        }
        KeyCode::Tab | KeyCode::BackTab => {
            if app.speed_entry.is_focused() {
                commit_speed_entry(app);
            } else {
                app.speed_entry.focus(&app.prompter.speed);
            }
            return vec![];
        }
        _ => {}
    }

    if app.speed_entry.is_focused() {
        handle_speed_entry_key(app, key);
        return vec![];
    }

    match app.mode() {
        Mode::Edit => {
            app.editor.input(key);
            vec![]
        }
        Mode::Display => handle_display_key(app, key),
    }
}

fn handle_speed_entry_key(app: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => commit_speed_entry(app),
        KeyCode::Backspace => app.speed_entry.pop(),
        KeyCode::Char(ch)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            app.speed_entry.push(ch);
        }
        _ => {}
    }
}

/// The display view is read-only; keys drive scrolling and the controls.
fn handle_display_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let page = isize::try_from(app.display.height().saturating_sub(1).max(1)).unwrap_or(1);
    match key.code {
        KeyCode::Char(' ') => return vec![UiEffect::ToggleScrolling],
        KeyCode::Esc => toggle_mode(app),
        KeyCode::Up => scroll_rows(app, -1),
        KeyCode::Down => scroll_rows(app, 1),
        KeyCode::PageUp => scroll_rows(app, -page),
        KeyCode::PageDown => scroll_rows(app, page),
        KeyCode::Home => jump_display(app, 0.0),
        KeyCode::End => jump_display(app, 1.0),
        KeyCode::Char('-') => nudge_speed(app, -ScrollSpeedController::STEP),
        KeyCode::Char('+' | '=') => nudge_speed(app, ScrollSpeedController::STEP),
        KeyCode::Char('[') => step_font(app, -1),
        KeyCode::Char(']') => step_font(app, 1),
        _ => {}
    }
    vec![]
}

fn handle_paste(app: &mut AppState, text: &str) {
    if app.speed_entry.is_focused() {
        for ch in text.chars() {
            app.speed_entry.push(ch);
        }
    } else if app.mode() == Mode::Edit {
        app.editor.paste(text);
    }
}

// ============================================================================
// Mouse
// ============================================================================

fn handle_mouse(app: &mut AppState, mouse: MouseEvent) -> Vec<UiEffect> {
    let (x, y) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::ScrollUp => wheel(app, -WHEEL_ROWS),
        MouseEventKind::ScrollDown => wheel(app, WHEEL_ROWS),
        MouseEventKind::Down(MouseButton::Left) => {
            if ControlsLayout::hit(app.layout.controls, x, y) {
                return click_control(app, x, y);
            }
            commit_speed_entry(app);
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if ControlsLayout::hit(app.layout.controls, x, y) {
                drag_slider(app, x, y);
            }
        }
        _ => {}
    }
    vec![]
}

fn wheel(app: &mut AppState, rows: isize) {
    match app.mode() {
        Mode::Edit => app.editor.move_rows(rows),
        Mode::Display => scroll_rows(app, rows),
    }
}

fn click_control(app: &mut AppState, x: u16, y: u16) -> Vec<UiEffect> {
    let controls = ControlsLayout::new(app.layout.controls);

    if ControlsLayout::hit(controls.speed_entry, x, y) {
        app.speed_entry.focus(&app.prompter.speed);
        return vec![];
    }
    commit_speed_entry(app);

    if ControlsLayout::hit(controls.mode_button, x, y) {
        toggle_mode(app);
    } else if app.chrome.scroll_visible && ControlsLayout::hit(controls.scroll_button, x, y) {
        return vec![UiEffect::ToggleScrolling];
    } else if ControlsLayout::hit(close_target(controls.close), x, y) {
        return close(app);
    } else {
        drag_slider(app, x, y);
    }
    vec![]
}

/// Only the label itself is clickable, not the whole right-aligned remainder.
fn close_target(area: Rect) -> Rect {
    let width = (CLOSE_LABEL.chars().count() as u16).min(area.width);
    Rect {
        x: area.right() - width,
        width,
        ..area
    }
}

fn drag_slider(app: &mut AppState, x: u16, y: u16) {
    let controls = ControlsLayout::new(app.layout.controls);

    if ControlsLayout::hit(controls.font_slider, x, y) {
        let value = value_at(
            controls.font_slider,
            x,
            f64::from(FontSize::MIN),
            f64::from(FontSize::MAX),
        );
        app.prompter
            .font
            .set_from_continuous(value.round(), &mut app.editor, &mut app.display);
    } else if ControlsLayout::hit(controls.speed_slider, x, y) {
        let value = value_at(controls.speed_slider, x, ScrollSpeed::MIN, ScrollSpeed::MAX);
        app.prompter
            .speed
            .set_from_continuous((value * 10.0).round() / 10.0);
    }
}

// ============================================================================
// Actions
// ============================================================================

/// Close action. A pending speed draft is committed first.
fn close(app: &mut AppState) -> Vec<UiEffect> {
    commit_speed_entry(app);
    vec![UiEffect::Quit]
}

fn toggle_mode(app: &mut AppState) {
    commit_speed_entry(app);
    app.prompter.toggle_mode(&app.editor, &mut app.display);
}

fn commit_speed_entry(app: &mut AppState) {
    if let Some(input) = app.speed_entry.commit(&mut app.prompter.speed) {
        debug!(?input, "speed entry committed");
    }
}

fn nudge_speed(app: &mut AppState, delta: f64) {
    app.prompter.speed.nudge(delta);
}

fn step_font(app: &mut AppState, delta: i64) {
    let current = i64::from(app.prompter.font.size().get());
    app.prompter
        .font
        .set_font_size(current + delta, &mut app.editor, &mut app.display);
}

/// Manual scrolling of the display view by whole wrapped rows.
fn scroll_rows(app: &mut AppState, rows: isize) {
    let target = app.display.position() + app.display.rows_to_fraction(rows);
    jump_display(app, target);
}

fn jump_display(app: &mut AppState, fraction: f64) {
    if let Err(err) = app.prompter.engine.jump_to(&mut app.display, fraction) {
        debug!(%err, "manual scroll ignored");
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyEventState;
    use prompter_core::core::TeleprompterSettings;
    use prompter_core::core::surface::EditSurface;
    use tokio::runtime::Handle;

    use super::*;

    const WIDTH: u16 = 120;
    const HEIGHT: u16 = 12;

    fn app(script: &str) -> AppState {
        let mut app = AppState::new(TeleprompterSettings::default(), script, Handle::current());
        update(
            &mut app,
            UiEvent::Frame {
                width: WIDTH,
                height: HEIGHT,
            },
        );
        app
    }

    fn key(app: &mut AppState, code: KeyCode, modifiers: KeyModifiers) -> Vec<UiEffect> {
        let event = KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        };
        update(app, UiEvent::Terminal(Event::Key(event)))
    }

    fn press(app: &mut AppState, code: KeyCode) -> Vec<UiEffect> {
        key(app, code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut AppState, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    fn click(app: &mut AppState, x: u16, y: u16) -> Vec<UiEffect> {
        let event = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: x,
            row: y,
            modifiers: KeyModifiers::NONE,
        };
        update(app, UiEvent::Terminal(Event::Mouse(event)))
    }

    fn long_script(lines: usize) -> String {
        (0..lines).map(|i| format!("line {i}\n")).collect()
    }

    #[tokio::test]
    async fn typing_edits_the_script() {
        let mut app = app("");
        type_text(&mut app, "Hello");
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "world");

        assert_eq!(app.editor.content(), "Hello\nworld");
    }

    #[tokio::test]
    async fn entering_display_snapshots_the_editor() {
        let mut app = app("");
        type_text(&mut app, "Tonight's news");
        key(&mut app, KeyCode::Char('t'), KeyModifiers::CONTROL);

        assert_eq!(app.mode(), Mode::Display);
        assert_eq!(app.display.content(), "Tonight's news");
        assert!(!app.display.is_interactive());

        // Typing in display mode does not reach the script.
        type_text(&mut app, "xyz");
        assert_eq!(app.editor.content(), "Tonight's news");
    }

    #[tokio::test]
    async fn space_toggles_scrolling_only_in_display() {
        let mut app = app("script");
        assert_eq!(press(&mut app, KeyCode::Char(' ')), vec![]);
        assert_eq!(app.editor.content(), " script");

        press(&mut app, KeyCode::F(2));
        assert_eq!(
            press(&mut app, KeyCode::Char(' ')),
            vec![UiEffect::ToggleScrolling]
        );
    }

    #[tokio::test]
    async fn close_commits_a_pending_speed_draft() {
        let mut app = app("script");
        press(&mut app, KeyCode::Tab);
        for _ in 0..3 {
            press(&mut app, KeyCode::Backspace);
        }
        type_text(&mut app, "3.5");

        let effects = key(&mut app, KeyCode::Char('q'), KeyModifiers::CONTROL);

        assert_eq!(effects, vec![UiEffect::Quit]);
        assert!(!app.speed_entry.is_focused());
        assert!((app.prompter.speed.speed().get() - 3.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn invalid_speed_text_reverts() {
        let mut app = app("script");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "abc");
        press(&mut app, KeyCode::Enter);

        assert!((app.prompter.speed.speed().get() - 1.0).abs() < 1e-9);
        assert_eq!(app.prompter.speed.text(), "1.0");
        assert_eq!(app.editor.content(), "script");
    }

    #[tokio::test]
    async fn font_keys_resize_both_views() {
        let mut app = app("script");
        press(&mut app, KeyCode::F(8));
        assert_eq!(app.editor.font().size.get(), FontSize::DEFAULT + 1);
        assert_eq!(app.display.font().size.get(), FontSize::DEFAULT + 1);

        for _ in 0..200 {
            press(&mut app, KeyCode::F(7));
        }
        assert_eq!(app.prompter.font.size().get(), FontSize::MIN);
        assert_eq!(app.prompter.font.readout(), "8");
    }

    #[tokio::test]
    async fn speed_keys_clamp_to_range() {
        let mut app = app("script");
        for _ in 0..100 {
            press(&mut app, KeyCode::F(6));
        }
        assert!((app.prompter.speed.speed().get() - ScrollSpeed::MAX).abs() < 1e-9);
    }

    #[tokio::test]
    async fn arrow_keys_scroll_the_display_manually() {
        let mut app = app(&long_script(100));
        press(&mut app, KeyCode::F(2));
        assert!(app.display.position().abs() < f64::EPSILON);

        press(&mut app, KeyCode::Down);
        assert!(app.display.position() > 0.0);
        assert_eq!(app.display.top_row(), 1);

        press(&mut app, KeyCode::End);
        let (_, end) = app.display.visible_fraction();
        assert!((end - 1.0).abs() < 1e-9);

        press(&mut app, KeyCode::Home);
        assert_eq!(app.display.top_row(), 0);
    }

    #[tokio::test]
    async fn page_keys_move_by_a_screen_minus_one_row() {
        let mut app = app(&long_script(100));
        press(&mut app, KeyCode::F(2));
        let page = usize::from(app.display.height() - 1);
        assert!(page > 1);

        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.display.top_row(), page);

        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.display.top_row(), 2 * page);

        press(&mut app, KeyCode::PageUp);
        assert_eq!(app.display.top_row(), page);
    }

    #[tokio::test]
    async fn reentering_display_starts_from_the_top() {
        let mut app = app(&long_script(100));
        press(&mut app, KeyCode::F(2));
        press(&mut app, KeyCode::End);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode(), Mode::Edit);

        press(&mut app, KeyCode::F(2));
        assert_eq!(app.display.top_row(), 0);
        assert!(app.prompter.engine.position().abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn reaching_the_end_sets_the_notice() {
        let mut app = app("short");
        press(&mut app, KeyCode::F(2));
        assert!(app.prompter.toggle_scrolling());

        let mut tick = None;
        for _ in 0..100 {
            tick = app.prompter.engine.try_next_tick();
            if tick.is_some() {
                break;
            }
            tokio::task::yield_now().await;
        }
        let tick = tick.expect("worker sends a tick");
        update(&mut app, UiEvent::Scroll(tick));

        assert_eq!(app.chrome.notice, Some(END_NOTICE));
        assert!(!app.prompter.engine.is_running());
    }

    #[tokio::test]
    async fn core_notifications_update_labels() {
        let mut app = app("script");
        let transition = app.prompter.toggle_mode(&app.editor, &mut app.display);
        update(&mut app, UiEvent::ModeChanged(transition));
        update(&mut app, UiEvent::ScrollRunningChanged(true));

        assert_eq!(app.chrome.mode_label, "Edit Mode");
        assert!(app.chrome.scroll_visible);
        assert_eq!(app.chrome.scroll_label, "Stop Scrolling");
    }

    #[tokio::test]
    async fn clicking_controls() {
        let mut app = app("script");
        let controls = ControlsLayout::new(app.layout.controls);

        click(&mut app, controls.mode_button.x, controls.mode_button.y);
        assert_eq!(app.mode(), Mode::Display);

        // The hook would normally deliver this through the inbox.
        app.chrome.scroll_visible = true;
        assert_eq!(
            click(&mut app, controls.scroll_button.x, controls.scroll_button.y),
            vec![UiEffect::ToggleScrolling]
        );

        let slider = controls.font_slider;
        click(&mut app, slider.right() - 1, slider.y);
        assert_eq!(app.prompter.font.size().get(), FontSize::MAX);

        let slider = controls.speed_slider;
        click(&mut app, slider.x, slider.y);
        assert!((app.prompter.speed.speed().get() - ScrollSpeed::MIN).abs() < 1e-9);

        click(&mut app, controls.speed_entry.x, controls.speed_entry.y);
        assert!(app.speed_entry.is_focused());
        click(&mut app, 0, 0);
        assert!(!app.speed_entry.is_focused());

        let close = close_target(controls.close);
        assert_eq!(click(&mut app, close.x, close.y), vec![UiEffect::Quit]);
    }

    #[tokio::test]
    async fn paste_goes_to_the_editor() {
        let mut app = app("");
        update(
            &mut app,
            UiEvent::Terminal(Event::Paste("pasted\r\ntext".to_string())),
        );
        assert_eq!(app.editor.content(), "pasted\ntext");
    }
}
