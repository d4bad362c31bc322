//! Pure view/render functions.
//!
//! Functions here take `&AppState`, draw to a ratatui `Frame` and never
//! mutate state or return effects.

use prompter_core::core::Mode;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::features::controls::render_controls;
use crate::features::display::render_display;
use crate::features::editor::render_editor;
use crate::state::AppState;

/// Horizontal margin around the text column (left and right).
pub const TEXT_MARGIN: u16 = 1;

/// Width reserved for the scrollbar on the right side.
const SCROLLBAR_WIDTH: u16 = 1;

const CONTROLS_HEIGHT: u16 = 1;
const STATUS_HEIGHT: u16 = 1;

/// Screen regions, computed once per frame size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppLayout {
    /// Whole script pane, filled with the active view's background.
    pub script: Rect,
    /// Area available to the text column, inside the margins.
    pub text: Rect,
    pub scrollbar: Rect,
    pub controls: Rect,
    pub status: Rect,
}

pub fn layout(area: Rect) -> AppLayout {
    let [script, controls, status] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(CONTROLS_HEIGHT),
        Constraint::Length(STATUS_HEIGHT),
    ])
    .areas(area);

    let [_, text, _, scrollbar] = Layout::horizontal([
        Constraint::Length(TEXT_MARGIN),
        Constraint::Min(0),
        Constraint::Length(TEXT_MARGIN),
        Constraint::Length(SCROLLBAR_WIDTH),
    ])
    .areas(script);

    AppLayout {
        script,
        text,
        scrollbar,
        controls,
        status,
    }
}

/// Centers a column of `width` cells inside `text`.
pub fn centered_column(text: Rect, width: u16) -> Rect {
    let width = width.min(text.width);
    Rect {
        x: text.x + (text.width - width) / 2,
        width,
        ..text
    }
}

/// Renders the entire UI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let layout = layout(frame.area());

    match app.mode() {
        Mode::Edit => render_editor(
            &app.editor,
            frame,
            &layout,
            !app.speed_entry.is_focused(),
        ),
        Mode::Display => render_display(&app.display, frame, &layout),
    }

    render_controls(app, frame, layout.controls);
    render_status_line(app, frame, layout.status);
}

fn key_hints(mode: Mode) -> &'static str {
    match mode {
        Mode::Edit => "^T display · F7/F8 font · F5/F6 speed · Tab speed entry",
        Mode::Display => "Space start/stop · ↑↓ PgUp PgDn scroll · -/+ speed · [ ] font · ^T edit",
    }
}

fn render_status_line(app: &AppState, frame: &mut Frame, area: Rect) {
    let mode = app.mode();
    let mut spans = vec![
        Span::styled(
            format!(" {} ", mode.name().to_uppercase()),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
    ];
    if let Some(notice) = app.chrome.notice {
        spans.push(Span::styled(
            notice,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw("  "));
    }
    spans.push(Span::styled(
        key_hints(mode),
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
