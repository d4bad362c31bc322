use prompter_core::core::{FontSize, ScrollSpeed};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::common::Slider;
use crate::state::AppState;

const BAR_BG: Color = Color::Rgb(0x3c, 0x3c, 0x3c);
const BUTTON_STYLE: Style = Style::new().fg(Color::Black).bg(Color::Gray);
const ACCENT: Color = Color::Cyan;

const MODE_BUTTON_WIDTH: u16 = 16;
const SCROLL_BUTTON_WIDTH: u16 = 19;
const SLIDER_WIDTH: u16 = 12;
const ENTRY_WIDTH: u16 = 7;

pub const CLOSE_LABEL: &str = "^Q Close";

/// Where each control sits in the control bar.
///
/// Shared by rendering and mouse hit-testing so both agree on positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlsLayout {
    pub mode_button: Rect,
    pub scroll_button: Rect,
    pub font_label: Rect,
    pub font_slider: Rect,
    pub font_readout: Rect,
    pub speed_label: Rect,
    pub speed_slider: Rect,
    pub speed_entry: Rect,
    pub close: Rect,
}

impl ControlsLayout {
    pub fn new(bar: Rect) -> Self {
        let [
            mode_button,
            scroll_button,
            font_label,
            font_slider,
            font_readout,
            speed_label,
            speed_slider,
            speed_entry,
            close,
        ] = Layout::horizontal([
            Constraint::Length(MODE_BUTTON_WIDTH),
            Constraint::Length(SCROLL_BUTTON_WIDTH),
            Constraint::Length(4),
            Constraint::Length(SLIDER_WIDTH),
            Constraint::Length(2),
            Constraint::Length(5),
            Constraint::Length(SLIDER_WIDTH),
            Constraint::Length(ENTRY_WIDTH),
            Constraint::Min(0),
        ])
        .spacing(1)
        .areas(bar);

        Self {
            mode_button,
            scroll_button,
            font_label,
            font_slider,
            font_readout,
            speed_label,
            speed_slider,
            speed_entry,
            close,
        }
    }

    /// Whether `(x, y)` hits `rect`.
    pub fn hit(rect: Rect, x: u16, y: u16) -> bool {
        rect.contains(Position::new(x, y))
    }
}

fn button(label: &str) -> Paragraph<'_> {
    Paragraph::new(format!("[ {label} ]"))
        .style(BUTTON_STYLE)
        .alignment(Alignment::Center)
}

pub fn render_controls(app: &AppState, frame: &mut Frame, area: Rect) {
    let bar = Style::default().fg(Color::White).bg(BAR_BG);
    frame.render_widget(Block::default().style(bar), area);
    let layout = ControlsLayout::new(area);

    frame.render_widget(button(app.chrome.mode_label), layout.mode_button);
    if app.chrome.scroll_visible {
        frame.render_widget(button(app.chrome.scroll_label), layout.scroll_button);
    }

    let font = &app.prompter.font;
    frame.render_widget(Paragraph::new("Font").style(bar), layout.font_label);
    frame.render_widget(
        Slider::new(
            f64::from(font.size().get()),
            f64::from(FontSize::MIN),
            f64::from(FontSize::MAX),
        )
        .style(bar)
        .knob_style(bar.fg(ACCENT)),
        layout.font_slider,
    );
    frame.render_widget(
        Paragraph::new(font.readout()).style(bar).alignment(Alignment::Right),
        layout.font_readout,
    );

    let speed = &app.prompter.speed;
    frame.render_widget(Paragraph::new("Speed").style(bar), layout.speed_label);
    frame.render_widget(
        Slider::new(speed.continuous_value(), ScrollSpeed::MIN, ScrollSpeed::MAX)
            .style(bar)
            .knob_style(bar.fg(ACCENT)),
        layout.speed_slider,
    );

    let entry_style = if app.speed_entry.is_focused() {
        Style::default().fg(Color::Black).bg(Color::White)
    } else {
        bar.add_modifier(Modifier::UNDERLINED)
    };
    let shown = app.speed_entry.shown(speed);
    frame.render_widget(
        Paragraph::new(Line::from(vec![Span::styled(format!("{shown:<6}"), entry_style)])),
        layout.speed_entry,
    );
    if app.speed_entry.is_focused() {
        let x = layout.speed_entry.x + (shown.chars().count() as u16).min(ENTRY_WIDTH - 1);
        frame.set_cursor_position(Position::new(x, layout.speed_entry.y));
    }

    frame.render_widget(
        Paragraph::new(CLOSE_LABEL).style(bar).alignment(Alignment::Right),
        layout.close,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controls_are_laid_out_left_to_right_without_overlap() {
        let layout = ControlsLayout::new(Rect::new(0, 10, 120, 1));
        let order = [
            layout.mode_button,
            layout.scroll_button,
            layout.font_label,
            layout.font_slider,
            layout.font_readout,
            layout.speed_label,
            layout.speed_slider,
            layout.speed_entry,
            layout.close,
        ];
        for pair in order.windows(2) {
            assert!(pair[0].right() < pair[1].x || pair[0].width == 0);
        }
        assert_eq!(layout.mode_button.width, MODE_BUTTON_WIDTH);
        assert_eq!(layout.font_slider.width, SLIDER_WIDTH);
        assert!(ControlsLayout::hit(layout.mode_button, 0, 10));
        assert!(!ControlsLayout::hit(layout.mode_button, 0, 9));
    }
}
