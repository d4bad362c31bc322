use prompter_core::core::FontWeight;
use ratatui::Frame;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

use super::DisplayView;
use crate::common::Scrollbar;
use crate::render::{AppLayout, centered_column};

pub const DISPLAY_FG: Color = Color::White;
pub const DISPLAY_BG: Color = Color::Black;

/// White on black; bold follows the display font weight.
pub fn display_style(view: &DisplayView) -> Style {
    let style = Style::default().fg(DISPLAY_FG).bg(DISPLAY_BG);
    match view.font().weight {
        FontWeight::Bold => style.add_modifier(Modifier::BOLD),
        FontWeight::Normal => style,
    }
}

pub fn render_display(view: &DisplayView, frame: &mut Frame, layout: &AppLayout) {
    let style = display_style(view);
    frame.render_widget(Block::default().style(style), layout.script);

    let column = centered_column(layout.text, view.column_width());
    let lines: Vec<Line<'_>> = view
        .visible_rows()
        .iter()
        .map(|row| Line::from(row.as_str()))
        .collect();
    frame.render_widget(Paragraph::new(lines).style(style), column);

    let (start, end) = view.visible_fraction();
    frame.render_widget(
        Scrollbar::new(start, end).style(Style::default().fg(Color::DarkGray).bg(DISPLAY_BG)),
        layout.scrollbar,
    );
}
