use prompter_core::core::FontWeight;
use ratatui::Frame;
use ratatui::layout::Position;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

use super::EditorState;
use crate::common::Scrollbar;
use crate::common::text::TAB_WIDTH;
use crate::render::{AppLayout, centered_column};

pub const EDIT_BG: Color = Color::Rgb(0x2b, 0x2b, 0x2b);
pub const EDIT_FG: Color = Color::White;

pub fn render_editor(editor: &EditorState, frame: &mut Frame, layout: &AppLayout, focused: bool) {
    let mut style = Style::default().fg(EDIT_FG).bg(EDIT_BG);
    if editor.font().weight == FontWeight::Bold {
        style = style.add_modifier(Modifier::BOLD);
    }
    frame.render_widget(Block::default().style(style), layout.script);

    let column = centered_column(layout.text, editor.column_width());
    let height = usize::from(column.height);
    let rows = editor.visual_rows();
    let lines = editor.buffer.lines();

    let visible: Vec<Line<'static>> = rows
        .iter()
        .skip(editor.scroll_top())
        .take(height)
        .map(|row| {
            let text: String = lines[row.line]
                .chars()
                .skip(row.chars.start)
                .take(row.chars.len())
                .flat_map(|ch| {
                    let expanded = if ch == '\t' { TAB_WIDTH } else { 1 };
                    std::iter::repeat_n(if ch == '\t' { ' ' } else { ch }, expanded)
                })
                .collect();
            Line::from(text)
        })
        .collect();
    frame.render_widget(Paragraph::new(visible).style(style), column);

    let total = rows.len().max(1) as f64;
    let start = editor.scroll_top() as f64 / total;
    let end = (editor.scroll_top() + height) as f64 / total;
    frame.render_widget(
        Scrollbar::new(start, end).style(Style::default().fg(Color::Gray).bg(EDIT_BG)),
        layout.scrollbar,
    );

    if focused {
        let (row, x) = editor.cursor_visual();
        if let Some(offset) = row.checked_sub(editor.scroll_top())
            && offset < height
        {
            frame.set_cursor_position(Position::new(column.x + x, column.y + offset as u16));
        }
    }
}
