use std::ops::Range;

use crossterm::event::KeyEvent;
use prompter_core::core::{EditSurface, Font};

use super::text_buffer::TextBuffer;
use crate::common::text::{self, char_width, wrap_ranges};

/// One on-screen row of the editor: a slice of a buffer line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualRow {
    pub line: usize,
    pub chars: Range<usize>,
}

/// The editable script view.
#[derive(Debug, Clone)]
pub struct EditorState {
    pub buffer: TextBuffer,
    font: Font,
    available_width: u16,
    height: u16,
    scroll_top: usize,
}

impl EditorState {
    pub fn new(text: &str) -> Self {
        Self {
            buffer: TextBuffer::from_text(text),
            font: Font::default(),
            available_width: 0,
            height: 0,
            scroll_top: 0,
        }
    }

    pub fn font(&self) -> Font {
        self.font
    }

    /// Text column width for the current font.
    pub fn column_width(&self) -> u16 {
        text::column_width(self.available_width, self.font.size)
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// First visual row shown.
    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    /// Records the area the editor is drawn in.
    pub fn set_viewport(&mut self, available_width: u16, height: u16) {
        self.available_width = available_width;
        self.height = height;
        self.scroll_to_cursor();
    }

    /// Routes an editing key to the buffer. Returns whether it was consumed.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        let handled = self.buffer.input(key);
        self.scroll_to_cursor();
        handled
    }

    pub fn paste(&mut self, text: &str) {
        self.buffer.insert_str(text);
        self.scroll_to_cursor();
    }

    /// Moves the cursor by whole lines (page keys, mouse wheel).
    pub fn move_rows(&mut self, rows: isize) {
        self.buffer.move_rows(rows);
        self.scroll_to_cursor();
    }

    /// All rows of the buffer wrapped to the current column.
    pub fn visual_rows(&self) -> Vec<VisualRow> {
        let width = usize::from(self.column_width());
        self.buffer
            .lines()
            .iter()
            .enumerate()
            .flat_map(|(line, content)| {
                wrap_ranges(content, width)
                    .into_iter()
                    .map(move |chars| VisualRow { line, chars })
            })
            .collect()
    }

    /// Cursor as `(visual row, column)`.
    pub fn cursor_visual(&self) -> (usize, u16) {
        let width = usize::from(self.column_width()).max(1);
        let (row, col) = self.buffer.cursor();
        let lines = self.buffer.lines();

        let rows_before: usize = lines[..row]
            .iter()
            .map(|line| wrap_ranges(line, width).len())
            .sum();

        let ranges = wrap_ranges(&lines[row], width);
        let last = ranges.len() - 1;
        let (index, range) = ranges
            .iter()
            .enumerate()
            .find(|(i, r)| r.contains(&col) || (*i == last && col == r.end))
            .map_or((last, ranges[last].clone()), |(i, r)| (i, r.clone()));

        let x: usize = lines[row]
            .chars()
            .skip(range.start)
            .take(col - range.start)
            .map(char_width)
            .sum();
        (rows_before + index, x.min(width - 1) as u16)
    }

    fn scroll_to_cursor(&mut self) {
        if self.height == 0 {
            return;
        }
        let height = usize::from(self.height);
        let (row, _) = self.cursor_visual();
        if row < self.scroll_top {
            self.scroll_top = row;
        } else if row >= self.scroll_top + height {
            self.scroll_top = row + 1 - height;
        }
    }
}

impl EditSurface for EditorState {
    fn content(&self) -> String {
        self.buffer.text()
    }

    fn set_content(&mut self, text: &str) {
        self.buffer.set_text(text);
        self.scroll_top = 0;
    }

    fn set_font(&mut self, font: Font) {
        self.font = font;
        self.scroll_to_cursor();
    }
}
