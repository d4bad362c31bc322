//! Line-based buffer behind the script editor.
//!
//! Lines never contain `\n`; joining them with `\n` gives back the script
//! exactly as loaded or typed.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Up,
    Down,
    Forward,
    Back,
    LineStart,
    LineEnd,
    Top,
    Bottom,
    WordBack,
    WordForward,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    lines: Vec<String>,
    row: usize,
    col: usize,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self {
            lines: vec![String::new()],
            row: 0,
            col: 0,
        }
    }
}

impl TextBuffer {
    /// Buffer holding `text` with the cursor at the start.
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: normalize_newlines(text).split('\n').map(str::to_string).collect(),
            row: 0,
            col: 0,
        }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Cursor as `(row, col)` in characters.
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Replaces the whole content and moves the cursor to the start.
    pub fn set_text(&mut self, text: &str) {
        *self = Self::from_text(text);
    }

    /// Inserts `text` at the cursor; pasted `\r\n` and `\r` become `\n`.
    pub fn insert_str(&mut self, text: &str) {
        let text = normalize_newlines(text);
        let mut parts = text.split('\n');
        let Some(first) = parts.next() else {
            return;
        };

        let line = &mut self.lines[self.row];
        let at = byte_index(line, self.col);
        let tail = line.split_off(at);
        line.push_str(first);
        self.col += first.chars().count();

        for part in parts {
            self.row += 1;
            self.lines.insert(self.row, part.to_string());
            self.col = part.chars().count();
        }
        self.lines[self.row].push_str(&tail);
    }

    pub fn insert_char(&mut self, ch: char) {
        let mut utf8 = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut utf8));
    }

    /// Backspace.
    pub fn delete_back(&mut self) {
        if self.col > 0 {
            let line = &mut self.lines[self.row];
            let start = byte_index(line, self.col - 1);
            let end = byte_index(line, self.col);
            line.replace_range(start..end, "");
            self.col -= 1;
        } else if self.row > 0 {
            let current = self.lines.remove(self.row);
            self.row -= 1;
            self.col = char_len(&self.lines[self.row]);
            self.lines[self.row].push_str(&current);
        }
    }

    /// Delete key.
    pub fn delete_forward(&mut self) {
        let len = char_len(&self.lines[self.row]);
        if self.col < len {
            let line = &mut self.lines[self.row];
            let start = byte_index(line, self.col);
            let end = byte_index(line, self.col + 1);
            line.replace_range(start..end, "");
        } else if self.row + 1 < self.lines.len() {
            let next = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(&next);
        }
    }

    /// Deletes back to the start of the previous word (Ctrl+W).
    pub fn delete_word_back(&mut self) {
        let end = (self.row, self.col);
        self.move_cursor(CursorMove::WordBack);
        let start = (self.row, self.col);
        if start == end {
            return;
        }
        if start.0 == end.0 {
            let line = &mut self.lines[start.0];
            let from = byte_index(line, start.1);
            let to = byte_index(line, end.1);
            line.replace_range(from..to, "");
        } else {
            let tail = self.lines[end.0].chars().skip(end.1).collect::<String>();
            self.lines.drain(start.0 + 1..=end.0);
            let line = &mut self.lines[start.0];
            line.truncate(byte_index(line, start.1));
            line.push_str(&tail);
        }
    }

    pub fn move_cursor(&mut self, movement: CursorMove) {
        match movement {
            CursorMove::Up => {
                if self.row > 0 {
                    self.row -= 1;
                    self.clamp_col();
                }
            }
            CursorMove::Down => {
                if self.row + 1 < self.lines.len() {
                    self.row += 1;
                    self.clamp_col();
                }
            }
            CursorMove::Forward => {
                if self.col < char_len(&self.lines[self.row]) {
                    self.col += 1;
                } else if self.row + 1 < self.lines.len() {
                    self.row += 1;
                    self.col = 0;
                }
            }
            CursorMove::Back => {
                if self.col > 0 {
                    self.col -= 1;
                } else if self.row > 0 {
                    self.row -= 1;
                    self.col = char_len(&self.lines[self.row]);
                }
            }
            CursorMove::LineStart => self.col = 0,
            CursorMove::LineEnd => self.col = char_len(&self.lines[self.row]),
            CursorMove::Top => {
                self.row = 0;
                self.col = 0;
            }
            CursorMove::Bottom => {
                self.row = self.lines.len() - 1;
                self.col = char_len(&self.lines[self.row]);
            }
            CursorMove::WordBack => self.word_back(),
            CursorMove::WordForward => self.word_forward(),
        }
    }

    /// Moves up or down by `rows` lines, stopping at the edges.
    pub fn move_rows(&mut self, rows: isize) {
        let target = self.row.saturating_add_signed(rows);
        self.row = target.min(self.lines.len() - 1);
        self.clamp_col();
    }

    /// Applies an editing key. Returns `false` if the key is not an editing key.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Char('w') if ctrl => self.delete_word_back(),
            KeyCode::Char(ch) if !ctrl && !alt => self.insert_char(ch),
            KeyCode::Enter => self.insert_str("\n"),
            KeyCode::Backspace if alt => self.delete_word_back(),
            KeyCode::Backspace => self.delete_back(),
            KeyCode::Delete => self.delete_forward(),
            KeyCode::Left if ctrl || alt => self.move_cursor(CursorMove::WordBack),
            KeyCode::Right if ctrl || alt => self.move_cursor(CursorMove::WordForward),
            KeyCode::Left => self.move_cursor(CursorMove::Back),
            KeyCode::Right => self.move_cursor(CursorMove::Forward),
            KeyCode::Up => self.move_cursor(CursorMove::Up),
            KeyCode::Down => self.move_cursor(CursorMove::Down),
            KeyCode::Home if ctrl => self.move_cursor(CursorMove::Top),
            KeyCode::End if ctrl => self.move_cursor(CursorMove::Bottom),
            KeyCode::Home => self.move_cursor(CursorMove::LineStart),
            KeyCode::End => self.move_cursor(CursorMove::LineEnd),
            _ => return false,
        }
        true
    }

    fn clamp_col(&mut self) {
        self.col = self.col.min(char_len(&self.lines[self.row]));
    }

    fn word_back(&mut self) {
        if self.col == 0 {
            self.move_cursor(CursorMove::Back);
            return;
        }
        let chars: Vec<char> = self.lines[self.row].chars().collect();
        let mut idx = self.col;
        while idx > 0 && chars[idx - 1].is_whitespace() {
            idx -= 1;
        }
        if idx > 0 {
            let class = is_word_char(chars[idx - 1]);
            while idx > 0 && !chars[idx - 1].is_whitespace() && is_word_char(chars[idx - 1]) == class
            {
                idx -= 1;
            }
        }
        self.col = idx;
    }

    fn word_forward(&mut self) {
        let chars: Vec<char> = self.lines[self.row].chars().collect();
        if self.col >= chars.len() {
            self.move_cursor(CursorMove::Forward);
            return;
        }
        let mut idx = self.col;
        let class = is_word_char(chars[idx]);
        if !chars[idx].is_whitespace() {
            while idx < chars.len() && !chars[idx].is_whitespace() && is_word_char(chars[idx]) == class
            {
                idx += 1;
            }
        }
        while idx < chars.len() && chars[idx].is_whitespace() {
            idx += 1;
        }
        self.col = idx;
    }
}

fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn char_len(line: &str) -> usize {
    line.chars().count()
}

fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices().nth(col).map_or(line.len(), |(i, _)| i)
}
