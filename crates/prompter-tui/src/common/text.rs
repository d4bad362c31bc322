//! Text measuring and wrapping for the script views.

use std::borrow::Cow;
use std::ops::Range;

use prompter_core::core::FontSize;
use unicode_width::UnicodeWidthChar;

/// Columns a tab expands to.
pub const TAB_WIDTH: usize = 4;

/// Narrowest text column, however large the font.
const MIN_COLUMN_WIDTH: u16 = 12;

/// Terminal columns taken by `ch`; tabs count as [`TAB_WIDTH`].
pub fn char_width(ch: char) -> usize {
    if ch == '\t' {
        TAB_WIDTH
    } else {
        ch.width().unwrap_or(0)
    }
}

pub fn str_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

/// Width of the text column for `size` within `available` columns.
///
/// A terminal cannot scale glyphs, so the font size scales the column
/// instead: the default size uses the full width and each larger size
/// narrows the column proportionally.
pub fn column_width(available: u16, size: FontSize) -> u16 {
    let scaled = u32::from(available) * u32::from(FontSize::DEFAULT) / u32::from(size.get());
    let scaled = scaled.min(u32::from(available)) as u16;
    scaled.max(MIN_COLUMN_WIDTH.min(available))
}

/// Strips escape and carriage-return characters and expands tabs.
pub fn sanitize_for_display(s: &str) -> Cow<'_, str> {
    if s.contains(['\x1b', '\t', '\r']) {
        Cow::Owned(
            s.replace(['\x1b', '\r'], "")
                .replace('\t', &" ".repeat(TAB_WIDTH)),
        )
    } else {
        Cow::Borrowed(s)
    }
}

/// Word-wraps `text` to `width` columns.
///
/// Every `\n` starts a new row, so empty lines survive. Words wider than the
/// column are broken between characters.
pub fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();

    for raw in text.split('\n') {
        let line = sanitize_for_display(raw);
        let mut current = String::new();
        let mut current_width = 0;

        for token in line.split_inclusive(' ') {
            let word_width = str_width(token.trim_end_matches(' '));
            if current_width + word_width <= width {
                current.push_str(token);
                current_width += str_width(token);
                continue;
            }

            if !current.is_empty() {
                rows.push(current.trim_end_matches(' ').to_string());
                current.clear();
                current_width = 0;
            }

            if word_width <= width {
                current.push_str(token);
                current_width = str_width(token);
                continue;
            }

            let word = token.trim_end_matches(' ');
            for ch in word.chars() {
                let w = char_width(ch);
                if current_width + w > width && !current.is_empty() {
                    rows.push(std::mem::take(&mut current));
                    current_width = 0;
                }
                current.push(ch);
                current_width += w;
            }
            if word.len() < token.len() && current_width < width {
                current.push(' ');
                current_width += 1;
            }
        }

        rows.push(current.trim_end_matches(' ').to_string());
    }

    rows
}

/// Splits one line into character ranges that each fit in `width` columns.
///
/// Used by the editor, where every character (including spaces) must keep a
/// cell so the cursor can land on it. Always returns at least one range.
pub fn wrap_ranges(line: &str, width: usize) -> Vec<Range<usize>> {
    let width = width.max(1);
    let mut ranges = Vec::new();
    let mut start = 0;
    let mut used = 0;

    for (idx, ch) in line.chars().enumerate() {
        let w = char_width(ch);
        if used + w > width && idx > start {
            ranges.push(start..idx);
            start = idx;
            used = 0;
        }
        used += w;
    }
    ranges.push(start..line.chars().count());
    ranges
}
