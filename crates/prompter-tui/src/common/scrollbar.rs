//! Scrollbar driven by the visible fraction of the content.
//!
//! The display view tracks its position as a fraction rather than a row
//! offset, so the thumb is placed from `(start, end)` directly. Thumb length
//! is computed from the span alone so it does not flicker while scrolling.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

const THUMB_SYMBOL: &str = "█";
const TRACK_SYMBOL: &str = "│";

#[derive(Debug, Clone)]
pub struct Scrollbar {
    start: f64,
    end: f64,
    style: Style,
}

impl Scrollbar {
    /// `start` and `end` are the visible range as fractions of the content.
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            start: start.clamp(0.0, 1.0),
            end: end.clamp(0.0, 1.0),
            style: Style::default(),
        }
    }

    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Hidden when everything is already visible.
    fn should_display(&self) -> bool {
        self.end - self.start < 1.0
    }

    /// Thumb `(offset, length)` within a track of `track_len` cells.
    fn thumb(&self, track_len: usize) -> (usize, usize) {
        let span = (self.end - self.start).max(0.0);
        let thumb_len = ((span * track_len as f64).round() as usize).clamp(1, track_len);
        let available = track_len - thumb_len;
        let max_start = (1.0 - span).max(f64::EPSILON);
        let offset = ((self.start / max_start).min(1.0) * available as f64).round() as usize;
        (offset.min(available), thumb_len)
    }
}

impl Widget for Scrollbar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let track_len = area.height as usize;
        if !self.should_display() || track_len == 0 || area.width == 0 {
            return;
        }

        let (thumb_start, thumb_len) = self.thumb(track_len);
        let x = area.x + area.width - 1;
        for (idx, y) in (area.y..area.y + area.height).enumerate() {
            let symbol = if idx >= thumb_start && idx < thumb_start + thumb_len {
                THUMB_SYMBOL
            } else {
                TRACK_SYMBOL
            };
            buf.set_string(x, y, symbol, self.style);
        }
    }
}
