//! Horizontal slider for a bounded numeric value.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

const FILLED: char = '━';
const EMPTY: char = '─';
const KNOB: char = '●';

#[derive(Debug, Clone)]
pub struct Slider {
    ratio: f64,
    style: Style,
    knob_style: Style,
}

impl Slider {
    pub fn new(value: f64, min: f64, max: f64) -> Self {
        Self {
            ratio: ratio(value, min, max),
            style: Style::default(),
            knob_style: Style::default(),
        }
    }

    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn knob_style(mut self, style: Style) -> Self {
        self.knob_style = style;
        self
    }

    fn knob_offset(&self, width: u16) -> u16 {
        let last = f64::from(width.saturating_sub(1));
        (self.ratio * last).round() as u16
    }
}

/// Value under column `x` of a slider drawn in `area`.
///
/// Columns outside the area map to the nearest end.
pub fn value_at(area: Rect, x: u16, min: f64, max: f64) -> f64 {
    if area.width <= 1 {
        return min;
    }
    let offset = x.saturating_sub(area.x).min(area.width - 1);
    min + f64::from(offset) / f64::from(area.width - 1) * (max - min)
}

fn ratio(value: f64, min: f64, max: f64) -> f64 {
    if max <= min || value.is_nan() {
        return 0.0;
    }
    ((value - min) / (max - min)).clamp(0.0, 1.0)
}

impl Widget for Slider {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let knob = self.knob_offset(area.width);
        for offset in 0..area.width {
            let (symbol, style) = match offset.cmp(&knob) {
                std::cmp::Ordering::Less => (FILLED, self.style),
                std::cmp::Ordering::Equal => (KNOB, self.knob_style),
                std::cmp::Ordering::Greater => (EMPTY, self.style),
            };
            buf[(area.x + offset, area.y)]
                .set_char(symbol)
                .set_style(style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knob_sits_at_value() {
        assert_eq!(Slider::new(8.0, 8.0, 72.0).knob_offset(11), 0);
        assert_eq!(Slider::new(72.0, 8.0, 72.0).knob_offset(11), 10);
        assert_eq!(Slider::new(40.0, 8.0, 72.0).knob_offset(11), 5);
        assert_eq!(Slider::new(500.0, 8.0, 72.0).knob_offset(11), 10);
    }

    #[test]
    fn click_maps_back_to_value() {
        let area = Rect::new(10, 0, 11, 1);
        assert!((value_at(area, 10, 0.0, 5.0) - 0.0).abs() < 1e-9);
        assert!((value_at(area, 20, 0.0, 5.0) - 5.0).abs() < 1e-9);
        assert!((value_at(area, 15, 0.0, 5.0) - 2.5).abs() < 1e-9);
        assert!((value_at(area, 99, 0.0, 5.0) - 5.0).abs() < 1e-9);
        assert!((value_at(area, 0, 0.0, 5.0) - 0.0).abs() < 1e-9);
    }

    #[test]
    fn renders_fill_knob_and_track() {
        let area = Rect::new(0, 0, 5, 1);
        let mut buf = Buffer::empty(area);
        Slider::new(0.5, 0.0, 1.0).render(area, &mut buf);

        let row: String = (0..5).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert_eq!(row, "━━●──");
    }
}
