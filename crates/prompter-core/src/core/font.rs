//! Font size parameter applied to both script views.

use tracing::debug;

use crate::core::surface::{DisplaySurface, EditSurface};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FontSize(u16);

impl FontSize {
    pub const MIN: u16 = 8;
    pub const MAX: u16 = 72;
    pub const DEFAULT: u16 = 20;

    pub fn new(value: i64) -> Self {
        Self(value.clamp(i64::from(Self::MIN), i64::from(Self::MAX)) as u16)
    }

    pub fn get(self) -> u16 {
        self.0
    }
}

impl Default for FontSize {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Font {
    pub size: FontSize,
    pub weight: FontWeight,
}

impl Font {
    pub fn new(size: FontSize, weight: FontWeight) -> Self {
        Self { size, weight }
    }
}

/// Clamps font size changes and pushes them to both views.
///
/// The editable view keeps a normal weight; the display view is always bold.
#[derive(Debug)]
pub struct FontSizeController {
    size: FontSize,
    readout: String,
}

impl FontSizeController {
    pub const EDIT_WEIGHT: FontWeight = FontWeight::Normal;
    pub const DISPLAY_WEIGHT: FontWeight = FontWeight::Bold;

    pub fn new(size: FontSize) -> Self {
        Self {
            size,
            readout: size.get().to_string(),
        }
    }

    pub fn size(&self) -> FontSize {
        self.size
    }

    /// Text shown next to the font slider.
    pub fn readout(&self) -> &str {
        &self.readout
    }

    pub fn edit_font(&self) -> Font {
        Font::new(self.size, Self::EDIT_WEIGHT)
    }

    pub fn display_font(&self) -> Font {
        Font::new(self.size, Self::DISPLAY_WEIGHT)
    }

    /// Clamps `value` to the allowed range and applies it to both views.
    pub fn set_font_size(
        &mut self,
        value: i64,
        edit: &mut dyn EditSurface,
        display: &mut dyn DisplaySurface,
    ) -> FontSize {
        let size = FontSize::new(value);
        if i64::from(size.get()) != value {
            debug!(requested = value, applied = size.get(), "font size clamped");
        }
        self.size = size;
        self.readout = size.get().to_string();
        self.apply(edit, display);
        size
    }

    /// Slider moved; fractional positions truncate toward zero.
    pub fn set_from_continuous(
        &mut self,
        value: f64,
        edit: &mut dyn EditSurface,
        display: &mut dyn DisplaySurface,
    ) -> FontSize {
        if value.is_nan() {
            return self.size;
        }
        self.set_font_size(value.trunc() as i64, edit, display)
    }

    /// Re-applies the current size, e.g. after a view was recreated.
    pub fn apply(&self, edit: &mut dyn EditSurface, display: &mut dyn DisplaySurface) {
        edit.set_font(self.edit_font());
        display.set_font(self.display_font());
    }
}

impl Default for FontSizeController {
    fn default() -> Self {
        Self::new(FontSize::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::surface::testing::{FakeDisplay, FakeEditor};

    #[test]
    fn clamp_keeps_font_in_range() {
        for value in [i64::MIN, -1, 0, 7, 8, 20, 72, 73, 100, i64::MAX] {
            let size = FontSize::new(value).get();
            assert!((FontSize::MIN..=FontSize::MAX).contains(&size), "{value}");
        }
    }

    #[test]
    fn slider_at_100_is_stored_as_72() {
        let mut font = FontSizeController::default();
        let mut edit = FakeEditor::new("script");
        let mut display = FakeDisplay::new(10);

        let applied = font.set_from_continuous(100.0, &mut edit, &mut display);

        assert_eq!(applied.get(), 72);
        assert_eq!(font.size().get(), 72);
        assert_eq!(font.readout(), "72");
    }

    #[test]
    fn applies_to_both_views_preserving_weight() {
        let mut font = FontSizeController::default();
        let mut edit = FakeEditor::new("script");
        let mut display = FakeDisplay::new(10);

        font.set_font_size(32, &mut edit, &mut display);

        assert_eq!(edit.font, Font::new(FontSize::new(32), FontWeight::Normal));
        assert_eq!(display.font, Font::new(FontSize::new(32), FontWeight::Bold));
    }

    #[test]
    fn fractional_slider_values_truncate() {
        let mut font = FontSizeController::default();
        let mut edit = FakeEditor::new("");
        let mut display = FakeDisplay::new(10);

        assert_eq!(font.set_from_continuous(23.9, &mut edit, &mut display).get(), 23);
        assert_eq!(font.set_from_continuous(f64::NAN, &mut edit, &mut display).get(), 23);
    }
}
