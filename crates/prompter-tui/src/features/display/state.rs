use prompter_core::core::{DisplaySurface, Font, SurfaceError};

use crate::common::text::{self, wrap_words};

/// The read-only presentation view.
///
/// Position is the top of the viewport as a fraction of the wrapped rows,
/// so scroll steps far smaller than one row still accumulate.
#[derive(Debug, Clone)]
pub struct DisplayView {
    content: String,
    font: Font,
    available_width: u16,
    height: u16,
    rows: Vec<String>,
    position: f64,
    interactive: bool,
}

impl Default for DisplayView {
    fn default() -> Self {
        Self {
            content: String::new(),
            font: Font::default(),
            available_width: 0,
            height: 0,
            rows: vec![String::new()],
            position: 0.0,
            interactive: true,
        }
    }
}

impl DisplayView {
    /// Records the area the view is drawn in. Width changes rewrap the script.
    pub fn set_viewport(&mut self, available_width: u16, height: u16) {
        let rewrap = available_width != self.available_width;
        self.available_width = available_width;
        self.height = height;
        if rewrap {
            self.rewrap();
        }
        self.position = self.position.clamp(0.0, self.max_start());
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn font(&self) -> Font {
        self.font
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn column_width(&self) -> u16 {
        text::column_width(self.available_width, self.font.size)
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn total_rows(&self) -> usize {
        self.rows.len().max(1)
    }

    /// First wrapped row in the viewport.
    pub fn top_row(&self) -> usize {
        let total = self.total_rows();
        let top = (self.position * total as f64).round() as usize;
        top.min(total.saturating_sub(usize::from(self.height)))
    }

    pub fn visible_rows(&self) -> &[String] {
        let start = self.top_row().min(self.rows.len());
        let end = (start + usize::from(self.height)).min(self.rows.len());
        &self.rows[start..end]
    }

    /// Visible range as fractions, without the availability check.
    pub fn visible_fraction(&self) -> (f64, f64) {
        (self.position, (self.position + self.span()).min(1.0))
    }

    /// Fraction that moves the view by `rows` wrapped rows.
    pub fn rows_to_fraction(&self, rows: isize) -> f64 {
        rows as f64 / self.total_rows() as f64
    }

    fn span(&self) -> f64 {
        (f64::from(self.height) / self.total_rows() as f64).min(1.0)
    }

    fn max_start(&self) -> f64 {
        (1.0 - self.span()).max(0.0)
    }

    fn is_available(&self) -> bool {
        self.height > 0 && self.available_width > 0
    }

    fn rewrap(&mut self) {
        self.rows = wrap_words(&self.content, usize::from(self.column_width()));
    }
}

impl DisplaySurface for DisplayView {
    fn set_content(&mut self, text: &str) {
        self.content = text.to_string();
        self.rewrap();
        self.position = self.position.clamp(0.0, self.max_start());
    }

    fn set_font(&mut self, font: Font) {
        let rewrap = font.size != self.font.size;
        self.font = font;
        if rewrap {
            self.rewrap();
            self.position = self.position.clamp(0.0, self.max_start());
        }
    }

    fn scroll_fraction(&self) -> Result<(f64, f64), SurfaceError> {
        if !self.is_available() {
            return Err(SurfaceError::Unavailable);
        }
        Ok(self.visible_fraction())
    }

    fn scroll_to(&mut self, fraction: f64) -> Result<(), SurfaceError> {
        if !self.is_available() {
            return Err(SurfaceError::Unavailable);
        }
        self.position = fraction.clamp(0.0, self.max_start());
        Ok(())
    }

    fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }
}
