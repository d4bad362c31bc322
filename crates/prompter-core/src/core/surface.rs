//! Contracts between the core and the views that render the script.
//!
//! The core never owns widgets. The terminal UI implements these traits on
//! its editor and display views and hands them to the state machine and
//! controllers by reference.

use crate::core::font::Font;

/// A view went away while the core was still using it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceError {
    Unavailable,
}

impl std::fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurfaceError::Unavailable => write!(f, "display surface unavailable"),
        }
    }
}

impl std::error::Error for SurfaceError {}

/// The editable script view.
pub trait EditSurface {
    /// Current buffer content, verbatim.
    fn content(&self) -> String;
    fn set_content(&mut self, text: &str);
    fn set_font(&mut self, font: Font);
}

/// The read-only, high-contrast script view.
pub trait DisplaySurface {
    fn set_content(&mut self, text: &str);
    fn set_font(&mut self, font: Font);

    /// Visible range as fractions of the full content: `(start, end)`.
    ///
    /// # Errors
    /// Returns [`SurfaceError::Unavailable`] if the view cannot be measured.
    fn scroll_fraction(&self) -> Result<(f64, f64), SurfaceError>;

    /// Moves the top of the viewport to `fraction`. Values past the end clamp.
    ///
    /// # Errors
    /// Returns [`SurfaceError::Unavailable`] if the view cannot be scrolled.
    fn scroll_to(&mut self, fraction: f64) -> Result<(), SurfaceError>;

    /// Enables or disables user interaction (editing, cursor).
    fn set_interactive(&mut self, interactive: bool);
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory views for unit tests.

    use super::*;

    #[derive(Debug, Default)]
    pub struct FakeEditor {
        pub text: String,
        pub font: Font,
        pub writes: usize,
    }

    impl FakeEditor {
        pub fn new(text: &str) -> Self {
            Self {
                text: text.to_string(),
                ..Self::default()
            }
        }
    }

    impl EditSurface for FakeEditor {
        fn content(&self) -> String {
            self.text.clone()
        }

        fn set_content(&mut self, text: &str) {
            self.writes += 1;
            self.text = text.to_string();
        }

        fn set_font(&mut self, font: Font) {
            self.font = font;
        }
    }

    /// Display view that measures content in lines against a fixed viewport.
    #[derive(Debug)]
    pub struct FakeDisplay {
        pub text: String,
        pub font: Font,
        pub viewport_lines: usize,
        pub position: f64,
        pub interactive: bool,
        pub available: bool,
        pub scroll_writes: usize,
    }

    impl FakeDisplay {
        pub fn new(viewport_lines: usize) -> Self {
            Self {
                text: String::new(),
                font: Font::default(),
                viewport_lines,
                position: 0.0,
                interactive: true,
                available: true,
                scroll_writes: 0,
            }
        }

        fn span(&self) -> f64 {
            let total = self.text.lines().count().max(1);
            (self.viewport_lines as f64 / total as f64).min(1.0)
        }
    }

    impl DisplaySurface for FakeDisplay {
        fn set_content(&mut self, text: &str) {
            self.text = text.to_string();
        }

        fn set_font(&mut self, font: Font) {
            self.font = font;
        }

        fn scroll_fraction(&self) -> Result<(f64, f64), SurfaceError> {
            if !self.available {
                return Err(SurfaceError::Unavailable);
            }
            Ok((self.position, (self.position + self.span()).min(1.0)))
        }

        fn scroll_to(&mut self, fraction: f64) -> Result<(), SurfaceError> {
            if !self.available {
                return Err(SurfaceError::Unavailable);
            }
            self.scroll_writes += 1;
            let max_start = (1.0 - self.span()).max(0.0);
            self.position = fraction.clamp(0.0, max_start);
            Ok(())
        }

        fn set_interactive(&mut self, interactive: bool) {
            self.interactive = interactive;
        }
    }
}
