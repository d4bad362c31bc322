//! Widgets and text helpers shared by the feature slices.

pub mod scrollbar;
pub mod slider;
pub mod text;

pub use scrollbar::Scrollbar;
pub use slider::Slider;
