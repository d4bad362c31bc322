//! Feature slices. Each owns its state and its render function.

pub mod controls;
pub mod display;
pub mod editor;
