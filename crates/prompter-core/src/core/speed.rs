//! Scroll speed parameter and its two synchronized input surfaces.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::core::shared::SharedState;

/// Scroll speed multiplier, always within [`ScrollSpeed::MIN`, `ScrollSpeed::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct ScrollSpeed(f64);

impl ScrollSpeed {
    pub const MIN: f64 = 0.1;
    pub const MAX: f64 = 5.0;
    pub const DEFAULT: f64 = 1.0;

    /// Clamps `value` into range. NaN falls back to the default speed.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(Self::DEFAULT);
        }
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    /// Parses user text. Returns `None` for anything that is not a number.
    pub fn parse(text: &str) -> Option<Self> {
        let value: f64 = text.trim().parse().ok()?;
        if value.is_nan() {
            return None;
        }
        Some(Self::new(value))
    }

    pub fn get(self) -> f64 {
        self.0
    }

    /// One-decimal text form shown in the speed entry.
    pub fn label(self) -> String {
        format!("{:.1}", self.0)
    }
}

impl Default for ScrollSpeed {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

/// Delay between two scroll steps: `base / speed`.
///
/// Computed on whole nanoseconds so the common speeds land on exact
/// millisecond values (1.0 -> 50ms, 5.0 -> 10ms, 0.1 -> 500ms).
pub fn pacing_delay(base: Duration, speed: ScrollSpeed) -> Duration {
    let nanos = (base.as_nanos() as f64 / speed.get()).round();
    Duration::from_nanos(nanos as u64)
}

/// Result of committing the speed text entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpeedInput {
    /// Text parsed; the clamped speed was stored.
    Applied(ScrollSpeed),
    /// Text was not a number; the previous speed is kept and the text reverted.
    Reverted(ScrollSpeed),
}

/// Owns the scroll speed and keeps the continuous control and the text entry
/// in sync.
///
/// The stored speed lives in [`SharedState`] so the scroll worker picks up
/// changes on its next iteration.
#[derive(Debug)]
pub struct ScrollSpeedController {
    shared: Arc<SharedState>,
    continuous: f64,
    text: String,
}

impl ScrollSpeedController {
    /// Step applied by the keyboard slider.
    pub const STEP: f64 = 0.1;

    pub fn new(shared: Arc<SharedState>) -> Self {
        let speed = shared.speed();
        Self {
            shared,
            continuous: speed.get(),
            text: speed.label(),
        }
    }

    pub fn speed(&self) -> ScrollSpeed {
        self.shared.speed()
    }

    /// Value shown by the continuous control (slider).
    pub fn continuous_value(&self) -> f64 {
        self.continuous
    }

    /// Value shown by the text entry.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Slider moved. The slider's own domain already bounds the value; the
    /// clamp only guards programmatic callers.
    pub fn set_from_continuous(&mut self, value: f64) -> ScrollSpeed {
        let speed = ScrollSpeed::new(value);
        self.store(speed);
        speed
    }

    /// Moves the slider by `delta`, snapping to one decimal.
    pub fn nudge(&mut self, delta: f64) -> ScrollSpeed {
        let target = ((self.continuous + delta) * 10.0).round() / 10.0;
        self.set_from_continuous(target)
    }

    /// Text entry committed (Enter or focus loss).
    pub fn set_from_text(&mut self, text: &str) -> SpeedInput {
        if let Some(speed) = ScrollSpeed::parse(text) {
            self.store(speed);
            return SpeedInput::Applied(speed);
        }

        let current = self.speed();
        debug!(input = text, speed = current.get(), "invalid speed text; reverting");
        self.text = current.label();
        SpeedInput::Reverted(current)
    }

    fn store(&mut self, speed: ScrollSpeed) {
        self.shared.set_speed(speed);
        self.continuous = speed.get();
        self.text = speed.label();
    }
}
