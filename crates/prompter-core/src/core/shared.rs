//! State shared between the UI thread and the scroll worker.
//!
//! Only three values cross the thread boundary: the running flag, the mode,
//! and the scroll speed. Each is a single atomic; the UI thread is the only
//! writer and the worker only reads. No locks are taken.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::core::mode::Mode;
use crate::core::speed::ScrollSpeed;

#[derive(Debug)]
pub struct SharedState {
    running: AtomicBool,
    display_mode: AtomicBool,
    /// `f64` bits of the current scroll speed.
    speed_bits: AtomicU64,
}

impl SharedState {
    pub fn new(speed: ScrollSpeed) -> Self {
        Self {
            running: AtomicBool::new(false),
            display_mode: AtomicBool::new(false),
            speed_bits: AtomicU64::new(speed.get().to_bits()),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Sets the running flag, returning the previous value.
    pub(crate) fn swap_running(&self, running: bool) -> bool {
        self.running.swap(running, Ordering::SeqCst)
    }

    pub fn mode(&self) -> Mode {
        if self.display_mode.load(Ordering::SeqCst) {
            Mode::Display
        } else {
            Mode::Edit
        }
    }

    pub(crate) fn set_mode(&self, mode: Mode) {
        self.display_mode
            .store(mode == Mode::Display, Ordering::SeqCst);
    }

    pub fn speed(&self) -> ScrollSpeed {
        ScrollSpeed::new(f64::from_bits(self.speed_bits.load(Ordering::SeqCst)))
    }

    pub(crate) fn set_speed(&self, speed: ScrollSpeed) {
        self.speed_bits
            .store(speed.get().to_bits(), Ordering::SeqCst);
    }

    /// True while the scroll worker is allowed to keep pacing.
    pub fn should_scroll(&self) -> bool {
        self.is_running() && self.mode() == Mode::Display
    }
}

impl Default for SharedState {
    fn default() -> Self {
        Self::new(ScrollSpeed::default())
    }
}
