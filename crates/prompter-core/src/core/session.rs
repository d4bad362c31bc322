//! The teleprompter aggregate: every controller wired to one shared state.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tracing::info;

use crate::config::Config;
use crate::core::font::{FontSize, FontSizeController};
use crate::core::mode::{Mode, ModeStateMachine, Transition};
use crate::core::scroll::{ScrollEngine, ScrollSettings};
use crate::core::shared::SharedState;
use crate::core::speed::{ScrollSpeed, ScrollSpeedController};
use crate::core::surface::{DisplaySurface, EditSurface};

/// Starting values for a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeleprompterSettings {
    pub speed: ScrollSpeed,
    pub font_size: FontSize,
    pub scroll: ScrollSettings,
    /// Upper bound on waiting for the scroll worker at close.
    pub shutdown_timeout: Duration,
}

impl TeleprompterSettings {
    pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(1);

    pub fn from_config(config: &Config) -> Self {
        Self {
            speed: config.speed(),
            font_size: config.font_size(),
            scroll: config.scroll_settings(),
            shutdown_timeout: config.shutdown_timeout(),
        }
    }
}

impl Default for TeleprompterSettings {
    fn default() -> Self {
        Self {
            speed: ScrollSpeed::default(),
            font_size: FontSize::default(),
            scroll: ScrollSettings::default(),
            shutdown_timeout: Self::DEFAULT_SHUTDOWN_TIMEOUT,
        }
    }
}

/// Mode, scroll, speed and font controllers sharing one [`SharedState`].
///
/// The views are not owned here; callers lend them per operation so the
/// same core drives any front end that implements the surface traits.
#[derive(Debug)]
pub struct Teleprompter {
    shared: Arc<SharedState>,
    pub mode: ModeStateMachine,
    pub engine: ScrollEngine,
    pub speed: ScrollSpeedController,
    pub font: FontSizeController,
    shutdown_timeout: Duration,
}

impl Teleprompter {
    /// Builds an idle teleprompter in edit mode. Scroll workers run on `runtime`.
    pub fn new(settings: TeleprompterSettings, runtime: Handle) -> Self {
        let shared = Arc::new(SharedState::new(settings.speed));
        Self {
            mode: ModeStateMachine::new(Arc::clone(&shared)),
            engine: ScrollEngine::new(Arc::clone(&shared), runtime, settings.scroll),
            speed: ScrollSpeedController::new(Arc::clone(&shared)),
            font: FontSizeController::new(settings.font_size),
            shutdown_timeout: settings.shutdown_timeout,
            shared,
        }
    }

    pub fn shared(&self) -> &Arc<SharedState> {
        &self.shared
    }

    pub fn current_mode(&self) -> Mode {
        self.mode.current_mode()
    }

    pub fn toggle_mode(
        &mut self,
        edit: &dyn EditSurface,
        display: &mut dyn DisplaySurface,
    ) -> Transition {
        self.mode.toggle(edit, display, &mut self.engine)
    }

    /// Scroll toggle control. Does nothing outside display mode.
    pub fn toggle_scrolling(&mut self) -> bool {
        self.engine.toggle()
    }

    /// Close action: stops scrolling and waits, bounded, for the worker.
    pub async fn shutdown(&mut self) -> bool {
        let clean = self.engine.shutdown(self.shutdown_timeout).await;
        let state = self.engine.state();
        info!(clean, position = state.position, "teleprompter shut down");
        clean
    }
}
