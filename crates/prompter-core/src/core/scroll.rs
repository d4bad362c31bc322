//! Automatic scrolling of the display view.
//!
//! The engine is split across two contexts:
//!
//! - A background **pacing worker** (one per scroll session) that sleeps for
//!   the speed-scaled delay and emits a [`ScrollTick`] per iteration. It never
//!   touches a view.
//! - [`ScrollEngine::step`], called on the UI thread for each tick, which
//!   reads the display position, advances it, and detects the end of the
//!   script.
//!
//! Every session carries an id. Stopping bumps the id, so ticks already in
//! flight from a retired worker are recognised as stale and dropped without
//! writing to the view.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use crate::core::mode::Mode;
use crate::core::shared::SharedState;
use crate::core::speed::pacing_delay;
use crate::core::surface::{DisplaySurface, SurfaceError};

/// Label of the scroll control while stopped.
pub const START_LABEL: &str = "Start Scrolling";
/// Label of the scroll control while running.
pub const STOP_LABEL: &str = "Stop Scrolling";

/// Visible end at or past `1.0 - END_TOLERANCE` counts as fully scrolled.
const END_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSettings {
    /// Delay between steps at speed 1.0.
    pub base_delay: Duration,
    /// Fraction of the total extent advanced per step.
    pub increment: f64,
}

impl ScrollSettings {
    pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(50);
    pub const DEFAULT_INCREMENT: f64 = 0.002;
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            base_delay: Self::DEFAULT_BASE_DELAY,
            increment: Self::DEFAULT_INCREMENT,
        }
    }
}

/// Snapshot of the scroll state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    /// Top of the viewport as a fraction of the content, in `[0, 1]`.
    pub position: f64,
    pub is_running: bool,
}

/// One pacing interval elapsed in the given session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollTick {
    pub session: u64,
}

/// What a call to [`ScrollEngine::step`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// Position moved to the contained fraction.
    Advanced(f64),
    /// The end of the script came into view; scrolling stopped.
    Completed,
    /// Not running or not in display mode; nothing was written.
    Halted,
    /// Tick from a retired session; ignored.
    Stale,
    /// The display view could not be measured or scrolled; scrolling stopped.
    SurfaceLost,
}

/// Called with the new running state whenever scrolling starts or stops.
pub type RunningHook = Box<dyn FnMut(bool) + Send>;

struct Worker {
    session: u64,
    cancel: CancellationToken,
    join: JoinHandle<()>,
}

pub struct ScrollEngine {
    shared: Arc<SharedState>,
    runtime: Handle,
    settings: ScrollSettings,
    position: f64,
    session: u64,
    worker: Option<Worker>,
    tick_tx: mpsc::UnboundedSender<ScrollTick>,
    tick_rx: mpsc::UnboundedReceiver<ScrollTick>,
    on_running_changed: Option<RunningHook>,
}

impl std::fmt::Debug for ScrollEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollEngine")
            .field("settings", &self.settings)
            .field("position", &self.position)
            .field("session", &self.session)
            .field("running", &self.shared.is_running())
            .finish_non_exhaustive()
    }
}

impl ScrollEngine {
    /// Creates an idle engine. Workers are spawned on `runtime`.
    pub fn new(shared: Arc<SharedState>, runtime: Handle, settings: ScrollSettings) -> Self {
        let (tick_tx, tick_rx) = mpsc::unbounded_channel();
        Self {
            shared,
            runtime,
            settings,
            position: 0.0,
            session: 0,
            worker: None,
            tick_tx,
            tick_rx,
            on_running_changed: None,
        }
    }

    /// Registers the hook fired on every start/stop, including natural completion.
    pub fn on_running_changed<F>(&mut self, hook: F)
    where
        F: FnMut(bool) + Send + 'static,
    {
        self.on_running_changed = Some(Box::new(hook));
    }

    pub fn is_running(&self) -> bool {
        self.shared.is_running()
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn state(&self) -> ScrollState {
        ScrollState {
            position: self.position,
            is_running: self.is_running(),
        }
    }

    /// Label for the scroll toggle control.
    pub fn control_label(&self) -> &'static str {
        if self.is_running() {
            STOP_LABEL
        } else {
            START_LABEL
        }
    }

    /// Starts a scroll session.
    ///
    /// Returns `false` without doing anything if already running or if the
    /// display view is not shown.
    pub fn start(&mut self) -> bool {
        if self.shared.mode() != Mode::Display {
            debug!("scroll start ignored outside display mode");
            return false;
        }
        if self.shared.swap_running(true) {
            return false;
        }

        self.retire_worker();
        self.session = self.session.wrapping_add(1);

        let cancel = CancellationToken::new();
        let join = self.runtime.spawn(pace(
            Arc::clone(&self.shared),
            cancel.clone(),
            self.session,
            self.settings.base_delay,
            self.tick_tx.clone(),
        ));
        self.worker = Some(Worker {
            session: self.session,
            cancel,
            join,
        });

        info!(
            session = self.session,
            speed = self.shared.speed().get(),
            "scrolling started"
        );
        self.notify(true);
        true
    }

    /// Stops the current session. Returns whether scrolling was running.
    ///
    /// The worker is cancelled immediately; any tick it already sent is
    /// stale by the time it reaches [`ScrollEngine::step`].
    pub fn stop(&mut self) -> bool {
        let was_running = self.halt();
        if was_running {
            info!(position = self.position, "scrolling stopped");
        }
        was_running
    }

    /// Starts when stopped, stops when running. Returns the new running state.
    pub fn toggle(&mut self) -> bool {
        if self.is_running() {
            self.stop();
        } else {
            self.start();
        }
        self.is_running()
    }

    /// Next pending tick from the worker, if any. Never blocks.
    pub fn try_next_tick(&mut self) -> Option<ScrollTick> {
        self.tick_rx.try_recv().ok()
    }

    /// Runs one loop iteration for `tick` against the display view.
    pub fn step(&mut self, tick: ScrollTick, display: &mut dyn DisplaySurface) -> StepOutcome {
        if tick.session != self.session {
            return StepOutcome::Stale;
        }
        if !self.shared.should_scroll() {
            self.halt();
            return StepOutcome::Halted;
        }

        let (start, _) = match display.scroll_fraction() {
            Ok(fraction) => fraction,
            Err(err) => return self.surface_lost(err),
        };
        if let Err(err) = display.scroll_to(start + self.settings.increment) {
            return self.surface_lost(err);
        }
        let (start, end) = match display.scroll_fraction() {
            Ok(fraction) => fraction,
            Err(err) => return self.surface_lost(err),
        };
        self.position = start;
        trace!(session = tick.session, position = start, end, "scroll step");

        if end >= 1.0 - END_TOLERANCE {
            self.halt();
            info!("reached end of script");
            return StepOutcome::Completed;
        }
        StepOutcome::Advanced(start)
    }

    /// Moves the display to `fraction` (manual scrolling or rewind) and
    /// records where it landed.
    ///
    /// # Errors
    /// Returns the surface error if the display cannot be scrolled.
    pub fn jump_to(
        &mut self,
        display: &mut dyn DisplaySurface,
        fraction: f64,
    ) -> Result<f64, SurfaceError> {
        display.scroll_to(fraction.clamp(0.0, 1.0))?;
        let (start, _) = display.scroll_fraction()?;
        self.position = start;
        Ok(start)
    }

    /// Rewinds to the top for a fresh snapshot.
    pub fn reset(&mut self, display: &mut dyn DisplaySurface) {
        self.position = 0.0;
        if let Err(err) = display.scroll_to(0.0) {
            debug!(%err, "could not rewind display view");
        }
    }

    /// Stops scrolling and waits up to `timeout` for the worker to exit.
    ///
    /// Returns `false` if the worker did not exit in time; it is aborted
    /// instead of being waited on further.
    pub async fn shutdown(&mut self, timeout: Duration) -> bool {
        self.stop();
        let Some(worker) = self.worker.take() else {
            return true;
        };
        worker.cancel.cancel();
        let abort = worker.join.abort_handle();
        if tokio::time::timeout(timeout, worker.join).await.is_ok() {
            true
        } else {
            warn!(
                session = worker.session,
                timeout_ms = timeout.as_millis() as u64,
                "scroll worker did not exit in time; aborting"
            );
            abort.abort();
            false
        }
    }

    fn halt(&mut self) -> bool {
        let was_running = self.shared.swap_running(false);
        if let Some(worker) = &self.worker {
            worker.cancel.cancel();
        }
        self.session = self.session.wrapping_add(1);
        if was_running {
            self.notify(false);
        }
        was_running
    }

    fn surface_lost(&mut self, err: SurfaceError) -> StepOutcome {
        debug!(%err, "stopping scroll");
        self.halt();
        StepOutcome::SurfaceLost
    }

    /// Cancels and aborts a worker left over from a previous session.
    fn retire_worker(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.cancel.cancel();
            if !worker.join.is_finished() {
                worker.join.abort();
            }
        }
    }

    fn notify(&mut self, running: bool) {
        if let Some(hook) = self.on_running_changed.as_mut() {
            hook(running);
        }
    }
}

impl Drop for ScrollEngine {
    fn drop(&mut self) {
        self.shared.swap_running(false);
        self.retire_worker();
    }
}

/// Pacing loop of one scroll session.
async fn pace(
    shared: Arc<SharedState>,
    cancel: CancellationToken,
    session: u64,
    base_delay: Duration,
    ticks: mpsc::UnboundedSender<ScrollTick>,
) {
    loop {
        if cancel.is_cancelled() || !shared.should_scroll() {
            break;
        }
        if ticks.send(ScrollTick { session }).is_err() {
            debug!(session, "tick receiver dropped");
            break;
        }

        let delay = pacing_delay(base_delay, shared.speed());
        tokio::select! {
            () = cancel.cancelled() => break,
            () = tokio::time::sleep(delay) => {}
        }
    }
    trace!(session, "scroll worker exited");
}
