//! TUI runtime: owns the terminal and drives the event loop.
//!
//! Each iteration collects events (scroll ticks, inbox notifications,
//! terminal input), feeds them through the reducer, executes the returned
//! effects and renders when a tick marked the frame dirty.

mod inbox;

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use inbox::UiEventReceiver;
use prompter_core::core::{TeleprompterSettings, interrupt};
use ratatui::Terminal;
use tokio::runtime::Handle;
use tracing::{debug, info};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::terminal::{self, Backend};
use crate::{render, update};

/// Frame cadence while scrolling or right after input (~60fps).
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll interval when nothing is moving.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

pub struct TuiRuntime {
    terminal: Terminal<Backend>,
    pub state: AppState,
    inbox_rx: UiEventReceiver,
    last_tick: Instant,
    last_terminal_event: Instant,
}

impl TuiRuntime {
    /// Sets up the terminal and builds the app in edit mode with `script`.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be put into TUI mode.
    pub fn new(settings: TeleprompterSettings, script: &str, runtime: Handle) -> Result<Self> {
        terminal::install_panic_hook();
        interrupt::set_restore_hook(|| {
            let _ = terminal::restore_terminal();
        });
        interrupt::reset();

        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let mut state = AppState::new(settings, script, runtime);
        let (inbox_tx, inbox_rx) = inbox::channel();
        inbox::connect(&mut state.prompter, &inbox_tx);

        let now = Instant::now();
        Ok(Self {
            terminal,
            state,
            inbox_rx,
            last_tick: now,
            last_terminal_event: now,
        })
    }

    /// Runs until the close action or an interrupt.
    ///
    /// # Errors
    /// Returns an error if the terminal fails while polling or drawing.
    pub fn run(&mut self) -> Result<()> {
        info!("teleprompter started");
        self.event_loop()
    }

    /// Close action: stops scrolling, waits (bounded) for the worker and
    /// restores the terminal.
    pub async fn shutdown(&mut self) -> bool {
        let clean = self.state.prompter.shutdown().await;
        let _ = terminal::restore_terminal();
        clean
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.should_quit {
            if interrupt::is_interrupted() {
                debug!("interrupt received; closing");
                self.execute_effect(UiEffect::Quit);
                break;
            }

            let mut events = self.collect_events()?;

            let size = self.terminal.size()?;
            events.insert(
                0,
                UiEvent::Frame {
                    width: size.width,
                    height: size.height,
                },
            );

            for event in events {
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = Instant::now();
                }
                let marks_dirty = matches!(&event, UiEvent::Tick);

                let effects = update::update(&mut self.state, event);
                if marks_dirty {
                    dirty = true;
                }
                for effect in effects {
                    self.execute_effect(effect);
                }
            }

            if dirty {
                self.terminal.draw(|frame| render::render(&self.state, frame))?;
                dirty = false;
            }
        }

        Ok(())
    }

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let recent_terminal_activity = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let needs_fast_poll = self.state.prompter.engine.is_running() || recent_terminal_activity;
        let tick_interval = if needs_fast_poll {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        while let Some(tick) = self.state.prompter.engine.try_next_tick() {
            events.push(UiEvent::Scroll(tick));
        }
        while let Ok(event) = self.inbox_rx.try_recv() {
            events.push(event);
        }

        let time_until_tick = tick_interval.saturating_sub(self.last_tick.elapsed());
        let poll_duration = if events.is_empty() {
            time_until_tick
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::ToggleScrolling => {
                self.state.prompter.toggle_scrolling();
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
