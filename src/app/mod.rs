//! Host application: turns triggers into toggle cycles

pub mod cli;
pub mod error;
pub mod hotkey;
pub mod trigger;

pub use error::{AppError, AppResult};
pub use trigger::Trigger;

use tracing::{debug, error, info, warn};

use crate::system::{ThreadControl, ToggleEngine, ToggleState};

/// Application state
pub struct App<P> {
    engine: ToggleEngine<P>,
    /// Resume the target on shutdown if it is left suspended
    resume_on_exit: bool,
}

impl<P: ThreadControl> App<P> {
    /// Creates a new App instance
    pub fn new(engine: ToggleEngine<P>, resume_on_exit: bool) -> Self {
        Self {
            engine,
            resume_on_exit,
        }
    }

    pub fn engine(&self) -> &ToggleEngine<P> {
        &self.engine
    }

    #[cfg(test)]
    pub fn engine_mut(&mut self) -> &mut ToggleEngine<P> {
        &mut self.engine
    }

    /// Handles one trigger. Returns false when the host loop should stop.
    pub fn dispatch(&mut self, trigger: Trigger) -> bool {
        match trigger {
            Trigger::Toggle => {
                info!("Hotkey pressed");
                if let Err(e) = self.engine.toggle() {
                    debug!(error = %e, "Toggle cycle aborted; next press retries");
                }
                true
            }
            Trigger::Quit => false,
        }
    }

    /// Leaves the target in a sensible state before the host exits.
    pub fn shutdown(&mut self) {
        if self.engine.state() != ToggleState::Suspended {
            return;
        }
        if !self.resume_on_exit {
            warn!(exe = %self.engine.target(), "Exiting with target still suspended");
            return;
        }
        match self.engine.release() {
            Some(Ok(report)) => info!(
                exe = %self.engine.target(),
                attempted = report.attempted,
                failed = report.failed,
                "Resumed target before exit"
            ),
            Some(Err(e)) => error!(error = %e, "Could not resume target before exit"),
            None => {}
        }
    }
}
