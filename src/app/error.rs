//! Errors that stop the host before or while it starts up

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// The single-instance mutex is owned by another process
    #[error("another instance is already running")]
    AlreadyRunning,

    #[error("CreateMutex failed: {0}")]
    MutexFailed(String),

    #[error("RegisterHotKey failed for {hotkey}: {reason}")]
    HotkeyRegistration {
        /// Hotkey as given on the command line
        hotkey: String,
        /// Message reported by the OS
        reason: String,
    },

    #[error("invalid hotkey '{input}': {reason}")]
    InvalidHotkey {
        /// Hotkey as given on the command line
        input: String,
        reason: &'static str,
    },

    #[error("console error: {0}")]
    Console(#[from] io::Error),

    #[error("failed to install log subscriber: {0}")]
    Logging(#[from] tracing::subscriber::SetGlobalDefaultError),

    #[error("{0} only runs on Windows")]
    UnsupportedPlatform(&'static str),
}

/// Result type for host operations
pub type AppResult<T> = Result<T, AppError>;
