//! Custom error types for type-safe error handling
//!
//! Snapshot and handle failures abort the current toggle cycle, while
//! per-thread failures are collected and reported without aborting it.

use std::fmt;

use thiserror::Error;

// ============================================================================
// Handle kinds
// ============================================================================

/// The kind of OS resource a scoped handle wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleKind {
    /// ToolHelp32 snapshot of all processes
    ProcessSnapshot,
    /// ToolHelp32 snapshot of all threads
    ThreadSnapshot,
    /// Thread handle opened with suspend/resume access
    Thread,
}

impl fmt::Display for HandleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandleKind::ProcessSnapshot => "process snapshot",
            HandleKind::ThreadSnapshot => "thread snapshot",
            HandleKind::Thread => "thread handle",
        };
        f.write_str(name)
    }
}

// ============================================================================
// System Error
// ============================================================================

/// Errors raised while acquiring OS resources.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SystemError {
    /// A handle could not be opened (thread exited, access denied, ...)
    #[error("failed to acquire {kind}: {reason}")]
    AcquireFailed {
        /// Which resource was requested
        kind: HandleKind,
        /// Message reported by the OS
        reason: String,
    },

    /// A process or thread snapshot could not be created
    #[error("failed to create {kind}: {reason}")]
    SnapshotFailed {
        /// Which snapshot was requested
        kind: HandleKind,
        /// Message reported by the OS
        reason: String,
    },
}

// ============================================================================
// Thread Operation Error
// ============================================================================

/// Errors from a single suspend or resume call.
///
/// These never abort a toggle cycle; the engine counts and logs them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThreadOpError {
    /// The thread handle could not be opened
    #[error(transparent)]
    Acquire(#[from] SystemError),

    /// SuspendThread reported failure
    #[error("SuspendThread failed for thread {tid}: {reason}")]
    SuspendFailed {
        /// Thread identifier
        tid: u32,
        /// Message reported by the OS
        reason: String,
    },

    /// ResumeThread reported failure
    #[error("ResumeThread failed for thread {tid}: {reason}")]
    ResumeFailed {
        /// Thread identifier
        tid: u32,
        /// Message reported by the OS
        reason: String,
    },
}

// ============================================================================
// Result type aliases
// ============================================================================

/// Result type for snapshot and handle operations
pub type SystemResult<T> = Result<T, SystemError>;

/// Result type for per-thread operations; `Ok` carries the previous suspend count
pub type ThreadOpResult<T> = Result<T, ThreadOpError>;
