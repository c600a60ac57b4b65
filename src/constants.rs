//! Centralized constants for the application
//!
//! Defaults for every command-line option plus the fixed identifiers the
//! host registers with the OS.

// ============================================================================
// Application Info
// ============================================================================

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// Application version from Cargo.toml
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Target
// ============================================================================

/// Executable toggled when `--target` is not given
pub const DEFAULT_TARGET_EXE: &str = "StudentMain.exe";

// ============================================================================
// Hotkey
// ============================================================================

/// Hotkey used when `--hotkey` is not given
pub const DEFAULT_HOTKEY: &str = "ctrl+space";

/// Identifier passed to RegisterHotKey and echoed back in WM_HOTKEY
pub const HOTKEY_ID: i32 = 1024;

// ============================================================================
// Poll Rate (milliseconds)
// ============================================================================

/// Sleep between polls of the message queue and console
pub const DEFAULT_POLL_MS: u64 = 5;

/// Minimum allowed poll interval
pub const MIN_POLL_MS: u64 = 1;

/// Maximum allowed poll interval
pub const MAX_POLL_MS: u64 = 1000;

// ============================================================================
// Single Instance
// ============================================================================

/// Name of the mutex that keeps a second instance from starting
pub const SINGLE_INSTANCE_MUTEX: &str = "thread_toggle_single_instance_mutex";
