//! System module - process/thread discovery and the toggle engine
//!
//! The engine and its indexes are platform-neutral and talk to the OS only
//! through [`ThreadControl`]. The Win32 implementation is compiled on
//! Windows only.

pub mod error;
pub mod index;
pub mod platform;
pub mod processes;
pub mod resolver;
pub mod toggle;

#[cfg(windows)]
pub mod threads;
#[cfg(windows)]
pub mod win32;

#[cfg(test)]
pub mod fake;

pub use platform::ThreadControl;
pub use toggle::{ToggleEngine, ToggleState};

#[cfg(windows)]
pub use win32::Win32Platform;
