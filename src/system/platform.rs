//! The narrow seam between the toggle algorithm and the operating system

use super::error::{SystemResult, ThreadOpResult};
use super::index::{ProcessIndex, ThreadIndex};

/// Process/thread primitives the toggle engine needs.
///
/// Every call acquires and releases its own OS resources; nothing is held
/// across calls.
pub trait ThreadControl {
    /// Takes a fresh process snapshot and indexes it by executable name.
    fn snapshot_processes(&mut self) -> SystemResult<ProcessIndex>;

    /// Takes a fresh thread snapshot and indexes it by owning process.
    fn snapshot_threads(&mut self) -> SystemResult<ThreadIndex>;

    /// Suspends one thread, returning its suspend count before the call.
    fn suspend_thread(&mut self, tid: u32) -> ThreadOpResult<u32>;

    /// Resumes one thread, returning its suspend count before the call.
    ///
    /// A previous count above 1 means the thread is still suspended.
    fn resume_thread(&mut self, tid: u32) -> ThreadOpResult<u32>;
}
