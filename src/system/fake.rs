//! In-memory `ThreadControl` used by the unit tests
//!
//! Tracks per-thread suspend counts the way the OS does and counts every
//! scoped handle it hands out so tests can check for leaks.

use std::cell::Cell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use super::error::{HandleKind, SystemError, SystemResult, ThreadOpError, ThreadOpResult};
use super::index::{ProcessIndex, ProcessRecord, ThreadIndex, ThreadRecord};
use super::platform::ThreadControl;

/// Acquire/release counters shared with every `FakeHandle`.
#[derive(Debug, Default)]
pub struct HandleLedger {
    acquired: Cell<usize>,
    released: Cell<usize>,
}

impl HandleLedger {
    pub fn acquired(&self) -> usize {
        self.acquired.get()
    }

    pub fn released(&self) -> usize {
        self.released.get()
    }

    /// Handles acquired but not yet released.
    pub fn outstanding(&self) -> usize {
        self.acquired() - self.released()
    }
}

/// Stand-in for an OS handle; releases itself on drop.
struct FakeHandle {
    ledger: Rc<HandleLedger>,
}

impl FakeHandle {
    fn acquire(ledger: &Rc<HandleLedger>) -> Self {
        ledger.acquired.set(ledger.acquired.get() + 1);
        Self {
            ledger: Rc::clone(ledger),
        }
    }
}

impl Drop for FakeHandle {
    fn drop(&mut self) {
        self.ledger.released.set(self.ledger.released.get() + 1);
    }
}

/// A primitive invocation recorded by the fake.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    Suspend(u32),
    Resume(u32),
}

#[derive(Debug, Default)]
pub struct FakePlatform {
    pub processes: Vec<ProcessRecord>,
    pub threads: Vec<ThreadRecord>,
    /// Threads whose suspend/resume primitive reports failure
    pub failing_tids: HashSet<u32>,
    /// Threads that cannot be opened at all
    pub unopenable_tids: HashSet<u32>,
    pub fail_process_snapshot: bool,
    pub fail_thread_snapshot: bool,
    pub calls: Vec<Call>,
    suspend_counts: HashMap<u32, u32>,
    ledger: Rc<HandleLedger>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_process(mut self, name: &str, pid: u32) -> Self {
        self.processes.push(ProcessRecord {
            name: name.to_string(),
            pid,
        });
        self
    }

    pub fn with_thread(mut self, owner_pid: u32, tid: u32) -> Self {
        self.threads.push(ThreadRecord { tid, owner_pid });
        self
    }

    pub fn ledger(&self) -> Rc<HandleLedger> {
        Rc::clone(&self.ledger)
    }

    pub fn suspend_count(&self, tid: u32) -> u32 {
        self.suspend_counts.get(&tid).copied().unwrap_or(0)
    }

    /// Simulates a suspend issued by someone other than the engine.
    pub fn suspend_externally(&mut self, tid: u32) {
        *self.suspend_counts.entry(tid).or_insert(0) += 1;
    }

    fn open_thread(&self, tid: u32) -> ThreadOpResult<FakeHandle> {
        if self.unopenable_tids.contains(&tid) {
            return Err(SystemError::AcquireFailed {
                kind: HandleKind::Thread,
                reason: "The parameter is incorrect.".to_string(),
            }
            .into());
        }
        Ok(FakeHandle::acquire(&self.ledger))
    }
}

impl ThreadControl for FakePlatform {
    fn snapshot_processes(&mut self) -> SystemResult<ProcessIndex> {
        if self.fail_process_snapshot {
            return Err(SystemError::SnapshotFailed {
                kind: HandleKind::ProcessSnapshot,
                reason: "Access is denied.".to_string(),
            });
        }
        let _snapshot = FakeHandle::acquire(&self.ledger);
        Ok(self.processes.iter().cloned().collect())
    }

    fn snapshot_threads(&mut self) -> SystemResult<ThreadIndex> {
        if self.fail_thread_snapshot {
            return Err(SystemError::SnapshotFailed {
                kind: HandleKind::ThreadSnapshot,
                reason: "Access is denied.".to_string(),
            });
        }
        let _snapshot = FakeHandle::acquire(&self.ledger);
        Ok(self.threads.iter().copied().collect())
    }

    fn suspend_thread(&mut self, tid: u32) -> ThreadOpResult<u32> {
        let _handle = self.open_thread(tid)?;
        self.calls.push(Call::Suspend(tid));
        if self.failing_tids.contains(&tid) {
            return Err(ThreadOpError::SuspendFailed {
                tid,
                reason: "Access is denied.".to_string(),
            });
        }
        let count = self.suspend_counts.entry(tid).or_insert(0);
        let previous = *count;
        *count += 1;
        Ok(previous)
    }

    fn resume_thread(&mut self, tid: u32) -> ThreadOpResult<u32> {
        let _handle = self.open_thread(tid)?;
        self.calls.push(Call::Resume(tid));
        if self.failing_tids.contains(&tid) {
            return Err(ThreadOpError::ResumeFailed {
                tid,
                reason: "Access is denied.".to_string(),
            });
        }
        let count = self.suspend_counts.entry(tid).or_insert(0);
        let previous = *count;
        *count = count.saturating_sub(1);
        Ok(previous)
    }
}
