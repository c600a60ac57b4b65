//! `ThreadControl` backed by ToolHelp32 and SuspendThread/ResumeThread

use super::error::{HandleKind, SystemError, SystemResult, ThreadOpError, ThreadOpResult};
use super::index::{ProcessIndex, ThreadIndex};
use super::platform::ThreadControl;
use super::{processes, threads};
use crate::ffi::ThreadHandle;

/// The live Win32 implementation. Stateless; every call opens and closes
/// its own handles.
#[derive(Debug, Default, Clone, Copy)]
pub struct Win32Platform;

impl Win32Platform {
    fn open_thread(tid: u32) -> ThreadOpResult<ThreadHandle> {
        ThreadHandle::open_for_suspend_resume(tid).map_err(|e| {
            ThreadOpError::Acquire(SystemError::AcquireFailed {
                kind: HandleKind::Thread,
                reason: format!("OpenThread({tid}): {}", e.message()),
            })
        })
    }
}

impl ThreadControl for Win32Platform {
    fn snapshot_processes(&mut self) -> SystemResult<ProcessIndex> {
        processes::snapshot_processes()
    }

    fn snapshot_threads(&mut self) -> SystemResult<ThreadIndex> {
        threads::snapshot_threads()
    }

    fn suspend_thread(&mut self, tid: u32) -> ThreadOpResult<u32> {
        let handle = Self::open_thread(tid)?;
        handle.suspend().map_err(|e| ThreadOpError::SuspendFailed {
            tid,
            reason: e.message(),
        })
    }

    fn resume_thread(&mut self, tid: u32) -> ThreadOpResult<u32> {
        let handle = Self::open_thread(tid)?;
        handle.resume().map_err(|e| ThreadOpError::ResumeFailed {
            tid,
            reason: e.message(),
        })
    }
}
