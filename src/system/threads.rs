//! Thread enumeration using the ToolHelp32 API
//!
//! Same shape as process enumeration, but keyed by the owning process ID.

use std::mem;

use windows::Win32::System::Diagnostics::ToolHelp::{
    Thread32First, Thread32Next, THREADENTRY32,
};

use super::error::{HandleKind, SystemError, SystemResult};
use super::index::{ThreadIndex, ThreadRecord};
use crate::ffi::SnapshotHandle;

impl ThreadRecord {
    fn from_entry(entry: &THREADENTRY32) -> Self {
        Self {
            tid: entry.th32ThreadID,
            owner_pid: entry.th32OwnerProcessID,
        }
    }
}

/// Snapshots all running threads and indexes them by owning process.
pub fn snapshot_threads() -> SystemResult<ThreadIndex> {
    let snapshot =
        SnapshotHandle::create_thread_snapshot().map_err(|e| SystemError::SnapshotFailed {
            kind: HandleKind::ThreadSnapshot,
            reason: e.message(),
        })?;
    let mut index = ThreadIndex::default();

    let mut entry = THREADENTRY32 {
        dwSize: mem::size_of::<THREADENTRY32>() as u32,
        ..Default::default()
    };

    // SAFETY: Valid snapshot handle and initialized entry.
    let mut success = unsafe { Thread32First(snapshot.as_raw(), &mut entry) };

    while success.is_ok() {
        index.insert(ThreadRecord::from_entry(&entry));

        // SAFETY: Same as above - valid handles and initialized struct.
        success = unsafe { Thread32Next(snapshot.as_raw(), &mut entry) };
    }

    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_contains_current_thread() {
        let index = snapshot_threads().expect("Should snapshot threads");
        let tids = index
            .tids(std::process::id())
            .expect("Should find threads of our own process");
        assert!(!tids.is_empty());
    }
}
