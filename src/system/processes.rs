//! Process enumeration using the ToolHelp32 API
//!
//! This module builds a [`ProcessIndex`] from a snapshot of all running
//! processes using CreateToolhelp32Snapshot and Process32First/Next.

#[cfg(windows)]
use std::mem;

#[cfg(windows)]
use windows::Win32::System::Diagnostics::ToolHelp::{
    Process32FirstW, Process32NextW, PROCESSENTRY32W,
};

#[cfg(windows)]
use super::error::{HandleKind, SystemError, SystemResult};
#[cfg(windows)]
use super::index::{ProcessIndex, ProcessRecord};
#[cfg(windows)]
use crate::ffi::SnapshotHandle;

/// Converts a null-terminated wide string (u16 slice) to a Rust String
pub fn wide_to_string(wide: &[u16]) -> String {
    // Find the null terminator
    let len = wide.iter().position(|&c| c == 0).unwrap_or(wide.len());
    String::from_utf16_lossy(&wide[..len])
}

#[cfg(windows)]
impl ProcessRecord {
    /// Creates a ProcessRecord from a PROCESSENTRY32W struct
    fn from_entry(entry: &PROCESSENTRY32W) -> Self {
        Self {
            name: wide_to_string(&entry.szExeFile),
            pid: entry.th32ProcessID,
        }
    }
}

/// Snapshots all running processes and indexes them by executable name.
///
/// # Returns
/// * `Ok(ProcessIndex)` - Every process, grouped by name
/// * `Err(SnapshotFailed)` - If the snapshot cannot be created
#[cfg(windows)]
pub fn snapshot_processes() -> SystemResult<ProcessIndex> {
    let snapshot =
        SnapshotHandle::create_process_snapshot().map_err(|e| SystemError::SnapshotFailed {
            kind: HandleKind::ProcessSnapshot,
            reason: e.message(),
        })?;
    let mut index = ProcessIndex::default();

    // Initialize the entry structure - CRITICAL: dwSize must be set!
    let mut entry = PROCESSENTRY32W {
        dwSize: mem::size_of::<PROCESSENTRY32W>() as u32,
        ..Default::default()
    };

    // SAFETY: We have a valid snapshot handle and properly initialized entry.
    let mut success = unsafe { Process32FirstW(snapshot.as_raw(), &mut entry) };

    while success.is_ok() {
        index.insert(ProcessRecord::from_entry(&entry));

        // SAFETY: Same as above - valid handles and initialized struct.
        success = unsafe { Process32NextW(snapshot.as_raw(), &mut entry) };
    }

    Ok(index)
}
