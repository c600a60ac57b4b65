//! Safe RAII wrappers for Windows HANDLEs
//!
//! These wrappers ensure that handles are properly closed when they
//! go out of scope, preventing resource leaks.

use tracing::debug;
use windows::core::HSTRING;
use windows::Win32::Foundation::{CloseHandle, GetLastError, ERROR_ALREADY_EXISTS, HANDLE, HWND};
use windows::Win32::System::Diagnostics::ToolHelp::{
    CreateToolhelp32Snapshot, CREATE_TOOLHELP_SNAPSHOT_FLAGS, TH32CS_SNAPPROCESS,
    TH32CS_SNAPTHREAD,
};
use windows::Win32::System::Threading::{
    CreateMutexW, OpenThread, ResumeThread, SuspendThread, THREAD_SUSPEND_RESUME,
};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    RegisterHotKey, UnregisterHotKey, HOT_KEY_MODIFIERS,
};

/// Return value of SuspendThread/ResumeThread on failure
const THREAD_OP_FAILED: u32 = u32::MAX;

/// A safe wrapper around a ToolHelp32 snapshot HANDLE.
/// Automatically closes the handle when dropped.
pub struct SnapshotHandle(HANDLE);

impl SnapshotHandle {
    /// Creates a snapshot of all processes in the system.
    pub fn create_process_snapshot() -> windows::core::Result<Self> {
        Self::create(TH32CS_SNAPPROCESS)
    }

    /// Creates a snapshot of all threads in the system.
    ///
    /// Thread snapshots always cover every process; callers filter by
    /// `th32OwnerProcessID` themselves.
    pub fn create_thread_snapshot() -> windows::core::Result<Self> {
        Self::create(TH32CS_SNAPTHREAD)
    }

    fn create(flags: CREATE_TOOLHELP_SNAPSHOT_FLAGS) -> windows::core::Result<Self> {
        // SAFETY: CreateToolhelp32Snapshot is safe to call.
        // The second parameter (0) is ignored for process and thread snapshots.
        let handle = unsafe { CreateToolhelp32Snapshot(flags, 0)? };
        Ok(Self(handle))
    }

    /// Returns the raw HANDLE for use with Win32 APIs.
    pub fn as_raw(&self) -> HANDLE {
        self.0
    }
}

impl Drop for SnapshotHandle {
    fn drop(&mut self) {
        // SAFETY: We own this handle and it's valid.
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

/// A thread HANDLE opened with `THREAD_SUSPEND_RESUME` access.
/// Lives for a single suspend or resume call.
pub struct ThreadHandle(HANDLE);

impl ThreadHandle {
    /// Opens a thread by TID for suspend/resume.
    ///
    /// # Returns
    /// * `Ok(ThreadHandle)` - A wrapped handle to the thread
    /// * `Err` - If the thread has exited or access is denied
    pub fn open_for_suspend_resume(tid: u32) -> windows::core::Result<Self> {
        // SAFETY: OpenThread is safe to call with valid parameters.
        let handle = unsafe { OpenThread(THREAD_SUSPEND_RESUME, false, tid)? };
        Ok(Self(handle))
    }

    /// Increments the thread's suspend count, returning the previous count.
    pub fn suspend(&self) -> windows::core::Result<u32> {
        // SAFETY: The handle is valid and carries THREAD_SUSPEND_RESUME.
        let previous = unsafe { SuspendThread(self.0) };
        if previous == THREAD_OP_FAILED {
            return Err(windows::core::Error::from_win32());
        }
        Ok(previous)
    }

    /// Decrements the thread's suspend count, returning the previous count.
    pub fn resume(&self) -> windows::core::Result<u32> {
        // SAFETY: The handle is valid and carries THREAD_SUSPEND_RESUME.
        let previous = unsafe { ResumeThread(self.0) };
        if previous == THREAD_OP_FAILED {
            return Err(windows::core::Error::from_win32());
        }
        Ok(previous)
    }
}

impl Drop for ThreadHandle {
    fn drop(&mut self) {
        // SAFETY: We own this handle and it's valid (we got it from OpenThread).
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

/// A named mutex held for the lifetime of the process to keep a single
/// instance running.
pub struct SingleInstanceMutex(HANDLE);

impl SingleInstanceMutex {
    /// Creates or opens the named mutex.
    ///
    /// # Returns
    /// * `Ok(Some(_))` - This is the only instance
    /// * `Ok(None)` - Another instance already owns the name
    /// * `Err` - If the mutex cannot be created
    pub fn acquire(name: &str) -> windows::core::Result<Option<Self>> {
        // SAFETY: CreateMutexW is safe to call with a valid name.
        // GetLastError is read right after the call, before anything can reset it.
        unsafe {
            let handle = CreateMutexW(None, false, &HSTRING::from(name))?;
            let already_exists = GetLastError() == ERROR_ALREADY_EXISTS;
            let mutex = Self(handle);
            if already_exists {
                return Ok(None);
            }
            Ok(Some(mutex))
        }
    }
}

impl Drop for SingleInstanceMutex {
    fn drop(&mut self) {
        // SAFETY: We own this handle and it's valid.
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

/// A thread-level global hotkey registration.
/// Unregisters the hotkey when dropped.
pub struct HotkeyRegistration {
    id: i32,
}

impl HotkeyRegistration {
    /// Registers a hotkey that posts `WM_HOTKEY` with `id` to this thread's queue.
    pub fn register(id: i32, modifiers: u32, vk: u32) -> windows::core::Result<Self> {
        // SAFETY: A null HWND associates the hotkey with the calling thread.
        unsafe { RegisterHotKey(HWND::default(), id, HOT_KEY_MODIFIERS(modifiers), vk)? };
        Ok(Self { id })
    }

    pub fn id(&self) -> i32 {
        self.id
    }
}

impl Drop for HotkeyRegistration {
    fn drop(&mut self) {
        // SAFETY: The id was registered by this thread with a null HWND.
        let result = unsafe { UnregisterHotKey(HWND::default(), self.id) };
        match result {
            Ok(()) => debug!(id = self.id, "Hotkey unregistered"),
            Err(e) => debug!(id = self.id, error = %e, "UnregisterHotKey failed"),
        }
    }
}
