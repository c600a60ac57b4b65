//! Snapshot records and the lookup indexes built from them
//!
//! Both indexes are rebuilt on every toggle cycle and discarded afterwards.
//! Buckets keep enumeration order and never hold the same id twice.

use std::collections::{HashMap, HashSet};

/// A single entry of a process snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRecord {
    /// Executable name as reported by the OS (e.g., "notepad.exe")
    pub name: String,
    /// Process ID
    pub pid: u32,
}

/// A single entry of a thread snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadRecord {
    /// Thread ID
    pub tid: u32,
    /// ID of the process that owns the thread
    pub owner_pid: u32,
}

/// Ids in first-seen order, with a set alongside for O(1) duplicate checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct IdBucket {
    ordered: Vec<u32>,
    seen: HashSet<u32>,
}

impl IdBucket {
    fn push(&mut self, id: u32) {
        if self.seen.insert(id) {
            self.ordered.push(id);
        }
    }

    fn as_slice(&self) -> &[u32] {
        &self.ordered
    }
}

/// Executable name -> process IDs sharing that name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessIndex {
    by_name: HashMap<String, IdBucket>,
}

impl ProcessIndex {
    /// Appends a record to the bucket for its name.
    pub fn insert(&mut self, record: ProcessRecord) {
        self.by_name.entry(record.name).or_default().push(record.pid);
    }

    /// Process IDs for an exact, case-sensitive executable name.
    pub fn pids(&self, name: &str) -> Option<&[u32]> {
        self.by_name.get(name).map(IdBucket::as_slice)
    }

    /// Number of distinct executable names.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl FromIterator<ProcessRecord> for ProcessIndex {
    fn from_iter<I: IntoIterator<Item = ProcessRecord>>(iter: I) -> Self {
        let mut index = Self::default();
        for record in iter {
            index.insert(record);
        }
        index
    }
}

/// Owning process ID -> thread IDs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadIndex {
    by_owner: HashMap<u32, IdBucket>,
}

impl ThreadIndex {
    /// Appends a record to the bucket for its owner.
    pub fn insert(&mut self, record: ThreadRecord) {
        self.by_owner.entry(record.owner_pid).or_default().push(record.tid);
    }

    /// Thread IDs owned by `pid`, in enumeration order.
    pub fn tids(&self, pid: u32) -> Option<&[u32]> {
        self.by_owner.get(&pid).map(IdBucket::as_slice)
    }

    /// Number of distinct owning processes.
    pub fn len(&self) -> usize {
        self.by_owner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_owner.is_empty()
    }
}

impl FromIterator<ThreadRecord> for ThreadIndex {
    fn from_iter<I: IntoIterator<Item = ThreadRecord>>(iter: I) -> Self {
        let mut index = Self::default();
        for record in iter {
            index.insert(record);
        }
        index
    }
}
