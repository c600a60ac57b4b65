//! Resolves the configured executable name to the threads it owns

use std::fmt;

use super::index::{ProcessIndex, ThreadIndex};

/// Outcome of looking up the target in a pair of snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveStatus {
    /// At least one thread belongs to a matching process
    Found,
    /// No process carries the target name
    ProcessNotFound,
    /// Matching processes exist but none of them has a thread
    NoThreads,
}

impl fmt::Display for ResolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ResolveStatus::Found => "found",
            ResolveStatus::ProcessNotFound => "process not found",
            ResolveStatus::NoThreads => "no threads",
        };
        f.write_str(text)
    }
}

/// Collects the threads of every process named `target`.
///
/// Processes are visited in the order the process snapshot produced them and
/// threads in the order the thread snapshot produced them. Every instance of
/// the name is included, not just the first.
pub fn resolve_target_threads(
    target: &str,
    processes: &ProcessIndex,
    threads: &ThreadIndex,
) -> (Vec<u32>, ResolveStatus) {
    let pids = match processes.pids(target) {
        Some(pids) if !pids.is_empty() => pids,
        _ => return (Vec::new(), ResolveStatus::ProcessNotFound),
    };

    let tids: Vec<u32> = pids
        .iter()
        .filter_map(|&pid| threads.tids(pid))
        .flatten()
        .copied()
        .collect();

    if tids.is_empty() {
        (tids, ResolveStatus::NoThreads)
    } else {
        (tids, ResolveStatus::Found)
    }
}
