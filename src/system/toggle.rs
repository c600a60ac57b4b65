//! Suspend/resume toggle engine
//!
//! Each call to [`ToggleEngine::toggle`] runs one full cycle: fresh
//! snapshots, target resolution, one primitive per thread, state flip.
//! The engine trusts its own last intent and never queries live suspend
//! counts, except for the count `ResumeThread` hands back.

use std::fmt;

use tracing::{debug, info, warn};

use super::error::SystemResult;
use super::index::{ProcessIndex, ThreadIndex};
use super::platform::ThreadControl;
use super::resolver::{resolve_target_threads, ResolveStatus};

/// What the engine believes the target's threads are doing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToggleState {
    #[default]
    Running,
    Suspended,
}

impl fmt::Display for ToggleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToggleState::Running => f.write_str("running"),
            ToggleState::Suspended => f.write_str("suspended"),
        }
    }
}

/// Summary of one toggle cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleReport {
    /// Result of resolving the target
    pub status: ResolveStatus,
    /// Threads a primitive was attempted on
    pub attempted: usize,
    /// Threads whose open or primitive call failed
    pub failed: usize,
    /// Engine state after the cycle
    pub final_state: ToggleState,
}

/// Owns the toggle state for one target executable.
///
/// `toggle` takes `&mut self`, so cycles on one engine can never overlap.
pub struct ToggleEngine<P> {
    platform: P,
    target: String,
    state: ToggleState,
}

impl<P: ThreadControl> ToggleEngine<P> {
    /// Creates an engine in the `Running` state.
    pub fn new(platform: P, target: impl Into<String>) -> Self {
        Self {
            platform,
            target: target.into(),
            state: ToggleState::Running,
        }
    }

    pub fn state(&self) -> ToggleState {
        self.state
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    #[cfg(test)]
    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    /// Runs one toggle cycle against the live thread set.
    ///
    /// Fails only when a snapshot cannot be taken; the state is left
    /// untouched in that case so the next trigger retries from scratch.
    pub fn toggle(&mut self) -> SystemResult<ToggleReport> {
        let (processes, threads) = match self.take_snapshots() {
            Ok(snapshots) => snapshots,
            Err(e) => {
                warn!(event = "snapshot_failed", exe = %self.target, error = %e, "Snapshot failed");
                return Err(e);
            }
        };

        let (tids, status) = resolve_target_threads(&self.target, &processes, &threads);
        match status {
            ResolveStatus::ProcessNotFound => {
                self.state = ToggleState::Running;
                info!(event = "process_not_found", exe = %self.target, "{} not found, waiting...", self.target);
                return Ok(self.idle_report(status));
            }
            ResolveStatus::NoThreads => {
                self.state = ToggleState::Running;
                info!(event = "no_threads", exe = %self.target, "{} has no available threads, waiting...", self.target);
                return Ok(self.idle_report(status));
            }
            ResolveStatus::Found => {}
        }

        let suspending = self.state == ToggleState::Running;
        let mut failed = 0;
        let mut still_suspended = false;

        for &tid in &tids {
            let result = if suspending {
                self.platform.suspend_thread(tid).map(|_| ())
            } else {
                self.platform.resume_thread(tid).map(|previous| {
                    if previous > 1 {
                        debug!(tid, previous, "Thread still has outstanding suspends");
                        still_suspended = true;
                    }
                })
            };

            if let Err(e) = result {
                failed += 1;
                warn!(event = "thread_op_failed", exe = %self.target, tid, error = %e, "Thread operation failed");
            }
        }

        self.state = if suspending || still_suspended {
            ToggleState::Suspended
        } else {
            ToggleState::Running
        };

        let report = ToggleReport {
            status,
            attempted: tids.len(),
            failed,
            final_state: self.state,
        };
        info!(
            event = "toggle_applied",
            exe = %self.target,
            attempted = report.attempted,
            failed = report.failed,
            state = %report.final_state,
            "{} {}",
            self.target,
            report.final_state
        );
        Ok(report)
    }

    /// Resumes the target if the engine left it suspended.
    ///
    /// Returns `None` when there was nothing to undo.
    pub fn release(&mut self) -> Option<SystemResult<ToggleReport>> {
        if self.state == ToggleState::Suspended {
            Some(self.toggle())
        } else {
            None
        }
    }

    fn take_snapshots(&mut self) -> SystemResult<(ProcessIndex, ThreadIndex)> {
        let processes = self.platform.snapshot_processes()?;
        let threads = self.platform.snapshot_threads()?;
        debug!(names = processes.len(), owners = threads.len(), "Snapshots taken");
        Ok((processes, threads))
    }

    fn idle_report(&self, status: ResolveStatus) -> ToggleReport {
        ToggleReport {
            status,
            attempted: 0,
            failed: 0,
            final_state: self.state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::fake::{Call, FakePlatform};

    const TARGET: &str = "Target.exe";

    fn target_platform() -> FakePlatform {
        FakePlatform::new()
            .with_process("explorer.exe", 4000)
            .with_process(TARGET, 10)
            .with_process(TARGET, 11)
            .with_thread(4000, 4004)
            .with_thread(10, 100)
            .with_thread(10, 101)
            .with_thread(11, 200)
    }

    #[test]
    fn test_first_toggle_suspends_every_instance() {
        let mut engine = ToggleEngine::new(target_platform(), TARGET);

        let report = engine.toggle().expect("toggle should succeed");

        assert_eq!(report.status, ResolveStatus::Found);
        assert_eq!(report.attempted, 3);
        assert_eq!(report.failed, 0);
        assert_eq!(report.final_state, ToggleState::Suspended);
        assert_eq!(
            engine.platform().calls,
            vec![Call::Suspend(100), Call::Suspend(101), Call::Suspend(200)]
        );
        assert_eq!(engine.platform().suspend_count(4004), 0);
    }

    #[test]
    fn test_even_number_of_toggles_ends_running() {
        let mut engine = ToggleEngine::new(target_platform(), TARGET);

        for _ in 0..4 {
            engine.toggle().expect("toggle should succeed");
        }

        assert_eq!(engine.state(), ToggleState::Running);
        for tid in [100, 101, 200] {
            assert_eq!(engine.platform().suspend_count(tid), 0);
        }
    }

    #[test]
    fn test_process_not_found_touches_no_thread() {
        let platform = FakePlatform::new()
            .with_process("explorer.exe", 4000)
            .with_thread(4000, 4004);
        let mut engine = ToggleEngine::new(platform, TARGET);

        let report = engine.toggle().expect("toggle should succeed");

        assert_eq!(report.status, ResolveStatus::ProcessNotFound);
        assert_eq!(report.attempted, 0);
        assert_eq!(report.final_state, ToggleState::Running);
        assert!(engine.platform().calls.is_empty());
    }

    #[test]
    fn test_no_threads_resets_to_running() {
        let mut engine = ToggleEngine::new(target_platform(), TARGET);
        engine.toggle().expect("toggle should succeed");
        assert_eq!(engine.state(), ToggleState::Suspended);

        // Target restarted under new pids that have not spawned threads yet
        let saved_threads = std::mem::take(&mut engine.platform_mut().threads);
        let report = engine.toggle().expect("toggle should succeed");
        assert_eq!(report.status, ResolveStatus::NoThreads);
        assert_eq!(engine.state(), ToggleState::Running);

        engine.platform_mut().threads = saved_threads;
        engine.platform_mut().calls.clear();
        engine.toggle().expect("toggle should succeed");

        assert_eq!(engine.platform().calls[0], Call::Suspend(100));
    }

    #[test]
    fn test_failed_thread_does_not_abort_cycle() {
        let mut platform = target_platform();
        platform.failing_tids.insert(101);
        let mut engine = ToggleEngine::new(platform, TARGET);

        let report = engine.toggle().expect("toggle should succeed");

        assert_eq!(report.attempted, 3);
        assert_eq!(report.failed, 1);
        assert_eq!(report.final_state, ToggleState::Suspended);
        assert!(engine.platform().calls.contains(&Call::Suspend(200)));
    }

    #[test]
    fn test_unopenable_thread_counts_as_failure() {
        let mut platform = target_platform();
        platform.unopenable_tids.insert(100);
        let mut engine = ToggleEngine::new(platform, TARGET);

        let report = engine.toggle().expect("toggle should succeed");

        assert_eq!(report.attempted, 3);
        assert_eq!(report.failed, 1);
        assert_eq!(
            engine.platform().calls,
            vec![Call::Suspend(101), Call::Suspend(200)]
        );
    }

    #[test]
    fn test_nested_suspend_keeps_suspended_state() {
        let mut platform = target_platform();
        platform.suspend_externally(101);
        let mut engine = ToggleEngine::new(platform, TARGET);

        engine.toggle().expect("suspend should succeed");
        assert_eq!(engine.platform().suspend_count(101), 2);

        let report = engine.toggle().expect("resume should succeed");

        assert_eq!(report.failed, 0);
        assert_eq!(report.final_state, ToggleState::Suspended);
        assert_eq!(engine.platform().suspend_count(101), 1);
        assert_eq!(engine.platform().suspend_count(100), 0);
    }

    #[test]
    fn test_snapshot_failure_keeps_state() {
        let mut engine = ToggleEngine::new(target_platform(), TARGET);
        engine.toggle().expect("toggle should succeed");

        engine.platform_mut().fail_thread_snapshot = true;
        engine.platform_mut().calls.clear();

        assert!(engine.toggle().is_err());
        assert_eq!(engine.state(), ToggleState::Suspended);
        assert!(engine.platform().calls.is_empty());
    }

    #[test]
    fn test_handles_released_on_every_path() {
        let mut engine = ToggleEngine::new(target_platform(), TARGET);
        let ledger = engine.platform().ledger();

        engine.toggle().expect("toggle should succeed");
        // two snapshots plus three thread handles
        assert_eq!(ledger.acquired(), 5);
        assert_eq!(ledger.outstanding(), 0);

        engine.platform_mut().failing_tids.insert(200);
        engine.toggle().expect("toggle should succeed");
        assert_eq!(ledger.outstanding(), 0);

        // process snapshot taken, thread snapshot fails
        engine.platform_mut().fail_thread_snapshot = true;
        let before = ledger.acquired();
        assert!(engine.toggle().is_err());
        assert_eq!(ledger.acquired(), before + 1);
        assert_eq!(ledger.outstanding(), 0);

        engine.platform_mut().fail_process_snapshot = true;
        assert!(engine.toggle().is_err());
        assert_eq!(ledger.outstanding(), 0);
    }

    #[test]
    fn test_release_resumes_only_when_suspended() {
        let mut engine = ToggleEngine::new(target_platform(), TARGET);
        assert!(engine.release().is_none());

        engine.toggle().expect("toggle should succeed");
        let report = engine
            .release()
            .expect("engine was suspended")
            .expect("resume should succeed");

        assert_eq!(report.final_state, ToggleState::Running);
        assert_eq!(engine.platform().suspend_count(200), 0);
    }
}
