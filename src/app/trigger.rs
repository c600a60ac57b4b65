//! Trigger source: WM_HOTKEY messages plus console quit keys
//!
//! Both queues are polled without blocking; the host loop sleeps between
//! empty polls.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A discrete request delivered to the host loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The global hotkey was pressed
    Toggle,
    /// The user asked to quit from the console
    Quit,
}

/// Maps a console key event to a trigger.
///
/// Only key presses count; releases and repeats are ignored.
pub fn console_trigger(key: KeyEvent) -> Option<Trigger> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Trigger::Quit),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Trigger::Quit)
        }
        _ => None,
    }
}

#[cfg(windows)]
pub use source::TriggerSource;

#[cfg(windows)]
mod source {
    use std::io;
    use std::time::Duration;

    use crossterm::event::{self, Event};
    use windows::Win32::Foundation::HWND;
    use windows::Win32::UI::WindowsAndMessaging::{PeekMessageW, MSG, PM_REMOVE, WM_HOTKEY};

    use super::{console_trigger, Trigger};

    /// Polls the thread message queue and the console.
    ///
    /// Must live on the thread that registered the hotkey, since WM_HOTKEY
    /// is posted to that thread's queue.
    pub struct TriggerSource {
        hotkey_id: i32,
    }

    impl TriggerSource {
        pub fn new(hotkey_id: i32) -> Self {
            Self { hotkey_id }
        }

        /// Returns the next pending trigger, if any.
        ///
        /// At most one hotkey press is taken per call; further presses stay
        /// queued so toggle cycles run one after another.
        pub fn poll(&mut self) -> io::Result<Option<Trigger>> {
            if self.next_hotkey() {
                return Ok(Some(Trigger::Toggle));
            }

            while event::poll(Duration::ZERO)? {
                if let Event::Key(key) = event::read()? {
                    if let Some(trigger) = console_trigger(key) {
                        return Ok(Some(trigger));
                    }
                }
            }
            Ok(None)
        }

        fn next_hotkey(&self) -> bool {
            let mut msg = MSG::default();
            // SAFETY: msg is a valid, writable MSG; the filter limits removal
            // to WM_HOTKEY so no other thread message is lost.
            while unsafe { PeekMessageW(&mut msg, HWND::default(), WM_HOTKEY, WM_HOTKEY, PM_REMOVE) }
                .as_bool()
            {
                if msg.wParam.0 == self.hotkey_id as usize {
                    return true;
                }
            }
            false
        }
    }
}
