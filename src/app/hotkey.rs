//! Hotkey combination parsing ("ctrl+space", "alt+shift+f9", ...)
//!
//! Produces the modifier bits and virtual-key code RegisterHotKey expects.

use std::fmt;

use super::error::{AppError, AppResult};

// RegisterHotKey modifier flags
const MOD_ALT: u32 = 0x0001;
const MOD_CONTROL: u32 = 0x0002;
const MOD_SHIFT: u32 = 0x0004;
const MOD_WIN: u32 = 0x0008;
const MOD_NOREPEAT: u32 = 0x4000;

/// A parsed global hotkey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hotkey {
    /// MOD_* flags, always including MOD_NOREPEAT
    pub modifiers: u32,
    /// Virtual-key code
    pub vk: u32,
    label: String,
}

impl Hotkey {
    /// Parses a `+`-separated combination; exactly one non-modifier key.
    pub fn parse(input: &str) -> AppResult<Self> {
        let invalid = |reason| AppError::InvalidHotkey {
            input: input.to_string(),
            reason,
        };

        // Holding the combo down must not fire repeated toggles
        let mut modifiers = MOD_NOREPEAT;
        let mut vk = None;

        for part in input.split('+') {
            let token = part.trim().to_ascii_lowercase();
            if token.is_empty() {
                return Err(invalid("empty key name"));
            }
            match token.as_str() {
                "ctrl" | "control" => modifiers |= MOD_CONTROL,
                "alt" => modifiers |= MOD_ALT,
                "shift" => modifiers |= MOD_SHIFT,
                "win" | "super" | "meta" => modifiers |= MOD_WIN,
                key => {
                    if vk.is_some() {
                        return Err(invalid("more than one non-modifier key"));
                    }
                    vk = Some(virtual_key(key).ok_or_else(|| invalid("unknown key name"))?);
                }
            }
        }

        let vk = vk.ok_or_else(|| invalid("missing a non-modifier key"))?;
        Ok(Self {
            modifiers,
            vk,
            label: input.trim().to_string(),
        })
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Maps a lower-case key name to its virtual-key code.
fn virtual_key(name: &str) -> Option<u32> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        // VK codes for letters and digits match their upper-case ASCII values
        if c.is_ascii_alphanumeric() {
            return Some(c.to_ascii_uppercase() as u32);
        }
    }

    if let Some(n) = name.strip_prefix('f').and_then(|n| n.parse::<u32>().ok()) {
        return (1..=24).contains(&n).then(|| 0x70 + n - 1);
    }

    let vk = match name {
        "space" => 0x20,
        "enter" | "return" => 0x0D,
        "tab" => 0x09,
        "esc" | "escape" => 0x1B,
        "backspace" => 0x08,
        "pause" => 0x13,
        "pageup" | "pgup" => 0x21,
        "pagedown" | "pgdn" => 0x22,
        "end" => 0x23,
        "home" => 0x24,
        "insert" | "ins" => 0x2D,
        "delete" | "del" => 0x2E,
        _ => return None,
    };
    Some(vk)
}
