//! Error types
//!
//! Handle faults are reported across the C boundary as stable integer codes,
//! so every variant maps to exactly one code and one static message.

use std::ffi::c_char;
use std::path::PathBuf;
use thiserror::Error;

/// Misuse of a counter handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HandleError {
    /// Handle value 0
    #[error("null handle")]
    Null,

    /// Slot exists but was freed (or reused) since the handle was issued
    #[error("stale handle: slot {index} is at generation {current}, handle carries {generation}")]
    Stale {
        index: u32,
        generation: u32,
        current: u32,
    },

    /// Slot index was never issued
    #[error("handle slot {index} out of range")]
    OutOfRange { index: u32 },

    /// Table is at its opt-in limit or the handle encoding limit
    #[error("handle table exhausted ({capacity} live counters)")]
    Exhausted { capacity: usize },
}

/// Error code meaning "no error"
pub const OK: i32 = 0;

impl HandleError {
    /// Stable code reported by `ping_pong_last_error`
    pub const fn code(&self) -> i32 {
        match self {
            Self::Null => 1,
            Self::Stale { .. } => 2,
            Self::OutOfRange { .. } => 3,
            Self::Exhausted { .. } => 4,
        }
    }
}

/// Static, nul-terminated description for an error code
pub fn code_message(code: i32) -> &'static [u8] {
    match code {
        OK => b"no error\0",
        1 => b"null handle\0",
        2 => b"stale handle (counter already freed)\0",
        3 => b"handle out of range\0",
        4 => b"handle table exhausted\0",
        _ => b"unknown error\0",
    }
}

/// Pointer form of [`code_message`] for C callers
#[inline]
pub fn code_message_ptr(code: i32) -> *const c_char {
    code_message(code).as_ptr() as *const c_char
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}
