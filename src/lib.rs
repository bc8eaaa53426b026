//! pingpong - a stateful counter exposed to foreign-function hosts
//!
//! The counter advances on each ping and calls back into the host whenever
//! the count reaches a multiple of its trigger. Hosts (Python ctypes, Node
//! ffi, C) load the `cdylib` and drive it through the flat functions in
//! [`ffi`]; Rust users can use [`PingPong`] directly.

pub mod config;
pub mod counter;
pub mod errors;
pub mod ffi;
pub mod logging;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used items
pub use config::Config;
pub use counter::{PingPong, PongFn};
pub use errors::{ConfigError, HandleError};
pub use ffi::{Handle, HandleTable};
pub use logging::{LogConfig, init as init_logging};
