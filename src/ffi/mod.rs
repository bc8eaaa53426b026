//! C FFI - flat boundary over the counter core
//!
//! Design: only scalars and opaque handles cross the boundary.
//! 1. Counter lifecycle (new, free) through a generation-checked handle table
//! 2. Callback registration and ping
//! 3. Error reporting through a thread-local last-error code
//!
//! Misused handles (null, freed, never issued) turn the call into a no-op,
//! log a warning and set the last error. Nothing here is undefined behaviour
//! for a bad handle value.

mod hello;
mod pingpong;
mod registry;

pub use hello::{greeting, hello_world, hello_world_free};
pub use pingpong::{ping_pong_free, ping_pong_new, ping_pong_ping, ping_pong_set_callback};
pub use registry::{Handle, HandleTable, MAX_HANDLES, NULL_HANDLE};

use crate::errors::{self, HandleError};
use crate::logging::{debug, log_handle_fault};
use std::cell::Cell;
use std::ffi::c_char;

thread_local! {
    static LAST_ERROR: Cell<i32> = const { Cell::new(errors::OK) };
}

/// Initialize the library (logging from environment); safe to call repeatedly
#[no_mangle]
pub extern "C" fn ping_pong_init() {
    crate::logging::init();
    debug!("ping-pong boundary ready");
}

/// Error code of the most recent boundary call on this thread, 0 on success
#[no_mangle]
pub extern "C" fn ping_pong_last_error() -> i32 {
    LAST_ERROR.with(Cell::get)
}

/// Static description of an error code; never null, never freed
#[no_mangle]
pub extern "C" fn ping_pong_error_message(code: i32) -> *const c_char {
    errors::code_message_ptr(code)
}

#[inline]
pub(crate) fn clear_last_error() {
    LAST_ERROR.with(|e| e.set(errors::OK));
}

/// Record and log a rejected handle
pub(crate) fn report(function: &'static str, handle: Handle, err: HandleError) {
    log_handle_fault(function, handle, &err);
    LAST_ERROR.with(|e| e.set(err.code()));
}
