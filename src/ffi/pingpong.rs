//! Counter lifecycle and operations - C API
//!
//! The table lock is never held while host code runs: `ping_pong_ping`
//! advances under the lock, copies the callback out, then calls it. A callback
//! may therefore re-enter any function here, including freeing its own handle.

use super::registry::{Handle, HandleTable, NULL_HANDLE};
use super::{clear_last_error, report};
use crate::config::Config;
use crate::counter::{PingPong, PongFn};
use crate::errors::HandleError;
use crate::logging::{log_boundary_call, trace, warn};
use once_cell::sync::Lazy;
use parking_lot::Mutex;

static TABLE: Lazy<Mutex<HandleTable>> = Lazy::new(|| {
    let limit = match Config::from_env() {
        Ok(config) => config.registry.max_handles,
        Err(err) => {
            warn!(error = %err, "ignoring invalid configuration");
            None
        }
    };
    Mutex::new(limit.map_or_else(HandleTable::new, HandleTable::with_capacity))
});

/// Run `f` on the counter behind `handle`, reporting a bad handle
fn with_counter<R>(
    function: &'static str,
    handle: Handle,
    f: impl FnOnce(&mut PingPong) -> R,
) -> Result<R, HandleError> {
    log_boundary_call(function, handle);

    let result = TABLE.lock().get_mut(handle).map(f);
    match result {
        Ok(value) => {
            clear_last_error();
            Ok(value)
        }
        Err(err) => {
            report(function, handle, err);
            Err(err)
        }
    }
}

/// Create a counter starting at `start`, firing on multiples of `trigger`
///
/// Returns 0 only if an opt-in `max_handles` limit (or the handle encoding
/// limit) is reached; see `ping_pong_last_error`.
#[no_mangle]
pub extern "C" fn ping_pong_new(start: i32, trigger: i32) -> Handle {
    let inserted = TABLE.lock().insert(PingPong::new(start, trigger));

    match inserted {
        Ok(handle) => {
            trace!(event = "ping_pong_new", handle, start, trigger);
            clear_last_error();
            handle
        }
        Err(err) => {
            report("ping_pong_new", NULL_HANDLE, err);
            NULL_HANDLE
        }
    }
}

/// Destroy the counter behind `handle`
///
/// Freeing 0 is a no-op. Freeing twice is reported as a stale handle.
#[no_mangle]
pub extern "C" fn ping_pong_free(handle: Handle) {
    log_boundary_call("ping_pong_free", handle);

    if handle == NULL_HANDLE {
        clear_last_error();
        return;
    }

    let removed = TABLE.lock().remove(handle);
    match removed {
        // Dropped outside the lock
        Ok(counter) => {
            trace!(event = "ping_pong_free", handle, last_value = counter.current());
            clear_last_error();
        }
        Err(err) => report("ping_pong_free", handle, err),
    }
}

/// Register `callback` on the counter, replacing any previous one
///
/// A null callback clears the registration. The function must stay callable
/// until it is replaced or the counter is freed.
#[no_mangle]
pub extern "C" fn ping_pong_set_callback(handle: Handle, callback: Option<PongFn>) {
    let _ = with_counter("ping_pong_set_callback", handle, |pp| {
        pp.set_callback(callback);
    });
}

/// Increment the counter, invoking its callback if the trigger condition holds
///
/// The last error reflects this ping, not calls the callback made.
#[no_mangle]
pub extern "C" fn ping_pong_ping(handle: Handle) {
    let pong = with_counter("ping_pong_ping", handle, |pp| {
        let value = pp.advance()?;
        pp.callback().map(|callback| (*callback, value))
    });

    if let Ok(Some((callback, value))) = pong {
        trace!(event = "pong", handle, value);
        callback(value);
        clear_last_error();
    }
}
