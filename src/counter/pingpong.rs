//! The PingPong counter
//!
//! Each ping increments the count, then checks it against the trigger. When
//! the count is a multiple of a nonzero trigger, the registered callback is
//! invoked with the new count before `ping` returns.

use crate::logging::trace;

/// Callback shape at the C boundary: one `i32` argument, no return value
pub type PongFn = extern "C" fn(i32);

/// Ping-pong counter
///
/// Generic over the callback so the same state machine serves C function
/// pointers, Rust closures and host-language objects. The counter never owns
/// host state reachable through `F`; keeping it alive while registered is the
/// registrant's job.
///
/// Overflow: `current` wraps in two's complement.
pub struct PingPong<F = PongFn> {
    current: i32,
    trigger: i32,
    callback: Option<F>,
}

impl<F> PingPong<F> {
    /// Create counter starting at `start`, firing on multiples of `trigger`
    ///
    /// Any value is accepted. A zero trigger never fires.
    #[inline]
    pub const fn new(start: i32, trigger: i32) -> Self {
        Self {
            current: start,
            trigger,
            callback: None,
        }
    }

    /// Current count
    #[inline]
    pub fn current(&self) -> i32 {
        self.current
    }

    /// Trigger divisor
    #[inline]
    pub fn trigger(&self) -> i32 {
        self.trigger
    }

    /// Check if a callback is registered
    #[inline]
    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    /// Registered callback, if any
    #[inline]
    pub fn callback(&self) -> Option<&F> {
        self.callback.as_ref()
    }

    /// Replace the registered callback; `None` clears it
    ///
    /// Returns the previous registration. Never invokes either callback.
    pub fn set_callback(&mut self, callback: Option<F>) -> Option<F> {
        trace!(
            event = "set_callback",
            registered = callback.is_some(),
            replaced = self.callback.is_some()
        );
        std::mem::replace(&mut self.callback, callback)
    }

    /// Advance one step without dispatching
    ///
    /// Returns the new count when it satisfies the trigger condition.
    /// Callers that must not hold locks across host code use this and
    /// invoke the callback themselves.
    #[inline]
    pub fn advance(&mut self) -> Option<i32> {
        self.current = self.current.wrapping_add(1);

        if self.fires(self.current) {
            Some(self.current)
        } else {
            None
        }
    }

    /// Trigger condition for `value`
    ///
    /// `wrapping_rem` keeps `i32::MIN % -1` from overflowing; the result is 0.
    #[inline]
    pub fn fires(&self, value: i32) -> bool {
        self.trigger != 0 && value.wrapping_rem(self.trigger) == 0
    }
}

impl<F: FnMut(i32)> PingPong<F> {
    /// Increment, then invoke the callback if the trigger condition holds
    ///
    /// Returns the value passed to the callback, or `None` if the condition
    /// did not hold. A firing with no callback registered still returns the
    /// value.
    pub fn ping(&mut self) -> Option<i32> {
        let fired = self.advance()?;

        trace!(event = "pong", value = fired, dispatched = self.callback.is_some());

        if let Some(callback) = self.callback.as_mut() {
            callback(fired);
        }

        Some(fired)
    }
}

impl<F> std::fmt::Debug for PingPong<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PingPong")
            .field("current", &self.current)
            .field("trigger", &self.trigger)
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}
