//! Counter core - the ping-pong state machine
//!
//! Design: a single counter advanced one step per ping, firing a registered
//! callback whenever the new count is a multiple of the trigger. Knows nothing
//! about handles, C strings or error codes; that belongs to the ffi layer.

mod pingpong;

pub use pingpong::{PingPong, PongFn};

#[cfg(test)]
mod tests;
