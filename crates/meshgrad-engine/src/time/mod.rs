//! Time subsystem.
//!
//! Deadlines are computed from caller-supplied `Instant`s, so nothing here
//! sleeps or spawns and tests can step time by hand.
//! Intended usage:
//! - `schedule(now, action)` on every input event
//! - `poll(now)` once per host tick; it yields the latest action when due

mod debounce;

pub use debounce::Debouncer;
