//! Abstraction traits implemented by the host (callback timer, clock, and
//! bounded async delay).
pub mod bounded_delay;
pub mod clock;
pub mod host_timer;
