//! `safe-timers` library: delayed and repeating callbacks that keep working
//! when the requested delay exceeds what the host timer primitive accepts
//! (2^31 − 1 ms, roughly 24.8 days). Long delays are split into bounded hops
//! that are re-armed back-to-back until the wall-clock deadline is reached.
//!
//! The crate never owns a timer. Hosts plug in through the traits in
//! [`scheduling::traits`].
#![no_std]
extern crate alloc;
//==================================================================================
/// Shared state types used by the chained timeout and interval machinery.
pub mod core;
/// Caller contract violations and configuration errors.
pub mod error;
/// Low-level building blocks: the bounded delay clamp and its process-wide bound.
pub mod infra;
/// Chained timeouts, intervals, async chained sleeps, and host abstraction traits.
pub mod scheduling;
//==================================================================================
pub use crate::error::{ConfigError, ScheduleError};
pub use crate::infra::clamp::{ClampBound, DEFAULT_MAX_DELAY_MS};
pub use crate::scheduling::interval::IntervalHandle;
pub use crate::scheduling::scheduler::Scheduler;
pub use crate::scheduling::timeout::TimeoutHandle;
