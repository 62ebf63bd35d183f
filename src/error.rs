//! Error definitions shared across library modules.
//! Delays are unsigned by construction, so the remaining failures are caller
//! contract violations detected eagerly at scheduling or configuration time.
use thiserror_no_std::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors returned when a delayed or repeating callback cannot be scheduled.
pub enum ScheduleError {
    /// `now + delay` does not fit in the millisecond clock range.
    #[error("Deadline overflow: now {now_ms} ms + delay {delay_ms} ms")]
    DeadlineOverflow { now_ms: u64, delay_ms: u64 },
    /// A repeating callback needs a strictly positive period.
    #[error("Repeating period must be greater than zero")]
    ZeroPeriod,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors raised while overriding the clamp bound.
pub enum ConfigError {
    /// The bound must stay within `1..=DEFAULT_MAX_DELAY_MS`.
    #[error("Invalid clamp bound: {requested} ms")]
    InvalidBound { requested: u32 },
}
