//! Core data types shared by the chained timeout, the chained interval, and
//! the async chained sleep.
use crate::error::ScheduleError;

/// Lifecycle of a single chained timeout.
///
/// ```text
/// Armed ──fire, now < deadline──▶ Rearmed ──┐
///   │                               ▲       │ (repeat until deadline)
///   │                               └───────┘
///   ├──fire, now ≥ deadline──▶ Fired
///   └──cancel (any non-terminal state)──▶ Cancelled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerPhase {
    /// First host timer armed, not fired yet.
    Armed,
    /// At least one hop elapsed; a follow-up host timer is armed.
    Rearmed,
    /// The user callback ran. Terminal.
    Fired,
    /// Cancelled before the callback ran. Terminal.
    Cancelled,
}

impl TimerPhase {
    /// `true` once no further host timer will be armed for this handle.
    pub fn is_terminal(self) -> bool {
        matches!(self, TimerPhase::Fired | TimerPhase::Cancelled)
    }
}

/// Absolute deadline of a delay requested at `now_ms`.
///
/// Computed once per schedule so the total wait is anchored to the clock
/// rather than to the sum of the clamped hops.
pub fn deadline_after(now_ms: u64, delay_ms: u64) -> Result<u64, ScheduleError> {
    now_ms
        .checked_add(delay_ms)
        .ok_or(ScheduleError::DeadlineOverflow { now_ms, delay_ms })
}
