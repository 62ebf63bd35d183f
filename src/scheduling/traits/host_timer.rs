//! Callback-based host timer primitive, the one that breaks above
//! [`DEFAULT_MAX_DELAY_MS`](crate::infra::clamp::DEFAULT_MAX_DELAY_MS).
use alloc::boxed::Box;

/// Single-threaded "call me back in N ms" primitive.
///
/// Implementations run every `fire` closure on the same event thread that
/// calls [`arm`](HostTimer::arm), never synchronously from inside `arm`.
pub trait HostTimer {
    /// Identifies one armed host timer.
    type Token: 'static;

    /// Arm a one-shot timer running `fire` after `delay_ms` milliseconds.
    ///
    /// Callers only pass delays already clamped to the host's safe range.
    fn arm(&self, delay_ms: u32, fire: Box<dyn FnOnce()>) -> Self::Token;

    /// Cancel an armed timer. Must be idempotent and accept tokens whose
    /// timer already fired.
    fn cancel(&self, token: Self::Token);
}
