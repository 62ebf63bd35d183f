//! Millisecond clock consumed to anchor deadlines.

/// Source of the current time in milliseconds.
///
/// Monotonic or wall-clock, as long as it uses the same unit as the delays
/// handed to the host timer. Readings must not go backwards.
pub trait Clock {
    /// Current time in milliseconds since an arbitrary, fixed origin.
    fn now_ms(&self) -> u64;
}
