//! Scheduling layer: chained timeouts and intervals over a callback-based
//! host timer, the async chained sleep over a bounded async delay, and the
//! host abstraction traits both rely on.
//!
//! ## Chaining
//!
//! A requested delay `D` is turned into an absolute deadline once, at
//! schedule time. The host is then armed for `min(D, bound)`; every time it
//! fires, the remaining time is recomputed from the clock and the host is
//! re-armed for `min(remaining, bound)` until the deadline is reached.
//!
//! With the default bound (`2^31 − 1` ms) a delay of 30 days takes two hops:
//!
//! | Hop | Armed for        | Remaining after |
//! |-----|------------------|-----------------|
//! | 1   | 2 147 483 647 ms | 444 516 353 ms  |
//! | 2   | 444 516 353 ms   | 0               |

pub mod embassy_timer;
pub mod interval;
pub mod scheduler;
pub mod sleep;
pub mod timeout;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;
