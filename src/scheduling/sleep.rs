//! Async chained sleep for hosts exposing a bounded async delay
//! ([`BoundedDelay`]) instead of a callback timer.
//!
//! Same algorithm as the chained timeout: the deadline is fixed once from the
//! clock, then bounded delays are awaited until the clock reaches it.
use embassy_sync::{blocking_mutex::raw::RawMutex, signal::Signal};
use futures_util::{
    future::{select, Either},
    pin_mut,
};

use crate::core::deadline_after;
use crate::error::ScheduleError;
use crate::infra::clamp::ClampBound;
use crate::scheduling::traits::{bounded_delay::BoundedDelay, clock::Clock};

/// Result of [`sleep_chained_or_cancel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SleepOutcome {
    /// The full delay elapsed after `hops` bounded delays.
    Elapsed { hops: u32 },
    /// The cancel signal was raised first.
    Cancelled,
}

/// Sleep for `delay_ms` milliseconds, however large, and return the number
/// of bounded delays awaited.
///
/// At least one delay is always awaited, so `delay_ms == 0` still yields to
/// the host once.
pub async fn sleep_chained<T>(
    timer: &mut T,
    delay_ms: u64,
    bound: ClampBound,
) -> Result<u32, ScheduleError>
where
    T: BoundedDelay + Clock,
{
    let deadline = deadline_after(timer.now_ms(), delay_ms)?;
    let mut remaining = delay_ms;
    let mut hops: u32 = 0;

    loop {
        let hop_ms = bound.clamp(remaining);
        hops = hops.saturating_add(1);

        #[cfg(feature = "defmt")]
        defmt::trace!("Sleep hop {}: {} ms of {} ms remaining", hops, hop_ms, remaining);

        timer.delay_ms(hop_ms).await;

        let now = timer.now_ms();
        if now >= deadline {
            return Ok(hops);
        }
        remaining = deadline - now;
    }
}

/// [`sleep_chained`] raced against `cancel`.
///
/// Whichever completes first wins; the signal is consumed when it wins.
pub async fn sleep_chained_or_cancel<T, M>(
    timer: &mut T,
    delay_ms: u64,
    bound: ClampBound,
    cancel: &Signal<M, ()>,
) -> Result<SleepOutcome, ScheduleError>
where
    T: BoundedDelay + Clock,
    M: RawMutex,
{
    let sleep = sleep_chained(timer, delay_ms, bound);
    let cancelled = cancel.wait();
    pin_mut!(sleep);
    pin_mut!(cancelled);

    match select(sleep, cancelled).await {
        Either::Left((result, _)) => result.map(|hops| SleepOutcome::Elapsed { hops }),
        Either::Right(((), _)) => {
            #[cfg(feature = "defmt")]
            defmt::debug!("Chained sleep cancelled");

            Ok(SleepOutcome::Cancelled)
        }
    }
}
