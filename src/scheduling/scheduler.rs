//! Scheduler façade: drop-in replacements for the host's delayed and
//! repeating callback primitives, safe for delays of any length.
use alloc::boxed::Box;
use alloc::rc::Rc;

use crate::error::ScheduleError;
use crate::infra::clamp::ClampBound;
use crate::scheduling::interval::{self, IntervalHandle};
use crate::scheduling::timeout::{self, TimeoutHandle};
use crate::scheduling::traits::{clock::Clock, host_timer::HostTimer};

/// Entry point for chained timeouts and intervals on a single event thread.
///
/// Cloning is cheap; clones share the host and the clamp bound.
///
/// # Example
///
/// ```rust,ignore
/// use safe_timers::Scheduler;
///
/// let scheduler = Scheduler::new(host);
/// // 40 days: armed as two host timers under the hood.
/// let handle = scheduler.schedule_delayed(40 * 24 * 3_600_000, || rotate_keys())?;
/// scheduler.cancel_delayed(&handle);
/// ```
pub struct Scheduler<H> {
    host: Rc<H>,
    bound: ClampBound,
}

impl<H> Clone for Scheduler<H> {
    fn clone(&self) -> Self {
        Self {
            host: Rc::clone(&self.host),
            bound: self.bound,
        }
    }
}

impl<H> Scheduler<H>
where
    H: HostTimer + Clock + 'static,
{
    /// Wrap a host, snapshotting the process-wide clamp bound.
    pub fn new(host: H) -> Self {
        Self::from_shared(Rc::new(host))
    }

    /// Like [`new`](Self::new), for a host already shared with the event
    /// loop that drives it.
    pub fn from_shared(host: Rc<H>) -> Self {
        Self::with_bound(host, ClampBound::global())
    }

    /// Wrap a shared host with an explicit clamp bound.
    ///
    /// Test use only: a bound below the host threshold forces multi-hop
    /// chains on short delays.
    #[doc(hidden)]
    pub fn with_bound(host: Rc<H>, bound: ClampBound) -> Self {
        Self { host, bound }
    }

    pub fn host(&self) -> &Rc<H> {
        &self.host
    }

    pub fn bound(&self) -> ClampBound {
        self.bound
    }

    /// Run `callback` once, `delay_ms` milliseconds from now.
    ///
    /// Returns immediately; the callback never runs inside this call.
    pub fn schedule_delayed<F>(
        &self,
        delay_ms: u64,
        callback: F,
    ) -> Result<TimeoutHandle, ScheduleError>
    where
        F: FnOnce() + 'static,
    {
        timeout::start(&self.host, self.bound, delay_ms, Box::new(callback))
    }

    /// Like [`schedule_delayed`](Self::schedule_delayed), forwarding `args`
    /// to the callback when it fires.
    pub fn schedule_delayed_with<A, F>(
        &self,
        delay_ms: u64,
        args: A,
        callback: F,
    ) -> Result<TimeoutHandle, ScheduleError>
    where
        A: 'static,
        F: FnOnce(A) + 'static,
    {
        self.schedule_delayed(delay_ms, move || callback(args))
    }

    /// Cancel a delayed callback. Idempotent; no-op if it already fired.
    pub fn cancel_delayed(&self, handle: &TimeoutHandle) {
        handle.cancel();
    }

    /// Run `callback` every `period_ms` milliseconds, first one period from now.
    pub fn schedule_repeating<F>(
        &self,
        period_ms: u64,
        callback: F,
    ) -> Result<IntervalHandle, ScheduleError>
    where
        F: FnMut() + 'static,
    {
        interval::start(&self.host, self.bound, period_ms, Box::new(callback))
    }

    /// Like [`schedule_repeating`](Self::schedule_repeating), passing `args`
    /// to every invocation.
    pub fn schedule_repeating_with<A, F>(
        &self,
        period_ms: u64,
        args: A,
        mut callback: F,
    ) -> Result<IntervalHandle, ScheduleError>
    where
        A: 'static,
        F: FnMut(&A) + 'static,
    {
        self.schedule_repeating(period_ms, move || callback(&args))
    }

    /// Stop a repeating callback. Idempotent, callable from the callback itself.
    pub fn cancel_repeating(&self, handle: &IntervalHandle) {
        handle.cancel();
    }
}
