//! Chained interval: a repeating callback where every iteration is its own
//! chained timeout, scheduled once the previous iteration's callback returns.
//!
//! The interval owns exactly one pending iteration (`next`). Scheduling the
//! following iteration replaces it, so superseded timeouts are released
//! instead of piling up over a long-running interval.
use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use core::cell::{Cell, RefCell};
use core::fmt;

use crate::error::ScheduleError;
use crate::infra::clamp::ClampBound;
use crate::scheduling::timeout::{self, TimeoutHandle};
use crate::scheduling::traits::{clock::Clock, host_timer::HostTimer};

/// Handle to a repeating schedule. Clones share the same state.
#[derive(Clone)]
pub struct IntervalHandle {
    pub(crate) state: Rc<IntervalState>,
}

pub(crate) struct IntervalState {
    cancelled: Cell<bool>,
    /// Callback invocations so far.
    fired: Cell<u64>,
    /// Pending iteration. Replaced, never accumulated.
    pub(crate) next: RefCell<Option<TimeoutHandle>>,
}

impl IntervalHandle {
    fn new() -> Self {
        Self {
            state: Rc::new(IntervalState {
                cancelled: Cell::new(false),
                fired: Cell::new(0),
                next: RefCell::new(None),
            }),
        }
    }

    /// Stop the interval and cancel the pending iteration.
    ///
    /// Safe to call from inside the interval's own callback. Idempotent.
    pub fn cancel(&self) {
        if self.state.cancelled.replace(true) {
            return;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "Interval cancelled after {} firing(s)",
            self.state.fired.get()
        );

        let next = self.state.next.borrow().clone();
        if let Some(next) = next {
            next.cancel();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.get()
    }

    /// Number of times the callback has been invoked.
    pub fn fired_count(&self) -> u64 {
        self.state.fired.get()
    }

    /// Timeout driving the pending iteration, if any.
    pub fn current_iteration(&self) -> Option<TimeoutHandle> {
        self.state.next.borrow().clone()
    }
}

impl fmt::Debug for IntervalHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntervalHandle")
            .field("cancelled", &self.state.cancelled.get())
            .field("fired", &self.state.fired.get())
            .finish()
    }
}

impl IntervalState {
    fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }

    fn iteration_cancelled(&self) -> bool {
        self.next
            .borrow()
            .as_ref()
            .is_some_and(TimeoutHandle::is_cancelled)
    }
}

/// Validate the period and schedule the first iteration, one full period out.
pub(crate) fn start<H>(
    host: &Rc<H>,
    bound: ClampBound,
    period_ms: u64,
    callback: Box<dyn FnMut()>,
) -> Result<IntervalHandle, ScheduleError>
where
    H: HostTimer + Clock + 'static,
{
    if period_ms == 0 {
        return Err(ScheduleError::ZeroPeriod);
    }
    let handle = IntervalHandle::new();
    schedule_iteration(host, bound, Rc::clone(&handle.state), period_ms, callback)?;
    Ok(handle)
}

fn schedule_iteration<H>(
    host: &Rc<H>,
    bound: ClampBound,
    state: Rc<IntervalState>,
    period_ms: u64,
    callback: Box<dyn FnMut()>,
) -> Result<(), ScheduleError>
where
    H: HostTimer + Clock + 'static,
{
    let step_host = Rc::downgrade(host);
    let step_state = Rc::clone(&state);
    let next = timeout::start(
        host,
        bound,
        period_ms,
        Box::new(move || step(step_host, bound, step_state, period_ms, callback)),
    )?;
    // The superseded iteration is dropped here.
    state.next.replace(Some(next));
    Ok(())
}

fn step<H>(
    host: Weak<H>,
    bound: ClampBound,
    state: Rc<IntervalState>,
    period_ms: u64,
    mut callback: Box<dyn FnMut()>,
) where
    H: HostTimer + Clock + 'static,
{
    if state.is_cancelled() || state.iteration_cancelled() {
        return;
    }

    state.fired.set(state.fired.get().saturating_add(1));
    // A panic here unwinds to the host and the next iteration is never scheduled.
    callback();

    // The callback may have cancelled its own interval.
    if state.is_cancelled() {
        return;
    }

    let Some(host) = host.upgrade() else {
        return;
    };
    if let Err(_err) = schedule_iteration(&host, bound, Rc::clone(&state), period_ms, callback) {
        #[cfg(feature = "defmt")]
        defmt::warn!("Interval stopped, next iteration cannot be scheduled: {}", _err);

        state.cancelled.set(true);
    }
}
