//! Chained timeout: one logical delayed callback built from as many bounded
//! host timers as the delay requires.
//!
//! Each hop is armed from inside the previous hop's fire closure, so for a
//! given handle at most one host timer is armed at any time. The handle keeps
//! a single cancel closure, rebound on every hop, which cancels whichever host
//! timer is currently armed.
use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use core::cell::{Cell, RefCell};
use core::fmt;

use crate::core::{deadline_after, TimerPhase};
use crate::error::ScheduleError;
use crate::infra::clamp::ClampBound;
use crate::scheduling::traits::{clock::Clock, host_timer::HostTimer};

/// Handle to one in-flight or completed chained timeout.
///
/// Clones share the same state. Dropping every clone does not cancel the
/// timeout; call [`cancel`](TimeoutHandle::cancel) for that.
#[derive(Clone)]
pub struct TimeoutHandle {
    pub(crate) state: Rc<TimeoutState>,
}

pub(crate) struct TimeoutState {
    phase: Cell<TimerPhase>,
    /// Host timers armed so far, including the first one.
    hops: Cell<u32>,
    /// Cancels the currently armed host timer. `None` once spent.
    cancel: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl TimeoutHandle {
    fn new() -> Self {
        Self {
            state: Rc::new(TimeoutState {
                phase: Cell::new(TimerPhase::Armed),
                hops: Cell::new(0),
                cancel: RefCell::new(None),
            }),
        }
    }

    /// Cancel the timeout. The callback will not run, even if a host timer
    /// already fired and is waiting to be processed.
    ///
    /// Idempotent, and a no-op once the callback has run.
    pub fn cancel(&self) {
        if self.state.phase.get().is_terminal() {
            return;
        }
        self.state.phase.set(TimerPhase::Cancelled);

        #[cfg(feature = "defmt")]
        defmt::debug!("Timeout cancelled after {} hop(s)", self.state.hops.get());

        // Released before the call: the host may drop closures that hold this state.
        let cancel = self.state.cancel.borrow_mut().take();
        if let Some(cancel) = cancel {
            cancel();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.phase.get() == TimerPhase::Cancelled
    }

    /// `true` once the callback has been invoked.
    pub fn has_fired(&self) -> bool {
        self.state.phase.get() == TimerPhase::Fired
    }

    pub fn phase(&self) -> TimerPhase {
        self.state.phase.get()
    }

    /// Number of host timers armed for this timeout so far.
    pub fn hops(&self) -> u32 {
        self.state.hops.get()
    }

    /// `true` when both handles refer to the same timeout.
    pub fn ptr_eq(&self, other: &TimeoutHandle) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

impl fmt::Debug for TimeoutHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeoutHandle")
            .field("phase", &self.state.phase.get())
            .field("hops", &self.state.hops.get())
            .finish()
    }
}

impl TimeoutState {
    fn bind_cancel(&self, cancel: Box<dyn FnOnce()>) {
        // Any previous closure belongs to a timer that already fired.
        self.cancel.borrow_mut().replace(cancel);
    }
}

/// Anchor the deadline on the host clock and arm the first hop.
pub(crate) fn start<H>(
    host: &Rc<H>,
    bound: ClampBound,
    delay_ms: u64,
    callback: Box<dyn FnOnce()>,
) -> Result<TimeoutHandle, ScheduleError>
where
    H: HostTimer + Clock + 'static,
{
    let deadline = deadline_after(host.now_ms(), delay_ms)?;
    let handle = TimeoutHandle::new();
    arm_hop(
        host,
        bound,
        Rc::clone(&handle.state),
        deadline,
        delay_ms,
        callback,
    );
    Ok(handle)
}

fn arm_hop<H>(
    host: &Rc<H>,
    bound: ClampBound,
    state: Rc<TimeoutState>,
    deadline: u64,
    remaining_ms: u64,
    callback: Box<dyn FnOnce()>,
) where
    H: HostTimer + Clock + 'static,
{
    let hop_ms = bound.clamp(remaining_ms);
    state.hops.set(state.hops.get().saturating_add(1));

    #[cfg(feature = "defmt")]
    defmt::trace!(
        "Arming hop {}: {} ms of {} ms remaining",
        state.hops.get(),
        hop_ms,
        remaining_ms
    );

    // Closures stored inside the host only hold weak host references.
    let fire_host = Rc::downgrade(host);
    let fire_state = Rc::clone(&state);
    let token = host.arm(
        hop_ms,
        Box::new(move || on_fire(fire_host, bound, fire_state, deadline, callback)),
    );

    let cancel_host = Rc::downgrade(host);
    state.bind_cancel(Box::new(move || {
        if let Some(host) = cancel_host.upgrade() {
            host.cancel(token);
        }
    }));
}

fn on_fire<H>(
    host: Weak<H>,
    bound: ClampBound,
    state: Rc<TimeoutState>,
    deadline: u64,
    callback: Box<dyn FnOnce()>,
) where
    H: HostTimer + Clock + 'static,
{
    // Authoritative over a cancel racing with an already-fired host timer.
    if state.phase.get() == TimerPhase::Cancelled {
        return;
    }
    // The token that just fired is spent.
    drop(state.cancel.borrow_mut().take());

    let Some(host) = host.upgrade() else {
        return;
    };

    let now = host.now_ms();
    if now < deadline {
        state.phase.set(TimerPhase::Rearmed);
        arm_hop(&host, bound, state, deadline, deadline - now, callback);
        return;
    }

    #[cfg(feature = "defmt")]
    defmt::debug!("Timeout fired after {} hop(s)", state.hops.get());

    state.phase.set(TimerPhase::Fired);
    callback();
}
