//! Deterministic virtual-time host used by the unit tests.
use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use crate::scheduling::traits::{clock::Clock, host_timer::HostTimer};

type Pending = BTreeMap<(u64, u64), Box<dyn FnOnce()>>;

/// Host timer driven by [`advance`](ManualHost::advance). Timers fire in
/// due-time order, ties broken by arming order.
pub(crate) struct ManualHost {
    now: Cell<u64>,
    next_id: Cell<u64>,
    pending: RefCell<Pending>,
    /// Every delay passed to `arm`, in order.
    armed: RefCell<Vec<u32>>,
    cancelled: Cell<usize>,
}

impl ManualHost {
    pub(crate) fn new() -> Self {
        Self::starting_at(0)
    }

    pub(crate) fn starting_at(now_ms: u64) -> Self {
        Self {
            now: Cell::new(now_ms),
            next_id: Cell::new(0),
            pending: RefCell::new(BTreeMap::new()),
            armed: RefCell::new(Vec::new()),
            cancelled: Cell::new(0),
        }
    }

    /// Move the clock forward, firing every timer due on the way.
    pub(crate) fn advance(&self, ms: u64) {
        let target = self.now.get() + ms;
        loop {
            let entry = {
                let mut pending = self.pending.borrow_mut();
                match pending.first_key_value() {
                    Some((&(due, _), _)) if due <= target => pending.pop_first(),
                    _ => None,
                }
            };
            let Some(((due, _), fire)) = entry else {
                break;
            };
            // A stalled clock may already be past the due time.
            self.now.set(due.max(self.now.get()));
            fire();
        }
        self.now.set(target.max(self.now.get()));
    }

    /// Move the clock forward without firing anything, like an event thread
    /// kept busy by other work.
    pub(crate) fn stall(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }

    pub(crate) fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    pub(crate) fn armed_delays(&self) -> Vec<u32> {
        self.armed.borrow().clone()
    }

    pub(crate) fn cancel_count(&self) -> usize {
        self.cancelled.get()
    }
}

impl HostTimer for ManualHost {
    type Token = (u64, u64);

    fn arm(&self, delay_ms: u32, fire: Box<dyn FnOnce()>) -> Self::Token {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        let key = (self.now.get() + u64::from(delay_ms), id);
        self.pending.borrow_mut().insert(key, fire);
        self.armed.borrow_mut().push(delay_ms);
        key
    }

    fn cancel(&self, token: Self::Token) {
        let removed = self.pending.borrow_mut().remove(&token);
        if removed.is_some() {
            self.cancelled.set(self.cancelled.get() + 1);
        }
        // Dropped after the borrow ends: the closure may own handles.
        drop(removed);
    }
}

impl Clock for ManualHost {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}
