/// Test doubles driving the scheduler on a tokio `LocalSet` and the chained
/// sleep on `tokio::time`. Run under a paused clock so long delays are instant.
use safe_timers::scheduling::traits::{
    bounded_delay::BoundedDelay, clock::Clock, host_timer::HostTimer,
};
use safe_timers::ClampBound;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tokio::task::{spawn_local, AbortHandle};
use tokio::time::{sleep, Duration, Instant};

#[allow(dead_code)]
pub fn bound(max_delay_ms: u32) -> ClampBound {
    ClampBound::new(max_delay_ms).expect("valid bound")
}

/// Decrements the live-timer counter when the timer future is dropped,
/// whether it fired or was aborted.
struct LiveGuard(Rc<Cell<usize>>);

impl Drop for LiveGuard {
    fn drop(&mut self) {
        self.0.set(self.0.get() - 1);
    }
}

#[allow(dead_code)]
/// Host timer spawning one local task per armed timer. Must be used inside a
/// `LocalSet`.
pub struct TokioHost {
    origin: Instant,
    armed: RefCell<Vec<u32>>,
    live: Rc<Cell<usize>>,
}

#[allow(dead_code)]
impl TokioHost {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            armed: RefCell::new(Vec::new()),
            live: Rc::new(Cell::new(0)),
        }
    }

    /// Every delay passed to `arm`, in order.
    pub fn armed_delays(&self) -> Vec<u32> {
        self.armed.borrow().clone()
    }

    /// Host timers armed and not yet fired nor cancelled.
    pub fn live_timers(&self) -> usize {
        self.live.get()
    }
}

impl HostTimer for TokioHost {
    type Token = AbortHandle;

    fn arm(&self, delay_ms: u32, fire: Box<dyn FnOnce()>) -> Self::Token {
        self.armed.borrow_mut().push(delay_ms);
        self.live.set(self.live.get() + 1);
        let guard = LiveGuard(Rc::clone(&self.live));
        spawn_local(async move {
            let _guard = guard;
            sleep(Duration::from_millis(u64::from(delay_ms))).await;
            fire();
        })
        .abort_handle()
    }

    fn cancel(&self, token: Self::Token) {
        token.abort();
    }
}

impl Clock for TokioHost {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

#[allow(dead_code)]
/// Bounded async delay based on `tokio::time::sleep`, recording each delay.
pub struct MockTimer {
    origin: Instant,
    pub delays: Vec<u32>,
}

#[allow(dead_code)]
impl MockTimer {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            delays: Vec::new(),
        }
    }
}

impl BoundedDelay for MockTimer {
    async fn delay_ms(&mut self, millis: u32) {
        self.delays.push(millis);
        sleep(Duration::from_millis(u64::from(millis))).await;
    }
}

impl Clock for MockTimer {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}
