//! # Quickstart Example
//!
//! Minimal example demonstrating the basics of safe-timers:
//! - Plug a host timer into a `Scheduler`
//! - Schedule a delayed callback longer than one host hop
//! - Run and cancel a repeating callback
//!
//! The host here spawns tokio local tasks and the clamp bound is lowered to
//! 1 s so the chaining is visible in a few seconds.
//!
//! ```bash
//! cargo run --example quickstart
//! ```

use safe_timers::scheduling::traits::{clock::Clock, host_timer::HostTimer};
use safe_timers::{ClampBound, IntervalHandle, Scheduler};
use std::cell::RefCell;
use std::rc::Rc;
use tokio::task::{spawn_local, AbortHandle, LocalSet};
use tokio::time::{sleep, Duration, Instant};

/// Host timer backed by `tokio::task::spawn_local`.
struct LocalHost {
    origin: Instant,
}

impl HostTimer for LocalHost {
    type Token = AbortHandle;

    fn arm(&self, delay_ms: u32, fire: Box<dyn FnOnce()>) -> AbortHandle {
        println!("   [host] armed for {} ms", delay_ms);
        spawn_local(async move {
            sleep(Duration::from_millis(u64::from(delay_ms))).await;
            fire();
        })
        .abort_handle()
    }

    fn cancel(&self, token: AbortHandle) {
        token.abort();
    }
}

impl Clock for LocalHost {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    println!("=== safe-timers Quickstart ===\n");

    LocalSet::new()
        .run_until(async {
            let host = Rc::new(LocalHost {
                origin: Instant::now(),
            });
            let bound = ClampBound::new(1000).expect("valid bound");
            let scheduler = Scheduler::with_bound(Rc::clone(&host), bound);

            // ======================================================================
            // 1. A delayed callback spanning several host hops
            // ======================================================================
            println!("1. Scheduling a 2500 ms timeout (bound {} ms)", bound.as_millis());

            let clock = Rc::clone(&host);
            let timeout = scheduler
                .schedule_delayed_with(2500, "hello", move |greeting| {
                    println!("   timeout fired at {} ms: {}", clock.now_ms(), greeting);
                })
                .expect("schedule timeout");

            sleep(Duration::from_millis(2600)).await;
            println!("   hops used: {}\n", timeout.hops());

            // ======================================================================
            // 2. A repeating callback cancelling itself
            // ======================================================================
            println!("2. Scheduling a 400 ms interval, stopped after 3 firings");

            let slot: Rc<RefCell<Option<IntervalHandle>>> = Rc::new(RefCell::new(None));
            let own = Rc::clone(&slot);
            let interval = scheduler
                .schedule_repeating(400, move || {
                    if let Some(handle) = own.borrow().as_ref() {
                        println!("   tick #{}", handle.fired_count());
                        if handle.fired_count() == 3 {
                            handle.cancel();
                        }
                    }
                })
                .expect("schedule interval");
            slot.replace(Some(interval.clone()));

            sleep(Duration::from_millis(2000)).await;
            println!("   interval cancelled: {}\n", interval.is_cancelled());

            // ======================================================================
            // 3. Cancelling before the deadline
            // ======================================================================
            println!("3. Cancelling a 1500 ms timeout after 1200 ms");

            let pending = scheduler
                .schedule_delayed(1500, || println!("   this line is never printed"))
                .expect("schedule timeout");
            sleep(Duration::from_millis(1200)).await;
            scheduler.cancel_delayed(&pending);
            sleep(Duration::from_millis(500)).await;
            println!("   cancelled: {}", pending.is_cancelled());
        })
        .await;
}
