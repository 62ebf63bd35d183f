//! [`BoundedDelay`] and [`Clock`] backed by `embassy-time`, for firmware
//! running an embassy time driver.
use embassy_time::{Instant, Timer};

use crate::scheduling::traits::{bounded_delay::BoundedDelay, clock::Clock};

/// Zero-sized handle to the global embassy time driver.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbassyTimer;

impl BoundedDelay for EmbassyTimer {
    async fn delay_ms(&mut self, millis: u32) {
        Timer::after_millis(u64::from(millis)).await;
    }
}

impl Clock for EmbassyTimer {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}
