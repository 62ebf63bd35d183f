//! Bounded delay clamp.
//!
//! Host timer primitives store their delay in a signed 32-bit millisecond
//! counter. Anything above [`DEFAULT_MAX_DELAY_MS`] is truncated or fires
//! immediately, so every delay handed to a host goes through
//! [`ClampBound::clamp`] first.
//!
//! ## Process-wide bound
//!
//! The default bound lives in a process-wide atomic read by
//! [`ClampBound::global`]. [`Scheduler`](crate::scheduling::scheduler::Scheduler)
//! snapshots it at construction, so changing it only affects schedulers built
//! afterwards. The only way to change it is [`internal::override_max_delay_for_testing`].
use core::sync::atomic::{AtomicU32, Ordering};

use crate::error::ConfigError;

/// Largest delay (ms) a host timer accepts without misfiring: `2^31 − 1`,
/// roughly 24.8 days.
pub const DEFAULT_MAX_DELAY_MS: u32 = i32::MAX as u32;

static MAX_DELAY_MS: AtomicU32 = AtomicU32::new(DEFAULT_MAX_DELAY_MS);

/// Upper bound (ms) applied to every delay armed on the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClampBound(u32);

impl ClampBound {
    /// Bound matching the real host defect threshold.
    pub const DEFAULT: ClampBound = ClampBound(DEFAULT_MAX_DELAY_MS);

    /// Build a bound, rejecting zero and anything above [`DEFAULT_MAX_DELAY_MS`].
    ///
    /// A zero bound would re-arm forever without advancing; a bound above the
    /// host threshold reintroduces the truncation defect.
    pub fn new(max_delay_ms: u32) -> Result<Self, ConfigError> {
        if max_delay_ms == 0 || max_delay_ms > DEFAULT_MAX_DELAY_MS {
            return Err(ConfigError::InvalidBound {
                requested: max_delay_ms,
            });
        }
        Ok(ClampBound(max_delay_ms))
    }

    /// Current process-wide bound.
    pub fn global() -> Self {
        ClampBound(MAX_DELAY_MS.load(Ordering::Relaxed))
    }

    /// Bound value in milliseconds.
    pub fn as_millis(self) -> u32 {
        self.0
    }

    /// `min(delay_ms, bound)`, ready to hand to the host primitive.
    pub fn clamp(self, delay_ms: u64) -> u32 {
        if delay_ms > u64::from(self.0) {
            self.0
        } else {
            // Fits: delay_ms <= self.0 <= u32::MAX.
            delay_ms as u32
        }
    }
}

impl Default for ClampBound {
    fn default() -> Self {
        ClampBound::global()
    }
}

/// Internal configuration entry points. Not part of the stable API.
#[doc(hidden)]
pub mod internal {
    use super::*;

    /// Override the process-wide clamp bound.
    ///
    /// **Test use only.** Lowering the bound lets tests exercise multi-hop
    /// chains in seconds instead of weeks. Never call this in production: the
    /// value is global to the process and affects every scheduler created
    /// afterwards.
    pub fn override_max_delay_for_testing(max_delay_ms: u32) -> Result<(), ConfigError> {
        let bound = ClampBound::new(max_delay_ms)?;

        #[cfg(feature = "defmt")]
        defmt::warn!(
            "Process-wide clamp bound overridden to {} ms (test use only)",
            bound.as_millis()
        );

        MAX_DELAY_MS.store(bound.as_millis(), Ordering::Relaxed);
        Ok(())
    }

    /// Restore the process-wide clamp bound to [`DEFAULT_MAX_DELAY_MS`].
    pub fn reset_max_delay() {
        MAX_DELAY_MS.store(DEFAULT_MAX_DELAY_MS, Ordering::Relaxed);
    }
}
