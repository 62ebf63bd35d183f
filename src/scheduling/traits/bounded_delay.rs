//! Asynchronous delay primitive limited to a `u32` millisecond count.

/// Timer trait abstraction for async hosts; must remain thread-safe when applicable.
pub trait BoundedDelay {
    /// Asynchronously wait for `millis` milliseconds.
    fn delay_ms<'a>(&'a mut self, millis: u32) -> impl core::future::Future<Output = ()> + 'a;
}
