//! Monotonic timebase

/// Milliseconds since boot
///
/// Must never go backwards.
pub trait Clock {
    /// Current time in milliseconds since boot
    fn now_ms(&self) -> u64;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}
