//! Tick signal shared between the wake interrupt and the main flow.
//!
//! A single-slot cell: the interrupt raises it once per period, the main flow
//! observes and clears it. Raising an already raised signal is a no-op, so a
//! missed observation collapses into one tick instead of queueing.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

pub struct TickSignal {
    inner: Signal<CriticalSectionRawMutex, ()>,
}

/// The firmware's tick signal, raised only from the timer interrupt.
pub static TICK: TickSignal = TickSignal::new();

impl TickSignal {
    pub const fn new() -> Self {
        Self {
            inner: Signal::new(),
        }
    }

    /// Mark one elapsed period.
    ///
    /// Crate-private: the only caller is [`crate::timer_source::service_tick`].
    pub(crate) fn raise(&self) {
        self.inner.signal(());
    }

    /// Observe and clear in one step. Returns whether a tick was pending.
    pub fn take(&self) -> bool {
        self.inner.try_take().is_some()
    }

    pub fn is_raised(&self) -> bool {
        self.inner.signaled()
    }

    /// Drop a stale tick without looking at it.
    pub fn clear(&self) {
        self.inner.reset();
    }
}

impl Default for TickSignal {
    fn default() -> Self {
        Self::new()
    }
}
