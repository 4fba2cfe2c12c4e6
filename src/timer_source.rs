//! Low-power tick source bring-up and interrupt servicing.
//!
//! The oscillator may not start until the period generator asks for it, so
//! the generator is configured first and the status waits come after. The
//! interrupt is enabled last, once both waits have passed.

use crate::config::TickTiming;
use crate::error::{InitError, WaitPolicy, poll_until};
use crate::hardware::traits::LowPowerTimer;
use crate::tick::TickSignal;

/// Period generator control word.
///
/// Carries the reference divider and the period together, and writing it
/// starts the generator. There is deliberately no separate enable write:
/// some low-power timers reset their prescaler on every control register
/// write, and splitting divisor and enable stretches the first period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickControl {
    reference_divider: u32,
    period_cycles: u32,
}

impl TickControl {
    pub const fn running(timing: &TickTiming) -> Self {
        Self {
            reference_divider: timing.reference_divider(),
            period_cycles: timing.period_cycles,
        }
    }

    pub const fn reference_divider(&self) -> u32 {
        self.reference_divider
    }

    pub const fn period_cycles(&self) -> u32 {
        self.period_cycles
    }
}

/// Bring up the oscillator and the periodic tick interrupt.
///
/// With [`WaitPolicy::Forever`] this only returns `Ok`; a dead oscillator
/// hangs here.
pub fn initialize<T: LowPowerTimer>(
    timer: &mut T,
    timing: &TickTiming,
    policy: WaitPolicy,
) -> Result<(), InitError> {
    timer.start_oscillator();
    timer.select_reference();
    timer.write_control(TickControl::running(timing));

    poll_until(policy, InitError::OscillatorNotReady, || {
        timer.oscillator_ready()
    })?;
    poll_until(policy, InitError::SyncTimeout, || timer.control_synced())?;

    timer.enable_interrupt();
    log_info!(
        "tick source running: {} Hz reference, {} ms period",
        timing.reference_hz,
        timing.period_ms()
    );
    Ok(())
}

/// Body of the tick interrupt handler: acknowledge, then raise the signal.
pub fn service_tick<T: LowPowerTimer>(timer: &mut T, tick: &TickSignal) {
    timer.acknowledge();
    tick.raise();
}
