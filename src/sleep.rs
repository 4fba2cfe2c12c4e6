//! Sleep/wake coordination.
//!
//! Pins are quiesced once per sleep request, the core is halted once per
//! tick, and the active pin configuration is rebuilt once on the way out.
//! There is no cancellation: a request always runs its full tick count.

use crate::hardware::traits::{PowerManager, SleepControl};
use crate::tick::TickSignal;

/// How a wake from halt is turned into elapsed ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "stm32f103", derive(defmt::Format))]
pub enum WakeAccounting {
    /// Every wake counts as one tick. Only correct while the tick timer is
    /// the sole enabled wake source. The tick signal is never inspected.
    AnyWake,
    /// Halt until the tick signal is observed set, then clear it. Wakes from
    /// other interrupts put the core straight back to sleep. Ticks raised
    /// before the request are discarded.
    ConfirmedTick,
}

/// Outcome of one sleep request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SleepReport {
    pub ticks: u8,
    pub wakes: u32,
}

/// Anything that can block for a number of ticks.
pub trait TickSleep {
    fn sleep_for_ticks(&mut self, ticks: u8) -> SleepReport;
}

pub struct SleepCoordinator<'a, S, P> {
    sleep: S,
    power: P,
    tick: &'a TickSignal,
    accounting: WakeAccounting,
}

impl<'a, S, P> SleepCoordinator<'a, S, P>
where
    S: SleepControl,
    P: PowerManager,
{
    pub fn new(sleep: S, power: P, tick: &'a TickSignal, accounting: WakeAccounting) -> Self {
        Self {
            sleep,
            power,
            tick,
            accounting,
        }
    }

    /// Arm the deepest sleep state. Safe to call more than once.
    pub fn configure_sleep_mode(&mut self) {
        self.sleep.configure_deepest();
        log_debug!("sleep mode armed");
    }

    /// Power manager access for start-up pin setup.
    pub fn power_mut(&mut self) -> &mut P {
        &mut self.power
    }

    pub fn into_parts(self) -> (S, P) {
        (self.sleep, self.power)
    }

    /// Sleep for `ticks` periods. The first period may be partial.
    pub fn sleep_for_ticks(&mut self, ticks: u8) -> SleepReport {
        self.power.quiesce_for_sleep();

        if self.accounting == WakeAccounting::ConfirmedTick {
            self.tick.clear();
        }

        let tick = self.tick;
        let mut wakes = 0;
        for _ in 0..ticks {
            match self.accounting {
                WakeAccounting::AnyWake => {
                    self.sleep.halt();
                    wakes += 1;
                }
                // flag check and halt share one masked window, so a tick
                // landing between them still ends the halt
                WakeAccounting::ConfirmedTick => loop {
                    if self.sleep.halt_unless(&|| tick.is_raised()) {
                        wakes += 1;
                    }
                    if tick.take() {
                        break;
                    }
                },
            }
        }

        self.power.restore_for_active();
        SleepReport { ticks, wakes }
    }
}

impl<S, P> TickSleep for SleepCoordinator<'_, S, P>
where
    S: SleepControl,
    P: PowerManager,
{
    fn sleep_for_ticks(&mut self, ticks: u8) -> SleepReport {
        SleepCoordinator::sleep_for_ticks(self, ticks)
    }
}
