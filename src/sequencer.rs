//! Flash pattern state machine.
//!
//! Alternates a short busy-held flash with a multi-tick sleep. The LED is
//! only ever lit while the core is awake.

use embedded_hal::delay::DelayNs;

use crate::config::FlashPattern;
use crate::hardware::traits::Led;
use crate::sleep::TickSleep;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Light the LED for flash `index` of the group.
    Flash { index: u8 },
    /// Dark interval following flash `after`.
    Gap { after: u8, ticks: u8 },
}

pub struct PatternSequencer<L, D, T> {
    led: L,
    delay: D,
    sleeper: T,
    pattern: FlashPattern,
    phase: Phase,
}

impl<L, D, T> PatternSequencer<L, D, T>
where
    L: Led,
    D: DelayNs,
    T: TickSleep,
{
    pub fn new(led: L, delay: D, sleeper: T, pattern: FlashPattern) -> Self {
        Self {
            led,
            delay,
            sleeper,
            pattern,
            phase: Phase::Flash { index: 0 },
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn into_parts(self) -> (L, D, T) {
        (self.led, self.delay, self.sleeper)
    }

    /// Execute the current phase and advance. Returns the phase just run.
    pub fn step(&mut self) -> Phase {
        let current = self.phase;
        self.phase = match current {
            Phase::Flash { index } => {
                // a pattern with no flashes keeps only its long gap
                if index < self.pattern.flashes {
                    self.led.on();
                    self.delay.delay_ms(self.pattern.hold_ms);
                    self.led.off();
                }
                Phase::Gap {
                    after: index,
                    ticks: self.pattern.gap_after(index),
                }
            }
            Phase::Gap { after, ticks } => {
                let report = self.sleeper.sleep_for_ticks(ticks);
                log_debug!("slept {} ticks, {} wakes", report.ticks, report.wakes);
                let next = after.saturating_add(1);
                Phase::Flash {
                    index: if next >= self.pattern.flashes { 0 } else { next },
                }
            }
        };
        current
    }

    /// Run until the start of the next group.
    pub fn run_group(&mut self) {
        loop {
            self.step();
            if self.phase == (Phase::Flash { index: 0 }) {
                break;
            }
        }
    }

    pub fn run_forever(&mut self) -> ! {
        log_info!(
            "pattern: {} flashes of {} ms, {} ticks per group",
            self.pattern.flashes,
            self.pattern.hold_ms,
            self.pattern.ticks_per_group()
        );
        loop {
            self.run_group();
        }
    }
}
