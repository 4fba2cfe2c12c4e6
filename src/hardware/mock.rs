//! Recording mock platform for host tests
//!
//! Every mock appends what it was asked to do to a shared [`Journal`], so a
//! test can assert on the exact interleaving of LED, delay, power, sleep and
//! timer activity.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;

use super::traits::{Led, LowPowerTimer, PowerManager, SleepControl};
use crate::sleep::{SleepReport, TickSleep};
use crate::tick::TickSignal;
use crate::timer_source::{TickControl, service_tick};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    LedOn,
    LedOff,
    LedToggle,
    Hold(u32),
    Quiesce,
    Restore,
    SleepConfigured,
    Halt,
    Sleep(u8),
    OscillatorStart,
    ReferenceSelected,
    Control(TickControl),
    InterruptEnabled,
    Acknowledged,
}

pub type Journal = Rc<RefCell<Vec<Event>>>;

pub fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

/// LED that remembers whether it is lit.
#[derive(Debug)]
pub struct MockLed {
    journal: Journal,
    lit: bool,
}

impl MockLed {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            lit: false,
        }
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }
}

impl Led for MockLed {
    fn on(&mut self) {
        self.lit = true;
        self.journal.borrow_mut().push(Event::LedOn);
    }

    fn off(&mut self) {
        self.lit = false;
        self.journal.borrow_mut().push(Event::LedOff);
    }

    fn toggle(&mut self) {
        self.lit = !self.lit;
        self.journal.borrow_mut().push(Event::LedToggle);
    }
}

/// Delay that records millisecond holds instead of waiting.
#[derive(Debug)]
pub struct MockDelay {
    journal: Journal,
}

impl MockDelay {
    pub fn new(journal: Journal) -> Self {
        Self { journal }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.journal.borrow_mut().push(Event::Hold(ns / 1_000_000));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.journal.borrow_mut().push(Event::Hold(ms));
    }
}

/// Power manager that only records the calls.
#[derive(Debug)]
pub struct MockPower {
    journal: Journal,
}

impl MockPower {
    pub fn new(journal: Journal) -> Self {
        Self { journal }
    }
}

impl PowerManager for MockPower {
    fn quiesce_for_sleep(&mut self) {
        self.journal.borrow_mut().push(Event::Quiesce);
    }

    fn restore_for_active(&mut self) {
        self.journal.borrow_mut().push(Event::Restore);
    }
}

/// Register-level timer double.
///
/// Status bits become true after a configurable number of polls, or never.
#[derive(Debug)]
pub struct MockTimer {
    journal: Journal,
    oscillator_ready_after: Option<u32>,
    synced_after: Option<u32>,
    oscillator_polls: u32,
    sync_polls: u32,
}

impl MockTimer {
    pub fn new(journal: Journal) -> Self {
        Self {
            journal,
            oscillator_ready_after: Some(1),
            synced_after: Some(1),
            oscillator_polls: 0,
            sync_polls: 0,
        }
    }

    pub fn oscillator_ready_after(mut self, polls: u32) -> Self {
        self.oscillator_ready_after = Some(polls);
        self
    }

    pub fn oscillator_never_ready(mut self) -> Self {
        self.oscillator_ready_after = None;
        self
    }

    pub fn synced_after(mut self, polls: u32) -> Self {
        self.synced_after = Some(polls);
        self
    }

    pub fn never_synced(mut self) -> Self {
        self.synced_after = None;
        self
    }

    pub fn oscillator_polls(&self) -> u32 {
        self.oscillator_polls
    }

    pub fn sync_polls(&self) -> u32 {
        self.sync_polls
    }
}

impl LowPowerTimer for MockTimer {
    fn start_oscillator(&mut self) {
        self.journal.borrow_mut().push(Event::OscillatorStart);
    }

    fn select_reference(&mut self) {
        self.journal.borrow_mut().push(Event::ReferenceSelected);
    }

    fn write_control(&mut self, control: TickControl) {
        self.journal.borrow_mut().push(Event::Control(control));
    }

    fn oscillator_ready(&mut self) -> bool {
        self.oscillator_polls += 1;
        self.oscillator_ready_after
            .is_some_and(|after| self.oscillator_polls >= after)
    }

    fn control_synced(&mut self) -> bool {
        self.sync_polls += 1;
        self.synced_after
            .is_some_and(|after| self.sync_polls >= after)
    }

    fn enable_interrupt(&mut self) {
        self.journal.borrow_mut().push(Event::InterruptEnabled);
    }

    fn acknowledge(&mut self) {
        self.journal.borrow_mut().push(Event::Acknowledged);
    }
}

/// Why a simulated halt returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wake {
    /// The tick timer fired; its handler runs before the halt returns.
    Tick,
    /// Some other interrupt; the tick signal is untouched.
    Foreign,
    /// The tick handler runs just before interrupts are masked for the halt.
    /// If the readiness check misses it, the core sleeps until the following
    /// tick.
    TickBeforeHalt,
}

/// Halt double that services a simulated tick interrupt on every wake.
///
/// Wakes follow the script, then default to [`Wake::Tick`].
pub struct MockSleep<'a> {
    journal: Journal,
    tick: &'a TickSignal,
    timer: MockTimer,
    script: VecDeque<Wake>,
    armed: bool,
    ticks_fired: u32,
}

impl<'a> MockSleep<'a> {
    pub fn new(journal: Journal, tick: &'a TickSignal) -> Self {
        Self {
            timer: MockTimer::new(journal.clone()),
            journal,
            tick,
            script: VecDeque::new(),
            armed: false,
            ticks_fired: 0,
        }
    }

    pub fn with_script(mut self, wakes: &[Wake]) -> Self {
        self.script.extend(wakes.iter().copied());
        self
    }

    /// Run the tick interrupt handler outside a halt.
    pub fn fire_tick(&mut self) {
        service_tick(&mut self.timer, self.tick);
        self.ticks_fired += 1;
    }

    pub fn ticks_fired(&self) -> u32 {
        self.ticks_fired
    }

    pub fn deep_sleep_armed(&self) -> bool {
        self.armed
    }
}

impl SleepControl for MockSleep<'_> {
    fn configure_deepest(&mut self) {
        self.armed = true;
        self.journal.borrow_mut().push(Event::SleepConfigured);
    }

    fn halt_unless(&mut self, ready: &dyn Fn() -> bool) -> bool {
        let wake = self.script.pop_front().unwrap_or(Wake::Tick);
        if wake == Wake::TickBeforeHalt {
            self.fire_tick();
        }
        if ready() {
            return false;
        }
        self.journal.borrow_mut().push(Event::Halt);
        match wake {
            Wake::Tick | Wake::TickBeforeHalt => self.fire_tick(),
            Wake::Foreign => {}
        }
        true
    }
}

/// Stand-in for the coordinator when only the requested tick counts matter.
#[derive(Debug)]
pub struct RecordingSleeper {
    journal: Journal,
}

impl RecordingSleeper {
    pub fn new(journal: Journal) -> Self {
        Self { journal }
    }
}

impl TickSleep for RecordingSleeper {
    fn sleep_for_ticks(&mut self, ticks: u8) -> SleepReport {
        self.journal.borrow_mut().push(Event::Sleep(ticks));
        SleepReport {
            ticks,
            wakes: ticks as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_led_toggle() {
        let log = journal();
        let mut led = MockLed::new(log.clone());
        assert!(!led.is_lit());

        led.toggle();
        assert!(led.is_lit());

        led.toggle();
        assert!(!led.is_lit());
        assert_eq!(log.borrow().as_slice(), &[Event::LedToggle, Event::LedToggle]);
    }

    #[test]
    fn test_foreign_wake_leaves_tick_clear() {
        let tick = TickSignal::new();
        let mut sleep = MockSleep::new(journal(), &tick).with_script(&[Wake::Foreign]);

        sleep.halt();
        assert!(!tick.is_raised());

        sleep.halt();
        assert!(tick.take());
        assert_eq!(sleep.ticks_fired(), 1);
    }

    #[test]
    fn test_late_tick_skips_halt_when_ready() {
        let tick = TickSignal::new();
        let log = journal();
        let mut sleep = MockSleep::new(log.clone(), &tick).with_script(&[Wake::TickBeforeHalt]);

        assert!(!sleep.halt_unless(&|| tick.is_raised()));
        assert!(log.borrow().iter().all(|e| *e != Event::Halt));
        assert_eq!(sleep.ticks_fired(), 1);
    }
}
