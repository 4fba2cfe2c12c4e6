#![cfg_attr(not(test), no_std)]

//! Sleeping lighthouse firmware for the STM32F103 "Blue Pill".
//!
//! Flashes an indicator LED in a group-of-three pattern and keeps the MCU in
//! Stop mode whenever the LED is dark. The scheduler, sequencer and power
//! bookkeeping are portable and run against the capability traits in
//! [`hardware::traits`]; only the drivers behind the `stm32f103` feature touch
//! registers.

#[macro_use]
pub mod logging;

pub mod config;
pub mod diagnostic;
pub mod error;
pub mod hardware;
pub mod sequencer;
pub mod sleep;
pub mod tick;
pub mod timer_source;

pub use error::{InitError, WaitPolicy};
pub use sequencer::PatternSequencer;
pub use sleep::{SleepCoordinator, WakeAccounting};
pub use tick::{TICK, TickSignal};
