//! Initialization errors and the polling helper behind every hardware wait.

use core::fmt;

/// Hardware did not reach the expected state.
///
/// Only produced under [`WaitPolicy::Bounded`]. With [`WaitPolicy::Forever`]
/// a missing oscillator simply hangs start-up, and a dark LED is the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "stm32f103", derive(defmt::Format))]
pub enum InitError {
    /// Always-on oscillator never reported stable
    OscillatorNotReady,
    /// Period register write never synchronized into the timer domain
    SyncTimeout,
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitError::OscillatorNotReady => write!(f, "low-power oscillator not ready"),
            InitError::SyncTimeout => write!(f, "timer configuration did not synchronize"),
        }
    }
}

/// How long a busy-wait on hardware status may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "stm32f103", derive(defmt::Format))]
pub enum WaitPolicy {
    /// Spin until the condition holds (fail-stop).
    Forever,
    /// Give up after this many polls.
    Bounded(u32),
}

/// Spin on `ready` according to `policy`, mapping a timeout to `error`.
pub fn poll_until(
    policy: WaitPolicy,
    error: InitError,
    mut ready: impl FnMut() -> bool,
) -> Result<(), InitError> {
    match policy {
        WaitPolicy::Forever => {
            while !ready() {
                core::hint::spin_loop();
            }
            Ok(())
        }
        WaitPolicy::Bounded(max_polls) => {
            for _ in 0..max_polls {
                if ready() {
                    return Ok(());
                }
                core::hint::spin_loop();
            }
            Err(error)
        }
    }
}
