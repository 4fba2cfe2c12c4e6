use crate::timer_source::TickControl;

/// Single binary indicator output.
pub trait Led {
    fn on(&mut self);
    fn off(&mut self);
    fn toggle(&mut self);
}

/// Always-on oscillator plus periodic interrupt generator.
///
/// The sequencing lives in [`crate::timer_source::initialize`]; implementors
/// only expose the individual register steps.
pub trait LowPowerTimer {
    /// Request the oscillator, configured to keep running in the deepest sleep state.
    fn start_oscillator(&mut self);

    /// Route the oscillator to the period generator as its reference clock.
    fn select_reference(&mut self);

    /// Load divisor and enable the generator in ONE write.
    fn write_control(&mut self, control: TickControl);

    fn oscillator_ready(&mut self) -> bool;

    /// Last control write has crossed into the timer clock domain.
    fn control_synced(&mut self) -> bool;

    fn enable_interrupt(&mut self);

    /// Clear the pending condition. Runs in interrupt context.
    fn acknowledge(&mut self);
}

/// Pin configuration around sleep intervals.
pub trait PowerManager {
    /// Every pin not needed to wake goes to its lowest-current state. Idempotent.
    fn quiesce_for_sleep(&mut self);

    /// Reconfigure the active pins from scratch, outputs deasserted.
    fn restore_for_active(&mut self);
}

/// Processor sleep state control.
pub trait SleepControl {
    /// Select the deepest state that keeps the tick timer alive and arm it.
    fn configure_deepest(&mut self);

    /// Halt unless `ready` already holds, and report whether the core halted.
    ///
    /// `ready` is evaluated with interrupts masked and the core halts without
    /// unmasking, so an interrupt that arrives after the check still ends the
    /// halt at once. Its handler runs once the mask is lifted.
    fn halt_unless(&mut self, ready: &dyn Fn() -> bool) -> bool;

    /// Halt until the next interrupt.
    fn halt(&mut self) {
        self.halt_unless(&|| false);
    }
}
