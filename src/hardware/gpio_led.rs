use super::traits::Led;
use embassy_stm32::gpio::{Level, Output};

/// LED on a push-pull pin, lit at `active` level.
///
/// The Blue Pill's PC13 LED is wired to 3V3 and lights when driven low.
pub struct GpioLed<'d> {
    pin: Output<'d>,
    active: Level,
}

impl<'d> GpioLed<'d> {
    pub fn new(pin: Output<'d>, active: Level) -> Self {
        Self { pin, active }
    }

    fn inactive(&self) -> Level {
        match self.active {
            Level::High => Level::Low,
            Level::Low => Level::High,
        }
    }
}

impl<'d> Led for GpioLed<'d> {
    fn on(&mut self) {
        self.pin.set_level(self.active);
    }

    fn off(&mut self) {
        let level = self.inactive();
        self.pin.set_level(level);
    }

    fn toggle(&mut self) {
        self.pin.toggle();
    }
}
