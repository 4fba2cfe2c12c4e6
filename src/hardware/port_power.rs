//! GPIO power management for ports A, B and C.
//!
//! Before sleep every pin except the SWD pair becomes an analog input, which
//! on the F1 disconnects the Schmitt trigger and stops leakage through
//! floating inputs. After wake only the active outputs are rebuilt; the rest
//! stay analog. The RTC and EXTI are not GPIO and are never touched here.
//!
//! Which pins move and in what order is decided by [`PortPowerManager`];
//! the register writes sit behind [`PortRegisters`].

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Port {
    A,
    B,
    C,
}

impl Port {
    pub const ALL: [Port; 3] = [Port::A, Port::B, Port::C];
}

/// Pins per port.
pub const PORT_WIDTH: u8 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortPin {
    pub port: Port,
    pub pin: u8,
}

impl PortPin {
    pub const fn new(port: Port, pin: u8) -> Self {
        Self { port, pin }
    }

    /// CRL/CRH index and the 4-bit field within it.
    pub const fn config_slot(self) -> (usize, usize) {
        let n = self.pin as usize;
        (n / 8, n % 8)
    }
}

/// Output restored after every wake, parked at its deasserted level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePin {
    pub pin: PortPin,
    pub idle_high: bool,
}

/// PA13/PA14 carry SWDIO/SWCLK.
pub const SWD_PINS: [PortPin; 2] = [PortPin::new(Port::A, 13), PortPin::new(Port::A, 14)];

/// Register-level pin configuration.
pub trait PortRegisters {
    /// Analog input, buffer and Schmitt trigger off.
    fn set_analog(&mut self, pin: PortPin);

    /// Write the output data latch through BSRR.
    fn latch(&mut self, pin: PortPin, high: bool);

    /// Push-pull output, 2 MHz.
    fn drive_push_pull(&mut self, pin: PortPin);
}

pub struct PortPowerManager<R, const N: usize> {
    regs: R,
    active: [ActivePin; N],
    keep: &'static [PortPin],
}

impl<R, const N: usize> PortPowerManager<R, N> {
    pub const fn new(regs: R, active: [ActivePin; N], keep: &'static [PortPin]) -> Self {
        Self { regs, active, keep }
    }

    /// Pins that go analog before sleep.
    pub fn quiesced_pins(&self) -> impl Iterator<Item = PortPin> + use<R, N> {
        let keep = self.keep;
        Port::ALL
            .into_iter()
            .flat_map(|port| (0..PORT_WIDTH).map(move |pin| PortPin::new(port, pin)))
            .filter(move |pin| !keep.contains(pin))
    }
}

impl<R: PortRegisters, const N: usize> super::traits::PowerManager for PortPowerManager<R, N> {
    fn quiesce_for_sleep(&mut self) {
        for pin in self.quiesced_pins() {
            self.regs.set_analog(pin);
        }
    }

    fn restore_for_active(&mut self) {
        for active in self.active {
            // latch the level before switching the driver on
            self.regs.latch(active.pin, active.idle_high);
            self.regs.drive_push_pull(active.pin);
        }
    }
}

/// GPIOA..GPIOC through the PAC.
#[cfg(feature = "stm32f103")]
#[derive(Debug, Clone, Copy, Default)]
pub struct Stm32Ports;

#[cfg(feature = "stm32f103")]
impl Stm32Ports {
    fn regs(port: Port) -> embassy_stm32::pac::gpio::Gpio {
        use embassy_stm32::pac;

        match port {
            Port::A => pac::GPIOA,
            Port::B => pac::GPIOB,
            Port::C => pac::GPIOC,
        }
    }
}

#[cfg(feature = "stm32f103")]
impl PortRegisters for Stm32Ports {
    fn set_analog(&mut self, pin: PortPin) {
        use embassy_stm32::pac::gpio::vals::{CnfIn, Mode};

        let (reg, field) = pin.config_slot();
        Self::regs(pin.port).cr(reg).modify(|w| {
            w.set_mode(field, Mode::INPUT);
            w.set_cnf_in(field, CnfIn::ANALOG);
        });
    }

    fn latch(&mut self, pin: PortPin, high: bool) {
        let n = pin.pin as usize;
        let regs = Self::regs(pin.port);
        if high {
            regs.bsrr().write(|w| w.set_bs(n, true));
        } else {
            regs.bsrr().write(|w| w.set_br(n, true));
        }
    }

    fn drive_push_pull(&mut self, pin: PortPin) {
        use embassy_stm32::pac::gpio::vals::{CnfOut, Mode};

        let (reg, field) = pin.config_slot();
        Self::regs(pin.port).cr(reg).modify(|w| {
            w.set_mode(field, Mode::OUTPUT2MHZ);
            w.set_cnf_out(field, CnfOut::PUSHPULL);
        });
    }
}
