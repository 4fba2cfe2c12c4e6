use cortex_m::peripheral::SCB;
use embassy_stm32::pac;
use embassy_stm32::pac::pwr::vals::Pdds;

use super::traits::SleepControl;

/// Stop mode with the regulator in low-power mode.
///
/// Standby would be deeper but resets the core on wake. Stop keeps SRAM and
/// registers, and LSI plus the RTC keep running.
pub struct StopMode {
    scb: SCB,
}

impl StopMode {
    pub fn new(scb: SCB) -> Self {
        Self { scb }
    }
}

impl SleepControl for StopMode {
    fn configure_deepest(&mut self) {
        pac::RCC.apb1enr().modify(|w| w.set_pwren(true));
        pac::PWR.cr().modify(|w| {
            w.set_pdds(Pdds::STOP_MODE);
            w.set_lpds(true);
        });
        self.scb.set_sleepdeep();
    }

    fn halt_unless(&mut self, ready: &dyn Fn() -> bool) -> bool {
        // WFI still wakes on an interrupt pended while PRIMASK is set
        cortex_m::interrupt::free(|_| {
            if ready() {
                return false;
            }
            cortex_m::asm::dsb();
            cortex_m::asm::wfi();
            true
        })
    }
}
