//! Tick source on the STM32F1 backup-domain RTC, clocked from LSI.
//!
//! The RTC alarm reaches the NVIC through EXTI line 17, the only RTC path
//! that wakes the core from Stop mode. The F1 alarm is a one-shot compare,
//! so acknowledging a tick also moves the compare one period forward.

use core::sync::atomic::{AtomicU32, Ordering};

use embassy_stm32::interrupt::{self, InterruptExt};
use embassy_stm32::pac;
use embassy_stm32::pac::rcc::vals::Rtcsel;

use super::traits::LowPowerTimer;
use crate::config::TickTiming;
use crate::timer_source::TickControl;

/// EXTI line wired to the RTC alarm.
const RTC_ALARM_LINE: usize = 17;

/// Counter value of the next alarm compare.
static NEXT_ALARM: AtomicU32 = AtomicU32::new(0);

pub struct RtcTick {
    period_cycles: u32,
}

impl RtcTick {
    /// Zero-sized apart from the period; safe to build again inside the ISR.
    pub const fn new(timing: &TickTiming) -> Self {
        Self {
            period_cycles: timing.period_cycles,
        }
    }

    fn wait_write_done() {
        while !pac::RTC.crl().read().rtoff() {}
    }

    /// Writes to PRL, CNT and ALR only commit when CNF is cleared, so
    /// everything in `f` lands in the RTC domain together.
    fn config_window(f: impl FnOnce()) {
        Self::wait_write_done();
        pac::RTC.crl().modify(|w| w.set_cnf(true));
        f();
        pac::RTC.crl().modify(|w| w.set_cnf(false));
        Self::wait_write_done();
    }

    fn write_alarm(value: u32) {
        pac::RTC.alrh().write(|w| w.set_alrh((value >> 16) as u16));
        pac::RTC.alrl().write(|w| w.set_alrl(value as u16));
    }
}

impl LowPowerTimer for RtcTick {
    fn start_oscillator(&mut self) {
        // backup domain is write protected out of reset
        pac::RCC.apb1enr().modify(|w| {
            w.set_pwren(true);
            w.set_bkpen(true);
        });
        pac::PWR.cr().modify(|w| w.set_dbp(true));
        pac::RCC.csr().modify(|w| w.set_lsion(true));
    }

    fn select_reference(&mut self) {
        let bdcr = pac::RCC.bdcr().read();
        if bdcr.rtcen() && bdcr.rtcsel() != Rtcsel::LSI {
            // RTCSEL is sticky until a backup domain reset
            pac::RCC.bdcr().modify(|w| w.set_bdrst(true));
            pac::RCC.bdcr().modify(|w| w.set_bdrst(false));
        }
        pac::RCC.bdcr().modify(|w| {
            w.set_rtcsel(Rtcsel::LSI);
            w.set_rtcen(true);
        });
    }

    /// Blocks on RTOFF until LSI is clocking the RTC.
    fn write_control(&mut self, control: TickControl) {
        let prescaler = control.reference_divider() - 1;
        let first_alarm = control.period_cycles();

        Self::config_window(|| {
            pac::RTC.prlh().write(|w| w.set_prlh((prescaler >> 16) as u8));
            pac::RTC.prll().write(|w| w.set_prll(prescaler as u16));
            pac::RTC.cnth().write(|w| w.set_cnth(0));
            pac::RTC.cntl().write(|w| w.set_cntl(0));
            Self::write_alarm(first_alarm);
        });

        NEXT_ALARM.store(first_alarm, Ordering::Relaxed);
        self.period_cycles = control.period_cycles();
        pac::RTC.crl().modify(|w| w.set_rsf(false));
    }

    fn oscillator_ready(&mut self) -> bool {
        pac::RCC.csr().read().lsirdy()
    }

    fn control_synced(&mut self) -> bool {
        let crl = pac::RTC.crl().read();
        crl.rtoff() && crl.rsf()
    }

    fn enable_interrupt(&mut self) {
        pac::RTC.crl().modify(|w| w.set_alrf(false));
        pac::EXTI.pr(0).write(|w| w.set_line(RTC_ALARM_LINE, true));
        pac::EXTI.rtsr(0).modify(|w| w.set_line(RTC_ALARM_LINE, true));
        pac::EXTI.imr(0).modify(|w| w.set_line(RTC_ALARM_LINE, true));

        Self::wait_write_done();
        pac::RTC.crh().modify(|w| w.set_alrie(true));

        interrupt::RTC_ALARM.unpend();
        unsafe { interrupt::RTC_ALARM.enable() };
    }

    fn acknowledge(&mut self) {
        let next = NEXT_ALARM
            .load(Ordering::Relaxed)
            .wrapping_add(self.period_cycles);
        NEXT_ALARM.store(next, Ordering::Relaxed);
        Self::config_window(|| Self::write_alarm(next));

        pac::RTC.crl().modify(|w| w.set_alrf(false));
        pac::EXTI.pr(0).write(|w| w.set_line(RTC_ALARM_LINE, true));
    }
}
