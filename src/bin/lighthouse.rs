//! STM32F103 Blue Pill Sleeping Lighthouse
//! =============================================================================================
//!
//! Date			Author          Notes
//! 19/10/2026	    lighthouse      Initial release
//!
//!==============================================================================================
//!
//! Flashes the onboard LED like a lighthouse: a group of three short flashes
//! 1.5 s apart, then about 4 s dark. While the LED is dark the MCU sits in
//! Stop mode and is woken every ~500 ms by the RTC alarm running from LSI.
//!
//! Hardware Connections:
//!   - Onboard LED: PC13 (active low, no external connection needed)
//!   - Scope diagnostic: PA2 (low while running)
//!   - SWD: PA13/PA14 stay connected during sleep
//!
//! Features:
//! 1. RTC alarm tick from LSI, EXTI line 17 wake
//! 2. Stop mode between flashes, all other GPIO analog while asleep
//! 3. `bringup` feature: flash the AHB prescaler on the LED at power-up

#![no_std]
#![no_main]

use defmt::info;
use embassy_executor::Spawner;
use embassy_stm32::{
    gpio::{Level, Output, Speed},
    interrupt,
};
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use sleeping_lighthouse::{
    PatternSequencer, SleepCoordinator, TICK, WaitPolicy, WakeAccounting,
    config::{LIGHTHOUSE, TICK_TIMING},
    hardware::{
        gpio_led::GpioLed,
        port_power::{ActivePin, Port, PortPin, PortPowerManager, SWD_PINS, Stm32Ports},
        rtc_tick::RtcTick,
        stop_mode::StopMode,
    },
    timer_source,
};

// Outputs rebuilt after every wake
const ACTIVE_PINS: [ActivePin; 2] = [
    // LED off
    ActivePin {
        pin: PortPin::new(Port::C, 13),
        idle_high: true,
    },
    // scope diagnostic low
    ActivePin {
        pin: PortPin::new(Port::A, 2),
        idle_high: false,
    },
];

/// RTC alarm interrupt: acknowledge, re-arm, raise the tick.
#[interrupt]
fn RTC_ALARM() {
    let mut rtc = RtcTick::new(&TICK_TIMING);
    timer_source::service_tick(&mut rtc, &TICK);
}

/// Main application entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    // HSI 8MHz / 2 = 4MHz core. HSI is also the clock after Stop-mode wake,
    // so nothing needs reprogramming on the way out of sleep.
    let mut config = embassy_stm32::Config::default();
    {
        use embassy_stm32::rcc::*;
        config.rcc.hse = None;
        config.rcc.pll = None;
        config.rcc.sys = Sysclk::HSI; // system clock straight from HSI
        config.rcc.ahb_pre = AHBPrescaler::DIV2; // AHB 4MHz
        config.rcc.apb1_pre = APBPrescaler::DIV1; // APB1 4MHz
        config.rcc.apb2_pre = APBPrescaler::DIV1; // APB2 4MHz
    }
    // DBGMCU keeps clocks running in Stop otherwise
    config.enable_debug_during_sleep = false;

    let p = embassy_stm32::init(config);
    info!("Sleeping lighthouse starting");

    // Onboard LED, initial state off
    #[cfg_attr(not(feature = "bringup"), allow(unused_mut))]
    let mut led = GpioLed::new(Output::new(p.PC13, Level::High, Speed::Low), Level::Low);
    // Scope diagnostic, active high; held so the pin stays claimed
    #[cfg_attr(not(feature = "bringup"), allow(unused_mut, unused_variables))]
    let mut diag = GpioLed::new(Output::new(p.PA2, Level::Low, Speed::Low), Level::High);

    // Start LSI and the RTC tick; hangs here if LSI never comes up
    let mut rtc = RtcTick::new(&TICK_TIMING);
    timer_source::initialize(&mut rtc, &TICK_TIMING, WaitPolicy::Forever).unwrap();

    let core = cortex_m::Peripherals::take().unwrap();
    let mut sleeper = SleepCoordinator::new(
        StopMode::new(core.SCB),
        PortPowerManager::new(Stm32Ports, ACTIVE_PINS, &SWD_PINS),
        &TICK,
        WakeAccounting::ConfirmedTick,
    );
    sleeper.configure_sleep_mode();

    #[cfg(feature = "bringup")]
    bringup_report(&mut led, &mut diag);

    let mut sequencer = PatternSequencer::new(led, Delay, sleeper, LIGHTHOUSE);
    sequencer.run_forever()
}

/// Flash the AHB prescaler field of RCC_CFGR, framed by the diagnostic pin.
///
/// Expected value is 0x08 (SYSCLK / 2).
#[cfg(feature = "bringup")]
fn bringup_report(led: &mut GpioLed<'static>, diag: &mut GpioLed<'static>) {
    use embedded_hal::delay::DelayNs;
    use sleeping_lighthouse::config::{BRINGUP_LEAD_MS, BRINGUP_TRAIL_MS};
    use sleeping_lighthouse::diagnostic::flash_byte;
    use sleeping_lighthouse::hardware::traits::Led;

    let mut delay = Delay;
    let hpre = embassy_stm32::pac::RCC.cfgr().read().hpre().to_bits();
    info!("RCC_CFGR.HPRE = {=u8:#x}", hpre);

    diag.on();
    delay.delay_ms(BRINGUP_LEAD_MS);
    flash_byte(led, &mut delay, hpre);
    delay.delay_ms(BRINGUP_TRAIL_MS);
    diag.off();
}

// Notes:
// 1. The tick ISR is the only writer of TICK; the sequencer only consumes it
// 2. ConfirmedTick is used because the embassy time driver owns a TIM IRQ
// 3. Tick timing follows the LSI RC, so expect drift of several percent
