//! Bring-up helpers that report values on the indicator LED.
//!
//! Nothing here touches the tick or sleep machinery; delays are plain busy
//! waits with the core running.

use embedded_hal::delay::DelayNs;

use crate::config::{BIT_GAP_MS, BIT_ONE_MS, BIT_ZERO_MS};
use crate::hardware::traits::Led;

/// On-times for the eight bits of `value`, LSB first.
pub fn bit_pulses(value: u8) -> impl Iterator<Item = u32> {
    (0..8).map(move |bit| {
        if (value >> bit) & 1 == 1 {
            BIT_ONE_MS
        } else {
            BIT_ZERO_MS
        }
    })
}

/// Flash `value` as eight pulses, long for 1 and short for 0, LSB first.
/// Each pulse is followed by a dark gap.
pub fn flash_byte<L: Led, D: DelayNs>(led: &mut L, delay: &mut D, value: u8) {
    log_info!("flashing diagnostic byte {}", value);
    for on_ms in bit_pulses(value) {
        led.on();
        delay.delay_ms(on_ms);
        led.off();
        delay.delay_ms(BIT_GAP_MS);
    }
}
