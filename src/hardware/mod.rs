pub mod port_power;
pub mod traits;

#[cfg(feature = "stm32f103")]
pub mod gpio_led;
#[cfg(feature = "stm32f103")]
pub mod rtc_tick;
#[cfg(feature = "stm32f103")]
pub mod stop_mode;

#[cfg(test)]
pub mod mock;
