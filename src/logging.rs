//! Logging macros
//!
//! - Target (`stm32f103`): forwards to `defmt` over RTT
//! - Host tests: `println!`
//! - Host non-test: arguments are still evaluated, nothing is printed

/// Log informational message
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "stm32f103")]
        ::defmt::info!($($arg)*);

        #[cfg(all(not(feature = "stm32f103"), test))]
        println!("[INFO] {}", format!($($arg)*));

        #[cfg(all(not(feature = "stm32f103"), not(test)))]
        {
            let _ = ::core::format_args!($($arg)*);
        }
    }};
}

/// Log warning message
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "stm32f103")]
        ::defmt::warn!($($arg)*);

        #[cfg(all(not(feature = "stm32f103"), test))]
        println!("[WARN] {}", format!($($arg)*));

        #[cfg(all(not(feature = "stm32f103"), not(test)))]
        {
            let _ = ::core::format_args!($($arg)*);
        }
    }};
}

/// Log debug message
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "stm32f103")]
        ::defmt::debug!($($arg)*);

        #[cfg(all(not(feature = "stm32f103"), test))]
        println!("[DEBUG] {}", format!($($arg)*));

        #[cfg(all(not(feature = "stm32f103"), not(test)))]
        {
            let _ = ::core::format_args!($($arg)*);
        }
    }};
}
