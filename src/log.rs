//! Optional logging
//!
//! Routed to `esp-println` or `defmt` when the matching feature is enabled.
//! Without either, arguments are still type-checked but nothing is emitted.
//! Never called from the per-byte transmission path.

macro_rules! trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "esp32-log")]
        esp_println::println!($($arg)*);
        #[cfg(feature = "defmt")]
        defmt::debug!($($arg)*);
        #[cfg(not(any(feature = "esp32-log", feature = "defmt")))]
        let _ = format_args!($($arg)*);
    }};
}
