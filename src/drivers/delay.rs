//! Blocking delay sources for the control loops.
//!
//! On ESP-IDF the board delay is the FreeRTOS tick delay from `esp-idf-hal`,
//! which suspends the calling task.  On the host it is a plain
//! `std::thread::sleep`.

use std::time::Duration;

use embedded_hal::delay::DelayNs;

#[cfg(target_os = "espidf")]
pub type BoardDelay = esp_idf_hal::delay::FreeRtos;

#[cfg(not(target_os = "espidf"))]
pub type BoardDelay = StdDelay;

/// The delay source each loop gets on this target.
#[cfg(target_os = "espidf")]
pub fn board_delay() -> BoardDelay {
    esp_idf_hal::delay::FreeRtos
}

/// The delay source each loop gets on this target.
#[cfg(not(target_os = "espidf"))]
pub fn board_delay() -> BoardDelay {
    StdDelay
}

/// Thread-sleep delay.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}
