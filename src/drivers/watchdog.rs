//! Task Watchdog Timer (TWDT) idle-task check.
//!
//! The heartbeat loop polls `hb_in` on core 1 without ever blocking, so
//! core 1's IDLE task never gets to run.  With the IDF default config the
//! TWDT would then report CPU1 as starved every few seconds.  The TWDT is
//! reconfigured to watch only core 0's IDLE task; core 0 sleeps in the fan
//! loop and stays watched.

use crate::drivers::task_pin::Core;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

/// TWDT timeout, same as the ESP-IDF default.
pub const TWDT_TIMEOUT_MS: u32 = 5_000;

/// IDLE tasks the TWDT keeps watching: core 0 only.
pub const IDLE_CORE_MASK: u32 = 1 << Core::Pro as u32;

/// Stop the TWDT from watching core 1's IDLE task.
///
/// A TWDT that is not running needs nothing, so a failed reconfigure is
/// only logged.
pub fn release_app_core_idle() {
    #[cfg(target_os = "espidf")]
    {
        let cfg = esp_task_wdt_config_t {
            timeout_ms: TWDT_TIMEOUT_MS,
            idle_core_mask: IDLE_CORE_MASK,
            trigger_panic: false,
        };
        // SAFETY: `cfg` is fully initialised and only read during the call.
        let ret = unsafe { esp_task_wdt_reconfigure(&cfg) };
        if ret == ESP_OK as i32 {
            log::debug!("watchdog: idle check limited to {:?}", Core::Pro);
        } else {
            log::debug!("watchdog: reconfigure returned {} (TWDT not running?)", ret);
        }
    }

    #[cfg(not(target_os = "espidf"))]
    log::debug!("watchdog(sim): no-op");
}
