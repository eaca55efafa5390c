//! Raw GPIO lines behind the `embedded-hal` digital traits.
//!
//! Each line is configured once at boot via `gpio_config()` and then
//! read/driven with `gpio_get_level()` / `gpio_set_level()`.  Inputs get the
//! internal pull-down so a disconnected host reads LOW (fan off, no ping).
//! Outputs are driven LOW as soon as they are configured.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: real register access through `esp_idf_svc::sys`.
//! On host/test: levels live in an in-memory table so a test can play the
//! host with [`sim_set_level`] and observe outputs with [`sim_level`].

use embedded_hal::digital::{self, ErrorType, InputPin, OutputPin};

use crate::error::{Error, Result};
use crate::pins;

/// `ESP_ERR_INVALID_ARG`, reported for out-of-range GPIO numbers.
const ERR_INVALID_ARG: i32 = 0x102;

/// Raw ESP-IDF error code from a failed level write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioError(pub i32);

impl digital::Error for GpioError {
    fn kind(&self) -> digital::ErrorKind {
        digital::ErrorKind::Other
    }
}

fn check_range(gpio: i32) -> Result<()> {
    if (0..pins::GPIO_COUNT as i32).contains(&gpio) {
        Ok(())
    } else {
        Err(Error::GpioConfig {
            gpio,
            code: ERR_INVALID_ARG,
        })
    }
}

// ── Inputs ────────────────────────────────────────────────────

/// A GPIO configured as a pulled-down digital input.
#[derive(Debug)]
pub struct GpioInput {
    gpio: i32,
}

impl GpioInput {
    pub fn configure(gpio: i32) -> Result<Self> {
        check_range(gpio)?;
        hw::configure_input(gpio)?;
        log::debug!("gpio: GPIO{} configured as input", gpio);
        Ok(Self { gpio })
    }

    pub fn gpio(&self) -> i32 {
        self.gpio
    }
}

impl ErrorType for GpioInput {
    type Error = GpioError;
}

impl InputPin for GpioInput {
    fn is_high(&mut self) -> core::result::Result<bool, GpioError> {
        Ok(hw::read_level(self.gpio))
    }

    fn is_low(&mut self) -> core::result::Result<bool, GpioError> {
        Ok(!hw::read_level(self.gpio))
    }
}

// ── Outputs ───────────────────────────────────────────────────

/// A GPIO configured as a push-pull digital output, initially LOW.
#[derive(Debug)]
pub struct GpioOutput {
    gpio: i32,
}

impl GpioOutput {
    pub fn configure(gpio: i32) -> Result<Self> {
        check_range(gpio)?;
        hw::configure_output(gpio)?;
        log::debug!("gpio: GPIO{} configured as output (LOW)", gpio);
        Ok(Self { gpio })
    }

    pub fn gpio(&self) -> i32 {
        self.gpio
    }
}

impl ErrorType for GpioOutput {
    type Error = GpioError;
}

impl OutputPin for GpioOutput {
    fn set_low(&mut self) -> core::result::Result<(), GpioError> {
        hw::write_level(self.gpio, false)
    }

    fn set_high(&mut self) -> core::result::Result<(), GpioError> {
        hw::write_level(self.gpio, true)
    }
}

// ── ESP-IDF register access ───────────────────────────────────

#[cfg(target_os = "espidf")]
mod hw {
    use esp_idf_svc::sys::*;

    use super::{Error, GpioError, Result};

    fn config(gpio: i32, mode: gpio_mode_t, pull_down: bool) -> Result<()> {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << gpio,
            mode,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: if pull_down {
                gpio_pulldown_t_GPIO_PULLDOWN_ENABLE
            } else {
                gpio_pulldown_t_GPIO_PULLDOWN_DISABLE
            },
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
            ..Default::default()
        };
        // SAFETY: `cfg` is a fully initialised config for a range-checked pin.
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(Error::GpioConfig { gpio, code: ret });
        }
        Ok(())
    }

    pub(super) fn configure_input(gpio: i32) -> Result<()> {
        config(gpio, gpio_mode_t_GPIO_MODE_INPUT, true)
    }

    pub(super) fn configure_output(gpio: i32) -> Result<()> {
        config(gpio, gpio_mode_t_GPIO_MODE_OUTPUT, false)?;
        write_level(gpio, false).map_err(|GpioError(code)| Error::GpioConfig { gpio, code })
    }

    pub(super) fn read_level(gpio: i32) -> bool {
        // SAFETY: read-only register access on a configured input pin.
        (unsafe { gpio_get_level(gpio) }) != 0
    }

    pub(super) fn write_level(gpio: i32, high: bool) -> core::result::Result<(), GpioError> {
        // SAFETY: each output pin is owned by exactly one loop, so writes to
        // a given line never race.
        let ret = unsafe { gpio_set_level(gpio, u32::from(high)) };
        if ret != ESP_OK as i32 {
            return Err(GpioError(ret));
        }
        Ok(())
    }
}

// ── Host simulation ───────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
mod hw {
    use core::sync::atomic::{AtomicBool, Ordering};

    use super::{GpioError, Result, pins};

    static SIM_LEVELS: [AtomicBool; pins::GPIO_COUNT] =
        [const { AtomicBool::new(false) }; pins::GPIO_COUNT];

    pub(super) fn configure_input(_gpio: i32) -> Result<()> {
        Ok(())
    }

    pub(super) fn configure_output(gpio: i32) -> Result<()> {
        SIM_LEVELS[gpio as usize].store(false, Ordering::Relaxed);
        Ok(())
    }

    pub(super) fn read_level(gpio: i32) -> bool {
        SIM_LEVELS[gpio as usize].load(Ordering::Relaxed)
    }

    pub(super) fn write_level(gpio: i32, high: bool) -> core::result::Result<(), GpioError> {
        SIM_LEVELS[gpio as usize].store(high, Ordering::Relaxed);
        Ok(())
    }
}

/// Drive a simulated line from outside the firmware (the host's side).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_level(gpio: i32, high: bool) {
    if check_range(gpio).is_ok() {
        hw::write_level(gpio, high).ok();
    }
}

/// Observe a simulated line.  Out-of-range GPIOs read LOW.
#[cfg(not(target_os = "espidf"))]
pub fn sim_level(gpio: i32) -> bool {
    check_range(gpio).is_ok() && hw::read_level(gpio)
}
