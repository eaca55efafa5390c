//! Unified error type for the fan relay firmware.
//!
//! Every failure in this firmware is fatal: a pin that cannot be read or
//! driven, a line that cannot be configured, or a core task that cannot be
//! started.  The variants only record *where* it happened; the launcher
//! treats them all the same way.  All variants are `Copy` so they pass
//! through the loops without allocation.

use core::fmt;

use embedded_hal::digital;

use crate::pins::PinRole;

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Reading or driving a bound pin failed.
    Pin {
        role: PinRole,
        kind: digital::ErrorKind,
    },
    /// Configuring a GPIO line failed (raw ESP-IDF return code).
    GpioConfig { gpio: i32, code: i32 },
    /// The secondary core task could not be started.
    Spawn(i32),
    /// Timing configuration is invalid.
    Config(&'static str),
}

impl Error {
    /// Adapter for `map_err` on `embedded-hal` pin results.
    pub fn pin<E: digital::Error>(role: PinRole) -> impl FnOnce(E) -> Self {
        move |e| Self::Pin {
            role,
            kind: e.kind(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pin { role, kind } => write!(f, "pin {role}: {kind}"),
            Self::GpioConfig { gpio, code } => {
                write!(f, "GPIO{gpio} config failed (rc={code})")
            }
            Self::Spawn(code) => write!(f, "core task spawn failed (rc={code})"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
