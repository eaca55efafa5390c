//! GPIO pin assignments for the fan relay board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

use core::fmt;

// ---------------------------------------------------------------------------
// Heartbeat handshake (host ↔ controller)
// ---------------------------------------------------------------------------

/// Digital input: heartbeat request from the host (HIGH = ping).
pub const HB_IN_GPIO: i32 = 12;
/// Digital output: heartbeat acknowledge pulse back to the host.
pub const HB_OUT_GPIO: i32 = 13;

// ---------------------------------------------------------------------------
// Fan relay
// ---------------------------------------------------------------------------

/// Digital input: fan-should-run signal from the host (HIGH = run).
pub const SIGNAL_IN_GPIO: i32 = 14;
/// Digital output: relay trigger (HIGH = relay closed, fan powered).
pub const SIGNAL_OUT_GPIO: i32 = 15;

/// Number of GPIO lines on the ESP32-S3 (GPIO0 – GPIO48).
pub const GPIO_COUNT: usize = 49;

/// Logical role of each line, used to tag pin errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinRole {
    HbIn,
    HbOut,
    SignalIn,
    SignalOut,
}

impl PinRole {
    #[cfg(test)]
    const ALL: [PinRole; 4] = [Self::HbIn, Self::HbOut, Self::SignalIn, Self::SignalOut];

    /// GPIO number bound to this role.
    pub const fn gpio(self) -> i32 {
        match self {
            Self::HbIn => HB_IN_GPIO,
            Self::HbOut => HB_OUT_GPIO,
            Self::SignalIn => SIGNAL_IN_GPIO,
            Self::SignalOut => SIGNAL_OUT_GPIO,
        }
    }
}

impl fmt::Display for PinRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HbIn => write!(f, "hb_in"),
            Self::HbOut => write!(f, "hb_out"),
            Self::SignalIn => write!(f, "signal_in"),
            Self::SignalOut => write!(f, "signal_out"),
        }
    }
}
