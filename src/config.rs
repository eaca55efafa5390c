//! Controller timing parameters
//!
//! The only tunables in the system: how often the fan signal is sampled and
//! how long the heartbeat acknowledge is held HIGH.  Values are compile-time
//! defaults; the loop constructors accept overrides.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default sleep between fan signal samples (milliseconds).
pub const DEFAULT_STATE_CHECK_DELAY_MS: u32 = 250;
/// Default heartbeat acknowledge pulse width (milliseconds).
pub const DEFAULT_ACK_RESET_DELAY_MS: u32 = 250;

/// What the heartbeat loop does between LOW reads of `hb_in`.
///
/// Neither mode sleeps, so acknowledge latency is bounded by the poll rate
/// in both cases, and in both the core's IDLE task never runs (see
/// [`drivers::watchdog`](crate::drivers::watchdog)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PollMode {
    /// Busy-poll with a CPU spin hint. Saturates the core.
    #[default]
    Spin,
    /// `yield_now` after every LOW read.  FreeRTOS only switches to ready
    /// tasks of equal or higher priority.
    Yield,
}

impl PollMode {
    /// Called once per idle poll.
    pub fn relax(self) {
        match self {
            Self::Spin => core::hint::spin_loop(),
            Self::Yield => std::thread::yield_now(),
        }
    }
}

/// Core controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Sleep between fan signal samples (milliseconds)
    pub state_check_delay_ms: u32,
    /// Heartbeat acknowledge pulse width (milliseconds)
    pub ack_reset_delay_ms: u32,
    /// Idle behaviour of the heartbeat loop
    pub heartbeat_poll: PollMode,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            state_check_delay_ms: DEFAULT_STATE_CHECK_DELAY_MS,
            ack_reset_delay_ms: DEFAULT_ACK_RESET_DELAY_MS,
            heartbeat_poll: PollMode::default(),
        }
    }
}

impl ControllerConfig {
    /// Reject values the loops cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.state_check_delay_ms == 0 {
            return Err(Error::Config("state_check_delay_ms must be > 0"));
        }
        if self.ack_reset_delay_ms == 0 {
            return Err(Error::Config("ack_reset_delay_ms must be > 0"));
        }
        Ok(())
    }
}
