//! Port traits: the boundary between the control loops and the board.
//!
//! ```text
//!   Board adapter ──▶ embedded-hal pins + delay ──▶ FanStateLoop / HeartbeatLoop
//! ```
//!
//! The loops only ever see `embedded-hal` traits.  [`Board`] is the single
//! place that knows how to bind the four logical lines to real (or mock)
//! pins, so the launcher stays hardware-agnostic.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::error::Result;

/// Hands out the pins and delay source for both loops.
///
/// The heartbeat half moves to the secondary core, so its pins and delay
/// must be `Send + 'static`.  The fan half stays on the calling thread.
pub trait Board {
    type HeartbeatIn: InputPin + Send + 'static;
    type HeartbeatOut: OutputPin + Send + 'static;
    type SignalIn: InputPin;
    type SignalOut: OutputPin;
    type Delay: DelayNs + Send + 'static;

    /// Bind `hb_in` and `hb_out`.
    fn heartbeat_pins(&mut self) -> Result<(Self::HeartbeatIn, Self::HeartbeatOut)>;

    /// Bind `signal_in` and `signal_out`.
    fn fan_pins(&mut self) -> Result<(Self::SignalIn, Self::SignalOut)>;

    /// A fresh delay source.  Each loop gets its own.
    fn delay(&mut self) -> Self::Delay;
}
