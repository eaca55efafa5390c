//! GPIO board adapter: binds the four logical lines to real GPIOs.
//!
//! Implements [`Board`] over [`drivers::gpio`](crate::drivers::gpio), using
//! the numbers in [`pins`](crate::pins).  On non-espidf targets the
//! underlying lines are the in-memory simulation.

use crate::app::ports::Board;
use crate::drivers::delay::{self, BoardDelay};
use crate::drivers::gpio::{GpioInput, GpioOutput};
use crate::error::Result;
use crate::pins::PinRole;

/// The production board: hb_in/hb_out on GPIO12/13, signal_in/signal_out
/// on GPIO14/15.
#[derive(Debug, Default)]
pub struct GpioBoard;

impl GpioBoard {
    pub fn new() -> Self {
        Self
    }
}

impl Board for GpioBoard {
    type HeartbeatIn = GpioInput;
    type HeartbeatOut = GpioOutput;
    type SignalIn = GpioInput;
    type SignalOut = GpioOutput;
    type Delay = BoardDelay;

    fn heartbeat_pins(&mut self) -> Result<(GpioInput, GpioOutput)> {
        let hb_in = GpioInput::configure(PinRole::HbIn.gpio())?;
        let hb_out = GpioOutput::configure(PinRole::HbOut.gpio())?;
        Ok((hb_in, hb_out))
    }

    fn fan_pins(&mut self) -> Result<(GpioInput, GpioOutput)> {
        let signal_in = GpioInput::configure(PinRole::SignalIn.gpio())?;
        let signal_out = GpioOutput::configure(PinRole::SignalOut.gpio())?;
        Ok((signal_in, signal_out))
    }

    fn delay(&mut self) -> BoardDelay {
        delay::board_delay()
    }
}
