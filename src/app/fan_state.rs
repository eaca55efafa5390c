//! Fan relay loop: mirrors the host's fan signal onto the relay trigger.
//!
//! Every cycle samples `signal_in`, drives `signal_out` to the same level and
//! sleeps `state_check_delay_ms`.  The write happens every cycle whether or
//! not the level changed; there is no debouncing or edge detection.

use core::convert::Infallible;
use std::sync::OnceLock;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin, PinState};
use log::{debug, info};

use crate::config::DEFAULT_STATE_CHECK_DELAY_MS;
use crate::error::{Error, Result};
use crate::pins::PinRole;

pub struct FanStateLoop<I, O, D> {
    signal_in: I,
    signal_out: O,
    delay: D,
    state_check_delay_ms: u32,
    cycles: u64,
    last_level: Option<PinState>,
}

impl<I, O, D> FanStateLoop<I, O, D>
where
    I: InputPin,
    O: OutputPin,
    D: DelayNs,
{
    /// Build the loop with the default 250 ms sample interval.
    pub fn new(signal_in: I, signal_out: O, delay: D) -> Self {
        Self::with_delay_ms(signal_in, signal_out, delay, DEFAULT_STATE_CHECK_DELAY_MS)
    }

    /// Build the loop with an explicit sample interval.  Zero is clamped to
    /// 1 ms so the loop never runs hotter than 1 kHz.
    pub fn with_delay_ms(signal_in: I, signal_out: O, delay: D, state_check_delay_ms: u32) -> Self {
        Self {
            signal_in,
            signal_out,
            delay,
            state_check_delay_ms: state_check_delay_ms.max(1),
            cycles: 0,
            last_level: None,
        }
    }

    /// One read → write → sleep iteration.  Returns the sampled level.
    pub fn cycle(&mut self) -> Result<PinState> {
        let high = self
            .signal_in
            .is_high()
            .map_err(Error::pin(PinRole::SignalIn))?;
        let level = PinState::from(high);

        self.signal_out
            .set_state(level)
            .map_err(Error::pin(PinRole::SignalOut))?;

        if self.last_level != Some(level) {
            debug!("fan: signal_out -> {:?}", level);
            self.last_level = Some(level);
        }

        self.delay.delay_ms(self.state_check_delay_ms);
        self.cycles += 1;
        Ok(level)
    }

    /// Run forever.  Only returns on a pin error.
    pub fn run(self) -> Result<Infallible> {
        self.run_until_halted(&OnceLock::new())
    }

    /// Like [`run`](Self::run), but also stops before the next cycle once
    /// `halt` holds an error, and returns that error.
    pub fn run_until_halted(mut self, halt: &OnceLock<Error>) -> Result<Infallible> {
        info!(
            "fan: mirroring signal_in -> signal_out every {} ms",
            self.state_check_delay_ms
        );
        loop {
            if let Some(&err) = halt.get() {
                return Err(err);
            }
            self.cycle()?;
        }
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn state_check_delay_ms(&self) -> u32 {
        self.state_check_delay_ms
    }
}
