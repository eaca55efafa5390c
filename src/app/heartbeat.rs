//! Heartbeat acknowledge loop.
//!
//! Two-state poller running on the secondary core:
//!
//! ```text
//!          hb_in LOW (re-poll, no sleep)
//!            ┌──────┐
//!            ▼      │
//!         ┌──────────┐   hb_in HIGH   ┌────────────────┐
//!         │   Idle   │ ─────────────▶ │ Acknowledging  │
//!         └──────────┘                │ hb_out HIGH    │
//!              ▲                      │ sleep ack_ms   │
//!              └───────────────────── │ hb_out LOW     │
//!                                     └────────────────┘
//! ```
//!
//! `hb_in` is not sampled while a pulse is in progress, so pulses can never
//! overlap.  A host that holds `hb_in` HIGH gets back-to-back pulses.
//! Acknowledging lives entirely inside one [`HeartbeatLoop::poll`] call.

use core::convert::Infallible;
use std::sync::OnceLock;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use log::{info, trace};

use crate::config::{DEFAULT_ACK_RESET_DELAY_MS, PollMode};
use crate::error::{Error, Result};
use crate::pins::PinRole;

/// Result of a single [`HeartbeatLoop::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// `hb_in` was LOW; nothing was driven.
    Idle,
    /// `hb_in` was HIGH; a full pulse was emitted on `hb_out`.
    Acknowledged,
}

pub struct HeartbeatLoop<I, O, D> {
    hb_in: I,
    hb_out: O,
    delay: D,
    ack_reset_delay_ms: u32,
    poll_mode: PollMode,
    pulses: u64,
}

impl<I, O, D> HeartbeatLoop<I, O, D>
where
    I: InputPin,
    O: OutputPin,
    D: DelayNs,
{
    /// Build the loop with the default 250 ms acknowledge pulse.
    pub fn new(hb_in: I, hb_out: O, delay: D) -> Self {
        Self::with_delay_ms(hb_in, hb_out, delay, DEFAULT_ACK_RESET_DELAY_MS)
    }

    /// Build the loop with an explicit pulse width (clamped to ≥ 1 ms).
    pub fn with_delay_ms(hb_in: I, hb_out: O, delay: D, ack_reset_delay_ms: u32) -> Self {
        Self {
            hb_in,
            hb_out,
            delay,
            ack_reset_delay_ms: ack_reset_delay_ms.max(1),
            poll_mode: PollMode::default(),
            pulses: 0,
        }
    }

    pub fn with_poll_mode(mut self, poll_mode: PollMode) -> Self {
        self.poll_mode = poll_mode;
        self
    }

    /// One Idle read; on HIGH, runs the whole Acknowledging pulse before
    /// returning.
    pub fn poll(&mut self) -> Result<PollOutcome> {
        let asserted = self
            .hb_in
            .is_high()
            .map_err(Error::pin(PinRole::HbIn))?;
        if !asserted {
            return Ok(PollOutcome::Idle);
        }
        self.acknowledge()?;
        Ok(PollOutcome::Acknowledged)
    }

    fn acknowledge(&mut self) -> Result<()> {
        self.hb_out
            .set_high()
            .map_err(Error::pin(PinRole::HbOut))?;
        self.delay.delay_ms(self.ack_reset_delay_ms);
        self.hb_out.set_low().map_err(Error::pin(PinRole::HbOut))?;
        self.pulses += 1;
        trace!("heartbeat: ack #{}", self.pulses);
        Ok(())
    }

    /// Run forever.  Only returns on a pin error.
    pub fn run(self) -> Result<Infallible> {
        self.run_until_halted(&OnceLock::new())
    }

    /// Like [`run`](Self::run), but also stops between polls once `halt`
    /// holds an error, and returns that error.  A pulse in progress is
    /// always finished first, so `hb_out` is left LOW.
    pub fn run_until_halted(mut self, halt: &OnceLock<Error>) -> Result<Infallible> {
        info!(
            "heartbeat: acknowledging hb_in with {} ms pulses ({:?} idle)",
            self.ack_reset_delay_ms, self.poll_mode
        );
        loop {
            if let Some(&err) = halt.get() {
                return Err(err);
            }
            if self.poll()? == PollOutcome::Idle {
                self.poll_mode.relax();
            }
        }
    }

    pub fn pulses(&self) -> u64 {
        self.pulses
    }

    pub fn ack_reset_delay_ms(&self) -> u32 {
        self.ack_reset_delay_ms
    }
}
