//! Application core: the two control loops and the board port.
//!
//! Neither loop touches hardware directly: they are generic over the
//! `embedded-hal` pin and delay traits, and a [`ports::Board`] decides what
//! backs them.  This layer is fully testable without real peripherals.

pub mod fan_state;
pub mod heartbeat;
pub mod ports;
