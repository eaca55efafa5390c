//! Fan relay firmware library.
//!
//! Two independent loops on the two ESP32-S3 cores:
//!
//! - [`app::fan_state::FanStateLoop`] mirrors the host's fan signal onto the
//!   relay trigger every 250 ms.
//! - [`app::heartbeat::HeartbeatLoop`] answers each heartbeat ping with a
//!   250 ms acknowledge pulse.
//!
//! [`launcher`] wires them onto the cores.  Everything ESP-IDF specific is
//! guarded by `#[cfg(target_os = "espidf")]` inside each module; on other
//! targets the GPIO layer is an in-memory simulation.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod launcher;
pub mod pins;

pub use error::{Error, Result};
