//! Launcher: brings up both loops and owns the fatal-error boundary.
//!
//! ```text
//!   core 1 (APP_CPU):  HeartbeatLoop   detached, never joined
//!   core 0 (PRO_CPU):  FanStateLoop    on the calling thread
//! ```
//!
//! All four lines are bound before anything runs, so a startup pin error
//! leaves every output untouched.  Once both loops run they share one halt
//! latch: the first error stored there stops the other loop too, and the
//! heartbeat finishes any pulse in progress before it stops.  [`start`]
//! returns that first error; [`run`] discards it.  This firmware has no
//! operator console, so a fatal error simply ends the process and the pins
//! stop moving.

use core::convert::Infallible;
use std::sync::{Arc, OnceLock};

use log::info;

use crate::app::fan_state::FanStateLoop;
use crate::app::heartbeat::HeartbeatLoop;
use crate::app::ports::Board;
use crate::config::ControllerConfig;
use crate::drivers::task_pin::{self, Core};
use crate::drivers::watchdog;
use crate::error::{Error, Result};

/// FreeRTOS priority of the heartbeat task.
pub const HEARTBEAT_TASK_PRIORITY: u8 = 1;
/// Stack for the heartbeat task (KB).
pub const HEARTBEAT_TASK_STACK_KB: usize = 4;
const HEARTBEAT_TASK_NAME: &str = "heartbeat\0";

/// Bind every pin, spawn the heartbeat loop on core 1, then run the fan
/// loop here until either loop fails.
pub fn start<B: Board>(board: &mut B, config: &ControllerConfig) -> Result<Infallible> {
    config.validate()?;

    let (hb_in, hb_out) = board.heartbeat_pins()?;
    let (signal_in, signal_out) = board.fan_pins()?;

    let heartbeat = HeartbeatLoop::with_delay_ms(hb_in, hb_out, board.delay(), config.ack_reset_delay_ms)
        .with_poll_mode(config.heartbeat_poll);
    let fan = FanStateLoop::with_delay_ms(signal_in, signal_out, board.delay(), config.state_check_delay_ms);

    let halt: Arc<OnceLock<Error>> = Arc::default();
    let hb_halt = Arc::clone(&halt);

    watchdog::release_app_core_idle();
    task_pin::spawn_on_core(
        Core::App,
        HEARTBEAT_TASK_PRIORITY,
        HEARTBEAT_TASK_STACK_KB,
        HEARTBEAT_TASK_NAME,
        move || {
            if let Err(err) = heartbeat.run_until_halted(&hb_halt) {
                let _ = hb_halt.set(err);
            }
        },
    )?;

    info!("launcher: heartbeat on {:?}, fan loop on {:?}", Core::App, Core::Pro);
    fan.run_until_halted(&halt).inspect_err(|&err| {
        let _ = halt.set(err);
    })
}

/// Fail-silent entry point.  Returns only after a fatal error, which is
/// dropped without logging.
pub fn run<B: Board>(mut board: B, config: &ControllerConfig) {
    let _ = start(&mut board, config);
}

/// Replace the panic hook with one that prints nothing, so the Rust panic
/// message is never logged.  On ESP-IDF panics abort, and the IDF abort
/// handler still prints its own report.
pub fn install_silent_panic_hook() {
    std::panic::set_hook(Box::new(|_| {}));
}
