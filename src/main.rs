//! Fan relay firmware: main entry point.
//!
//! ```text
//! ┌───────────────────────────────┐   ┌───────────────────────────────┐
//! │ core 0 (PRO_CPU)              │   │ core 1 (APP_CPU)              │
//! │ FanStateLoop                  │   │ HeartbeatLoop                 │
//! │ GPIO14 signal_in  ──▶ GPIO15  │   │ GPIO12 hb_in  ──▶ GPIO13      │
//! │              relay trigger    │   │            ack pulse          │
//! └───────────────────────────────┘   └───────────────────────────────┘
//! ```

use anyhow::Result;
use log::info;

use fanrelay::adapters::board::GpioBoard;
use fanrelay::config::ControllerConfig;
use fanrelay::launcher;

fn bootstrap() -> Result<()> {
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;
    launcher::install_silent_panic_hook();

    info!("FanRelay v{}", env!("CARGO_PKG_VERSION"));
    Ok(())
}

fn main() {
    // Fail-silent: no console to report to.
    if bootstrap().is_err() {
        return;
    }
    launcher::run(GpioBoard::new(), &ControllerConfig::default());
}
