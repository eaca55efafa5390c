//! Core-pinned thread spawning for ESP32-S3 dual-core.
//!
//! Wraps `esp_pthread_set_cfg()` so that `std::thread::spawn` creates a
//! FreeRTOS task pinned to a specific CPU core with explicit priority
//! and stack size. On non-ESP targets, falls back to plain thread spawn.
//!
//! # ESP-IDF Threading Model
//!
//! ESP-IDF implements `std::thread` via pthreads, which are thin wrappers
//! around FreeRTOS tasks. `esp_pthread_set_cfg()` sets thread-local
//! configuration that applies to the *next* `pthread_create()` call from
//! the calling thread, so the config→spawn pair must not be interleaved
//! with other thread creation on the same thread.

use std::thread::JoinHandle;

use crate::error::{Error, Result};

/// CPU core identifiers for the ESP32-S3 Xtensa LX7 dual-core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Core {
    /// Core 0 (PRO_CPU): boot core, runs `main()` and the fan loop.
    Pro = 0,
    /// Core 1 (APP_CPU): heartbeat acknowledge loop.
    App = 1,
}

/// Thread-creation failure without an ESP-IDF return code.
const SPAWN_FAILED: i32 = -1;

/// Spawn a thread pinned to a specific core with explicit priority and stack.
///
/// On ESP-IDF, uses `esp_pthread_set_cfg()` to configure core affinity,
/// priority, and stack size before spawning. The `name` parameter must be
/// null-terminated (e.g. `"heartbeat\0"`).
#[cfg(target_os = "espidf")]
pub fn spawn_on_core(
    core: Core,
    priority: u8,
    stack_kb: usize,
    name: &'static str,
    f: impl FnOnce() + Send + 'static,
) -> Result<JoinHandle<()>> {
    // SAFETY: `cfg` is built from the IDF defaults and `name` is a
    // null-terminated 'static string, so the pointer outlives the spawn.
    let ret = unsafe {
        let mut cfg = esp_idf_sys::esp_create_default_pthread_config();
        cfg.pin_to_core = core as i32;
        cfg.prio = priority as _;
        cfg.stack_size = (stack_kb * 1024) as _;
        cfg.thread_name = name.as_ptr() as *const _;
        esp_idf_sys::esp_pthread_set_cfg(&cfg)
    };
    if ret != esp_idf_sys::ESP_OK as i32 {
        return Err(Error::Spawn(ret));
    }

    let display_name = name.trim_end_matches('\0');
    log::info!(
        "Spawning '{}' on {:?} (pri={}, stack={}KB)",
        display_name,
        core,
        priority,
        stack_kb
    );

    std::thread::Builder::new()
        .name(display_name.into())
        .spawn(f)
        .map_err(|e| Error::Spawn(e.raw_os_error().unwrap_or(SPAWN_FAILED)))
}

/// Simulation fallback: ignores core affinity and priority.
#[cfg(not(target_os = "espidf"))]
pub fn spawn_on_core(
    _core: Core,
    _priority: u8,
    stack_kb: usize,
    name: &'static str,
    f: impl FnOnce() + Send + 'static,
) -> Result<JoinHandle<()>> {
    let display_name = name.trim_end_matches('\0');
    log::info!(
        "Spawning '{}' (sim, no core pinning, stack={}KB)",
        display_name,
        stack_kb
    );

    std::thread::Builder::new()
        .name(display_name.into())
        .stack_size(stack_kb * 1024)
        .spawn(f)
        .map_err(|e| Error::Spawn(e.raw_os_error().unwrap_or(SPAWN_FAILED)))
}
