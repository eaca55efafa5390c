//! GPIO lines, delay sources, core-pinned task spawning and the task
//! watchdog.

pub mod delay;
pub mod gpio;
pub mod task_pin;
pub mod watchdog;
