//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter | Implements | Connects to                         |
//! |---------|------------|-------------------------------------|
//! | `board` | Board      | ESP32-S3 GPIO12–15 (or simulation)  |

pub mod board;
