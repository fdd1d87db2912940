//! Health and status reporting
//!
//! Derives the coarse node health and the status bit field published on
//! the bus from charger outcomes and sequencer activity.

pub mod health;
pub mod indicator;

pub use health::{ChargerFlags, Health, StatusFlags};
pub use indicator::Indicator;
