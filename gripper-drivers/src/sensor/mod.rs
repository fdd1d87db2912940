//! Voltage sensing

pub mod divider;

pub use divider::{DividedSense, VoltageDivider};
