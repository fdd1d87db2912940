//! Polarity bridge drivers

pub mod thyristor;

pub use thyristor::{ThyristorBridge, DEFAULT_GATE_PULSE_US};
