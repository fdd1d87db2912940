//! Board-agnostic core logic for the EPM gripper firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (charger, polarity bridge, clock)
//! - Magnet actuation sequencer and command gate
//! - Demagnetization cycle table
//! - Health and status derivation, status LED cadence
//! - Local command decoding (button, PWM input)
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod input;
pub mod magnet;
pub mod status;
pub mod traits;
