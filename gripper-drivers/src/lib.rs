//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in gripper-core, written against the gripper-hal pin and analog traits:
//!
//! - Flyback capacitor charger (hysteretic, tick-driven)
//! - Thyristor polarity bridge
//! - Voltage divider sensing
//! - Status LED

#![no_std]
#![deny(unsafe_code)]

pub mod bridge;
pub mod charger;
pub mod led;
pub mod sensor;

#[cfg(test)]
pub(crate) mod mock;
