//! STM32F0-specific HAL for the EPM gripper firmware
//!
//! This crate binds the `gripper-hal` traits to embassy-stm32 peripherals.
//! It supports the following chips:
//!
//! - STM32F042K6 (gripper controller board)
//! - STM32F042F6
//!
//! # Features
//!
//! - `stm32f042k6` / `stm32f042f6` - Chip selection
//! - `defmt` - Enable debug formatting support
//!
//! # Usage
//!
//! The firmware creates embassy peripherals and wraps them in the types
//! exported here before handing them to the gripper drivers.

#![no_std]

pub mod adc;
pub mod gpio;
pub mod watchdog;

pub use adc::{SampleCell, SampleReader};
pub use gpio::{GateOutput, SwitchInput};
pub use watchdog::IwdgWatchdog;
