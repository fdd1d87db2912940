//! EPM Gripper Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the gripper drivers are written
//! against. Chip-specific HALs implement them so the same charger and
//! bridge drivers run on any board.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  gripper-drivers / gripper-firmware     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  gripper-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ gripper-hal-  │
//!             │   stm32f0     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`analog::AnalogInput`] - Voltage sensing in millivolts
//! - [`watchdog::Watchdog`] - Hardware watchdog servicing

#![no_std]
#![deny(unsafe_code)]

pub mod analog;
pub mod gpio;
pub mod watchdog;

// Re-export key traits at crate root for convenience
pub use analog::AnalogInput;
pub use gpio::{InputPin, OutputPin};
pub use watchdog::Watchdog;
