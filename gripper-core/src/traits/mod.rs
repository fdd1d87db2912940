//! Hardware abstraction traits
//!
//! These traits define the interface between the magnet sequencer
//! and hardware-specific implementations.

pub mod bridge;
pub mod charger;
pub mod clock;

pub use bridge::{Polarity, PolarityBridge};
pub use charger::{ChargeStatus, Charger, ChargerProvider};
pub use clock::Clock;
