//! Local command sources
//!
//! The bus, the push button and the RC PWM input all produce a
//! [`MagnetCommand`] that is handed to the sequencer.

pub mod command;
pub mod pwm;

pub use command::{toggle_command, MagnetCommand};
pub use pwm::{PwmDecoder, PwmLevel};
