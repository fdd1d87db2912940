//! Watchdog abstraction
//!
//! The watchdog is fed from the same polling loop that drives the magnet
//! sequencer, so a stalled loop resets the board before charger timing
//! drifts out of its safety margins.

/// Hardware watchdog
pub trait Watchdog {
    /// Reset the watchdog countdown
    fn feed(&mut self);
}
