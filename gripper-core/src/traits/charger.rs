//! Capacitor charger traits

use crate::status::ChargerFlags;

/// Outcome of a single charger poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChargeStatus {
    /// Still charging toward the target voltage
    InProgress,
    /// Target voltage reached, capacitor ready to discharge
    Done,
    /// Charging failed; see [`Charger::error_flags`]
    Error,
}

/// Asynchronous, tick-driven capacitor charger
///
/// A charger performs one charge operation toward a target voltage over
/// repeated polls. It never blocks; each `poll` advances the charging
/// logic by one step.
pub trait Charger {
    /// Start charging toward `target_volts`
    ///
    /// Calling this again while already charging toward the same target
    /// must not restart the operation.
    fn begin(&mut self, target_volts: u16);

    /// Advance the charging logic by one tick
    fn poll(&mut self) -> ChargeStatus;

    /// Fault bits from the most recent poll
    fn error_flags(&self) -> ChargerFlags;
}

/// Owner of the charging hardware
///
/// The provider lends the hardware to at most one [`Charger`] at a time.
/// A charger is acquired at the start of each pulse and released as soon
/// as that pulse reaches a terminal outcome.
pub trait ChargerProvider {
    /// Charger type handed out by this provider
    type Charger: Charger;

    /// Take the charging hardware for one pulse
    ///
    /// Returns `None` while a previously acquired charger is outstanding.
    fn acquire(&mut self) -> Option<Self::Charger>;

    /// Return the charging hardware after a pulse
    fn release(&mut self, charger: Self::Charger);
}
