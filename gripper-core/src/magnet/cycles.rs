//! Pulse voltages and the demagnetization ramp

use crate::traits::Polarity;

/// Capacitor voltage for every turn-on pulse (V)
pub const TURN_ON_VOLTS: u16 = 450;

/// Lower clamp for requested turn-on cycles
pub const MIN_TURN_ON_CYCLES: u8 = 1;

/// Upper clamp for requested turn-on cycles
pub const MAX_CYCLES: u8 = 10;

/// Leading ramp entries skipped when the magnet is already off
///
/// Tuned against [`DEMAGNETIZE_CYCLES`]: skips its two highest-energy
/// entries.
pub const ALREADY_OFF_SKIP: u8 = 2;

/// One charge-and-discharge step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleStep {
    /// Capacitor target voltage (V)
    pub volts: u16,
    /// Discharge direction through the coil
    pub polarity: Polarity,
}

const fn step(volts: u16, polarity: Polarity) -> CycleStep {
    CycleStep { volts, polarity }
}

/// Decaying alternating ramp used to demagnetize the core
///
/// Starts with a full-voltage reset pulse in the off direction and ends on
/// an off pulse, so completing the whole ramp always leaves the magnet off.
pub const DEMAGNETIZE_CYCLES: [CycleStep; 43] = [
    step(450, Polarity::Negative),
    step(400, Polarity::Positive),
    step(366, Polarity::Negative),
    step(335, Polarity::Positive),
    step(306, Polarity::Negative),
    step(280, Polarity::Positive),
    step(257, Polarity::Negative),
    step(235, Polarity::Positive),
    step(215, Polarity::Negative),
    step(197, Polarity::Positive),
    step(180, Polarity::Negative),
    step(165, Polarity::Positive),
    step(151, Polarity::Negative),
    step(138, Polarity::Positive),
    step(126, Polarity::Negative),
    step(115, Polarity::Positive),
    step(106, Polarity::Negative),
    step(97, Polarity::Positive),
    step(88, Polarity::Negative),
    step(81, Polarity::Positive),
    step(74, Polarity::Negative),
    step(68, Polarity::Positive),
    step(62, Polarity::Negative),
    step(57, Polarity::Positive),
    step(52, Polarity::Negative),
    step(47, Polarity::Positive),
    step(43, Polarity::Negative),
    step(40, Polarity::Positive),
    step(36, Polarity::Negative),
    step(33, Polarity::Positive),
    step(30, Polarity::Negative),
    step(28, Polarity::Positive),
    step(25, Polarity::Negative),
    step(23, Polarity::Positive),
    step(21, Polarity::Negative),
    step(20, Polarity::Positive),
    step(18, Polarity::Negative),
    step(16, Polarity::Positive),
    step(15, Polarity::Negative),
    step(14, Polarity::Positive),
    step(13, Polarity::Negative),
    step(11, Polarity::Positive),
    step(10, Polarity::Negative),
];

/// Number of entries in the demagnetization ramp
pub const DEMAGNETIZE_LEN: usize = DEMAGNETIZE_CYCLES.len();
