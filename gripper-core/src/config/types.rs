//! Configuration type definitions
//!
//! The firmware build embeds a `gripper.toml` file as postcard binary data.
//! Every section has defaults, so a file only lists the values it changes.

use core::fmt;

use heapless::String;

use crate::magnet::{MAX_CYCLES, MIN_TURN_ON_CYCLES, TURN_ON_VOLTS};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum node name length
pub const MAX_NAME_LEN: usize = 32;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Default turn-on cycles outside the accepted clamp range
    TurnOnCycles,
    /// Status period of zero
    StatusPeriod,
    /// Charger timeout of zero
    ChargerTimeout,
    /// Absolute voltage ceiling below the turn-on voltage
    AbsoluteMaxBelowTarget,
    /// Supply minimum not below supply maximum
    SupplyRange,
    /// Divider with a zero-ohm bottom resistor
    Divider,
    /// PWM ranges empty, inverted or overlapping
    PwmRanges,
    /// LED flash not shorter than every blink period
    IndicatorTiming,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TurnOnCycles => write!(
                f,
                "sequencer.turn_on_cycles must be between {} and {}",
                MIN_TURN_ON_CYCLES, MAX_CYCLES
            ),
            Self::StatusPeriod => write!(f, "status_period_ms must be greater than 0"),
            Self::ChargerTimeout => write!(f, "charger.timeout_ms must be greater than 0"),
            Self::AbsoluteMaxBelowTarget => write!(
                f,
                "charger.absolute_max_volts is below the {} V turn-on voltage",
                TURN_ON_VOLTS
            ),
            Self::SupplyRange => write!(f, "charger.supply_min_mv must be below supply_max_mv"),
            Self::Divider => write!(f, "divider bottom_ohms must be greater than 0"),
            Self::PwmRanges => write!(
                f,
                "pwm ranges must satisfy off_min <= off_max < on_min <= on_max"
            ),
            Self::IndicatorTiming => write!(
                f,
                "indicator.flash_ms must be non-zero and shorter than every period"
            ),
        }
    }
}

/// Magnet sequencer tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SequencerConfig {
    /// Cycles requested by the button and PWM sources
    pub turn_on_cycles: u8,
    /// Minimum interval between same-state commands (ms)
    pub min_command_interval_ms: u32,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            turn_on_cycles: 2,
            min_command_interval_ms: 1000,
        }
    }
}

/// Resistive voltage divider in front of an ADC input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DividerConfig {
    /// High-side resistor (ohms)
    pub top_ohms: u32,
    /// Low-side resistor (ohms)
    pub bottom_ohms: u32,
}

/// Capacitor charger configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChargerConfig {
    /// Converter hold-off after a discharge (ms)
    pub holdoff_ms: u32,
    /// Give up if the target is not reached within this time (ms)
    pub timeout_ms: u32,
    /// Allowed overshoot above target before faulting (V)
    pub overvoltage_margin: u16,
    /// Hard capacitor voltage ceiling (V)
    pub absolute_max_volts: u16,
    /// Overshoot above target reported as drift (V)
    pub drift_tolerance: u16,
    /// Supply below this raises a warning (mV)
    pub supply_min_mv: u16,
    /// Supply above this is a fault (mV)
    pub supply_max_mv: u16,
    /// Capacitor sense divider
    pub cap_divider: DividerConfig,
    /// Supply sense divider
    pub supply_divider: DividerConfig,
}

impl Default for ChargerConfig {
    fn default() -> Self {
        Self {
            holdoff_ms: 5,
            timeout_ms: 3000,
            overvoltage_margin: 30,
            absolute_max_volts: 500,
            drift_tolerance: 15,
            supply_min_mv: 4500,
            supply_max_mv: 6500,
            cap_divider: DividerConfig {
                top_ohms: 1_500_000,
                bottom_ohms: 10_000,
            },
            supply_divider: DividerConfig {
                top_ohms: 10_000,
                bottom_ohms: 10_000,
            },
        }
    }
}

/// RC PWM input configuration
///
/// Pulse widths are in microseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PwmInputConfig {
    /// Decode the PWM input at all
    pub enabled: bool,
    pub off_min_us: u16,
    pub off_max_us: u16,
    pub on_min_us: u16,
    pub on_max_us: u16,
    /// No pulse for this long counts as signal lost (ms)
    pub signal_timeout_ms: u32,
}

impl Default for PwmInputConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            off_min_us: 1000,
            off_max_us: 1250,
            on_min_us: 1750,
            on_max_us: 2000,
            signal_timeout_ms: 100,
        }
    }
}

/// Status LED cadence (ms)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct IndicatorConfig {
    /// On-time of a single flash
    pub flash_ms: u32,
    /// Blink period while a sequence is running
    pub busy_period_ms: u32,
    pub ok_period_ms: u32,
    pub warning_period_ms: u32,
    pub error_period_ms: u32,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            flash_ms: 50,
            busy_period_ms: 100,
            ok_period_ms: 2000,
            warning_period_ms: 500,
            error_period_ms: 250,
        }
    }
}

/// Complete gripper configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GripperConfig {
    /// Node name announced on the bus
    pub node_name: String<MAX_NAME_LEN>,
    /// Hardpoint id; when unset it is read from the DIP switches
    pub hardpoint_id: Option<u8>,
    /// Hardpoint status publication period (ms)
    pub status_period_ms: u32,
    pub sequencer: SequencerConfig,
    pub charger: ChargerConfig,
    pub pwm: PwmInputConfig,
    pub indicator: IndicatorConfig,
}

impl Default for GripperConfig {
    fn default() -> Self {
        let mut node_name = String::new();
        // Fits MAX_NAME_LEN
        let _ = node_name.push_str("epm.gripper");
        Self {
            node_name,
            hardpoint_id: None,
            status_period_ms: 500,
            sequencer: SequencerConfig::default(),
            charger: ChargerConfig::default(),
            pwm: PwmInputConfig::default(),
            indicator: IndicatorConfig::default(),
        }
    }
}

impl GripperConfig {
    /// Check cross-field constraints
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let cycles = self.sequencer.turn_on_cycles;
        if !(MIN_TURN_ON_CYCLES..=MAX_CYCLES).contains(&cycles) {
            return Err(ConfigError::TurnOnCycles);
        }
        if self.status_period_ms == 0 {
            return Err(ConfigError::StatusPeriod);
        }

        self.charger.validate()?;
        self.pwm.validate()?;
        self.indicator.validate()
    }
}

impl ChargerConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_ms == 0 {
            return Err(ConfigError::ChargerTimeout);
        }
        if self.absolute_max_volts < TURN_ON_VOLTS {
            return Err(ConfigError::AbsoluteMaxBelowTarget);
        }
        if self.supply_min_mv >= self.supply_max_mv {
            return Err(ConfigError::SupplyRange);
        }
        if self.cap_divider.bottom_ohms == 0 || self.supply_divider.bottom_ohms == 0 {
            return Err(ConfigError::Divider);
        }
        Ok(())
    }
}

impl PwmInputConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let ordered = self.off_min_us <= self.off_max_us
            && self.off_max_us < self.on_min_us
            && self.on_min_us <= self.on_max_us;
        if !ordered {
            return Err(ConfigError::PwmRanges);
        }
        Ok(())
    }
}

impl IndicatorConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        let shortest = self
            .busy_period_ms
            .min(self.ok_period_ms)
            .min(self.warning_period_ms)
            .min(self.error_period_ms);
        if self.flash_ms == 0 || self.flash_ms >= shortest {
            return Err(ConfigError::IndicatorTiming);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_follow_constants() {
        let cycles = ConfigError::TurnOnCycles.to_string();
        assert!(cycles.contains(&format!("between {} and {}", MIN_TURN_ON_CYCLES, MAX_CYCLES)));

        let volts = ConfigError::AbsoluteMaxBelowTarget.to_string();
        assert!(volts.contains(&format!("{} V", TURN_ON_VOLTS)));
    }

    #[test]
    fn test_default_is_valid() {
        assert_eq!(GripperConfig::default().validate(), Ok(()));
        assert_eq!(GripperConfig::default().node_name.as_str(), "epm.gripper");
    }

    #[test]
    fn test_turn_on_cycles_bounds() {
        let mut config = GripperConfig::default();
        config.sequencer.turn_on_cycles = 0;
        assert_eq!(config.validate(), Err(ConfigError::TurnOnCycles));

        config.sequencer.turn_on_cycles = MAX_CYCLES + 1;
        assert_eq!(config.validate(), Err(ConfigError::TurnOnCycles));

        config.sequencer.turn_on_cycles = MAX_CYCLES;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_charger_limits() {
        let mut config = GripperConfig::default();
        config.charger.absolute_max_volts = TURN_ON_VOLTS - 1;
        assert_eq!(config.validate(), Err(ConfigError::AbsoluteMaxBelowTarget));

        let mut config = GripperConfig::default();
        config.charger.supply_min_mv = config.charger.supply_max_mv;
        assert_eq!(config.validate(), Err(ConfigError::SupplyRange));

        let mut config = GripperConfig::default();
        config.charger.supply_divider.bottom_ohms = 0;
        assert_eq!(config.validate(), Err(ConfigError::Divider));
    }

    #[test]
    fn test_overlapping_pwm_ranges() {
        let mut config = GripperConfig::default();
        config.pwm.off_max_us = config.pwm.on_min_us;
        assert_eq!(config.validate(), Err(ConfigError::PwmRanges));
    }

    #[test]
    fn test_indicator_flash_longer_than_period() {
        let mut config = GripperConfig::default();
        config.indicator.flash_ms = config.indicator.busy_period_ms;
        assert_eq!(config.validate(), Err(ConfigError::IndicatorTiming));
    }
}
