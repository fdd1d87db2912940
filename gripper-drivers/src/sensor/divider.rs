//! Resistive divider scaling
//!
//! The ADC sees `V_high * bottom / (top + bottom)`; this module inverts
//! that to recover the high-side voltage.

use gripper_core::config::DividerConfig;
use gripper_hal::AnalogInput;

/// Resistive voltage divider
#[derive(Debug, Clone, Copy)]
pub struct VoltageDivider {
    top_ohms: u32,
    bottom_ohms: u32,
}

impl VoltageDivider {
    pub fn new(top_ohms: u32, bottom_ohms: u32) -> Self {
        Self {
            top_ohms,
            bottom_ohms,
        }
    }

    /// Convert the sensed pin voltage to the high-side voltage (mV)
    ///
    /// Returns `None` for a zero-ohm bottom resistor.
    pub fn high_side_mv(&self, sensed_mv: u16) -> Option<u32> {
        if self.bottom_ohms == 0 {
            return None;
        }
        let total = u64::from(self.top_ohms) + u64::from(self.bottom_ohms);
        let high = u64::from(sensed_mv) * total / u64::from(self.bottom_ohms);
        u32::try_from(high).ok()
    }
}

impl From<DividerConfig> for VoltageDivider {
    fn from(config: DividerConfig) -> Self {
        Self::new(config.top_ohms, config.bottom_ohms)
    }
}

/// Analog input behind a voltage divider
pub struct DividedSense<A> {
    input: A,
    divider: VoltageDivider,
}

impl<A: AnalogInput> DividedSense<A> {
    pub fn new(input: A, divider: VoltageDivider) -> Self {
        Self { input, divider }
    }

    /// High-side voltage in millivolts
    pub fn read_mv(&mut self) -> Option<u32> {
        let sensed = self.input.read_millivolts()?;
        self.divider.high_side_mv(sensed)
    }

    /// High-side voltage in whole volts, rounded down
    pub fn read_volts(&mut self) -> Option<u16> {
        let mv = self.read_mv()?;
        u16::try_from(mv / 1000).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockAnalog;
    use core::cell::Cell;

    #[test]
    fn test_capacitor_divider() {
        // 1.5 MΩ over 10 kΩ: ratio 151
        let divider = VoltageDivider::new(1_500_000, 10_000);
        assert_eq!(divider.high_side_mv(3000), Some(453_000));
        assert_eq!(divider.high_side_mv(0), Some(0));
    }

    #[test]
    fn test_zero_bottom_resistor() {
        let divider = VoltageDivider::new(10_000, 0);
        assert_eq!(divider.high_side_mv(1000), None);
    }

    #[test]
    fn test_sense_reports_volts() {
        let sample = Cell::new(Some(2000));
        let mut sense = DividedSense::new(MockAnalog(&sample), VoltageDivider::new(1_500_000, 10_000));
        assert_eq!(sense.read_volts(), Some(302));

        sample.set(None);
        assert_eq!(sense.read_volts(), None);
    }
}
