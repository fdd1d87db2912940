//! Analog input abstractions
//!
//! The gripper senses two voltages: the storage capacitor (through a
//! high-ratio divider) and the board supply. Implementations report the
//! voltage seen at the ADC pin; scaling to the high side is done by the
//! driver that knows the divider.

/// Analog input reporting the pin voltage in millivolts
pub trait AnalogInput {
    /// Read the most recent sample in millivolts
    ///
    /// Returns `None` when no valid sample is available (ADC not yet
    /// sampled, conversion error).
    fn read_millivolts(&mut self) -> Option<u16>;
}

impl<T: AnalogInput + ?Sized> AnalogInput for &mut T {
    fn read_millivolts(&mut self) -> Option<u16> {
        (**self).read_millivolts()
    }
}

/// Full-scale code of a 12-bit ADC
pub const ADC_FULL_SCALE_12BIT: u16 = 4095;

/// Convert a raw ADC code to millivolts at the pin
///
/// # Arguments
/// - `raw`: conversion result, clamped to `full_scale`
/// - `full_scale`: code corresponding to the reference voltage
/// - `vref_mv`: ADC reference voltage (mV)
pub fn scale_to_millivolts(raw: u16, full_scale: u16, vref_mv: u16) -> Option<u16> {
    if full_scale == 0 {
        return None;
    }
    let raw = u32::from(raw.min(full_scale));
    let mv = raw * u32::from(vref_mv) / u32::from(full_scale);
    u16::try_from(mv).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_endpoints() {
        assert_eq!(scale_to_millivolts(0, ADC_FULL_SCALE_12BIT, 3300), Some(0));
        assert_eq!(
            scale_to_millivolts(ADC_FULL_SCALE_12BIT, ADC_FULL_SCALE_12BIT, 3300),
            Some(3300)
        );
        assert_eq!(scale_to_millivolts(2048, ADC_FULL_SCALE_12BIT, 3300), Some(1650));
    }

    #[test]
    fn test_scale_clamps_and_rejects_zero_span() {
        assert_eq!(scale_to_millivolts(5000, ADC_FULL_SCALE_12BIT, 3300), Some(3300));
        assert_eq!(scale_to_millivolts(100, 0, 3300), None);
    }
}
