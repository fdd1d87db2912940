//! GPIO pin abstractions
//!
//! Thyristor gates, the charger enable line and the status LED are outputs;
//! the push button and DIP switches are inputs.

/// Digital output pin
pub trait OutputPin {
    /// Drive the pin high (logic 1)
    fn set_high(&mut self);

    /// Drive the pin low (logic 0)
    fn set_low(&mut self);

    /// Drive the pin to a specific level
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently driven high
    fn is_set_high(&self) -> bool;
}

/// Digital input pin
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

/// Read a group of input pins as a little-endian bit field
///
/// Pin `i` contributes bit `i`. With `active_low` set, a pin pulled to
/// ground reads as 1, which is how DIP switches to ground are wired.
pub fn read_bits<P: InputPin>(pins: &[P], active_low: bool) -> u8 {
    pins.iter()
        .take(8)
        .enumerate()
        .fold(0u8, |acc, (i, pin)| {
            if pin.is_high() != active_low {
                acc | (1 << i)
            } else {
                acc
            }
        })
}
