//! Status LED output
//!
//! Drives a single LED from the [`Indicator`] cadence.

use gripper_core::status::{Health, Indicator};
use gripper_hal::OutputPin;

/// Status LED
pub struct StatusLed<P> {
    pin: P,
    indicator: Indicator,
}

impl<P: OutputPin> StatusLed<P> {
    pub fn new(mut pin: P, indicator: Indicator) -> Self {
        pin.set_low();
        Self { pin, indicator }
    }

    /// Refresh the LED for the current time
    pub fn update(&mut self, now_ms: u64, health: Health, busy: bool) {
        let lit = self.indicator.update(now_ms, health, busy);
        if lit != self.pin.is_set_high() {
            self.pin.set_state(lit);
        }
    }

    pub fn is_lit(&self) -> bool {
        self.pin.is_set_high()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockPin;
    use core::cell::Cell;
    use gripper_core::config::IndicatorConfig;

    #[test]
    fn test_led_follows_indicator() {
        let pin = Cell::new(false);
        let mut led = StatusLed::new(MockPin(&pin), Indicator::new(IndicatorConfig::default()));

        led.update(10, Health::Ok, false);
        assert!(pin.get());
        led.update(100, Health::Ok, false);
        assert!(!pin.get());

        led.update(260, Health::Error, false);
        assert!(led.is_lit());
    }
}
