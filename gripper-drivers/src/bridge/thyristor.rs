//! Four-thyristor H-bridge
//!
//! ```text
//!        +Vcap
//!       ┌──┴──┐
//!     CTRL1  CTRL2
//!       ├─coil─┤
//!     CTRL3  CTRL4
//!       └──┬──┘
//!         GND
//! ```
//!
//! Firing CTRL1 and CTRL4 discharges the capacitor through the coil in the
//! magnetizing direction; CTRL2 and CTRL3 reverse it. A thyristor latches
//! once triggered, so a short gate pulse is enough.

use embedded_hal::delay::DelayNs;
use gripper_core::traits::PolarityBridge;
use gripper_hal::OutputPin;

/// Default gate trigger pulse length (µs)
pub const DEFAULT_GATE_PULSE_US: u32 = 5;

/// Thyristor bridge driven by four gate outputs
pub struct ThyristorBridge<G, D> {
    ctrl1: G,
    ctrl2: G,
    ctrl3: G,
    ctrl4: G,
    delay: D,
    gate_pulse_us: u32,
}

impl<G: OutputPin, D: DelayNs> ThyristorBridge<G, D> {
    /// Create a bridge with all gates released
    pub fn new(gates: [G; 4], delay: D, gate_pulse_us: u32) -> Self {
        let [mut ctrl1, mut ctrl2, mut ctrl3, mut ctrl4] = gates;
        ctrl1.set_low();
        ctrl2.set_low();
        ctrl3.set_low();
        ctrl4.set_low();
        Self {
            ctrl1,
            ctrl2,
            ctrl3,
            ctrl4,
            delay,
            gate_pulse_us,
        }
    }

    fn fire(a: &mut G, b: &mut G, delay: &mut D, pulse_us: u32) {
        a.set_high();
        b.set_high();
        delay.delay_us(pulse_us);
        a.set_low();
        b.set_low();
    }
}

impl<G: OutputPin, D: DelayNs> PolarityBridge for ThyristorBridge<G, D> {
    fn drive_positive(&mut self) {
        Self::fire(
            &mut self.ctrl1,
            &mut self.ctrl4,
            &mut self.delay,
            self.gate_pulse_us,
        );
    }

    fn drive_negative(&mut self) {
        Self::fire(
            &mut self.ctrl2,
            &mut self.ctrl3,
            &mut self.delay,
            self.gate_pulse_us,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use gripper_core::traits::Polarity;

    /// Gate that counts rising edges
    struct CountingGate<'a> {
        high: bool,
        pulses: &'a Cell<u8>,
    }

    impl OutputPin for CountingGate<'_> {
        fn set_high(&mut self) {
            if !self.high {
                self.pulses.set(self.pulses.get() + 1);
            }
            self.high = true;
        }

        fn set_low(&mut self) {
            self.high = false;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    struct MockDelay<'a>(&'a Cell<u32>);

    impl DelayNs for MockDelay<'_> {
        fn delay_ns(&mut self, ns: u32) {
            self.0.set(self.0.get() + ns);
        }
    }

    #[test]
    fn test_polarity_selects_gate_pairs() {
        let counts = [Cell::new(0), Cell::new(0), Cell::new(0), Cell::new(0)];
        let waited_ns = Cell::new(0);
        let gates = counts.each_ref().map(|pulses| CountingGate { high: false, pulses });
        let mut bridge = ThyristorBridge::new(gates, MockDelay(&waited_ns), DEFAULT_GATE_PULSE_US);

        bridge.drive(Polarity::Positive);
        let fired: [u8; 4] = counts.each_ref().map(Cell::get);
        assert_eq!(fired, [1, 0, 0, 1]);

        bridge.drive(Polarity::Negative);
        let fired: [u8; 4] = counts.each_ref().map(Cell::get);
        assert_eq!(fired, [1, 1, 1, 1]);

        assert!(waited_ns.get() >= 2 * DEFAULT_GATE_PULSE_US * 1000);
        assert!(!bridge.ctrl1.is_set_high());
        assert!(!bridge.ctrl3.is_set_high());
    }
}
