//! Shared test doubles
//!
//! Each mock reads or writes through a `Cell` so tests can observe and
//! steer hardware that has been moved into a driver.

use core::cell::Cell;

use gripper_core::traits::Clock;
use gripper_hal::{AnalogInput, OutputPin};

pub struct MockPin<'a>(pub &'a Cell<bool>);

impl OutputPin for MockPin<'_> {
    fn set_high(&mut self) {
        self.0.set(true);
    }

    fn set_low(&mut self) {
        self.0.set(false);
    }

    fn is_set_high(&self) -> bool {
        self.0.get()
    }
}

pub struct MockAnalog<'a>(pub &'a Cell<Option<u16>>);

impl AnalogInput for MockAnalog<'_> {
    fn read_millivolts(&mut self) -> Option<u16> {
        self.0.get()
    }
}

pub struct MockClock<'a>(pub &'a Cell<u64>);

impl Clock for MockClock<'_> {
    fn now_ms(&self) -> u64 {
        self.0.get()
    }
}
