//! GPIO wrappers for STM32F0

use embassy_stm32::gpio::{Input, Output};
use gripper_hal::{InputPin, OutputPin};

/// Push-pull output (thyristor gates, charger enable, LED)
pub struct GateOutput<'d> {
    pin: Output<'d>,
}

impl<'d> GateOutput<'d> {
    pub fn new(pin: Output<'d>) -> Self {
        Self { pin }
    }
}

impl OutputPin for GateOutput<'_> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high()
    }
}

/// Plain input (DIP switches)
pub struct SwitchInput<'d> {
    pin: Input<'d>,
}

impl<'d> SwitchInput<'d> {
    pub fn new(pin: Input<'d>) -> Self {
        Self { pin }
    }
}

impl InputPin for SwitchInput<'_> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}
