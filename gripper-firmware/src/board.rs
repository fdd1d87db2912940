//! Gripper controller board (STM32F042K6)
//!
//! | Pin      | Function                        |
//! |----------|---------------------------------|
//! | PA0      | Capacitor voltage sense (ADC)   |
//! | PA1      | Supply voltage sense (ADC)      |
//! | PA2      | Flyback converter enable        |
//! | PA3      | Status LED                      |
//! | PA4..PA7 | Thyristor gates CTRL1..CTRL4    |
//! | PB0      | RC PWM input (EXTI0)            |
//! | PB1      | Push button, active low (EXTI1) |
//! | PB3, PB4 | Hardpoint id DIP switches       |

use embassy_time::{Delay, Instant};

use gripper_core::magnet::MagnetSequencer;
use gripper_core::traits::Clock;
use gripper_drivers::bridge::ThyristorBridge;
use gripper_drivers::charger::FlybackChargerProvider;
use gripper_hal::gpio::read_bits;
use gripper_hal_stm32f0::{GateOutput, SampleReader, SwitchInput};

/// Watchdog timeout (µs)
pub const WATCHDOG_TIMEOUT_US: u32 = 500_000;

/// Monotonic clock backed by the embassy time driver
#[derive(Clone, Copy)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}

pub type Charger =
    FlybackChargerProvider<GateOutput<'static>, SampleReader, SampleReader, EmbassyClock>;

pub type Bridge = ThyristorBridge<GateOutput<'static>, Delay>;

pub type Sequencer = MagnetSequencer<Charger, Bridge>;

/// Hardpoint id from the DIP switches (closed = 1)
pub fn hardpoint_id_from_dip(switches: &[SwitchInput<'static>]) -> u8 {
    read_bits(switches, true)
}
