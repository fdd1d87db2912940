//! Inter-task communication
//!
//! Input capture tasks publish here; the main loop consumes without
//! blocking.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use gripper_hal_stm32f0::SampleCell;

/// Debounced button press
pub static BUTTON_PRESSED: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Latest PWM pulse width in µs, or `None` once the signal is lost
pub static PWM_PULSE: Signal<CriticalSectionRawMutex, Option<u16>> = Signal::new();

/// Capacitor sense, millivolts at the ADC pin
pub static CAP_SAMPLE: SampleCell = SampleCell::new();

/// Supply sense, millivolts at the ADC pin
pub static SUPPLY_SAMPLE: SampleCell = SampleCell::new();
