//! RC PWM capture task
//!
//! Measures the high time of each servo pulse from EXTI edges.

use defmt::*;
use embassy_stm32::exti::ExtiInput;
use embassy_time::{with_timeout, Duration, Instant};

use crate::channels::PWM_PULSE;

/// Widths above this are not servo pulses (µs)
const MAX_PULSE_US: u64 = 3000;

/// PWM input task
///
/// # Arguments
/// - `signal_timeout_ms`: report signal loss after this long without a pulse
#[embassy_executor::task]
pub async fn pwm_input_task(mut pin: ExtiInput<'static>, signal_timeout_ms: u32) {
    info!("PWM input task started");

    let timeout = Duration::from_millis(u64::from(signal_timeout_ms));
    let mut signal_present = false;

    loop {
        if with_timeout(timeout, pin.wait_for_rising_edge()).await.is_err() {
            if signal_present {
                warn!("PWM signal lost");
                signal_present = false;
                PWM_PULSE.signal(None);
            }
            continue;
        }
        let rise = Instant::now();

        if with_timeout(timeout, pin.wait_for_falling_edge()).await.is_err() {
            // Stuck high
            if signal_present {
                warn!("PWM input stuck high");
                signal_present = false;
                PWM_PULSE.signal(None);
            }
            continue;
        }

        let width_us = rise.elapsed().as_micros();
        if width_us > MAX_PULSE_US {
            continue;
        }

        if !signal_present {
            info!("PWM signal acquired");
            signal_present = true;
        }
        trace!("PWM pulse {} us", width_us);
        PWM_PULSE.signal(Some(width_us as u16));
    }
}
