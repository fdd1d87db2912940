//! Push button task

use defmt::*;
use embassy_stm32::exti::ExtiInput;
use embassy_time::{Duration, Timer};

use crate::channels::BUTTON_PRESSED;

/// Minimum press length to count (ms)
const DEBOUNCE_MS: u64 = 20;

/// Button press task
///
/// Signals once per debounced press; the press is acted on at release.
#[embassy_executor::task]
pub async fn button_task(mut btn: ExtiInput<'static>) {
    info!("Button task started");

    loop {
        btn.wait_for_falling_edge().await;

        // Debounce
        Timer::after(Duration::from_millis(DEBOUNCE_MS)).await;
        if btn.is_high() {
            continue;
        }

        btn.wait_for_rising_edge().await;
        debug!("Button: press");
        BUTTON_PRESSED.signal(());

        // Debounce after release
        Timer::after(Duration::from_millis(50)).await;
    }
}
