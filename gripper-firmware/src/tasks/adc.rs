//! Voltage sampling task

use defmt::*;
use embassy_stm32::adc::{Adc, AnyAdcChannel};
use embassy_stm32::peripherals::ADC1;
use embassy_time::{Duration, Ticker};

use crate::channels::{CAP_SAMPLE, SUPPLY_SAMPLE};

/// Sampling period; well below the charger poll granularity
const SAMPLE_PERIOD_MS: u64 = 1;

/// ADC sampling task
///
/// Converts the capacitor and supply senses back to back every period.
#[embassy_executor::task]
pub async fn adc_task(
    mut adc: Adc<'static, ADC1>,
    mut cap: AnyAdcChannel<ADC1>,
    mut supply: AnyAdcChannel<ADC1>,
) {
    info!("ADC task started");

    let mut ticker = Ticker::every(Duration::from_millis(SAMPLE_PERIOD_MS));

    loop {
        let raw = adc.read(&mut cap).await;
        CAP_SAMPLE.store_raw(raw);

        let raw = adc.read(&mut supply).await;
        SUPPLY_SAMPLE.store_raw(raw);

        ticker.next().await;
    }
}
