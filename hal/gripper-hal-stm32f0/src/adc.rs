//! ADC sample sharing
//!
//! An async task owns the ADC and stores the latest conversion of each
//! channel in a [`SampleCell`]. Readers on the main loop see the most
//! recent value without touching the peripheral.

use gripper_hal::analog::{scale_to_millivolts, ADC_FULL_SCALE_12BIT};
use gripper_hal::AnalogInput;
use portable_atomic::{AtomicU16, Ordering};

/// Nominal VDDA on the gripper board (mV)
pub const VDDA_MV: u16 = 3300;

const NO_SAMPLE: u16 = u16::MAX;

/// Latest sample of one ADC channel, in millivolts at the pin
pub struct SampleCell {
    mv: AtomicU16,
}

impl SampleCell {
    pub const fn new() -> Self {
        Self {
            mv: AtomicU16::new(NO_SAMPLE),
        }
    }

    /// Store a raw 12-bit conversion
    pub fn store_raw(&self, raw: u16) {
        let mv = scale_to_millivolts(raw, ADC_FULL_SCALE_12BIT, VDDA_MV).unwrap_or(NO_SAMPLE);
        self.mv.store(mv, Ordering::Release);
    }

    pub fn load(&self) -> Option<u16> {
        match self.mv.load(Ordering::Acquire) {
            NO_SAMPLE => None,
            mv => Some(mv),
        }
    }

    /// Reader handle implementing [`AnalogInput`]
    pub fn reader(&'static self) -> SampleReader {
        SampleReader { cell: self }
    }
}

impl Default for SampleCell {
    fn default() -> Self {
        Self::new()
    }
}

/// [`AnalogInput`] view of a [`SampleCell`]
#[derive(Clone, Copy)]
pub struct SampleReader {
    cell: &'static SampleCell,
}

impl AnalogInput for SampleReader {
    fn read_millivolts(&mut self) -> Option<u16> {
        self.cell.load()
    }
}
