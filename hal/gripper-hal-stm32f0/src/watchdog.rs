//! Independent watchdog

use embassy_stm32::peripherals::IWDG;
use embassy_stm32::wdg::IndependentWatchdog;
use gripper_hal::Watchdog;

/// IWDG, started on construction
pub struct IwdgWatchdog<'d> {
    wdg: IndependentWatchdog<'d, IWDG>,
}

impl<'d> IwdgWatchdog<'d> {
    /// Start the watchdog; it cannot be stopped again
    pub fn start(mut wdg: IndependentWatchdog<'d, IWDG>) -> Self {
        wdg.unleash();
        Self { wdg }
    }
}

impl Watchdog for IwdgWatchdog<'_> {
    fn feed(&mut self) {
        self.wdg.pet();
    }
}
