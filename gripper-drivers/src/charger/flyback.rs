//! Hysteretic flyback capacitor charger
//!
//! The flyback converter is switched on while the capacitor is below the
//! target and off once it is reached. Every poll re-checks the supply and
//! capacitor voltages, so a fault is reported within one tick.

use gripper_core::config::ChargerConfig;
use gripper_core::status::ChargerFlags;
use gripper_core::traits::{ChargeStatus, Charger, ChargerProvider, Clock};
use gripper_hal::{AnalogInput, OutputPin};

use crate::sensor::{DividedSense, VoltageDivider};

/// Hardware a charger needs for one pulse
pub struct FlybackHardware<E, C, S, K> {
    /// Converter enable output
    pub enable: E,
    /// Capacitor voltage sense
    pub capacitor: DividedSense<C>,
    /// Board supply sense
    pub supply: DividedSense<S>,
    pub clock: K,
}

impl<E, C, S, K> FlybackHardware<E, C, S, K>
where
    E: OutputPin,
    C: AnalogInput,
    S: AnalogInput,
    K: Clock,
{
    /// Assemble the hardware, scaling both senses with the configured dividers
    pub fn new(mut enable: E, capacitor: C, supply: S, clock: K, config: &ChargerConfig) -> Self {
        enable.set_low();
        Self {
            enable,
            capacitor: DividedSense::new(capacitor, VoltageDivider::from(config.cap_divider)),
            supply: DividedSense::new(supply, VoltageDivider::from(config.supply_divider)),
            clock,
        }
    }
}

/// One charge operation toward a target voltage
pub struct FlybackCharger<E, C, S, K> {
    hw: FlybackHardware<E, C, S, K>,
    config: ChargerConfig,
    target_volts: Option<u16>,
    started_ms: u64,
    flags: ChargerFlags,
}

impl<E, C, S, K> FlybackCharger<E, C, S, K>
where
    E: OutputPin,
    C: AnalogInput,
    S: AnalogInput,
    K: Clock,
{
    fn new(hw: FlybackHardware<E, C, S, K>, config: ChargerConfig) -> Self {
        Self {
            hw,
            config,
            target_volts: None,
            started_ms: 0,
            flags: ChargerFlags::empty(),
        }
    }

    /// Check if the converter is currently switching
    pub fn is_converter_on(&self) -> bool {
        self.hw.enable.is_set_high()
    }

    fn fail(&mut self, flag: ChargerFlags) -> ChargeStatus {
        self.hw.enable.set_low();
        self.flags.insert(flag);
        ChargeStatus::Error
    }

    fn into_hardware(mut self) -> FlybackHardware<E, C, S, K> {
        self.hw.enable.set_low();
        self.hw
    }
}

impl<E, C, S, K> Charger for FlybackCharger<E, C, S, K>
where
    E: OutputPin,
    C: AnalogInput,
    S: AnalogInput,
    K: Clock,
{
    fn begin(&mut self, target_volts: u16) {
        if self.target_volts == Some(target_volts) {
            return;
        }
        self.target_volts = Some(target_volts);
        self.started_ms = self.hw.clock.now_ms();
        self.flags = ChargerFlags::empty();
    }

    fn poll(&mut self) -> ChargeStatus {
        let Some(target) = self.target_volts else {
            self.hw.enable.set_low();
            return ChargeStatus::Error;
        };

        let elapsed = self.hw.clock.now_ms().saturating_sub(self.started_ms);

        // Thyristors still conducting from the previous discharge
        if elapsed < u64::from(self.config.holdoff_ms) {
            self.hw.enable.set_low();
            return ChargeStatus::InProgress;
        }

        let Some(supply_mv) = self.hw.supply.read_mv() else {
            return self.fail(ChargerFlags::SENSE_FAULT);
        };
        if supply_mv > u32::from(self.config.supply_max_mv) {
            return self.fail(ChargerFlags::SUPPLY_OVERVOLTAGE);
        }
        if supply_mv < u32::from(self.config.supply_min_mv) {
            self.flags.insert(ChargerFlags::SUPPLY_LOW);
        }

        let Some(volts) = self.hw.capacitor.read_volts() else {
            return self.fail(ChargerFlags::SENSE_FAULT);
        };

        let ceiling = target
            .saturating_add(self.config.overvoltage_margin)
            .min(self.config.absolute_max_volts);
        if volts > ceiling {
            return self.fail(ChargerFlags::OVERVOLTAGE);
        }

        if volts >= target {
            self.hw.enable.set_low();
            if volts - target > self.config.drift_tolerance {
                self.flags.insert(ChargerFlags::VOLTAGE_DRIFT);
            }
            return ChargeStatus::Done;
        }

        if elapsed >= u64::from(self.config.timeout_ms) {
            return self.fail(ChargerFlags::TIMEOUT);
        }

        self.hw.enable.set_high();
        ChargeStatus::InProgress
    }

    fn error_flags(&self) -> ChargerFlags {
        self.flags
    }
}

/// Owner of the flyback hardware
///
/// Lends the hardware to one [`FlybackCharger`] at a time and switches the
/// converter off whenever it comes back.
pub struct FlybackChargerProvider<E, C, S, K> {
    hardware: Option<FlybackHardware<E, C, S, K>>,
    config: ChargerConfig,
}

impl<E, C, S, K> FlybackChargerProvider<E, C, S, K>
where
    E: OutputPin,
    C: AnalogInput,
    S: AnalogInput,
    K: Clock,
{
    pub fn new(hardware: FlybackHardware<E, C, S, K>, config: ChargerConfig) -> Self {
        Self {
            hardware: Some(hardware),
            config,
        }
    }

    /// Check if the hardware is currently lent out
    pub fn is_lent(&self) -> bool {
        self.hardware.is_none()
    }
}

impl<E, C, S, K> ChargerProvider for FlybackChargerProvider<E, C, S, K>
where
    E: OutputPin,
    C: AnalogInput,
    S: AnalogInput,
    K: Clock,
{
    type Charger = FlybackCharger<E, C, S, K>;

    fn acquire(&mut self) -> Option<Self::Charger> {
        let hw = self.hardware.take()?;
        Some(FlybackCharger::new(hw, self.config))
    }

    fn release(&mut self, charger: Self::Charger) {
        self.hardware = Some(charger.into_hardware());
    }
}
