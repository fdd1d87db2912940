//! Health levels and status bit fields

use bitflags::bitflags;

/// Coarse operational health of the gripper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Health {
    /// Last pulse completed cleanly
    #[default]
    Ok,
    /// Functional, but the charger reported a degraded condition
    Warning,
    /// The last sequence was aborted by a charger fault
    Error,
}

impl Health {
    /// Health after a pulse completes successfully
    ///
    /// Warning-class charger bits (supply sag, voltage drift) degrade the
    /// result to [`Health::Warning`].
    pub fn after_pulse(flags: ChargerFlags) -> Self {
        if flags.intersects(ChargerFlags::WARNING_MASK) {
            Health::Warning
        } else {
            Health::Ok
        }
    }
}

bitflags! {
    /// Fault bits reported by the charger
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ChargerFlags: u8 {
        /// Capacitor voltage above the permitted ceiling
        const OVERVOLTAGE = 1 << 0;
        /// Target voltage not reached in time
        const TIMEOUT = 1 << 1;
        /// Board supply above its absolute limit
        const SUPPLY_OVERVOLTAGE = 1 << 2;
        /// Capacitor voltage could not be sensed
        const SENSE_FAULT = 1 << 3;
        /// Board supply below its nominal range (warning)
        const SUPPLY_LOW = 1 << 4;
        /// Capacitor overshot the target by more than the tolerance (warning)
        const VOLTAGE_DRIFT = 1 << 5;
    }
}

impl ChargerFlags {
    /// Bit width of the charger fault field
    pub const BITS: u32 = u8::BITS;

    /// Bits that degrade health without aborting a sequence
    pub const WARNING_MASK: Self = Self::SUPPLY_LOW.union(Self::VOLTAGE_DRIFT);
}

#[cfg(feature = "defmt")]
impl defmt::Format for ChargerFlags {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "ChargerFlags({=u8:#04x})", self.bits())
    }
}

bitflags! {
    /// Status bit field published with the hardpoint status
    ///
    /// The low [`ChargerFlags::BITS`] bits mirror the charger fault bits;
    /// the switching bits sit directly above them.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct StatusFlags: u16 {
        /// A turn-on sequence is in progress
        const SWITCHING_ON = 1 << ChargerFlags::BITS;
        /// A turn-off sequence is in progress
        const SWITCHING_OFF = 1 << (ChargerFlags::BITS + 1);
    }
}

impl StatusFlags {
    /// Build the status field from charger bits and sequencer direction
    pub fn compose(charger: ChargerFlags, switching_on: bool, switching_off: bool) -> Self {
        let mut flags = Self::from_bits_retain(u16::from(charger.bits()));
        flags.set(Self::SWITCHING_ON, switching_on);
        flags.set(Self::SWITCHING_OFF, switching_off);
        flags
    }

    /// Charger bits carried in this field
    pub fn charger(&self) -> ChargerFlags {
        ChargerFlags::from_bits_truncate(self.bits() as u8)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for StatusFlags {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "StatusFlags({=u16:#06x})", self.bits())
    }
}
