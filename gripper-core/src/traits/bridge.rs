//! Thyristor polarity bridge trait

/// Discharge polarity through the EPM coil
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Magnetizing direction ("on")
    Positive,
    /// Demagnetizing direction ("off")
    Negative,
}

impl Polarity {
    /// Check if a pulse of this polarity leaves the magnet off
    pub fn is_off(&self) -> bool {
        matches!(self, Polarity::Negative)
    }
}

/// Thyristor bridge discharging the capacitor into the coil
///
/// Each call fires one gate pulse pair. Implementations are synchronous
/// and have no effect other than triggering the thyristors.
pub trait PolarityBridge {
    /// Discharge in the magnetizing direction
    fn drive_positive(&mut self);

    /// Discharge in the demagnetizing direction
    fn drive_negative(&mut self);

    /// Discharge with the given polarity
    fn drive(&mut self, polarity: Polarity) {
        match polarity {
            Polarity::Positive => self.drive_positive(),
            Polarity::Negative => self.drive_negative(),
        }
    }
}
