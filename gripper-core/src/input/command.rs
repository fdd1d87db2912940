//! Unified magnet command

/// Actuation request from any source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MagnetCommand {
    /// Magnetize with the given number of pulses (clamped by the sequencer)
    TurnOn { cycles: u8 },
    /// Run the demagnetization ramp
    TurnOff,
}

/// Command issued by a button press
///
/// Toggles the magnet relative to the current pole state.
pub fn toggle_command(turned_on: bool, turn_on_cycles: u8) -> MagnetCommand {
    if turned_on {
        MagnetCommand::TurnOff
    } else {
        MagnetCommand::TurnOn {
            cycles: turn_on_cycles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle() {
        assert_eq!(toggle_command(true, 2), MagnetCommand::TurnOff);
        assert_eq!(
            toggle_command(false, 2),
            MagnetCommand::TurnOn { cycles: 2 }
        );
    }
}
