//! RC PWM command decoding
//!
//! Classifies servo-style pulse widths into off / on / neutral and emits a
//! command while the decoded level differs from the last admitted one.

use super::MagnetCommand;
use crate::config::PwmInputConfig;

/// Decoded PWM level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PwmLevel {
    Off,
    On,
    /// Width outside both ranges, or no signal
    Neutral,
}

/// Edge-triggered PWM command decoder
#[derive(Debug, Clone)]
pub struct PwmDecoder {
    config: PwmInputConfig,
    turn_on_cycles: u8,
    /// Level of the last command the sequencer admitted
    last_admitted: Option<PwmLevel>,
}

impl PwmDecoder {
    pub fn new(config: PwmInputConfig, turn_on_cycles: u8) -> Self {
        Self {
            config,
            turn_on_cycles,
            last_admitted: None,
        }
    }

    /// Classify a pulse width
    ///
    /// `None` means the signal was lost.
    pub fn classify(&self, width_us: Option<u16>) -> PwmLevel {
        let Some(width) = width_us else {
            return PwmLevel::Neutral;
        };

        if (self.config.off_min_us..=self.config.off_max_us).contains(&width) {
            PwmLevel::Off
        } else if (self.config.on_min_us..=self.config.on_max_us).contains(&width) {
            PwmLevel::On
        } else {
            PwmLevel::Neutral
        }
    }

    /// Feed one measured pulse width
    ///
    /// Returns a command while the level differs from the last admitted
    /// one, so a held stick keeps re-issuing a command the sequencer turned
    /// away. Neutral readings are ignored and do not reset that memory.
    pub fn update(&self, width_us: Option<u16>) -> Option<MagnetCommand> {
        if !self.config.enabled {
            return None;
        }

        match self.classify(width_us) {
            PwmLevel::Neutral => None,
            level if self.last_admitted == Some(level) => None,
            PwmLevel::Off => Some(MagnetCommand::TurnOff),
            PwmLevel::On => Some(MagnetCommand::TurnOn {
                cycles: self.turn_on_cycles,
            }),
        }
    }

    /// Record a command the sequencer admitted
    pub fn acknowledge(&mut self, command: MagnetCommand) {
        self.last_admitted = Some(match command {
            MagnetCommand::TurnOff => PwmLevel::Off,
            MagnetCommand::TurnOn { .. } => PwmLevel::On,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decoder() -> PwmDecoder {
        PwmDecoder::new(PwmInputConfig::default(), 2)
    }

    #[test]
    fn test_classify_ranges() {
        let decoder = decoder();
        assert_eq!(decoder.classify(Some(1000)), PwmLevel::Off);
        assert_eq!(decoder.classify(Some(1250)), PwmLevel::Off);
        assert_eq!(decoder.classify(Some(1500)), PwmLevel::Neutral);
        assert_eq!(decoder.classify(Some(1750)), PwmLevel::On);
        assert_eq!(decoder.classify(Some(2000)), PwmLevel::On);
        assert_eq!(decoder.classify(Some(2100)), PwmLevel::Neutral);
        assert_eq!(decoder.classify(Some(900)), PwmLevel::Neutral);
        assert_eq!(decoder.classify(None), PwmLevel::Neutral);
    }

    /// Feed a width and admit whatever comes out
    fn feed(decoder: &mut PwmDecoder, width_us: Option<u16>) -> Option<MagnetCommand> {
        let command = decoder.update(width_us)?;
        decoder.acknowledge(command);
        Some(command)
    }

    #[test]
    fn test_emits_only_on_change() {
        let mut decoder = decoder();
        assert_eq!(
            feed(&mut decoder, Some(1900)),
            Some(MagnetCommand::TurnOn { cycles: 2 })
        );
        assert_eq!(feed(&mut decoder, Some(1950)), None);
        assert_eq!(feed(&mut decoder, Some(1100)), Some(MagnetCommand::TurnOff));
        assert_eq!(feed(&mut decoder, Some(1100)), None);
    }

    #[test]
    fn test_neutral_does_not_reset() {
        let mut decoder = decoder();
        feed(&mut decoder, Some(1100));
        assert_eq!(feed(&mut decoder, Some(1500)), None);
        assert_eq!(feed(&mut decoder, None), None);
        assert_eq!(feed(&mut decoder, Some(1100)), None);
        assert_eq!(
            feed(&mut decoder, Some(1800)),
            Some(MagnetCommand::TurnOn { cycles: 2 })
        );
    }

    #[test]
    fn test_unacknowledged_level_reissued() {
        let mut decoder = decoder();
        decoder.acknowledge(MagnetCommand::TurnOn { cycles: 2 });

        for _ in 0..3 {
            assert_eq!(decoder.update(Some(1100)), Some(MagnetCommand::TurnOff));
        }
        decoder.acknowledge(MagnetCommand::TurnOff);
        assert_eq!(decoder.update(Some(1100)), None);
    }

    #[test]
    fn test_disabled_decoder_is_silent() {
        let config = PwmInputConfig {
            enabled: false,
            ..PwmInputConfig::default()
        };
        let decoder = PwmDecoder::new(config, 2);
        assert_eq!(decoder.update(Some(1900)), None);
    }
}
