//! Hardpoint command handling
//!
//! Filters incoming hardpoint commands down to the ones addressed to this
//! gripper and translates them into magnet commands.

use gripper_core::input::MagnetCommand;
use gripper_core::magnet::MAX_CYCLES;

use crate::hardpoint::HardpointCommand;

/// Hardpoint command handler
///
/// Deduplication is two-phase: [`CommandHandler::handle`] translates, and
/// [`CommandHandler::commit`] records the value once the sequencer has
/// admitted it. A command rejected as busy or rate-limited is translated
/// again on its next retransmission.
#[derive(Debug, Clone)]
pub struct CommandHandler {
    hardpoint_id: u8,
    /// Last admitted raw command value
    last_command: Option<u16>,
}

impl CommandHandler {
    pub fn new(hardpoint_id: u8) -> Self {
        Self {
            hardpoint_id,
            last_command: None,
        }
    }

    pub fn hardpoint_id(&self) -> u8 {
        self.hardpoint_id
    }

    /// Translate a bus command
    ///
    /// Returns `None` for commands addressed to another hardpoint and for
    /// repeats of the last admitted value. The bus retransmits commands
    /// continuously, so only changes reach the sequencer.
    pub fn handle(&self, msg: &HardpointCommand) -> Option<MagnetCommand> {
        if msg.hardpoint_id != self.hardpoint_id {
            return None;
        }
        if self.last_command == Some(msg.command) {
            return None;
        }

        if msg.command == 0 {
            Some(MagnetCommand::TurnOff)
        } else {
            let cycles = msg.command.min(u16::from(MAX_CYCLES)) as u8;
            Some(MagnetCommand::TurnOn { cycles })
        }
    }

    /// Record a command the sequencer admitted
    pub fn commit(&mut self, msg: &HardpointCommand) {
        if msg.hardpoint_id == self.hardpoint_id {
            self.last_command = Some(msg.command);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gripper_core::magnet::{CommandError, MagnetSequencer};
    use gripper_core::status::ChargerFlags;
    use gripper_core::traits::{ChargeStatus, Charger, ChargerProvider, PolarityBridge};
    use proptest::prelude::*;

    /// Charger that reaches its target on the first poll
    struct InstantCharger;

    impl Charger for InstantCharger {
        fn begin(&mut self, _target_volts: u16) {}

        fn poll(&mut self) -> ChargeStatus {
            ChargeStatus::Done
        }

        fn error_flags(&self) -> ChargerFlags {
            ChargerFlags::empty()
        }
    }

    struct InstantProvider;

    impl ChargerProvider for InstantProvider {
        type Charger = InstantCharger;

        fn acquire(&mut self) -> Option<InstantCharger> {
            Some(InstantCharger)
        }

        fn release(&mut self, _charger: InstantCharger) {}
    }

    struct NullBridge;

    impl PolarityBridge for NullBridge {
        fn drive_positive(&mut self) {}
        fn drive_negative(&mut self) {}
    }

    type TestSequencer = MagnetSequencer<InstantProvider, NullBridge>;

    fn run_to_idle(seq: &mut TestSequencer) {
        while seq.is_busy() {
            seq.poll();
        }
    }

    /// Route one bus message the way the main loop does
    fn deliver(
        handler: &mut CommandHandler,
        seq: &mut TestSequencer,
        msg: &HardpointCommand,
        now_ms: u64,
    ) -> Option<Result<u8, CommandError>> {
        let command = handler.handle(msg)?;
        let result = seq.apply(command, now_ms);
        if result.is_ok() {
            handler.commit(msg);
        }
        Some(result)
    }

    fn cmd(hardpoint_id: u8, command: u16) -> HardpointCommand {
        HardpointCommand {
            hardpoint_id,
            command,
        }
    }

    #[test]
    fn test_zero_is_turn_off() {
        let handler = CommandHandler::new(1);
        assert_eq!(handler.handle(&cmd(1, 0)), Some(MagnetCommand::TurnOff));
    }

    #[test]
    fn test_nonzero_is_clamped_turn_on() {
        let handler = CommandHandler::new(1);
        assert_eq!(
            handler.handle(&cmd(1, 3)),
            Some(MagnetCommand::TurnOn { cycles: 3 })
        );
        assert_eq!(
            handler.handle(&cmd(1, 1000)),
            Some(MagnetCommand::TurnOn { cycles: MAX_CYCLES })
        );
    }

    #[test]
    fn test_other_hardpoint_ignored() {
        let mut handler = CommandHandler::new(1);
        assert_eq!(handler.handle(&cmd(2, 5)), None);
        handler.commit(&cmd(2, 5));
        // Ignored command does not count for deduplication
        assert_eq!(
            handler.handle(&cmd(1, 5)),
            Some(MagnetCommand::TurnOn { cycles: 5 })
        );
    }

    #[test]
    fn test_repeated_value_deduplicated() {
        let mut handler = CommandHandler::new(0);
        assert!(handler.handle(&cmd(0, 0)).is_some());
        handler.commit(&cmd(0, 0));
        assert_eq!(handler.handle(&cmd(0, 0)), None);
        assert!(handler.handle(&cmd(0, 4)).is_some());
        handler.commit(&cmd(0, 4));
        assert!(handler.handle(&cmd(0, 0)).is_some());
    }

    #[test]
    fn test_uncommitted_value_translated_again() {
        let handler = CommandHandler::new(0);
        assert_eq!(handler.handle(&cmd(0, 0)), Some(MagnetCommand::TurnOff));
        assert_eq!(handler.handle(&cmd(0, 0)), Some(MagnetCommand::TurnOff));
    }

    #[test]
    fn test_release_rejected_while_busy_is_retried() {
        let mut handler = CommandHandler::new(0);
        let mut seq = MagnetSequencer::new(InstantProvider, NullBridge, 1000);

        assert_eq!(deliver(&mut handler, &mut seq, &cmd(0, 2), 0), Some(Ok(2)));
        assert_eq!(
            deliver(&mut handler, &mut seq, &cmd(0, 0), 0),
            Some(Err(CommandError::Busy))
        );
        run_to_idle(&mut seq);
        assert!(seq.is_turned_on());

        let mut admitted = 0;
        for now_ms in 1..=100 {
            if let Some(Ok(_)) = deliver(&mut handler, &mut seq, &cmd(0, 0), now_ms) {
                admitted += 1;
            }
            run_to_idle(&mut seq);
        }

        assert_eq!(admitted, 1);
        assert!(!seq.is_turned_on());
        assert_eq!(handler.handle(&cmd(0, 0)), None);
    }

    #[test]
    fn test_commit_ignores_other_hardpoints() {
        let mut handler = CommandHandler::new(3);
        handler.commit(&cmd(4, 0));
        assert_eq!(handler.handle(&cmd(3, 0)), Some(MagnetCommand::TurnOff));
    }

    proptest! {
        #[test]
        fn prop_turn_on_never_exceeds_max(command in 1u16..) {
            let handler = CommandHandler::new(7);
            match handler.handle(&cmd(7, command)) {
                Some(MagnetCommand::TurnOn { cycles }) => {
                    prop_assert!(cycles >= 1);
                    prop_assert!(cycles <= MAX_CYCLES);
                }
                other => prop_assert!(false, "unexpected {:?}", other),
            }
        }
    }
}
