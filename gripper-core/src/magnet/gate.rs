//! Command admission rules

/// Why a magnet command was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// A sequence is already in progress
    Busy,
    /// Magnet already in the requested state and the last command was too recent
    RateLimited,
}

/// Admission gate shared by turn-on and turn-off
///
/// Commands are never queued. A rejected command leaves the gate untouched.
#[derive(Debug, Clone)]
pub struct CommandGate {
    min_interval_ms: u32,
    last_command_ms: Option<u64>,
}

impl CommandGate {
    pub fn new(min_interval_ms: u32) -> Self {
        Self {
            min_interval_ms,
            last_command_ms: None,
        }
    }

    /// Check whether a command may start a sequence
    ///
    /// # Arguments
    /// - `busy`: a sequence is in progress
    /// - `already_in_state`: the magnet is already in the requested state
    /// - `now_ms`: current monotonic time
    pub fn check(&self, busy: bool, already_in_state: bool, now_ms: u64) -> Result<(), CommandError> {
        if busy {
            return Err(CommandError::Busy);
        }

        let too_soon = self
            .last_command_ms
            .is_some_and(|last| now_ms.saturating_sub(last) < u64::from(self.min_interval_ms));
        if already_in_state && too_soon {
            return Err(CommandError::RateLimited);
        }

        Ok(())
    }

    /// Record an admitted command
    pub fn record(&mut self, now_ms: u64) {
        self.last_command_ms = Some(now_ms);
    }

    /// Timestamp of the last admitted command
    pub fn last_command_ms(&self) -> Option<u64> {
        self.last_command_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_busy_always_rejected() {
        let gate = CommandGate::new(1000);
        assert_eq!(gate.check(true, false, 0), Err(CommandError::Busy));
        assert_eq!(gate.check(true, true, 5000), Err(CommandError::Busy));
    }

    #[test]
    fn test_first_command_not_rate_limited() {
        let gate = CommandGate::new(1000);
        assert_eq!(gate.check(false, true, 0), Ok(()));
    }

    #[test]
    fn test_same_state_rate_limit() {
        let mut gate = CommandGate::new(1000);
        gate.record(10_000);

        assert_eq!(gate.check(false, true, 10_999), Err(CommandError::RateLimited));
        assert_eq!(gate.check(false, true, 11_000), Ok(()));
        // A state change is never rate limited
        assert_eq!(gate.check(false, false, 10_001), Ok(()));
    }

    #[test]
    fn test_clock_behind_last_command() {
        let mut gate = CommandGate::new(1000);
        gate.record(500);
        assert_eq!(gate.check(false, true, 100), Err(CommandError::RateLimited));
    }
}
