//! Periodic status publication

use gripper_core::status::{Health, StatusFlags};

use crate::hardpoint::HardpointStatus;
use crate::node::{NodeHealth, NodeMode, NodeStatus};

/// Default publication period (ms)
pub const DEFAULT_STATUS_PERIOD_MS: u32 = 500;

/// Sequencer outputs sampled for one status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MagnetSnapshot {
    pub turned_on: bool,
    pub health: Health,
    pub flags: StatusFlags,
}

/// Rate-limited status publisher
#[derive(Debug, Clone)]
pub struct StatusPublisher {
    hardpoint_id: u8,
    period_ms: u32,
    next_due_ms: u64,
}

impl StatusPublisher {
    /// Create a publisher whose first message is due immediately
    pub fn new(hardpoint_id: u8, period_ms: u32) -> Self {
        Self {
            hardpoint_id,
            period_ms,
            next_due_ms: 0,
        }
    }

    /// Build the status pair if a publication is due
    ///
    /// Deadlines advance by whole periods; after a stall longer than one
    /// period the schedule restarts from `now_ms`.
    pub fn poll(
        &mut self,
        now_ms: u64,
        mode: NodeMode,
        snapshot: MagnetSnapshot,
    ) -> Option<(HardpointStatus, NodeStatus)> {
        if now_ms < self.next_due_ms {
            return None;
        }

        let period = u64::from(self.period_ms);
        self.next_due_ms += period;
        if self.next_due_ms <= now_ms {
            self.next_due_ms = now_ms + period;
        }

        let hardpoint = HardpointStatus::new(self.hardpoint_id, snapshot.turned_on);
        let node = NodeStatus {
            uptime_sec: u32::try_from(now_ms / 1000).unwrap_or(u32::MAX),
            health: NodeHealth::from_sequencer(snapshot.health, snapshot.flags),
            mode,
            vendor_status: snapshot.flags.bits(),
        };
        Some((hardpoint, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> MagnetSnapshot {
        MagnetSnapshot {
            turned_on: true,
            health: Health::Warning,
            flags: StatusFlags::SWITCHING_OFF,
        }
    }

    #[test]
    fn test_publishes_every_period() {
        let mut publisher = StatusPublisher::new(2, DEFAULT_STATUS_PERIOD_MS);
        let mode = NodeMode::Operational;

        assert!(publisher.poll(0, mode, snapshot()).is_some());
        assert!(publisher.poll(499, mode, snapshot()).is_none());
        assert!(publisher.poll(500, mode, snapshot()).is_some());
        assert!(publisher.poll(900, mode, snapshot()).is_none());
        assert!(publisher.poll(1001, mode, snapshot()).is_some());
    }

    #[test]
    fn test_stall_restarts_schedule() {
        let mut publisher = StatusPublisher::new(2, 500);
        let mode = NodeMode::Operational;

        publisher.poll(0, mode, snapshot());
        assert!(publisher.poll(5000, mode, snapshot()).is_some());
        assert!(publisher.poll(5100, mode, snapshot()).is_none());
        assert!(publisher.poll(5500, mode, snapshot()).is_some());
    }

    #[test]
    fn test_message_contents() {
        let mut publisher = StatusPublisher::new(9, 500);
        let (hardpoint, node) = publisher
            .poll(12_345, NodeMode::Operational, snapshot())
            .unwrap();

        assert_eq!(hardpoint.hardpoint_id, 9);
        assert_eq!(hardpoint.status, 1);
        assert_eq!(node.uptime_sec, 12);
        assert_eq!(node.health, NodeHealth::Warning);
        assert_eq!(node.mode, NodeMode::Operational);
        assert_eq!(node.vendor_status, 0x200);
    }
}
