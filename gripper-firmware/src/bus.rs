//! Log-only bus node over RTT
//!
//! Stands in for the vehicle bus stack on bench setups: status goes to the
//! defmt log and no commands are received. Local sources (button, PWM)
//! still drive the magnet.

use defmt::*;

use gripper_protocol::{BusNode, HardpointCommand, HardpointStatus, NodeMode, NodeStatus};

/// Bus node that publishes over defmt
pub struct LogNode {
    mode: NodeMode,
}

impl LogNode {
    pub fn new() -> Self {
        Self {
            mode: NodeMode::Initialization,
        }
    }
}

impl BusNode for LogNode {
    fn spin_once(&mut self, _now_ms: u64) -> Option<HardpointCommand> {
        None
    }

    fn publish(&mut self, hardpoint: &HardpointStatus, node: &NodeStatus) {
        debug!(
            "Hardpoint {}: status={} vendor={=u16:#x} health={} mode={} uptime={}s",
            hardpoint.hardpoint_id,
            hardpoint.status,
            node.vendor_status,
            node.health,
            node.mode,
            node.uptime_sec
        );
    }

    fn set_mode(&mut self, mode: NodeMode) {
        if mode != self.mode {
            info!("Node mode {} -> {}", self.mode, mode);
            self.mode = mode;
        }
    }
}
