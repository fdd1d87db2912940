//! Node status and the bus node interface

use gripper_core::status::{ChargerFlags, Health, StatusFlags};

use crate::hardpoint::{HardpointCommand, HardpointStatus};

/// Node health reported on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NodeHealth {
    Ok,
    Warning,
    Error,
    /// The board supply is outside its absolute limit
    Critical,
}

impl NodeHealth {
    /// Derive node health from the sequencer outputs
    ///
    /// A supply overvoltage escalates to [`NodeHealth::Critical`]; everything
    /// else maps one to one.
    pub fn from_sequencer(health: Health, flags: StatusFlags) -> Self {
        if flags.charger().contains(ChargerFlags::SUPPLY_OVERVOLTAGE) {
            return NodeHealth::Critical;
        }
        match health {
            Health::Ok => NodeHealth::Ok,
            Health::Warning => NodeHealth::Warning,
            Health::Error => NodeHealth::Error,
        }
    }
}

/// Node operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NodeMode {
    #[default]
    Initialization,
    Operational,
    Maintenance,
}

/// Node status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NodeStatus {
    pub uptime_sec: u32,
    pub health: NodeHealth,
    pub mode: NodeMode,
    /// Sequencer status flags
    pub vendor_status: u16,
}

/// Bus stack seen from the application
///
/// Implementations own addressing, framing and wire encoding. Every
/// method must return promptly; `spin_once` is called once per main loop
/// iteration.
pub trait BusNode {
    /// Service the bus and return a hardpoint command if one arrived
    fn spin_once(&mut self, now_ms: u64) -> Option<HardpointCommand>;

    /// Broadcast hardpoint and node status
    fn publish(&mut self, hardpoint: &HardpointStatus, node: &NodeStatus);

    /// Change the advertised node mode
    fn set_mode(&mut self, mode: NodeMode);
}
