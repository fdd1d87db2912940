//! Hardpoint messages

/// Hardpoint command
///
/// `command` is 0 to release (magnet off); any other value grips, and is
/// used as the requested number of turn-on pulses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HardpointCommand {
    pub hardpoint_id: u8,
    pub command: u16,
}

/// Hardpoint status
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HardpointStatus {
    pub hardpoint_id: u8,
    /// Payload weight (N); not measured by this hardpoint
    pub payload_weight: f32,
    pub payload_weight_variance: f32,
    /// 1 while the magnet is on, 0 otherwise
    pub status: u16,
}

impl HardpointStatus {
    /// Status of a hardpoint without a load cell
    pub fn new(hardpoint_id: u8, turned_on: bool) -> Self {
        Self {
            hardpoint_id,
            payload_weight: 0.0,
            payload_weight_variance: f32::INFINITY,
            status: u16::from(turned_on),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_without_load_cell() {
        let status = HardpointStatus::new(3, true);
        assert_eq!(status.hardpoint_id, 3);
        assert_eq!(status.status, 1);
        assert_eq!(status.payload_weight, 0.0);
        assert!(status.payload_weight_variance.is_infinite());

        assert_eq!(HardpointStatus::new(3, false).status, 0);
    }
}
