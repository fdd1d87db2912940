//! Status LED blink cadence
//!
//! The LED flashes briefly once per period. The period shortens as health
//! degrades, and a running sequence blinks at a fixed fast rate.

use super::Health;
use crate::config::IndicatorConfig;

/// Status LED pattern generator
#[derive(Debug, Clone)]
pub struct Indicator {
    config: IndicatorConfig,
}

impl Indicator {
    pub fn new(config: IndicatorConfig) -> Self {
        Self { config }
    }

    /// LED state at `now_ms`
    ///
    /// # Arguments
    /// - `health`: latched sequencer health
    /// - `busy`: a magnet sequence is in progress
    pub fn update(&self, now_ms: u64, health: Health, busy: bool) -> bool {
        let period = if busy {
            self.config.busy_period_ms
        } else {
            match health {
                Health::Ok => self.config.ok_period_ms,
                Health::Warning => self.config.warning_period_ms,
                Health::Error => self.config.error_period_ms,
            }
        };

        if period == 0 {
            return false;
        }

        now_ms % u64::from(period) < u64::from(self.config.flash_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit_count(indicator: &Indicator, health: Health, busy: bool, span_ms: u64) -> u64 {
        (0..span_ms)
            .filter(|&t| indicator.update(t, health, busy))
            .count() as u64
    }

    #[test]
    fn test_ok_flashes_once_per_two_seconds() {
        let indicator = Indicator::new(IndicatorConfig::default());
        assert!(indicator.update(0, Health::Ok, false));
        assert!(indicator.update(49, Health::Ok, false));
        assert!(!indicator.update(50, Health::Ok, false));
        assert!(!indicator.update(1999, Health::Ok, false));
        assert!(indicator.update(2000, Health::Ok, false));
        assert_eq!(lit_count(&indicator, Health::Ok, false, 4000), 100);
    }

    #[test]
    fn test_degraded_health_blinks_faster() {
        let indicator = Indicator::new(IndicatorConfig::default());
        assert_eq!(lit_count(&indicator, Health::Warning, false, 2000), 200);
        assert_eq!(lit_count(&indicator, Health::Error, false, 2000), 400);
    }

    #[test]
    fn test_busy_overrides_health() {
        let indicator = Indicator::new(IndicatorConfig::default());
        assert!(indicator.update(10, Health::Error, true));
        assert!(!indicator.update(60, Health::Error, true));
        assert!(indicator.update(110, Health::Ok, true));
        assert_eq!(lit_count(&indicator, Health::Ok, true, 1000), 500);
    }
}
