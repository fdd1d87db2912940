//! Embedded configuration
//!
//! `build.rs` validates `gripper.toml` and embeds it as postcard binary
//! data. Decoding can only fail if the image is corrupted or the config
//! types changed without a rebuild; either way the defaults are used.

use defmt::*;

use gripper_core::config::{ConfigError, GripperConfig};

/// Postcard-encoded configuration produced by build.rs
static CONFIG_BLOB: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/gripper_config.bin"));

/// Configuration loading errors
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadError {
    /// Blob is not a valid postcard encoding of the config
    Deserialize,
    /// Decoded config violates a constraint
    Invalid(ConfigError),
}

impl From<ConfigError> for LoadError {
    fn from(e: ConfigError) -> Self {
        LoadError::Invalid(e)
    }
}

/// Decode and validate the embedded configuration
pub fn decode(blob: &[u8]) -> Result<GripperConfig, LoadError> {
    let config: GripperConfig = postcard::from_bytes(blob).map_err(|_| LoadError::Deserialize)?;
    config.validate()?;
    Ok(config)
}

/// Load the embedded configuration, falling back to defaults
pub fn load() -> GripperConfig {
    match decode(CONFIG_BLOB) {
        Ok(config) => {
            info!(
                "Loaded embedded configuration ({} bytes)",
                CONFIG_BLOB.len()
            );
            log_config_summary(&config);
            config
        }
        Err(e) => {
            error!("Embedded configuration unusable: {:?}, using defaults", e);
            GripperConfig::default()
        }
    }
}

fn log_config_summary(config: &GripperConfig) {
    info!(
        "Node '{}', status every {} ms",
        config.node_name.as_str(),
        config.status_period_ms
    );
    info!(
        "Sequencer: {} turn-on cycles, {} ms command interval",
        config.sequencer.turn_on_cycles, config.sequencer.min_command_interval_ms
    );
    info!(
        "Charger: timeout {} ms, ceiling {} V, supply {}-{} mV",
        config.charger.timeout_ms,
        config.charger.absolute_max_volts,
        config.charger.supply_min_mv,
        config.charger.supply_max_mv
    );
    if config.pwm.enabled {
        info!(
            "PWM input: off {}-{} us, on {}-{} us",
            config.pwm.off_min_us, config.pwm.off_max_us, config.pwm.on_min_us, config.pwm.on_max_us
        );
    } else {
        info!("PWM input disabled");
    }
}
