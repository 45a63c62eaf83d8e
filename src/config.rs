//! Wheel configuration.
//!
//! Defaults match the shipped app; the JS bridge may override any field by
//! posting a JSON object to `/api/app/init`.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunables for the spin animation and stop-angle geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    /// Full turns added on top of the stop angle for every spin.
    pub extra_revolutions: u32,
    /// Animation length; the completion callback fires after the same delay.
    pub spin_duration_ms: u32,
    /// Pointer position in wedge-layout degrees (270 = 12 o'clock in SVG space).
    pub pointer_angle: f64,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            extra_revolutions: 5,
            spin_duration_ms: 4000,
            pointer_angle: 270.0,
        }
    }
}

impl WheelConfig {
    /// Parse a JSON override. An empty body yields the defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extra_revolutions == 0 {
            return Err(ConfigError::NoExtraRevolutions);
        }
        if self.spin_duration_ms == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        if !self.pointer_angle.is_finite() {
            return Err(ConfigError::PointerAngle(self.pointer_angle));
        }
        Ok(())
    }
}
