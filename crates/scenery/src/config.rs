//! Tuning constants and the runtime-tunable configuration resources.
//!
//! The constants are the defaults; `RoadsideConfig` and `VehicleSwapConfig`
//! can be replaced at runtime (or deserialized from JSON) by the host.

use std::time::Duration;

use bevy::prelude::*;
use serde::Deserialize;

use crate::error::SceneryError;

/// Progress units between two roadside placements.
pub const PLACEMENT_INTERVAL: u64 = 80;
/// Progress units a decoration stays in the world before it is retired.
pub const RETIREMENT_WINDOW: u64 = 200;
/// Upper bound on simultaneously placed decorations.
pub const MAX_ACTIVE_DECORATIONS: usize = 15;
/// Progress units ahead of the player at which decorations appear.
pub const PLACEMENT_LOOKAHEAD: u64 = 100;
/// World units covered by one progress unit along the road (+Z).
pub const SEGMENT_LENGTH: f32 = 2.0;

/// Time to wait after startup before looking for the player vehicle.
pub const VEHICLE_SETTLE_DELAY_SECS: f32 = 2.0;
/// Time between two failed searches for the player vehicle.
pub const VEHICLE_SEARCH_BACKOFF_SECS: f32 = 1.0;
/// Searches allowed before the swap gives up.
pub const VEHICLE_MAX_SEARCH_ATTEMPTS: u32 = 30;
/// Parent-name fragments that identify the placeholder vehicle.
pub const VEHICLE_NAME_HINTS: [&str; 3] = ["vehicle", "car", "roadster"];
/// Replacement model for the player vehicle, relative to the asset root.
pub const VEHICLE_REPLACEMENT_MODEL: &str = "models/vehicles/lightning_mcqueen.glb";
/// Uniform scale applied to the replacement vehicle model.
pub const VEHICLE_REPLACEMENT_SCALE: f32 = 0.5;

// =============================================================================
// RoadsideConfig
// =============================================================================

/// Placement and retirement tuning for roadside decorations.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RoadsideConfig {
    pub placement_interval: u64,
    pub retirement_window: u64,
    pub max_active: usize,
    pub lookahead: u64,
    pub segment_length: f32,
}

impl Default for RoadsideConfig {
    fn default() -> Self {
        Self {
            placement_interval: PLACEMENT_INTERVAL,
            retirement_window: RETIREMENT_WINDOW,
            max_active: MAX_ACTIVE_DECORATIONS,
            lookahead: PLACEMENT_LOOKAHEAD,
            segment_length: SEGMENT_LENGTH,
        }
    }
}

impl RoadsideConfig {
    /// Parse a (possibly partial) JSON override; missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, SceneryError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Decorations must always land ahead of the player.
    pub fn validate(&self) -> Result<(), SceneryError> {
        if !(self.segment_length.is_finite() && self.segment_length > 0.0) {
            return Err(SceneryError::InvalidConfig(format!(
                "segment_length must be a positive number, got {}",
                self.segment_length
            )));
        }
        Ok(())
    }
}

// =============================================================================
// VehicleSwapConfig
// =============================================================================

/// Settings for replacing the host's placeholder vehicle with a themed model.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct VehicleSwapConfig {
    pub settle_delay_secs: f32,
    pub retry_backoff_secs: f32,
    /// `None` retries forever.
    pub max_search_attempts: Option<u32>,
    pub name_hints: Vec<String>,
    /// Roster skin to use as the replacement; overrides `model_path`/`model_scale`.
    pub skin: Option<String>,
    pub model_path: String,
    pub model_scale: f32,
}

impl Default for VehicleSwapConfig {
    fn default() -> Self {
        Self {
            settle_delay_secs: VEHICLE_SETTLE_DELAY_SECS,
            retry_backoff_secs: VEHICLE_SEARCH_BACKOFF_SECS,
            max_search_attempts: Some(VEHICLE_MAX_SEARCH_ATTEMPTS),
            name_hints: VEHICLE_NAME_HINTS.iter().map(|s| s.to_string()).collect(),
            skin: None,
            model_path: VEHICLE_REPLACEMENT_MODEL.to_string(),
            model_scale: VEHICLE_REPLACEMENT_SCALE,
        }
    }
}

impl VehicleSwapConfig {
    pub fn from_json(json: &str) -> Result<Self, SceneryError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn settle_delay(&self) -> Duration {
        secs_to_duration(self.settle_delay_secs)
    }

    pub fn retry_backoff(&self) -> Duration {
        secs_to_duration(self.retry_backoff_secs)
    }

    /// True if `name` contains any of the configured hints (case-insensitive).
    pub fn matches_vehicle_name(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.name_hints
            .iter()
            .any(|hint| !hint.is_empty() && name.contains(&hint.to_lowercase()))
    }
}

fn secs_to_duration(secs: f32) -> Duration {
    if secs.is_finite() && secs > 0.0 {
        Duration::from_secs_f32(secs)
    } else {
        Duration::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roadside_defaults_match_constants() {
        let cfg = RoadsideConfig::default();
        assert_eq!(cfg.placement_interval, 80);
        assert_eq!(cfg.retirement_window, 200);
        assert_eq!(cfg.max_active, 15);
        assert_eq!(cfg.lookahead, 100);
        assert_eq!(cfg.segment_length, 2.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let cfg = RoadsideConfig::from_json(r#"{ "max_active": 3 }"#).unwrap();
        assert_eq!(cfg.max_active, 3);
        assert_eq!(cfg.placement_interval, PLACEMENT_INTERVAL);
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let err = RoadsideConfig::from_json("{ max_active: ").unwrap_err();
        assert!(matches!(err, SceneryError::Config(_)), "got: {err}");
    }

    #[test]
    fn test_non_positive_segment_length_rejected() {
        for json in [
            r#"{ "segment_length": -2.0 }"#,
            r#"{ "segment_length": 0.0 }"#,
        ] {
            let err = RoadsideConfig::from_json(json).unwrap_err();
            assert!(matches!(err, SceneryError::InvalidConfig(_)), "got: {err}");
        }
        let nan = RoadsideConfig {
            segment_length: f32::NAN,
            ..Default::default()
        };
        assert!(nan.validate().is_err());
        assert!(RoadsideConfig::default().validate().is_ok());
    }

    #[test]
    fn test_unbounded_retries_from_json() {
        let cfg = VehicleSwapConfig::from_json(r#"{ "max_search_attempts": null }"#).unwrap();
        assert_eq!(cfg.max_search_attempts, None);
        assert_eq!(cfg.model_scale, VEHICLE_REPLACEMENT_SCALE);
        assert_eq!(cfg.skin, None);
    }

    #[test]
    fn test_vehicle_name_matching() {
        let cfg = VehicleSwapConfig::default();
        assert!(cfg.matches_vehicle_name("player_vehicle"));
        assert!(cfg.matches_vehicle_name("SportsCar_01"));
        assert!(cfg.matches_vehicle_name("roadster"));
        assert!(!cfg.matches_vehicle_name("tree_oak"));
    }

    #[test]
    fn test_empty_hint_never_matches() {
        let cfg = VehicleSwapConfig {
            name_hints: vec![String::new()],
            ..Default::default()
        };
        assert!(!cfg.matches_vehicle_name("anything"));
    }

    #[test]
    fn test_negative_delays_clamp_to_zero() {
        let cfg = VehicleSwapConfig {
            settle_delay_secs: -1.0,
            retry_backoff_secs: -0.5,
            ..Default::default()
        };
        assert_eq!(cfg.settle_delay(), Duration::ZERO);
        assert_eq!(cfg.retry_backoff(), Duration::ZERO);
    }
}
