//! Vehicle skin configurations.
//!
//! Each skin names a GLB model plus the handling numbers, wheel geometry,
//! audio and icon the host game reads when the skin is selected. The layer
//! only carries this data; it does not simulate anything with it.

use std::collections::BTreeMap;

use bevy::prelude::*;
use serde::Deserialize;

use crate::error::SceneryError;

const DEFAULT_ROSTER_JSON: &str = include_str!("../data/vehicles.json");

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VehicleAudio {
    pub roll: String,
    pub engine: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WheelGeometry {
    pub tyre_width: f32,
    pub width: f32,
    pub length: f32,
    pub radius: f32,
    pub circumference: f32,
    pub travel: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct SkinColors {
    /// 0xRRGGBB
    pub body: u32,
}

impl SkinColors {
    pub fn body_color(&self) -> Color {
        let [_, r, g, b] = self.body.to_be_bytes();
        Color::srgb_u8(r, g, b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct HeadlightPos {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<HeadlightPos> for Vec3 {
    fn from(p: HeadlightPos) -> Self {
        Vec3::new(p.x, p.y, p.z)
    }
}

/// Handling parameters consumed by the host's vehicle physics.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleMetrics {
    pub shadow_map_size: u32,
    pub steer_speed: f32,
    pub accel: f32,
    pub reverse: f32,
    pub jerk: f32,
    pub brake: f32,
    pub mass: f32,
    pub steer_accel: f32,
    pub max_steer: f32,
    pub axle_height: f32,
    pub dampening: f32,
    pub rock_factor: f32,
    pub drag: f32,
    pub top_speed: f32,
    pub roll_resistance: f32,
    pub steer_interval: f32,
    pub slip_base: f32,
    pub slip_mod: f32,
    pub aero_factor: f32,
    pub headlight_pos: HeadlightPos,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleSkin {
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    pub name: String,
    pub glb_file: String,
    pub icon: String,
    pub audio: VehicleAudio,
    pub wheels: WheelGeometry,
    pub skins: BTreeMap<String, SkinColors>,
    pub metrics: VehicleMetrics,
    #[serde(default = "unit_scale")]
    pub scale: f32,
}

fn enabled_by_default() -> bool {
    true
}

fn unit_scale() -> f32 {
    1.0
}

impl VehicleSkin {
    /// Colors of the `basic` skin, if the skin defines one.
    pub fn basic_colors(&self) -> Option<SkinColors> {
        self.skins.get("basic").copied()
    }
}

/// All vehicle skins, keyed by id.
#[derive(Resource, Debug, Clone, Default)]
pub struct VehicleRoster {
    skins: BTreeMap<String, VehicleSkin>,
}

impl VehicleRoster {
    pub fn from_json(json: &str) -> Result<Self, SceneryError> {
        let skins: BTreeMap<String, VehicleSkin> = serde_json::from_str(json)?;
        if let Some((id, _)) = skins
            .iter()
            .find(|(_, s)| !(s.scale.is_finite() && s.scale > 0.0))
        {
            return Err(SceneryError::InvalidCatalog(format!(
                "vehicle '{id}': scale must be a positive number"
            )));
        }
        Ok(Self { skins })
    }

    pub fn builtin() -> Result<Self, SceneryError> {
        Self::from_json(DEFAULT_ROSTER_JSON)
    }

    pub fn get(&self, id: &str) -> Option<&VehicleSkin> {
        self.skins.get(id)
    }

    /// Enabled skins in id order.
    pub fn enabled(&self) -> impl Iterator<Item = (&str, &VehicleSkin)> {
        self.skins
            .iter()
            .filter(|(_, s)| s.enabled)
            .map(|(id, s)| (id.as_str(), s))
    }

    pub fn len(&self) -> usize {
        self.skins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skins.is_empty()
    }
}
