//! Where a roadside decoration goes: side, lateral offset, lookahead and facing.

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;
use rand::Rng;

use crate::catalog::DecorativeAssetEntry;
use crate::config::RoadsideConfig;

/// Side of the road a decoration is placed on. Right is +X.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoadSide {
    Left,
    Right,
}

impl RoadSide {
    /// Pick a side with equal probability.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            RoadSide::Right
        } else {
            RoadSide::Left
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            RoadSide::Left => -1.0,
            RoadSide::Right => 1.0,
        }
    }

    /// Yaw that turns a model on this side to face the road.
    pub fn facing_yaw(self) -> f32 {
        match self {
            RoadSide::Left => FRAC_PI_2,
            RoadSide::Right => -FRAC_PI_2,
        }
    }
}

/// Resolved pose of one decoration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub side: RoadSide,
    pub translation: Vec3,
    pub yaw: f32,
    pub scale: f32,
}

impl Placement {
    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.translation)
            .with_rotation(Quat::from_rotation_y(self.yaw))
            .with_scale(Vec3::splat(self.scale))
    }
}

/// Compute a placement for `entry` ahead of the player.
///
/// `road_position` must be a point on the road centerline, not the car's
/// lateral position: the side offset is measured from its `x`. The
/// longitudinal position is `lookahead` progress units past `progress`.
pub fn compute_placement<R: Rng + ?Sized>(
    entry: &DecorativeAssetEntry,
    progress: u64,
    road_position: Vec3,
    config: &RoadsideConfig,
    rng: &mut R,
) -> Placement {
    let side = RoadSide::random(rng);

    let (min, max) = (entry.min_distance(), entry.max_distance());
    let distance = if min < max {
        rng.gen_range(min..=max)
    } else {
        min
    };

    let ahead = progress.saturating_add(config.lookahead) as f32 * config.segment_length;
    let translation = Vec3::new(
        road_position.x + side.sign() * distance,
        entry.elevation(),
        road_position.z + ahead,
    );

    Placement {
        side,
        translation,
        yaw: side.facing_yaw(),
        scale: entry.scale,
    }
}
