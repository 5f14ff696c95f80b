//! Replaces the host's placeholder vehicle mesh with a themed GLB model.
//!
//! Three systems run in order each frame:
//!   1. `drive_vehicle_swap` advances the settle/retry timers and searches
//!      for a mesh whose parent is named like a vehicle.
//!   2. `request_replacement_model` issues the model load once a target exists.
//!   3. `apply_vehicle_swap` swaps the node as soon as the model is loaded.

use bevy::prelude::*;

use scenery::catalog_load::LoadOutcome;
use scenery::config::VehicleSwapConfig;
use scenery::error::SceneryError;
use scenery::vehicle_swap::{SwapStep, VehicleSwap};
use scenery::vehicles::VehicleRoster;

use crate::model_loading::{load_scene, scene_load_outcome};
use crate::vehicle_models::VehicleModelLibrary;

/// Parent whose vehicle mesh has already been replaced.
#[derive(Component)]
pub struct SwappedVehicle;

/// The spawned replacement model.
#[derive(Component)]
pub struct ReplacementVehicle;

/// The mesh node to replace and the parent it hangs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapTarget {
    pub node: Entity,
    pub parent: Entity,
}

#[derive(Debug, Clone)]
pub struct ReplacementModel {
    pub path: String,
    pub handle: Handle<Scene>,
    pub scale: f32,
}

/// Outcome of the swap: the replacement entity, or why the original stayed.
#[derive(Event, Debug)]
pub struct VehicleSwapFinished(pub Result<Entity, SceneryError>);

/// Progress of the one-shot swap. Timing and model choice come from the
/// `VehicleSwapConfig` resource, read every frame.
#[derive(Resource, Default)]
pub struct VehicleSwapState {
    pub swap: VehicleSwap<SwapTarget>,
    pub model: Option<ReplacementModel>,
}

/// First mesh node whose parent's name matches one of the vehicle hints.
pub fn find_vehicle_node(
    config: &VehicleSwapConfig,
    meshes: &Query<(Entity, &Parent), With<Mesh3d>>,
    parents: &Query<&Name, Without<SwappedVehicle>>,
) -> Option<SwapTarget> {
    meshes.iter().find_map(|(node, parent)| {
        let name = parents.get(parent.get()).ok()?;
        config
            .matches_vehicle_name(name.as_str())
            .then_some(SwapTarget {
                node,
                parent: parent.get(),
            })
    })
}

pub fn drive_vehicle_swap(
    time: Res<Time>,
    config: Res<VehicleSwapConfig>,
    mut state: ResMut<VehicleSwapState>,
    meshes: Query<(Entity, &Parent), With<Mesh3d>>,
    parents: Query<&Name, Without<SwappedVehicle>>,
    mut finished: EventWriter<VehicleSwapFinished>,
) {
    if state.swap.is_finished() {
        return;
    }
    let step = state.swap.advance(time.delta(), &config, || {
        find_vehicle_node(&config, &meshes, &parents)
    });

    match step {
        Some(SwapStep::SearchMissed { attempts }) => {
            warn!("Vehicle swap: no vehicle node found (attempt {attempts}), retrying");
        }
        Some(SwapStep::TargetFound { attempts }) => {
            info!("Vehicle swap: found vehicle node after {attempts} attempt(s)");
        }
        Some(SwapStep::GaveUp { attempts }) => {
            let err = SceneryError::SceneNotFound { attempts };
            error!("Vehicle swap: {err}");
            finished.send(VehicleSwapFinished(Err(err)));
        }
        None => {}
    }
}

/// Issue the replacement model load once there is something to replace.
///
/// A configured roster skin reuses the library's handle and the skin's scale;
/// otherwise `model_path` is loaded at `model_scale`.
pub fn request_replacement_model(
    asset_server: Option<Res<AssetServer>>,
    config: Res<VehicleSwapConfig>,
    library: Option<Res<VehicleModelLibrary>>,
    roster: Option<Res<VehicleRoster>>,
    mut state: ResMut<VehicleSwapState>,
) {
    if state.model.is_some() || state.swap.target().is_none() {
        return;
    }

    if let Some(id) = config.skin.as_deref() {
        match roster.as_deref().and_then(|r| r.get(id)) {
            Some(skin) => {
                let handle = match library.as_deref().and_then(|l| l.get(id)) {
                    Some(model) => Some(model.handle.clone()),
                    None => asset_server
                        .as_deref()
                        .map(|server| load_scene(server, &skin.glb_file)),
                };
                if let Some(handle) = handle {
                    info!("Vehicle swap: using skin {} ({})", skin.name, skin.glb_file);
                    state.model = Some(ReplacementModel {
                        path: skin.glb_file.clone(),
                        handle,
                        scale: skin.scale,
                    });
                    return;
                }
            }
            None => warn!("Vehicle swap: unknown skin '{id}', using the default model"),
        }
    }

    let Some(server) = asset_server.as_deref() else {
        return;
    };
    info!("Vehicle swap: loading {}", config.model_path);
    state.model = Some(ReplacementModel {
        path: config.model_path.clone(),
        handle: load_scene(server, &config.model_path),
        scale: config.model_scale,
    });
}

/// Swap the target node for the replacement once the model has loaded.
pub fn apply_vehicle_swap(
    mut commands: Commands,
    scenes: Res<Assets<Scene>>,
    server: Option<Res<AssetServer>>,
    mut state: ResMut<VehicleSwapState>,
    nodes: Query<(&Transform, &Parent)>,
    mut finished: EventWriter<VehicleSwapFinished>,
) {
    let (Some(&target), Some(model)) = (state.swap.target(), state.model.clone()) else {
        return;
    };

    match scene_load_outcome(&model.handle, &scenes, server.as_deref()) {
        None => {}
        Some(LoadOutcome::Failed(reason)) => {
            let load_error = || SceneryError::AssetLoad {
                path: model.path.clone(),
                reason: reason.clone(),
            };
            error!("Vehicle swap: {}; keeping the original vehicle", load_error());
            state.swap.fail(load_error());
            finished.send(VehicleSwapFinished(Err(load_error())));
        }
        Some(LoadOutcome::Loaded) => {
            let Ok((original, parent)) = nodes.get(target.node) else {
                warn!("Vehicle swap: vehicle node vanished before the model loaded");
                state.swap.target_lost();
                return;
            };
            if parent.get() != target.parent {
                warn!("Vehicle swap: vehicle node was re-parented, searching again");
                state.swap.target_lost();
                return;
            }

            let transform = Transform {
                translation: original.translation,
                rotation: original.rotation,
                scale: Vec3::splat(model.scale),
            };
            let replacement = commands
                .spawn((
                    ReplacementVehicle,
                    Name::new("replacement_vehicle"),
                    SceneRoot(model.handle),
                    transform,
                ))
                .set_parent(target.parent)
                .id();
            commands.entity(target.parent).insert(SwappedVehicle);
            commands.entity(target.node).despawn_recursive();

            info!("Vehicle swap: replaced vehicle with {}", model.path);
            state.swap.complete();
            finished.send(VehicleSwapFinished(Ok(replacement)));
        }
    }
}
