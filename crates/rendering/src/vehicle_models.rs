//! Cached GLB models for the vehicle skins in `VehicleRoster`.

use std::collections::BTreeMap;

use bevy::prelude::*;

use scenery::catalog_load::LoadOutcome;
use scenery::vehicles::VehicleRoster;

use crate::model_loading::{load_scene, scene_load_outcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelStatus {
    Loading,
    Ready,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct VehicleModel {
    pub handle: Handle<Scene>,
    pub status: ModelStatus,
}

/// Vehicle models keyed by skin id.
#[derive(Resource, Default)]
pub struct VehicleModelLibrary {
    models: BTreeMap<String, VehicleModel>,
}

impl VehicleModelLibrary {
    pub fn insert(&mut self, id: impl Into<String>, handle: Handle<Scene>) {
        self.models.insert(
            id.into(),
            VehicleModel {
                handle,
                status: ModelStatus::Loading,
            },
        );
    }

    pub fn get(&self, id: &str) -> Option<&VehicleModel> {
        self.models.get(id)
    }

    /// Models in skin id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &VehicleModel)> {
        self.models.iter().map(|(id, m)| (id.as_str(), m))
    }

    /// Update loading models from `check_load`; returns the ids that settled.
    pub fn poll(
        &mut self,
        mut check_load: impl FnMut(&Handle<Scene>) -> Option<LoadOutcome>,
    ) -> Vec<(String, ModelStatus)> {
        let mut settled = Vec::new();
        for (id, model) in self
            .models
            .iter_mut()
            .filter(|(_, m)| m.status == ModelStatus::Loading)
        {
            let status = match check_load(&model.handle) {
                Some(LoadOutcome::Loaded) => ModelStatus::Ready,
                Some(LoadOutcome::Failed(reason)) => ModelStatus::Failed(reason),
                None => continue,
            };
            model.status = status.clone();
            settled.push((id.clone(), status));
        }
        settled
    }
}

/// Startup system: request the model of every enabled skin.
pub fn load_vehicle_models(
    asset_server: Res<AssetServer>,
    roster: Res<VehicleRoster>,
    mut library: ResMut<VehicleModelLibrary>,
) {
    for (id, skin) in roster.enabled() {
        info!("Vehicles: loading {} ({})", skin.name, skin.glb_file);
        library.insert(id, load_scene(&asset_server, &skin.glb_file));
    }
}

pub fn poll_vehicle_models(
    scenes: Res<Assets<Scene>>,
    server: Option<Res<AssetServer>>,
    mut library: ResMut<VehicleModelLibrary>,
) {
    let server = server.as_deref();
    for (id, status) in library.poll(|handle| scene_load_outcome(handle, &scenes, server)) {
        match status {
            ModelStatus::Ready => info!("Vehicles: {id} loaded"),
            ModelStatus::Failed(reason) => error!("Vehicles: failed to load {id}: {reason}"),
            ModelStatus::Loading => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_moves_to_ready() {
        let mut library = VehicleModelLibrary::default();
        let handle = Handle::<Scene>::weak_from_u128(10);
        library.insert("McQueenCars4", handle.clone());
        assert_eq!(
            library.get("McQueenCars4").unwrap().status,
            ModelStatus::Loading
        );

        let settled = library.poll(|_| Some(LoadOutcome::Loaded));
        assert_eq!(
            settled,
            vec![("McQueenCars4".to_string(), ModelStatus::Ready)]
        );
        let model = library.get("McQueenCars4").unwrap();
        assert_eq!(model.status, ModelStatus::Ready);
        assert_eq!(model.handle, handle);
        assert!(library.get("Unknown").is_none());
    }

    #[test]
    fn test_one_failure_does_not_affect_others() {
        let mut library = VehicleModelLibrary::default();
        let good = Handle::<Scene>::weak_from_u128(1);
        let bad = Handle::<Scene>::weak_from_u128(2);
        library.insert("good", good.clone());
        library.insert("bad", bad);

        library.poll(|h| {
            Some(if *h == good {
                LoadOutcome::Loaded
            } else {
                LoadOutcome::Failed("404".to_string())
            })
        });
        assert_eq!(library.get("good").unwrap().status, ModelStatus::Ready);
        assert_eq!(
            library.get("bad").unwrap().status,
            ModelStatus::Failed("404".to_string())
        );
        // Settled models are not polled again.
        assert!(library.poll(|_| panic!("re-polled")).is_empty());
    }

    #[test]
    fn test_iter_in_id_order() {
        let mut library = VehicleModelLibrary::default();
        library.insert("b", Handle::default());
        library.insert("a", Handle::default());
        let ids: Vec<&str> = library.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, ["a", "b"]);
    }
}
