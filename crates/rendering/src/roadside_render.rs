//! Spawning and despawning of roadside decorations.
//!
//! The policy lives in `scenery::roadside::RoadsideManager`; this module
//! drives it once per frame from `RoadProgress` and turns its requests into
//! scene entities. Each decoration is its own `SceneRoot` sharing the
//! catalog's scene handle, so the loaded template is never touched.

use bevy::prelude::*;

use scenery::config::RoadsideConfig;
use scenery::placement::Placement;
use scenery::roadside::{DecorationSink, LoadedAsset, RoadsideManager};
use scenery::scenery_rng::SceneryRng;
use scenery::RoadProgress;

use crate::model_loading::DecorationCatalog;

/// Marker for decoration entities placed by the roadside manager.
#[derive(Component)]
pub struct Decoration;

#[derive(Event, Debug, Clone, PartialEq)]
pub struct DecorationPlaced {
    pub entity: Entity,
    pub name: String,
    pub translation: Vec3,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecorationRetired {
    pub entity: Entity,
}

/// Host request to drop every decoration (a new run starting from progress 0).
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ClearRoadside;

/// Owner of every placed decoration. Only the systems in this module write it.
#[derive(Resource, Default)]
pub struct RoadsideScenery {
    manager: RoadsideManager<Entity>,
}

impl RoadsideScenery {
    pub fn manager(&self) -> &RoadsideManager<Entity> {
        &self.manager
    }
}

/// Applies manager requests through `Commands` and collects the events.
struct SceneSink<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    placed: Vec<DecorationPlaced>,
    retired: Vec<DecorationRetired>,
}

impl DecorationSink for SceneSink<'_, '_, '_> {
    type Template = Handle<Scene>;
    type Handle = Entity;

    fn place(&mut self, asset: &LoadedAsset<Handle<Scene>>, placement: &Placement) -> Entity {
        let entity = self
            .commands
            .spawn((
                Decoration,
                Name::new(asset.entry.name.clone()),
                SceneRoot(asset.template.clone()),
                placement.transform(),
            ))
            .id();
        debug!(
            "Roadside: placed {} at x={:.1}, z={:.1}",
            asset.entry.name, placement.translation.x, placement.translation.z
        );
        self.placed.push(DecorationPlaced {
            entity,
            name: asset.entry.name.clone(),
            translation: placement.translation,
        });
        entity
    }

    fn remove(&mut self, entity: Entity) {
        // The host may already have despawned it (level reset etc.).
        if let Some(decoration) = self.commands.get_entity(entity) {
            decoration.despawn_recursive();
        }
        self.retired.push(DecorationRetired { entity });
    }
}

/// Per-frame placement and retirement of roadside decorations.
#[allow(clippy::too_many_arguments)]
pub fn update_roadside_scenery(
    mut commands: Commands,
    progress: Res<RoadProgress>,
    config: Res<RoadsideConfig>,
    catalog: Res<DecorationCatalog>,
    mut scenery: ResMut<RoadsideScenery>,
    mut rng: ResMut<SceneryRng>,
    mut placed_events: EventWriter<DecorationPlaced>,
    mut retired_events: EventWriter<DecorationRetired>,
) {
    let mut sink = SceneSink {
        commands: &mut commands,
        placed: Vec::new(),
        retired: Vec::new(),
    };
    scenery.manager.tick(
        progress.index,
        progress.position,
        &config,
        catalog.assets(),
        &mut rng.0,
        &mut sink,
    );

    let SceneSink {
        placed, retired, ..
    } = sink;
    if !retired.is_empty() {
        retired_events.send_batch(retired);
    }
    if !placed.is_empty() {
        placed_events.send_batch(placed);
    }
}

/// Remove every decoration when the host sends `ClearRoadside`.
pub fn clear_roadside_scenery(
    mut commands: Commands,
    mut requests: EventReader<ClearRoadside>,
    mut scenery: ResMut<RoadsideScenery>,
    mut retired_events: EventWriter<DecorationRetired>,
) {
    if requests.read().count() == 0 {
        return;
    }

    let mut sink = SceneSink {
        commands: &mut commands,
        placed: Vec::new(),
        retired: Vec::new(),
    };
    let removed = scenery.manager.clear(&mut sink);
    if removed > 0 {
        info!("Roadside: cleared {removed} decorations");
        retired_events.send_batch(sink.retired);
    }
}
