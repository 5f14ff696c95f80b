//! Engine-independent core of the roadside content layer: catalog and
//! vehicle data, placement policy, load tracking and swap timing.

use bevy::prelude::*;

pub mod catalog;
pub mod catalog_load;
pub mod config;
pub mod error;
pub mod placement;
pub mod roadside;
pub mod scenery_rng;
pub mod vehicle_swap;
pub mod vehicles;

use catalog::DecorationCatalogDef;
use config::{RoadsideConfig, VehicleSwapConfig};
use scenery_rng::SceneryRng;
use vehicles::VehicleRoster;

/// Where the player is along the road. The host writes this once per frame.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct RoadProgress {
    /// Monotonically increasing segment counter.
    pub index: u64,
    /// Road reference point; decorations are placed relative to it.
    pub position: Vec3,
}

/// Registers configuration and data resources. Anything the host inserted
/// before adding the plugin is left untouched.
pub struct SceneryPlugin;

impl Plugin for SceneryPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RoadsideConfig>()
            .init_resource::<VehicleSwapConfig>()
            .init_resource::<RoadProgress>()
            .init_resource::<SceneryRng>();

        if !app.world().contains_resource::<DecorationCatalogDef>() {
            let catalog = DecorationCatalogDef::builtin().unwrap_or_else(|e| {
                error!("Catalog: {e}; roadside decorations disabled");
                DecorationCatalogDef::default()
            });
            app.insert_resource(catalog);
        }

        if !app.world().contains_resource::<VehicleRoster>() {
            let roster = VehicleRoster::builtin().unwrap_or_else(|e| {
                error!("Vehicles: {e}; no vehicle skins available");
                VehicleRoster::default()
            });
            app.insert_resource(roster);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plugin_installs_builtin_data() {
        let mut app = App::new();
        app.add_plugins(SceneryPlugin);
        let world = app.world();
        assert_eq!(world.resource::<DecorationCatalogDef>().entries.len(), 12);
        assert_eq!(world.resource::<VehicleRoster>().len(), 3);
        assert_eq!(world.resource::<RoadProgress>().index, 0);
        assert_eq!(world.resource::<RoadsideConfig>().max_active, 15);
    }

    #[test]
    fn test_plugin_keeps_host_overrides() {
        let mut app = App::new();
        app.insert_resource(DecorationCatalogDef::default())
            .insert_resource(RoadsideConfig {
                max_active: 2,
                ..Default::default()
            })
            .add_plugins(SceneryPlugin);
        let world = app.world();
        assert!(world.resource::<DecorationCatalogDef>().is_empty());
        assert_eq!(world.resource::<RoadsideConfig>().max_active, 2);
    }
}
