use bevy::prelude::*;

pub mod model_loading;
pub mod roadside_render;
pub mod vehicle_models;
pub mod vehicle_swap;


use model_loading::{CatalogReady, DecorationCatalog};
use roadside_render::{ClearRoadside, DecorationPlaced, DecorationRetired, RoadsideScenery};
use vehicle_models::VehicleModelLibrary;
use vehicle_swap::{VehicleSwapFinished, VehicleSwapState};

/// Scene-side half of the roadside layer. Expects `scenery::SceneryPlugin`
/// to have been added first.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DecorationCatalog>()
            .init_resource::<RoadsideScenery>()
            .init_resource::<VehicleModelLibrary>()
            .init_resource::<VehicleSwapState>()
            .add_event::<CatalogReady>()
            .add_event::<DecorationPlaced>()
            .add_event::<DecorationRetired>()
            .add_event::<ClearRoadside>()
            .add_event::<VehicleSwapFinished>();

        // Asset pre-load
        app.add_systems(
            Startup,
            (
                model_loading::start_catalog_load,
                vehicle_models::load_vehicle_models,
            ),
        );
        app.add_systems(
            Update,
            (
                model_loading::poll_catalog_load,
                vehicle_models::poll_vehicle_models,
            ),
        );

        // Roadside decorations
        app.add_systems(
            Update,
            (
                roadside_render::clear_roadside_scenery,
                roadside_render::update_roadside_scenery,
            )
                .chain()
                .after(model_loading::poll_catalog_load),
        );

        // Player vehicle model swap
        app.add_systems(
            Update,
            (
                vehicle_swap::drive_vehicle_swap,
                vehicle_swap::request_replacement_model,
                vehicle_swap::apply_vehicle_swap,
            )
                .chain()
                .after(vehicle_models::poll_vehicle_models),
        );
    }
}
