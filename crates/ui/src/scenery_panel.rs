//! Roadside scenery debug panel.
//!
//! Provides an egui window with:
//! - Road progress and active decoration count
//! - Catalog load progress and skipped entries
//! - Vehicle swap phase and the vehicle skin library
//! - Keybind (F3) to toggle the panel

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use rendering::model_loading::DecorationCatalog;
use rendering::roadside_render::{ClearRoadside, RoadsideScenery};
use rendering::vehicle_models::{ModelStatus, VehicleModelLibrary};
use rendering::vehicle_swap::VehicleSwapState;
use scenery::config::RoadsideConfig;
use scenery::vehicles::VehicleRoster;
use scenery::RoadProgress;

// =============================================================================
// Resources
// =============================================================================

#[derive(Resource)]
pub struct SceneryPanelVisible(pub bool);

impl Default for SceneryPanelVisible {
    fn default() -> Self {
        Self(true)
    }
}

// =============================================================================
// Systems
// =============================================================================

pub fn toggle_scenery_panel(
    keys: Res<ButtonInput<KeyCode>>,
    mut visible: ResMut<SceneryPanelVisible>,
) {
    if keys.just_pressed(KeyCode::F3) {
        visible.0 = !visible.0;
    }
}

#[allow(clippy::too_many_arguments)]
pub fn scenery_panel_ui(
    mut contexts: EguiContexts,
    mut visible: ResMut<SceneryPanelVisible>,
    progress: Res<RoadProgress>,
    config: Res<RoadsideConfig>,
    catalog: Res<DecorationCatalog>,
    scenery: Res<RoadsideScenery>,
    swap: Res<VehicleSwapState>,
    library: Res<VehicleModelLibrary>,
    roster: Res<VehicleRoster>,
    mut clear: EventWriter<ClearRoadside>,
) {
    if !visible.0 {
        return;
    }

    let mut open = true;
    egui::Window::new("Roadside Scenery")
        .open(&mut open)
        .resizable(false)
        .default_width(280.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.heading(format!("Segment {}", progress.index));
            ui.label(format!(
                "Decorations: {} / {}",
                scenery.manager().active_count(),
                config.max_active
            ));
            ui.label(format!(
                "Last placement at {}",
                scenery.manager().last_placement_progress()
            ));
            if ui.button("Clear decorations").clicked() {
                clear.send(ClearRoadside);
            }

            ui.separator();

            // --- Catalog ---
            let load = catalog.progress();
            ui.label(format!(
                "Catalog: {} loaded, {} failed, {} pending",
                load.loaded, load.failed, load.pending
            ));
            if !catalog.skipped().is_empty() {
                ui.label(format!("Skipped: {}", catalog.skipped().join(", ")));
            }

            ui.separator();

            // --- Vehicle ---
            ui.label(format!("Vehicle swap: {}", swap.swap.label()));
            for (id, model) in library.iter() {
                let name = roster.get(id).map_or(id, |skin| skin.name.as_str());
                ui.label(format!(
                    "{name} ({id}): {}",
                    model_status_label(&model.status)
                ));
            }
        });

    if !open {
        visible.0 = false;
    }
}

fn model_status_label(status: &ModelStatus) -> &'static str {
    match status {
        ModelStatus::Loading => "loading",
        ModelStatus::Ready => "ready",
        ModelStatus::Failed(_) => "failed",
    }
}
