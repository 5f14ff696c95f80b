use bevy::prelude::*;
use bevy_egui::EguiPlugin;

pub mod scenery_panel;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .init_resource::<scenery_panel::SceneryPanelVisible>()
            .add_systems(
                Update,
                (
                    scenery_panel::toggle_scenery_panel,
                    scenery_panel::scenery_panel_ui,
                ),
            );
    }
}
