use bevy::prelude::*;
use bevy::window::PresentMode;

use rendering::roadside_render::ClearRoadside;
use scenery::config::RoadsideConfig;
use scenery::scenery_rng::SceneryRng;
use scenery::vehicles::VehicleRoster;
use scenery::RoadProgress;

/// Forward speed of the placeholder car, world units per second.
const DRIVE_SPEED: f32 = 30.0;
const CAMERA_OFFSET: Vec3 = Vec3::new(0.0, 8.0, -18.0);
const ROAD_WIDTH: f32 = 8.0;
const ROAD_LENGTH: f32 = 100_000.0;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Roadside".to_string(),
            resolution: (1280.0, 720.0).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }));

    // Reproducible layouts: ROADSIDE_SEED=1234
    if let Ok(seed) = std::env::var("ROADSIDE_SEED") {
        match seed.parse::<u64>() {
            Ok(seed) => {
                app.insert_resource(SceneryRng::from_seed_u64(seed));
            }
            Err(e) => warn!("Ignoring ROADSIDE_SEED={seed}: {e}"),
        }
    }

    app.add_plugins((
        scenery::SceneryPlugin,
        rendering::RenderingPlugin,
        ui::UiPlugin,
    ))
    .add_systems(Startup, setup_scene)
    .add_systems(
        Update,
        (drive_player, follow_camera, reset_run)
            .chain()
            .before(rendering::roadside_render::clear_roadside_scenery),
    );

    app.run();
}

/// Root of the host's placeholder car.
#[derive(Component)]
struct PlayerVehicle;

#[derive(Component)]
struct FollowCamera;

fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    roster: Res<VehicleRoster>,
) {
    commands.spawn((
        FollowCamera,
        Camera3d::default(),
        Transform::from_translation(CAMERA_OFFSET).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 30.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        Name::new("road"),
        Mesh3d(meshes.add(Plane3d::default().mesh().size(ROAD_WIDTH, ROAD_LENGTH))),
        MeshMaterial3d(materials.add(Color::srgb(0.25, 0.25, 0.28))),
        Transform::from_xyz(0.0, 0.0, ROAD_LENGTH / 2.0 - 50.0),
    ));

    // Paint the placeholder in the first skin's body color.
    let body_color = roster
        .enabled()
        .find_map(|(_, skin)| skin.basic_colors())
        .map_or(Color::srgb(0.8, 0.1, 0.1), |colors| colors.body_color());

    // The vehicle swap looks for a mesh whose parent is named like a vehicle.
    commands
        .spawn((
            Name::new("player_vehicle"),
            PlayerVehicle,
            Transform::from_xyz(0.0, 0.5, 0.0),
            Visibility::default(),
        ))
        .with_children(|car| {
            car.spawn((
                Mesh3d(meshes.add(Cuboid::new(1.8, 1.0, 4.0))),
                MeshMaterial3d(materials.add(body_color)),
                Transform::default(),
            ));
        });
}

fn drive_player(
    time: Res<Time>,
    config: Res<RoadsideConfig>,
    mut progress: ResMut<RoadProgress>,
    mut player: Query<&mut Transform, With<PlayerVehicle>>,
) {
    let Ok(mut transform) = player.get_single_mut() else {
        return;
    };
    transform.translation.z += DRIVE_SPEED * time.delta_secs();

    let segment = config.segment_length.max(f32::EPSILON);
    progress.index = (transform.translation.z.max(0.0) / segment) as u64;
    progress.position = Vec3::ZERO;
}

fn follow_camera(
    player: Query<&Transform, (With<PlayerVehicle>, Without<FollowCamera>)>,
    mut camera: Query<&mut Transform, With<FollowCamera>>,
) {
    let (Ok(car), Ok(mut cam)) = (player.get_single(), camera.get_single_mut()) else {
        return;
    };
    cam.translation = car.translation + CAMERA_OFFSET;
    cam.look_at(car.translation + Vec3::Z * 10.0, Vec3::Y);
}

/// R restarts the run from the beginning of the road.
fn reset_run(
    keys: Res<ButtonInput<KeyCode>>,
    mut progress: ResMut<RoadProgress>,
    mut player: Query<&mut Transform, With<PlayerVehicle>>,
    mut clear: EventWriter<ClearRoadside>,
) {
    if !keys.just_pressed(KeyCode::KeyR) {
        return;
    }
    if let Ok(mut transform) = player.get_single_mut() {
        transform.translation.z = 0.0;
    }
    *progress = RoadProgress::default();
    clear.send(ClearRoadside);
    info!("Roadside: run reset");
}
