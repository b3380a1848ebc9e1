mod frame_clock;
mod render;
mod settings;

use bevy::{
    diagnostic::FrameTimeDiagnosticsPlugin,
    prelude::*,
    window::{PresentMode, PrimaryWindow, WindowResolution},
};
use frame_clock::FrameClock;
use physics::scene::PhysicsScene;
use settings::{load_or_create_settings, report_settings_system, SandboxSettings, SETTINGS_PATH};

#[derive(Resource, Deref, DerefMut)]
pub struct Scene(PhysicsScene);

fn input_system(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    settings: Res<SandboxSettings>,
    mut scene: ResMut<Scene>,
) {
    // keep the last known position while the cursor is outside the window
    let pointer = windows
        .get_single()
        .ok()
        .and_then(|window| window.cursor_position())
        .unwrap_or_else(|| scene.pointer());
    scene.set_pointer(pointer);

    if keys.just_pressed(KeyCode::Space) {
        scene.spawn(pointer, Vec2::ZERO, settings.large_radius);
    }

    if keys.pressed(KeyCode::KeyP) {
        scene.spawn(pointer, Vec2::ZERO, settings.small_radius);
    }

    if mouse.just_pressed(MouseButton::Right) {
        scene.clear();
    }

    if mouse.just_pressed(MouseButton::Left) {
        scene.press_pointer(pointer);
    } else if mouse.just_released(MouseButton::Left) {
        scene.release_pointer();
    }
}

fn physics_update_system(
    keys: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut clock: ResMut<FrameClock>,
    mut scene: ResMut<Scene>,
) {
    // T pauses the sim
    if keys.just_released(KeyCode::KeyT) {
        clock.paused = !clock.paused;
        info!("paused: {}", clock.paused);
    }

    let mut dilation_change = None;
    if keys.just_released(KeyCode::BracketLeft) {
        dilation_change = Some(clock.time_dilation() * 0.5);
    }

    if keys.just_released(KeyCode::BracketRight) {
        dilation_change = Some(clock.time_dilation() * 2.0);
    }

    if keys.just_released(KeyCode::Backslash) {
        dilation_change = Some(1.0);
    }

    if let Some(dilation) = dilation_change {
        clock.set_time_dilation(dilation);
        info!("time dilation: {}", dilation);
    }

    clock.update(time.delta());

    let frame_secs = if clock.paused {
        // Y steps once when paused
        keys.just_released(KeyCode::KeyY).then(|| clock.step_secs())
    } else {
        Some(clock.frame_secs())
    };

    if let Some(frame_secs) = frame_secs {
        scene.update(frame_secs);
    }
}

fn main() {
    let (settings, settings_source) = load_or_create_settings(SETTINGS_PATH);
    let world_size = settings.simulation.world_size;

    App::new()
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(Scene(PhysicsScene::new(settings.simulation.clone())))
        .insert_resource(FrameClock::new(settings.max_frame_secs))
        .insert_resource(settings)
        .insert_resource(settings_source)
        .add_plugins((
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Physics engine".into(),
                    resolution: WindowResolution::new(world_size.x, world_size.y),
                    resizable: false,
                    present_mode: PresentMode::AutoNoVsync,
                    ..default()
                }),
                ..default()
            }),
            FrameTimeDiagnosticsPlugin,
        ))
        .add_systems(Startup, (report_settings_system, render::setup_rendering))
        .add_systems(
            Update,
            (
                input_system,
                physics_update_system,
                render::draw_scene_system,
                render::update_hud_system,
            )
                .chain(),
        )
        .run();
}
