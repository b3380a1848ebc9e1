use crate::Scene;
use bevy::{
    color::palettes::css::{BLUE, RED},
    diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin},
    prelude::*,
};
use physics::shapes::Shape;

#[derive(Component)]
pub struct HudText;

/// Physics runs in screen space (origin top left, y down) while the 2D camera is centred on the
/// origin with y up.
pub fn screen_to_world(world_size: Vec2, point: Vec2) -> Vec2 {
    Vec2::new(point.x - world_size.x * 0.5, world_size.y * 0.5 - point.y)
}

pub fn setup_rendering(mut commands: Commands) {
    commands.spawn(Camera2dBundle::default());

    let style = TextStyle {
        font_size: 20.0,
        color: Color::srgb_u8(200, 200, 200),
        ..default()
    };
    commands.spawn((
        TextBundle::from_sections([
            TextSection::new("", style.clone()),
            TextSection::new("", style),
        ])
        .with_style(Style {
            position_type: PositionType::Absolute,
            top: Val::Px(0.0),
            left: Val::Px(0.0),
            ..default()
        }),
        HudText,
    ));
}

pub fn draw_scene_system(scene: Res<Scene>, mut gizmos: Gizmos) {
    let world_size = scene.config().world_size;
    let pointer = screen_to_world(world_size, scene.pointer());

    for body in scene.bodies() {
        let position = screen_to_world(world_size, body.position);
        match &body.shape {
            Shape::Circle(circle) => {
                gizmos.circle_2d(position, circle.radius, Color::WHITE);
            }
        }
        if body.held {
            gizmos.line_2d(pointer, position, RED);
        }
    }

    for contact in scene.contacts().iter() {
        gizmos.line_2d(
            screen_to_world(world_size, contact.point_a),
            screen_to_world(world_size, contact.point_b),
            BLUE,
        );
    }
}

pub fn update_hud_system(
    scene: Res<Scene>,
    diagnostics: Res<DiagnosticsStore>,
    mut query: Query<&mut Text, With<HudText>>,
) {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps| fps.smoothed())
        .unwrap_or(0.0);

    for mut text in query.iter_mut() {
        text.sections[0].value = format!("{:.0} FPS\n", fps);
        text.sections[1].value = format!("{}", scene.len());
    }
}

#[cfg(test)]
mod test {
    use super::screen_to_world;
    use bevy::math::Vec2;

    #[test]
    fn test_screen_to_world() {
        let size = Vec2::new(1024.0, 768.0);
        assert_eq!(Vec2::new(-512.0, 384.0), screen_to_world(size, Vec2::ZERO));
        assert_eq!(Vec2::ZERO, screen_to_world(size, Vec2::new(512.0, 384.0)));
        assert_eq!(Vec2::new(512.0, -384.0), screen_to_world(size, size));
    }
}
