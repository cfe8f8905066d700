//! Debug domain: debug systems for hotkeys, gizmos and the overlay.

use bevy::prelude::*;

use crate::animation::GateWindows;
use crate::debug::DebugState;
use avian3d::prelude::*;

use crate::locomotion::{CharacterShape, LocomotionController, MovementIntent, Player};

const RESPAWN_POINT: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// Marker for debug info overlay
#[derive(Component, Debug)]
pub struct DebugInfoOverlay;

pub(crate) fn handle_debug_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    mut players: Query<
        (
            &mut Transform,
            &mut LocomotionController,
            &mut CharacterShape,
            &mut Collider,
        ),
        With<Player>,
    >,
) {
    if keyboard.just_pressed(KeyCode::F1) {
        debug_state.show_info = !debug_state.show_info;
        info!("[DEBUG] State overlay {}", on_off(debug_state.show_info));
    }

    if keyboard.just_pressed(KeyCode::F2) {
        debug_state.show_sensors = !debug_state.show_sensors;
        info!("[DEBUG] Sensor gizmos {}", on_off(debug_state.show_sensors));
    }

    if keyboard.just_pressed(KeyCode::F3) {
        for (mut transform, mut controller, mut shape, mut collider) in &mut players {
            transform.translation = RESPAWN_POINT;
            transform.rotation = Quat::IDENTITY;
            controller.initialize(0.0);
            if let Some(radius) = controller.base_radius() {
                shape.radius = radius;
                *collider = shape.collider();
            }
        }
        info!("[DEBUG] Player respawned at {:?}", RESPAWN_POINT);
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "ON" } else { "OFF" }
}

pub(crate) fn draw_sensor_gizmos(
    mut gizmos: Gizmos,
    players: Query<(&Transform, &LocomotionController), With<Player>>,
) {
    for (transform, controller) in &players {
        controller.ground_sensor.draw(&mut gizmos, transform.translation);
        controller.water_sensor.draw(&mut gizmos, transform.translation);
    }
}

pub(crate) fn update_debug_info_overlay(
    mut commands: Commands,
    debug_state: Res<DebugState>,
    intent: Res<MovementIntent>,
    player_query: Query<(&Transform, &LocomotionController, Option<&GateWindows>), With<Player>>,
    mut overlay_query: Query<&mut Text, With<DebugInfoOverlay>>,
    existing_overlay: Query<Entity, With<DebugInfoOverlay>>,
) {
    if !debug_state.show_info {
        for entity in &existing_overlay {
            commands.entity(entity).despawn();
        }
        return;
    }

    if existing_overlay.is_empty() {
        spawn_debug_info_overlay(&mut commands);
        return;
    }

    let (Some((transform, controller, gates)), Ok(mut text)) =
        (player_query.iter().next(), overlay_query.single_mut())
    else {
        return;
    };

    let pos = transform.translation;
    let vel = controller.velocity();
    let lock = gates.map_or(0.0, |gates| gates.remaining());
    **text = format!(
        "State: {:?}\nPos: ({:.2}, {:.2}, {:.2})\nVel: ({:.2}, {:.2}, {:.2})\nSpeed: {:.2}  Yaw: {:.2}\n\
         Run: {}  Auto-run: {}  Device: {:?}\nMove: {}  Jump: {}  Lock: {:.2}s",
        controller.state(),
        pos.x,
        pos.y,
        pos.z,
        vel.x,
        vel.y,
        vel.z,
        controller.speed(),
        controller.yaw(),
        intent.running(),
        intent.auto_run(),
        intent.device(),
        controller.can_move(),
        controller.can_jump(),
        lock,
    );
}

fn spawn_debug_info_overlay(commands: &mut Commands) {
    commands.spawn((
        DebugInfoOverlay,
        Text::new("Loading..."),
        TextFont {
            font_size: 12.0,
            ..default()
        },
        TextColor(Color::srgb(0.8, 0.9, 0.8)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(20.0),
            bottom: Val::Px(20.0),
            padding: UiRect::all(Val::Px(8.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
        ZIndex(500),
    ));
}
