//! UI domain: controls hint that follows the active input device.

use bevy::prelude::*;

use crate::locomotion::{DeviceClass, MovementIntent};

const HINT_PADDING: f32 = 16.0;

/// Marker for the controls hint text
#[derive(Component)]
pub struct ControlsHint;

pub(crate) fn controls_text(device: DeviceClass) -> &'static str {
    match device {
        DeviceClass::KeyboardMouse => {
            "WASD move | Space jump | Shift run | R auto-run"
        }
        DeviceClass::Gamepad => "Left stick move | A jump | X run | Y auto-run",
    }
}

pub(crate) fn spawn_controls_hint(mut commands: Commands) {
    commands.spawn((
        ControlsHint,
        Text::new(controls_text(DeviceClass::default())),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::srgb(0.9, 0.9, 0.9)),
        Node {
            position_type: PositionType::Absolute,
            right: Val::Px(HINT_PADDING),
            top: Val::Px(HINT_PADDING),
            padding: UiRect::all(Val::Px(6.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.1, 0.1, 0.1, 0.6)),
    ));
}

pub(crate) fn update_controls_hint(
    intent: Res<MovementIntent>,
    mut shown: Local<Option<DeviceClass>>,
    mut hints: Query<&mut Text, With<ControlsHint>>,
) {
    let device = intent.device();
    if *shown == Some(device) {
        return;
    }
    for mut text in &mut hints {
        **text = controls_text(device).to_string();
    }
    *shown = Some(device);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_matches_device() {
        assert!(controls_text(DeviceClass::KeyboardMouse).contains("WASD"));
        assert!(controls_text(DeviceClass::Gamepad).contains("stick"));
    }
}
