//! Locomotion domain: input sampling into the movement intent.

use bevy::prelude::*;

use crate::content::ControllerConfig;
use crate::locomotion::{DeviceClass, InputPhase, MovementIntent};

const KEYBOARD_SCHEME: &str = "Keyboard&Mouse";
const STICK_DEAD_ZONE: f32 = 0.1;

/// Phase for a button from its edge state, if it changed this frame.
fn button_phase(just_pressed: bool, just_released: bool) -> Option<InputPhase> {
    if just_pressed {
        Some(InputPhase::Started)
    } else if just_released {
        Some(InputPhase::Canceled)
    } else {
        None
    }
}

/// Phase for an axis moving from `previous` to `current`.
fn axis_phase(previous: Vec2, current: Vec2) -> Option<InputPhase> {
    match (previous == Vec2::ZERO, current == Vec2::ZERO) {
        (true, false) => Some(InputPhase::Started),
        (false, true) => Some(InputPhase::Canceled),
        (false, false) if previous != current => Some(InputPhase::Performed),
        _ => None,
    }
}

fn keyboard_axis(keyboard: &ButtonInput<KeyCode>) -> Vec2 {
    let mut axis = Vec2::ZERO;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        axis.x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        axis.x += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        axis.y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        axis.y += 1.0;
    }
    axis.normalize_or_zero()
}

pub(crate) fn read_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    gamepads: Query<&Gamepad>,
    config: Res<ControllerConfig>,
    mut intent: ResMut<MovementIntent>,
) {
    let tuning = &config.locomotion;
    let gamepad = gamepads.iter().next();

    // Whichever device produced input this frame becomes the active scheme.
    let gamepad_active = gamepad.is_some_and(|pad| {
        pad.left_stick().length() > STICK_DEAD_ZONE || pad.get_just_pressed().next().is_some()
    });
    let keyboard_active = keyboard.get_just_pressed().next().is_some();
    let device = if gamepad_active {
        DeviceClass::Gamepad
    } else if keyboard_active {
        DeviceClass::KeyboardMouse
    } else {
        intent.device()
    };
    if device != intent.device() {
        let scheme = match device {
            DeviceClass::Gamepad => tuning.gamepad_scheme.as_str(),
            DeviceClass::KeyboardMouse => KEYBOARD_SCHEME,
        };
        intent.on_control_scheme_changed(scheme, &tuning.gamepad_scheme);
        info!("Control scheme changed: {}", scheme);
    }

    let axis = match (intent.device(), gamepad) {
        (DeviceClass::Gamepad, Some(pad)) => {
            let stick = pad.left_stick();
            if stick.length() > STICK_DEAD_ZONE {
                stick.clamp_length_max(1.0)
            } else {
                Vec2::ZERO
            }
        }
        _ => keyboard_axis(&keyboard),
    };
    if let Some(phase) = axis_phase(intent.move_axis(), axis) {
        intent.on_move(phase, axis);
    }

    let pad_edges = |button: GamepadButton| {
        gamepad.map_or((false, false), |pad| {
            (pad.just_pressed(button), pad.just_released(button))
        })
    };

    let (pad_pressed, pad_released) = pad_edges(GamepadButton::South);
    if let Some(phase) = button_phase(
        keyboard.just_pressed(KeyCode::Space) || pad_pressed,
        keyboard.just_released(KeyCode::Space) || pad_released,
    ) {
        intent.on_jump(phase);
    }

    let (pad_pressed, pad_released) = pad_edges(GamepadButton::West);
    if let Some(phase) = button_phase(
        keyboard.just_pressed(KeyCode::ShiftLeft) || pad_pressed,
        keyboard.just_released(KeyCode::ShiftLeft) || pad_released,
    ) {
        intent.on_run(phase, tuning.run_key_mode);
    }

    let (pad_pressed, pad_released) = pad_edges(GamepadButton::North);
    if let Some(phase) = button_phase(
        keyboard.just_pressed(KeyCode::KeyR) || pad_pressed,
        keyboard.just_released(KeyCode::KeyR) || pad_released,
    ) {
        intent.on_auto_run(phase);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_phase_edges() {
        assert_eq!(axis_phase(Vec2::ZERO, Vec2::Y), Some(InputPhase::Started));
        assert_eq!(axis_phase(Vec2::Y, Vec2::X), Some(InputPhase::Performed));
        assert_eq!(axis_phase(Vec2::Y, Vec2::ZERO), Some(InputPhase::Canceled));
        assert_eq!(axis_phase(Vec2::Y, Vec2::Y), None);
        assert_eq!(axis_phase(Vec2::ZERO, Vec2::ZERO), None);
    }

    #[test]
    fn test_button_phase_prefers_press() {
        assert_eq!(button_phase(true, false), Some(InputPhase::Started));
        assert_eq!(button_phase(false, true), Some(InputPhase::Canceled));
        assert_eq!(button_phase(false, false), None);
    }
}
