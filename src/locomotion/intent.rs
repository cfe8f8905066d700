//! Locomotion domain: player intent snapshot fed by input callbacks.
//!
//! Input handlers may fire any number of times between simulation ticks. They
//! only flip fields here; the controller tick reads the snapshot and consumes
//! the one-shot jump request.

use bevy::prelude::*;

use crate::locomotion::RunKeyMode;

/// Phase of an input notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputPhase {
    Started,
    Performed,
    Canceled,
}

/// Class of the device currently driving the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceClass {
    #[default]
    KeyboardMouse,
    Gamepad,
}

#[derive(Resource, Debug, Default, Clone)]
pub struct MovementIntent {
    move_axis: Vec2,
    jump_requested: bool,
    run: bool,
    auto_run: bool,
    /// Set when auto-run was enabled while move keys were held: the next
    /// move press may only cancel auto-run after a release was seen.
    awaiting_move_release: bool,
    device: DeviceClass,
}

impl MovementIntent {
    pub fn on_move(&mut self, phase: InputPhase, axis: Vec2) {
        match phase {
            InputPhase::Started => {
                if self.auto_run && !self.awaiting_move_release {
                    self.auto_run = false;
                    debug!("Auto-run canceled by movement input");
                }
                self.move_axis = axis.clamp_length_max(1.0);
            }
            InputPhase::Performed => {
                self.move_axis = axis.clamp_length_max(1.0);
            }
            InputPhase::Canceled => {
                self.move_axis = Vec2::ZERO;
                self.awaiting_move_release = false;
            }
        }
    }

    pub fn on_jump(&mut self, phase: InputPhase) {
        if phase == InputPhase::Started {
            self.jump_requested = true;
        }
    }

    pub fn on_run(&mut self, phase: InputPhase, mode: RunKeyMode) {
        match (mode, phase) {
            (RunKeyMode::Toggle, InputPhase::Started) => self.run = !self.run,
            (RunKeyMode::Hold, InputPhase::Started) => self.run = true,
            (RunKeyMode::Hold, InputPhase::Canceled) => self.run = false,
            _ => {}
        }
    }

    pub fn on_auto_run(&mut self, phase: InputPhase) {
        if phase != InputPhase::Started {
            return;
        }
        self.auto_run = !self.auto_run;
        self.awaiting_move_release = self.auto_run && self.move_axis != Vec2::ZERO;
        debug!(
            "Auto-run toggled: enabled={}, awaiting_release={}",
            self.auto_run, self.awaiting_move_release
        );
    }

    /// Record the active control scheme by name. Only an exact match with the
    /// configured gamepad scheme counts as a gamepad.
    pub fn on_control_scheme_changed(&mut self, scheme: &str, gamepad_scheme: &str) {
        self.device = if scheme == gamepad_scheme {
            DeviceClass::Gamepad
        } else {
            DeviceClass::KeyboardMouse
        };
    }

    /// Consume the pending jump request. Requests never carry over to a
    /// later tick.
    pub fn take_jump(&mut self) -> bool {
        std::mem::take(&mut self.jump_requested)
    }

    pub fn move_axis(&self) -> Vec2 {
        self.move_axis
    }

    pub fn jump_requested(&self) -> bool {
        self.jump_requested
    }

    pub fn running(&self) -> bool {
        self.run
    }

    pub fn auto_run(&self) -> bool {
        self.auto_run
    }

    pub fn device(&self) -> DeviceClass {
        self.device
    }

    /// Input magnitude used to scale the target speed. Only analog devices
    /// report partial magnitudes.
    pub fn magnitude(&self) -> f32 {
        match self.device {
            DeviceClass::Gamepad => self.move_axis.length().min(1.0),
            DeviceClass::KeyboardMouse => 1.0,
        }
    }
}
