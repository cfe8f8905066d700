//! Locomotion domain: tuning values for the character controller.

use serde::{Deserialize, Serialize};

use crate::locomotion::MovementState;

/// Whether the run key flips running on each press or only runs while held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum RunKeyMode {
    #[default]
    Toggle,
    Hold,
}

/// Speed smoothing times (seconds) used while in one movement state.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct SpeedProfile {
    pub accel_time: f32,
    pub decel_time: f32,
}

impl SpeedProfile {
    pub const fn new(accel_time: f32, decel_time: f32) -> Self {
        Self {
            accel_time,
            decel_time,
        }
    }

    /// Smoothing time for moving from `current` toward `target`.
    pub fn smooth_time(&self, current: f32, target: f32) -> f32 {
        if target > current {
            self.accel_time
        } else {
            self.decel_time
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LocomotionTuning {
    pub walk_speed: f32,
    pub run_speed: f32,
    pub swim_speed: f32,
    pub grounded: SpeedProfile,
    pub airborne: SpeedProfile,
    pub water: SpeedProfile,
    /// Half width of the band around the target speed inside which speed
    /// snaps instead of smoothing.
    pub speed_dead_band: f32,
    pub rotation_smooth_time: f32,
    pub jump_height: f32,
    /// Negative means down. The engine default is -9.81.
    pub gravity: f32,
    /// Terminal fall speed. Zero or less disables the clamp.
    pub max_fall_speed: f32,
    pub ground_snap: bool,
    /// Step-climb allowance of the body; also sizes the ground-snap bias.
    pub step_offset: f32,
    pub hard_land_distance: f32,
    pub swim_radius: f32,
    /// Downward speed above which entering water counts as a landing.
    pub water_landing_speed: f32,
    pub run_key_mode: RunKeyMode,
    pub gamepad_scheme: String,
}

impl Default for LocomotionTuning {
    fn default() -> Self {
        Self {
            walk_speed: 2.0,
            run_speed: 5.335,
            swim_speed: 2.0,
            grounded: SpeedProfile::new(0.25, 0.15),
            airborne: SpeedProfile::new(0.6, 0.8),
            water: SpeedProfile::new(0.5, 0.5),
            speed_dead_band: 0.1,
            rotation_smooth_time: 0.12,
            jump_height: 1.2,
            gravity: -15.0,
            max_fall_speed: 0.0,
            ground_snap: true,
            step_offset: 0.3,
            hard_land_distance: 3.0,
            swim_radius: 0.6,
            water_landing_speed: 1.0,
            run_key_mode: RunKeyMode::Toggle,
            gamepad_scheme: "Gamepad".to_string(),
        }
    }
}

impl LocomotionTuning {
    /// Launch speed needed to reach `jump_height` under `gravity`:
    /// v = sqrt(h * -2g)
    pub fn jump_velocity(&self) -> f32 {
        (self.jump_height * -2.0 * self.gravity).max(0.0).sqrt()
    }

    pub fn profile(&self, state: MovementState) -> SpeedProfile {
        match state {
            MovementState::Grounded => self.grounded,
            MovementState::Airborne => self.airborne,
            MovementState::InWater => self.water,
        }
    }

    /// Vertical speed that keeps the body pressed onto slopes and steps for
    /// one tick of length `dt`.
    pub fn ground_snap_velocity(&self, dt: f32) -> f32 {
        if !self.ground_snap || dt <= 0.0 {
            return 0.0;
        }
        -self.step_offset / dt
    }
}
