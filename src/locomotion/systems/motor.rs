//! Locomotion domain: motor that records what the controller asked for.

use bevy::prelude::*;

use crate::locomotion::CharacterMotor;

/// Collects rotation, radius and displacement requests during a tick so the
/// fixed-update system can apply them through avian3d afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DeferredMotor {
    pub position: Vec3,
    pub rotation: Quat,
    pub radius: f32,
    pub displacement: Vec3,
}

impl DeferredMotor {
    pub fn new(position: Vec3, rotation: Quat, radius: f32) -> Self {
        Self {
            position,
            rotation,
            radius,
            displacement: Vec3::ZERO,
        }
    }
}

impl CharacterMotor for DeferredMotor {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn move_by(&mut self, displacement: Vec3) {
        self.displacement += displacement;
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
    }
}
