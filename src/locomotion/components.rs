//! Locomotion domain: components and physics layers for the character.

use avian3d::prelude::*;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum GameLayer {
    #[default]
    Default,
    /// Walkable surfaces (floors, ramps, steps)
    Ground,
    /// Swimmable volumes, expected to be sensor colliders
    Water,
    /// Player character
    Player,
}

/// Fold a list of layers into a single query mask.
pub fn layer_mask(layers: &[GameLayer]) -> LayerMask {
    layers
        .iter()
        .fold(LayerMask::NONE, |mask, layer| mask | LayerMask(layer.to_bits()))
}

#[derive(Component, Debug)]
pub struct Player;

/// Mutually exclusive movement states. Written only by the controller's
/// transition step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum MovementState {
    #[default]
    Grounded,
    Airborne,
    InWater,
}

/// Observable results of the latest controller tick.
///
/// `jump`, `hard_land`, `landed` and `water_landing` are one-shot: they are
/// true only for the tick that raised them.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct LocomotionOutputs {
    pub move_speed: f32,
    pub grounded: bool,
    pub falling: bool,
    pub swimming: bool,
    pub jump: bool,
    pub hard_land: bool,
    pub landed: bool,
    pub water_landing: bool,
}

/// Capsule dimensions of the character collider. The radius is swapped while
/// swimming; the half height never changes.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct CharacterShape {
    pub radius: f32,
    pub half_height: f32,
}

impl CharacterShape {
    pub fn collider(&self) -> Collider {
        Collider::capsule(self.radius, self.half_height * 2.0)
    }
}

impl Default for CharacterShape {
    fn default() -> Self {
        Self {
            radius: 0.28,
            half_height: 0.6,
        }
    }
}
