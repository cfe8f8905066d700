//! Locomotion domain: intent, sensing and the character state machine.

mod bootstrap;
mod components;
mod intent;
mod machine;
mod resources;
mod sensor;
pub mod smoothing;
mod systems;


pub use components::{
    CharacterShape, GameLayer, LocomotionOutputs, MovementState, Player, layer_mask,
};
pub use intent::{DeviceClass, InputPhase, MovementIntent};
pub use machine::{CharacterMotor, LocomotionController, TickContext};
pub use resources::{LocomotionTuning, RunKeyMode, SpeedProfile};
pub use sensor::{
    EnvironmentSensor, FixedOverlap, OverlapQuery, PhysicsOverlap, SensorConfig, SphereProbe,
    TriggerPolicy,
};

use bevy::prelude::*;

use crate::locomotion::bootstrap::{spawn_player, spawn_test_scene};
use crate::locomotion::systems::{read_input, run_locomotion};

/// Ordering label for the fixed-tick controller update.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocomotionSystems;

pub struct LocomotionPlugin;

impl Plugin for LocomotionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementIntent>()
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .add_systems(Startup, (spawn_test_scene, spawn_player))
            .add_systems(Update, read_input)
            .add_systems(FixedUpdate, run_locomotion.in_set(LocomotionSystems));
    }
}
