//! Animation domain: animator parameters, hard-land gates and audio cues.

mod bridge;
mod cues;
mod gates;
mod params;
mod systems;

#[cfg(test)]
mod tests;

pub use bridge::AnimationBridge;
pub use cues::{
    ClipConfig, CueAnchors, CueClip, CueConfig, CueEvent, CueKind, CueLibrary, CueRng,
    ResolvedCue, StrideClock, resolve_cue,
};
pub use gates::{GateChange, GateWindows, apply_gate_windows};
pub use params::{
    AnimationIds, AnimationParameterNames, AnimationSink, Animator, ParameterValue, parameter_id,
};

use bevy::prelude::*;

use crate::animation::systems::{
    emit_locomotion_cues, play_cues, push_animation_parameters, setup_animation, tick_gate_windows,
};
use crate::locomotion::LocomotionSystems;

pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<CueEvent>()
            .add_systems(Startup, setup_animation)
            .add_systems(
                FixedUpdate,
                (push_animation_parameters, tick_gate_windows, emit_locomotion_cues)
                    .chain()
                    .after(LocomotionSystems),
            )
            .add_systems(Update, play_cues);
    }
}
