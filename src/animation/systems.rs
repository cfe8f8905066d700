//! Animation domain: systems linking the controller to the animator, gates
//! and audio.

use bevy::audio::Volume;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::animation::{
    AnimationBridge, Animator, CueAnchors, CueEvent, CueKind, CueLibrary, CueRng, GateChange,
    GateWindows, StrideClock, apply_gate_windows, resolve_cue,
};
use crate::content::ControllerConfig;
use crate::locomotion::{LocomotionController, LocomotionOutputs};

pub(crate) fn setup_animation(
    mut commands: Commands,
    config: Res<ControllerConfig>,
    asset_server: Res<AssetServer>,
) {
    let library = CueLibrary::load(&config.audio, &asset_server);
    info!(
        "Cue library ready: {} jump grunt slot(s), left side '{}'",
        library.jump_grunts.len(),
        library.left_side_name
    );
    commands.insert_resource(AnimationBridge::new(&config.animation));
    commands.insert_resource(library);
    commands.insert_resource(CueRng(ChaCha8Rng::seed_from_u64(config.audio.seed)));
}

pub(crate) fn push_animation_parameters(
    bridge: Res<AnimationBridge>,
    mut players: Query<(&LocomotionOutputs, Option<&mut Animator>)>,
) {
    for (outputs, animator) in &mut players {
        match animator {
            Some(mut animator) => bridge.publish(Some(&mut *animator), outputs),
            None => bridge.publish(None, outputs),
        }
    }
}

/// Open the hard-land window when the animator's HardLand trigger fires and
/// release it once the lock time has passed.
pub(crate) fn tick_gate_windows(
    time: Res<Time>,
    bridge: Res<AnimationBridge>,
    mut players: Query<(&mut Animator, &mut GateWindows, &mut LocomotionController)>,
) {
    let dt = time.delta_secs();
    for (mut animator, mut gates, mut controller) in &mut players {
        let hard_land_id = bridge.ids().hard_land;
        match apply_gate_windows(&mut gates, &mut animator, &mut controller, hard_land_id, dt) {
            Some(GateChange::Locked) => {
                debug!("Hard-land lock for {:.2}s", gates.hard_land_lock);
            }
            Some(GateChange::Released) => debug!("Hard-land lock released"),
            None => {}
        }
    }
}

pub(crate) fn emit_locomotion_cues(
    time: Res<Time>,
    bridge: Res<AnimationBridge>,
    library: Res<CueLibrary>,
    mut cues: MessageWriter<CueEvent>,
    mut players: Query<(Entity, &LocomotionOutputs, &mut Animator, &mut StrideClock)>,
) {
    let dt = time.delta_secs();
    let left = library.left_side_name.as_str();
    let right = library.right_side_name();

    for (entity, outputs, mut animator, mut stride) in &mut players {
        let mut emit = |kind: CueKind, side: &str| {
            cues.write(CueEvent {
                entity,
                kind,
                side: side.to_string(),
            });
        };

        if animator.consume_trigger(bridge.ids().jump) {
            emit(CueKind::JumpGrunt, left);
        }
        if outputs.landed {
            emit(CueKind::LandOnGround, left);
        }
        if outputs.water_landing {
            emit(CueKind::LandInWater, right);
        }
        if let Some((kind, is_left)) = stride.advance(outputs, dt) {
            emit(kind, if is_left { left } else { right });
        }
    }
}

pub(crate) fn play_cues(
    mut commands: Commands,
    mut events: MessageReader<CueEvent>,
    library: Res<CueLibrary>,
    mut rng: ResMut<CueRng>,
    anchors: Query<&CueAnchors>,
    transforms: Query<&GlobalTransform>,
) {
    for event in events.read() {
        let Ok(anchor_set) = anchors.get(event.entity) else {
            continue;
        };
        let Some(cue) = resolve_cue(&library, anchor_set, event.kind, &event.side, &mut rng.0) else {
            continue;
        };
        let Ok(at) = transforms.get(cue.anchor) else {
            continue;
        };

        commands.spawn((
            AudioPlayer::new(cue.clip),
            PlaybackSettings::DESPAWN
                .with_volume(Volume::Linear(cue.volume))
                .with_spatial(true),
            Transform::from_translation(at.translation()),
        ));
    }
}
