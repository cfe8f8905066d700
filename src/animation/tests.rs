//! Animation domain: unit tests for parameters, gates and cue resolution.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::{
    AnimationBridge, AnimationIds, AnimationParameterNames, AnimationSink, Animator, CueAnchors,
    CueClip, CueKind, CueLibrary, GateChange, GateWindows, StrideClock, apply_gate_windows,
    parameter_id, resolve_cue,
};
use crate::locomotion::{
    CharacterMotor, EnvironmentSensor, FixedOverlap, InputPhase, LocomotionController,
    LocomotionOutputs, LocomotionTuning, MovementIntent, SensorConfig, TickContext,
};

const DT: f32 = 1.0 / 60.0;

#[derive(Debug, Default)]
struct RecordingSink {
    floats: Vec<(u32, f32)>,
    bools: Vec<(u32, bool)>,
    triggers: Vec<u32>,
}

impl AnimationSink for RecordingSink {
    fn set_float(&mut self, id: u32, value: f32) {
        self.floats.push((id, value));
    }

    fn set_bool(&mut self, id: u32, value: bool) {
        self.bools.push((id, value));
    }

    fn set_trigger(&mut self, id: u32) {
        self.triggers.push(id);
    }
}

struct StubMotor(Vec3);

impl CharacterMotor for StubMotor {
    fn position(&self) -> Vec3 {
        self.0
    }

    fn move_by(&mut self, displacement: Vec3) {
        self.0 += displacement;
    }

    fn set_rotation(&mut self, _rotation: Quat) {}

    fn radius(&self) -> f32 {
        0.28
    }

    fn set_radius(&mut self, _radius: f32) {}
}

fn tick(
    controller: &mut LocomotionController,
    intent: &mut MovementIntent,
    motor: &mut StubMotor,
    ground: bool,
) -> LocomotionOutputs {
    controller.tick(
        DT,
        intent,
        &mut TickContext {
            ground: &FixedOverlap(ground),
            water: &FixedOverlap(false),
            motor,
            camera_yaw: None,
        },
    )
}

fn anchors() -> CueAnchors {
    CueAnchors {
        left_foot: Some(Entity::from_bits(1)),
        right_foot: Some(Entity::from_bits(2)),
        left_hand: Some(Entity::from_bits(3)),
        right_hand: Some(Entity::from_bits(4)),
        head: Some(Entity::from_bits(5)),
    }
}

fn full_library() -> CueLibrary {
    let clip = |volume: f32| CueClip {
        clip: Some(Handle::default()),
        volume,
    };
    CueLibrary {
        footstep: clip(0.5),
        swim: clip(0.6),
        land_on_ground: clip(0.7),
        land_in_water: clip(0.8),
        jump_grunts: vec![Some(Handle::default())],
        jump_grunt_volume: 0.9,
        left_side_name: "Left".to_string(),
    }
}

#[test]
fn test_parameter_id_is_fnv1a() {
    assert_eq!(parameter_id(""), 0x811c_9dc5);
    assert_eq!(parameter_id("a"), 0xe40c_292c);
}

#[test]
fn test_default_ids_are_distinct() {
    let ids = AnimationIds::default();
    let all = [
        ids.move_speed,
        ids.jump,
        ids.grounded,
        ids.falling,
        ids.hard_land,
        ids.swimming,
    ];
    for (i, a) in all.iter().enumerate() {
        for b in &all[i + 1..] {
            assert_ne!(a, b);
        }
    }
    assert_eq!(ids.swimming, parameter_id("isSwimming"));
}

#[test]
fn test_renamed_parameter_changes_id() {
    let names = AnimationParameterNames {
        move_speed: "Speed".to_string(),
        ..default()
    };
    let ids = AnimationIds::resolve(&names);
    assert_eq!(ids.move_speed, parameter_id("Speed"));
    assert_eq!(ids.jump, AnimationIds::default().jump);
}

#[test]
fn test_publish_writes_state_and_triggers() {
    let bridge = AnimationBridge::default();
    let ids = *bridge.ids();
    let mut sink = RecordingSink::default();
    let outputs = LocomotionOutputs {
        move_speed: 3.5,
        grounded: true,
        jump: true,
        hard_land: true,
        ..default()
    };

    bridge.publish(Some(&mut sink), &outputs);

    assert_eq!(sink.floats, vec![(ids.move_speed, 3.5)]);
    assert!(sink.bools.contains(&(ids.grounded, true)));
    assert!(sink.bools.contains(&(ids.falling, false)));
    assert!(sink.bools.contains(&(ids.swimming, false)));
    assert_eq!(sink.triggers, vec![ids.jump, ids.hard_land]);
}

#[test]
fn test_publish_without_events_sets_no_triggers() {
    let bridge = AnimationBridge::default();
    let mut sink = RecordingSink::default();
    bridge.publish(Some(&mut sink), &LocomotionOutputs::default());
    assert!(sink.triggers.is_empty());
    assert_eq!(sink.bools.len(), 3);
}

#[test]
fn test_publish_without_sink_is_noop() {
    let bridge = AnimationBridge::default();
    let outputs = LocomotionOutputs {
        jump: true,
        ..default()
    };
    bridge.publish(None, &outputs);
}

#[test]
fn test_animator_trigger_consumed_once() {
    let ids = AnimationIds::default();
    let mut animator = Animator::default();
    animator.set_trigger(ids.jump);
    animator.set_float(ids.move_speed, 2.0);

    assert!(animator.trigger_pending(ids.jump));
    assert!(animator.consume_trigger(ids.jump));
    assert!(!animator.consume_trigger(ids.jump));
    assert_eq!(animator.float(ids.move_speed), Some(2.0));
    assert_eq!(animator.bool(ids.move_speed), None);
}

#[test]
fn test_gate_window_locks_then_releases() {
    let mut gates = GateWindows::new(0.6);
    assert_eq!(gates.advance(true, 0.25), Some(GateChange::Locked));
    assert!(gates.is_locked());
    assert_eq!(gates.advance(false, 0.25), None);
    assert_eq!(gates.advance(false, 0.25), None);
    assert_eq!(gates.advance(false, 0.25), Some(GateChange::Released));
    assert!(!gates.is_locked());
    assert_eq!(gates.advance(false, 0.25), None);
}

#[test]
fn test_gate_window_relock_restarts_timer() {
    let mut gates = GateWindows::new(0.6);
    gates.advance(true, 0.1);
    gates.advance(false, 0.5);
    assert_eq!(gates.advance(true, 0.1), None);
    assert!((gates.remaining() - 0.6).abs() < 1e-6);
}

#[test]
fn test_zero_lock_never_locks() {
    let mut gates = GateWindows::new(0.0);
    assert_eq!(gates.advance(true, 0.1), None);
    assert!(!gates.is_locked());
}

#[test]
fn test_hard_landing_locks_controller_until_window_closes() {
    let mut controller = LocomotionController::new(
        LocomotionTuning::default(),
        EnvironmentSensor::from(&SensorConfig::ground()),
        EnvironmentSensor::from(&SensorConfig::water()),
    );
    let mut intent = MovementIntent::default();
    let mut motor = StubMotor(Vec3::new(0.0, 10.0, 0.0));
    let bridge = AnimationBridge::default();
    let hard_land_id = bridge.ids().hard_land;
    let mut animator = Animator::default();
    let mut gates = GateWindows::new(0.6);

    tick(&mut controller, &mut intent, &mut motor, false);
    motor.0.y = 6.0;
    let outputs = tick(&mut controller, &mut intent, &mut motor, true);
    assert!(outputs.hard_land);

    bridge.publish(Some(&mut animator), &outputs);
    let change = apply_gate_windows(&mut gates, &mut animator, &mut controller, hard_land_id, DT);
    assert_eq!(change, Some(GateChange::Locked));
    assert!(!controller.can_move());
    assert!(!controller.can_jump());

    intent.on_move(InputPhase::Started, Vec2::Y);
    intent.on_jump(InputPhase::Started);
    let outputs = tick(&mut controller, &mut intent, &mut motor, true);
    assert!(!outputs.jump);
    assert_eq!(outputs.move_speed, 0.0);

    let mut released = false;
    for _ in 0..40 {
        let outputs = tick(&mut controller, &mut intent, &mut motor, true);
        bridge.publish(Some(&mut animator), &outputs);
        let change = apply_gate_windows(&mut gates, &mut animator, &mut controller, hard_land_id, DT);
        released |= change == Some(GateChange::Released);
    }
    assert!(released);
    assert!(controller.can_move());
    assert!(controller.can_jump());

    intent.on_jump(InputPhase::Started);
    assert!(tick(&mut controller, &mut intent, &mut motor, true).jump);
}

#[test]
fn test_footstep_uses_named_side() {
    let library = full_library();
    let anchors = anchors();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    let left = resolve_cue(&library, &anchors, CueKind::Footstep, "Left", &mut rng);
    let right = resolve_cue(&library, &anchors, CueKind::Footstep, "Right", &mut rng);
    let other = resolve_cue(&library, &anchors, CueKind::LandOnGround, "", &mut rng);

    assert_eq!(left.map(|cue| cue.anchor), anchors.left_foot);
    assert_eq!(right.map(|cue| cue.anchor), anchors.right_foot);
    assert_eq!(other.map(|cue| cue.anchor), anchors.right_foot);
}

#[test]
fn test_swim_uses_hands() {
    let library = full_library();
    let anchors = anchors();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    let cue = resolve_cue(&library, &anchors, CueKind::Swim, "Left", &mut rng);
    assert_eq!(cue.as_ref().map(|cue| cue.anchor), anchors.left_hand);
    assert_eq!(cue.map(|cue| cue.volume), Some(0.6));
}

#[test]
fn test_custom_left_side_name() {
    let library = CueLibrary {
        left_side_name: "L".to_string(),
        ..full_library()
    };
    let anchors = anchors();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    let cue = resolve_cue(&library, &anchors, CueKind::LandInWater, "Left", &mut rng);
    assert_eq!(cue.map(|cue| cue.anchor), anchors.right_foot);
}

#[test]
fn test_right_side_name_never_matches_left() {
    let anchors = anchors();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for left in ["Left", "Right", "L"] {
        let library = CueLibrary {
            left_side_name: left.to_string(),
            ..full_library()
        };
        let right = library.right_side_name();
        assert_ne!(right, library.left_side_name);

        let cue = resolve_cue(&library, &anchors, CueKind::Footstep, right, &mut rng);
        assert_eq!(cue.map(|cue| cue.anchor), anchors.right_foot);
    }
}

#[test]
fn test_missing_clip_or_anchor_plays_nothing() {
    let anchors = anchors();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    let no_clip = CueLibrary {
        footstep: CueClip::default(),
        ..full_library()
    };
    assert!(resolve_cue(&no_clip, &anchors, CueKind::Footstep, "Left", &mut rng).is_none());

    let no_foot = CueAnchors {
        left_foot: None,
        ..anchors
    };
    assert!(resolve_cue(&full_library(), &no_foot, CueKind::Footstep, "Left", &mut rng).is_none());
}

#[test]
fn test_jump_grunt_uses_head() {
    let library = full_library();
    let anchors = anchors();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    let cue = resolve_cue(&library, &anchors, CueKind::JumpGrunt, "", &mut rng);
    assert_eq!(cue.as_ref().map(|cue| cue.anchor), anchors.head);
    assert_eq!(cue.map(|cue| cue.volume), Some(0.9));
}

#[test]
fn test_jump_grunt_empty_slot_or_list_plays_nothing() {
    let anchors = anchors();
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    let empty_slot = CueLibrary {
        jump_grunts: vec![None],
        ..full_library()
    };
    assert!(resolve_cue(&empty_slot, &anchors, CueKind::JumpGrunt, "", &mut rng).is_none());

    let no_grunts = CueLibrary {
        jump_grunts: Vec::new(),
        ..full_library()
    };
    assert!(resolve_cue(&no_grunts, &anchors, CueKind::JumpGrunt, "", &mut rng).is_none());

    let headless = CueAnchors {
        head: None,
        ..anchors
    };
    assert!(resolve_cue(&full_library(), &headless, CueKind::JumpGrunt, "", &mut rng).is_none());
}

#[test]
fn test_stride_clock_alternates_feet() {
    let mut stride = StrideClock::new(1.0, 2.0);
    let walking = LocomotionOutputs {
        move_speed: 2.0,
        grounded: true,
        ..default()
    };

    assert_eq!(stride.advance(&walking, 0.25), None);
    assert_eq!(stride.advance(&walking, 0.25), Some((CueKind::Footstep, true)));
    assert_eq!(stride.advance(&walking, 0.25), None);
    assert_eq!(stride.advance(&walking, 0.25), Some((CueKind::Footstep, false)));
}

#[test]
fn test_stride_clock_swims_and_resets_in_air() {
    let mut stride = StrideClock::new(1.0, 2.0);
    let swimming = LocomotionOutputs {
        move_speed: 2.0,
        swimming: true,
        ..default()
    };
    let falling = LocomotionOutputs {
        move_speed: 2.0,
        falling: true,
        ..default()
    };

    assert_eq!(stride.advance(&swimming, 0.5), None);
    assert_eq!(stride.advance(&falling, 0.5), None);
    assert_eq!(stride.advance(&swimming, 0.5), None);
    assert_eq!(stride.advance(&swimming, 0.5), Some((CueKind::Swim, true)));
}
