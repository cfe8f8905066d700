//! Animation domain: audio cues anchored to body parts.

use bevy::ecs::message::Message;
use bevy::prelude::*;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::locomotion::LocomotionOutputs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CueKind {
    Footstep,
    Swim,
    LandOnGround,
    LandInWater,
    JumpGrunt,
}

/// Request to play a cue for a character. `side` selects the left or right
/// limb by name; it is ignored for grunts.
#[derive(Debug, Clone)]
pub struct CueEvent {
    pub entity: Entity,
    pub kind: CueKind,
    pub side: String,
}

impl Message for CueEvent {}

/// Serialized clip reference: an asset path and a linear volume.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClipConfig {
    pub path: Option<String>,
    pub volume: f32,
}

impl Default for ClipConfig {
    fn default() -> Self {
        Self {
            path: None,
            volume: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CueConfig {
    pub footstep: ClipConfig,
    pub swim: ClipConfig,
    pub land_on_ground: ClipConfig,
    pub land_in_water: ClipConfig,
    /// Empty entries are allowed and play nothing when picked.
    pub jump_grunts: Vec<Option<String>>,
    pub jump_grunt_volume: f32,
    pub left_side_name: String,
    pub seed: u64,
    /// Ground distance between footsteps.
    pub stride_length: f32,
    /// Water distance between swim strokes.
    pub stroke_length: f32,
}

impl Default for CueConfig {
    fn default() -> Self {
        Self {
            footstep: ClipConfig::default(),
            swim: ClipConfig::default(),
            land_on_ground: ClipConfig::default(),
            land_in_water: ClipConfig::default(),
            jump_grunts: Vec::new(),
            jump_grunt_volume: 1.0,
            left_side_name: "Left".to_string(),
            seed: 0,
            stride_length: 0.8,
            stroke_length: 1.2,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CueClip {
    pub clip: Option<Handle<AudioSource>>,
    pub volume: f32,
}

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct CueLibrary {
    pub footstep: CueClip,
    pub swim: CueClip,
    pub land_on_ground: CueClip,
    pub land_in_water: CueClip,
    pub jump_grunts: Vec<Option<Handle<AudioSource>>>,
    pub jump_grunt_volume: f32,
    pub left_side_name: String,
}

impl Default for CueLibrary {
    fn default() -> Self {
        Self {
            footstep: CueClip::default(),
            swim: CueClip::default(),
            land_on_ground: CueClip::default(),
            land_in_water: CueClip::default(),
            jump_grunts: Vec::new(),
            jump_grunt_volume: 1.0,
            left_side_name: "Left".to_string(),
        }
    }
}

impl CueLibrary {
    pub fn load(config: &CueConfig, asset_server: &AssetServer) -> Self {
        let clip = |clip: &ClipConfig| CueClip {
            clip: clip.path.as_ref().map(|path| asset_server.load(path.clone())),
            volume: clip.volume,
        };
        Self {
            footstep: clip(&config.footstep),
            swim: clip(&config.swim),
            land_on_ground: clip(&config.land_on_ground),
            land_in_water: clip(&config.land_in_water),
            jump_grunts: config
                .jump_grunts
                .iter()
                .map(|path| path.as_ref().map(|path| asset_server.load(path.clone())))
                .collect(),
            jump_grunt_volume: config.jump_grunt_volume,
            left_side_name: config.left_side_name.clone(),
        }
    }

    /// Side tag for right-hand cues; never equal to `left_side_name`.
    pub fn right_side_name(&self) -> &'static str {
        if self.left_side_name == "Right" {
            "Left"
        } else {
            "Right"
        }
    }
}

#[derive(Resource, Debug)]
pub struct CueRng(pub ChaCha8Rng);

/// Body-part entities cues are emitted from. Any of them may be missing.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct CueAnchors {
    pub left_foot: Option<Entity>,
    pub right_foot: Option<Entity>,
    pub left_hand: Option<Entity>,
    pub right_hand: Option<Entity>,
    pub head: Option<Entity>,
}

/// A cue ready to play.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCue {
    pub clip: Handle<AudioSource>,
    pub anchor: Entity,
    pub volume: f32,
}

/// Pick the clip and anchor for a cue. Returns `None` when the clip, the
/// anchor or the chosen grunt slot is missing.
pub fn resolve_cue<R: Rng>(
    library: &CueLibrary,
    anchors: &CueAnchors,
    kind: CueKind,
    side: &str,
    rng: &mut R,
) -> Option<ResolvedCue> {
    let left = side == library.left_side_name;
    let (clip, anchor) = match kind {
        CueKind::Footstep => (&library.footstep, foot(anchors, left)),
        CueKind::LandOnGround => (&library.land_on_ground, foot(anchors, left)),
        CueKind::LandInWater => (&library.land_in_water, foot(anchors, left)),
        CueKind::Swim => (
            &library.swim,
            if left {
                anchors.left_hand
            } else {
                anchors.right_hand
            },
        ),
        CueKind::JumpGrunt => {
            if library.jump_grunts.is_empty() {
                return None;
            }
            let anchor = anchors.head?;
            let index = rng.random_range(0..library.jump_grunts.len());
            let clip = library.jump_grunts[index].clone()?;
            return Some(ResolvedCue {
                clip,
                anchor,
                volume: library.jump_grunt_volume,
            });
        }
    };

    Some(ResolvedCue {
        clip: clip.clip.clone()?,
        anchor: anchor?,
        volume: clip.volume,
    })
}

fn foot(anchors: &CueAnchors, left: bool) -> Option<Entity> {
    if left {
        anchors.left_foot
    } else {
        anchors.right_foot
    }
}

/// Distance-driven cadence for footsteps and swim strokes, alternating
/// sides.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct StrideClock {
    pub stride_length: f32,
    pub stroke_length: f32,
    travelled: f32,
    left_next: bool,
}

impl StrideClock {
    pub fn new(stride_length: f32, stroke_length: f32) -> Self {
        Self {
            stride_length,
            stroke_length,
            travelled: 0.0,
            left_next: true,
        }
    }

    /// Accumulate one tick of travel. Returns the cue to emit and whether it
    /// is on the left side.
    pub fn advance(&mut self, outputs: &LocomotionOutputs, dt: f32) -> Option<(CueKind, bool)> {
        let (kind, length) = if outputs.swimming {
            (CueKind::Swim, self.stroke_length)
        } else if outputs.grounded {
            (CueKind::Footstep, self.stride_length)
        } else {
            self.travelled = 0.0;
            return None;
        };

        if length <= 0.0 || outputs.move_speed <= 0.0 {
            return None;
        }

        self.travelled += outputs.move_speed * dt;
        if self.travelled < length {
            return None;
        }
        self.travelled -= length;
        let left = self.left_next;
        self.left_next = !self.left_next;
        Some((kind, left))
    }
}

impl Default for StrideClock {
    fn default() -> Self {
        let config = CueConfig::default();
        Self::new(config.stride_length, config.stroke_length)
    }
}
