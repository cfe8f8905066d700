//! Content domain: the controller configuration file schema.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::animation::{AnimationParameterNames, CueConfig};
use crate::locomotion::{LocomotionTuning, SensorConfig};

pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Everything tunable about the player character. Fields missing from the
/// file keep their defaults.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub schema_version: u32,
    pub locomotion: LocomotionTuning,
    pub ground_sensor: SensorConfig,
    pub water_sensor: SensorConfig,
    pub animation: AnimationParameterNames,
    /// Seconds movement and jumping stay locked after a hard landing.
    pub hard_land_lock: f32,
    pub audio: CueConfig,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            schema_version: CONFIG_SCHEMA_VERSION,
            locomotion: LocomotionTuning::default(),
            ground_sensor: SensorConfig::ground(),
            water_sensor: SensorConfig::water(),
            animation: AnimationParameterNames::default(),
            hard_land_lock: 0.6,
            audio: CueConfig::default(),
        }
    }
}
