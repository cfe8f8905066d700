//! Animation domain: parameter names, hashed ids and the animator table.

use std::collections::{HashMap, HashSet};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Names of the animator parameters written by the bridge.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnimationParameterNames {
    pub move_speed: String,
    pub jump: String,
    pub grounded: String,
    pub falling: String,
    pub hard_land: String,
    pub swimming: String,
}

impl Default for AnimationParameterNames {
    fn default() -> Self {
        Self {
            move_speed: "MoveSpeed".to_string(),
            jump: "Jump".to_string(),
            grounded: "Grounded".to_string(),
            falling: "IsFalling".to_string(),
            hard_land: "HardLand".to_string(),
            swimming: "isSwimming".to_string(),
        }
    }
}

/// Stable 32-bit id for a parameter name (FNV-1a).
pub fn parameter_id(name: &str) -> u32 {
    const OFFSET_BASIS: u32 = 0x811c_9dc5;
    const PRIME: u32 = 0x0100_0193;
    name.bytes()
        .fold(OFFSET_BASIS, |hash, byte| (hash ^ byte as u32).wrapping_mul(PRIME))
}

/// Parameter ids, hashed once from [`AnimationParameterNames`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationIds {
    pub move_speed: u32,
    pub jump: u32,
    pub grounded: u32,
    pub falling: u32,
    pub hard_land: u32,
    pub swimming: u32,
}

impl AnimationIds {
    pub fn resolve(names: &AnimationParameterNames) -> Self {
        Self {
            move_speed: parameter_id(&names.move_speed),
            jump: parameter_id(&names.jump),
            grounded: parameter_id(&names.grounded),
            falling: parameter_id(&names.falling),
            hard_land: parameter_id(&names.hard_land),
            swimming: parameter_id(&names.swimming),
        }
    }
}

impl Default for AnimationIds {
    fn default() -> Self {
        Self::resolve(&AnimationParameterNames::default())
    }
}

/// Receiver of animation parameter writes.
pub trait AnimationSink {
    fn set_float(&mut self, id: u32, value: f32);
    fn set_bool(&mut self, id: u32, value: bool);
    /// Raise a one-shot trigger. It stays pending until consumed.
    fn set_trigger(&mut self, id: u32);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParameterValue {
    Float(f32),
    Bool(bool),
}

/// Per-character parameter table read by animation playback.
#[derive(Component, Debug, Default, Clone)]
pub struct Animator {
    values: HashMap<u32, ParameterValue>,
    triggers: HashSet<u32>,
}

impl Animator {
    pub fn float(&self, id: u32) -> Option<f32> {
        match self.values.get(&id) {
            Some(ParameterValue::Float(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn bool(&self, id: u32) -> Option<bool> {
        match self.values.get(&id) {
            Some(ParameterValue::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn trigger_pending(&self, id: u32) -> bool {
        self.triggers.contains(&id)
    }

    /// Clear a pending trigger, returning whether it was set.
    pub fn consume_trigger(&mut self, id: u32) -> bool {
        self.triggers.remove(&id)
    }
}

impl AnimationSink for Animator {
    fn set_float(&mut self, id: u32, value: f32) {
        self.values.insert(id, ParameterValue::Float(value));
    }

    fn set_bool(&mut self, id: u32, value: bool) {
        self.values.insert(id, ParameterValue::Bool(value));
    }

    fn set_trigger(&mut self, id: u32) {
        self.triggers.insert(id);
    }
}
