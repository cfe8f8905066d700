//! Locomotion domain: sphere-overlap environment sensors.

use avian3d::prelude::*;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::locomotion::{GameLayer, layer_mask};

/// Whether trigger (sensor) colliders count as occupying the probe volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum TriggerPolicy {
    #[default]
    Ignore,
    Include,
}

/// A single overlap query handed to an [`OverlapQuery`] backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereProbe {
    pub center: Vec3,
    pub radius: f32,
    pub layers: LayerMask,
    pub triggers: TriggerPolicy,
}

/// Boolean "is this sphere occupied" oracle.
pub trait OverlapQuery {
    fn overlaps(&self, probe: &SphereProbe) -> bool;
}

/// Backend that answers every probe with a fixed value. Used where no
/// physics world exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedOverlap(pub bool);

impl OverlapQuery for FixedOverlap {
    fn overlaps(&self, _probe: &SphereProbe) -> bool {
        self.0
    }
}

/// avian3d-backed overlap queries for one character.
pub struct PhysicsOverlap<'a, 'w, 's> {
    pub spatial: &'a SpatialQuery<'w, 's>,
    pub sensors: &'a Query<'w, 's, (), With<Sensor>>,
    pub exclude: Entity,
}

impl OverlapQuery for PhysicsOverlap<'_, '_, '_> {
    fn overlaps(&self, probe: &SphereProbe) -> bool {
        let filter = SpatialQueryFilter::from_mask(probe.layers).with_excluded_entities([self.exclude]);
        let hits = self.spatial.shape_intersections(
            &Collider::sphere(probe.radius),
            probe.center,
            Quat::IDENTITY,
            &filter,
        );

        match probe.triggers {
            TriggerPolicy::Include => !hits.is_empty(),
            TriggerPolicy::Ignore => hits.iter().any(|entity| !self.sensors.contains(*entity)),
        }
    }
}

/// Serialized form of an [`EnvironmentSensor`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SensorConfig {
    /// Vertical offset from the body centre to the sphere centre.
    pub offset: f32,
    pub radius: f32,
    pub layers: Vec<GameLayer>,
    pub triggers: TriggerPolicy,
    #[serde(default)]
    pub draw: bool,
    #[serde(default = "default_draw_color")]
    pub draw_color: (f32, f32, f32, f32),
}

fn default_draw_color() -> (f32, f32, f32, f32) {
    (0.0, 1.0, 0.0, 0.35)
}

impl SensorConfig {
    pub fn ground() -> Self {
        Self {
            offset: -1.02,
            radius: 0.28,
            layers: vec![GameLayer::Ground],
            triggers: TriggerPolicy::Ignore,
            draw: true,
            draw_color: default_draw_color(),
        }
    }

    pub fn water() -> Self {
        Self {
            offset: 0.12,
            radius: 0.3,
            layers: vec![GameLayer::Water],
            triggers: TriggerPolicy::Include,
            draw: true,
            draw_color: (0.1, 0.4, 1.0, 0.35),
        }
    }
}

/// Sphere probe placed relative to the character's origin.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentSensor {
    pub offset: f32,
    pub radius: f32,
    pub layers: LayerMask,
    pub triggers: TriggerPolicy,
    pub draw: bool,
    pub draw_color: Color,
}

impl From<&SensorConfig> for EnvironmentSensor {
    fn from(config: &SensorConfig) -> Self {
        let (r, g, b, a) = config.draw_color;
        Self {
            offset: config.offset,
            radius: config.radius,
            layers: layer_mask(&config.layers),
            triggers: config.triggers,
            draw: config.draw,
            draw_color: Color::srgba(r, g, b, a),
        }
    }
}

impl EnvironmentSensor {
    pub fn center(&self, position: Vec3) -> Vec3 {
        position + Vec3::Y * self.offset
    }

    /// Is anything on the sensor's layers inside the sphere?
    pub fn check(&self, world: &dyn OverlapQuery, position: Vec3) -> bool {
        world.overlaps(&SphereProbe {
            center: self.center(position),
            radius: self.radius,
            layers: self.layers,
            triggers: self.triggers,
        })
    }

    /// Draw the probe sphere. Has no effect on [`Self::check`].
    pub fn draw(&self, gizmos: &mut Gizmos, position: Vec3) {
        if self.draw {
            gizmos.sphere(
                Isometry3d::from_translation(self.center(position)),
                self.radius,
                self.draw_color,
            );
        }
    }
}
