//! Locomotion domain: fixed-tick controller update against avian3d.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::camera::{FollowCamera, camera_yaw};
use crate::locomotion::systems::motor::DeferredMotor;
use crate::locomotion::systems::slide::{collide_and_slide, physics_sweep};
use crate::locomotion::{
    CharacterShape, GameLayer, LocomotionController, LocomotionOutputs, MovementIntent,
    PhysicsOverlap, Player, TickContext, layer_mask,
};

/// Layers the body collides with while moving. Water is a trigger volume and
/// never blocks.
const SOLID_LAYERS: [GameLayer; 2] = [GameLayer::Default, GameLayer::Ground];

pub(crate) fn run_locomotion(
    mut commands: Commands,
    time: Res<Time>,
    mut intent: ResMut<MovementIntent>,
    spatial: SpatialQuery,
    sensors: Query<(), With<Sensor>>,
    cameras: Query<&Transform, (With<FollowCamera>, Without<Player>)>,
    mut players: Query<
        (
            Entity,
            &mut Transform,
            &mut CharacterShape,
            &Collider,
            &mut LocomotionController,
            &mut LocomotionOutputs,
        ),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }

    let camera_yaw = cameras.single().ok().map(camera_yaw);

    for (entity, mut transform, mut shape, collider, mut controller, mut outputs) in
        &mut players
    {
        let world = PhysicsOverlap {
            spatial: &spatial,
            sensors: &sensors,
            exclude: entity,
        };
        let mut motor = DeferredMotor::new(transform.translation, transform.rotation, shape.radius);
        let previous_state = controller.state();

        *outputs = controller.tick(
            dt,
            &mut intent,
            &mut TickContext {
                ground: &world,
                water: &world,
                motor: &mut motor,
                camera_yaw,
            },
        );

        if controller.state() != previous_state {
            debug!(
                "Locomotion state {:?} -> {:?} at {:?}",
                previous_state,
                controller.state(),
                transform.translation
            );
        }

        transform.rotation = motor.rotation;
        // The collider component is only read here; a resized one is
        // swept locally and written back through commands.
        let resized = (motor.radius != shape.radius).then(|| {
            shape.radius = motor.radius;
            let resized = shape.collider();
            commands.entity(entity).insert(resized.clone());
            resized
        });
        let body = resized.as_ref().unwrap_or(collider);

        let filter = SpatialQueryFilter::from_mask(layer_mask(&SOLID_LAYERS))
            .with_excluded_entities([entity]);
        transform.translation = collide_and_slide(
            transform.translation,
            motor.displacement,
            physics_sweep(&spatial, body, transform.rotation, &filter),
        );
    }
}

#[cfg(test)]
mod tests {
    use bevy::ecs::system::System;

    use super::*;

    #[test]
    fn test_run_locomotion_params_do_not_conflict() {
        let mut world = World::new();
        let mut system = IntoSystem::into_system(run_locomotion);
        system.initialize(&mut world);
    }
}
