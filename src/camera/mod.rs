//! Camera domain: third-person follow camera.

use bevy::prelude::*;
use bevy::transform::TransformSystems;

use crate::locomotion::Player;

/// Camera that trails the player at a fixed offset.
#[derive(Component, Debug, Clone)]
pub struct FollowCamera {
    pub offset: Vec3,
    /// Look-at point above the target origin.
    pub look_height: f32,
    /// Follow sharpness; higher catches up faster.
    pub sharpness: f32,
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self {
            offset: Vec3::new(0.0, 3.0, -6.0),
            look_height: 1.0,
            sharpness: 8.0,
        }
    }
}

/// Yaw of the camera's horizontal forward direction, zero facing +Z.
pub fn camera_yaw(transform: &Transform) -> f32 {
    let forward = transform.forward();
    forward.x.atan2(forward.z)
}

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera)
            .add_systems(PostUpdate, follow_player.before(TransformSystems::Propagate));
    }
}

fn setup_camera(mut commands: Commands) {
    let camera = FollowCamera::default();
    commands.spawn((
        Camera3d::default(),
        SpatialListener::new(0.3),
        Transform::from_translation(camera.offset).looking_at(Vec3::Y * camera.look_height, Vec3::Y),
        camera,
    ));
}

fn follow_player(
    time: Res<Time>,
    players: Query<&Transform, (With<Player>, Without<FollowCamera>)>,
    mut cameras: Query<(&FollowCamera, &mut Transform)>,
) {
    let Ok(target) = players.single() else {
        return;
    };
    for (camera, mut transform) in &mut cameras {
        let desired = target.translation + camera.offset;
        let blend = 1.0 - (-camera.sharpness * time.delta_secs()).exp();
        transform.translation = transform.translation.lerp(desired, blend);
        transform.look_at(target.translation + Vec3::Y * camera.look_height, Vec3::Y);
    }
}
