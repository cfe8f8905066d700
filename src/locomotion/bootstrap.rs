//! Locomotion domain: player bootstrap and the demo scene.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::animation::{Animator, CueAnchors, GateWindows, StrideClock};
use crate::content::ControllerConfig;
use crate::locomotion::{
    CharacterShape, EnvironmentSensor, GameLayer, LocomotionController, LocomotionOutputs, Player,
};

/// Spawn the player from the loaded controller configuration.
pub(crate) fn spawn_player(
    mut commands: Commands,
    config: Res<ControllerConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let shape = CharacterShape::default();
    let controller = LocomotionController::new(
        config.locomotion.clone(),
        EnvironmentSensor::from(&config.ground_sensor),
        EnvironmentSensor::from(&config.water_sensor),
    );

    info!(
        "Spawning player: walk={}, run={}, swim={}, jump_height={}, gravity={}",
        config.locomotion.walk_speed,
        config.locomotion.run_speed,
        config.locomotion.swim_speed,
        config.locomotion.jump_height,
        config.locomotion.gravity
    );

    let player = commands
        .spawn((
            (
                Player,
                controller,
                LocomotionOutputs::default(),
                shape,
                Animator::default(),
                GateWindows::new(config.hard_land_lock),
                StrideClock::new(config.audio.stride_length, config.audio.stroke_length),
            ),
            Transform::from_xyz(0.0, 1.0, 0.0),
            Visibility::default(),
            (
                RigidBody::Kinematic,
                shape.collider(),
                CollisionLayers::new(GameLayer::Player, [GameLayer::Ground, GameLayer::Water]),
            ),
        ))
        .id();

    commands.spawn((
        Name::new("Body"),
        Mesh3d(meshes.add(Capsule3d::new(shape.radius, shape.half_height * 2.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.9, 0.9, 0.9))),
        Transform::default(),
        ChildOf(player),
    ));

    let mut bone = |name: &'static str, offset: Vec3| {
        commands
            .spawn((Name::new(name), Transform::from_translation(offset), ChildOf(player)))
            .id()
    };
    let anchors = CueAnchors {
        left_foot: Some(bone("LeftFoot", Vec3::new(-0.12, -0.83, 0.0))),
        right_foot: Some(bone("RightFoot", Vec3::new(0.12, -0.83, 0.0))),
        left_hand: Some(bone("LeftHand", Vec3::new(-0.35, 0.0, 0.0))),
        right_hand: Some(bone("RightHand", Vec3::new(0.35, 0.0, 0.0))),
        head: Some(bone("Head", Vec3::new(0.0, 0.7, 0.0))),
    };
    commands.entity(player).insert(anchors);
}

pub(crate) fn spawn_test_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let ground_color = materials.add(Color::srgb(0.4, 0.5, 0.4));
    let platform_color = materials.add(Color::srgb(0.5, 0.4, 0.3));
    let water_color = materials.add(StandardMaterial {
        base_color: Color::srgba(0.1, 0.35, 0.8, 0.45),
        alpha_mode: AlphaMode::Blend,
        ..default()
    });

    let ground_layers = CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]);
    let water_layers = CollisionLayers::new(GameLayer::Water, [GameLayer::Player]);

    let mut solid = |size: Vec3, at: Vec3, material: &Handle<StandardMaterial>| {
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::from_size(size))),
            MeshMaterial3d(material.clone()),
            Transform::from_translation(at),
            RigidBody::Static,
            Collider::cuboid(size.x, size.y, size.z),
            ground_layers,
        ));
    };

    // Floor, split around the pool
    solid(Vec3::new(40.0, 1.0, 20.0), Vec3::new(0.0, -0.5, -10.0), &ground_color);
    solid(Vec3::new(15.0, 1.0, 20.0), Vec3::new(-12.5, -0.5, 10.0), &ground_color);
    solid(Vec3::new(15.0, 1.0, 20.0), Vec3::new(12.5, -0.5, 10.0), &ground_color);
    // Pool bed
    solid(Vec3::new(10.0, 1.0, 20.0), Vec3::new(0.0, -4.5, 10.0), &ground_color);

    // Stairs
    for step in 0..5 {
        let height = 0.25 * (step + 1) as f32;
        solid(
            Vec3::new(3.0, height, 1.0),
            Vec3::new(-8.0, height * 0.5, -4.0 - step as f32),
            &platform_color,
        );
    }

    // Tower for hard landings
    solid(Vec3::new(3.0, 5.0, 3.0), Vec3::new(8.0, 2.5, -6.0), &platform_color);

    // Ramp out of the far end of the pool
    let ramp_size = Vec3::new(10.0, 0.5, Vec2::new(8.0, 4.0).length());
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::from_size(ramp_size))),
        MeshMaterial3d(platform_color.clone()),
        Transform::from_xyz(0.0, -2.25, 16.0).with_rotation(Quat::from_rotation_x(-(0.5f32).atan())),
        RigidBody::Static,
        Collider::cuboid(ramp_size.x, ramp_size.y, ramp_size.z),
        ground_layers,
    ));

    // Pool volume: a trigger on the water layer
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(10.0, 3.8, 20.0))),
        MeshMaterial3d(water_color),
        Transform::from_xyz(0.0, -2.1, 10.0),
        RigidBody::Static,
        Collider::cuboid(10.0, 3.8, 20.0),
        Sensor,
        water_layers,
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}
