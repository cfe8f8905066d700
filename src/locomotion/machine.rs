//! Locomotion domain: the character locomotion state machine.
//!
//! [`LocomotionController`] turns an intent snapshot and two environment
//! samples into a movement state, a velocity and a displacement once per
//! fixed tick. Physics, camera and animation are reached only through the
//! traits and values in [`TickContext`].

use bevy::prelude::*;

use crate::locomotion::smoothing::{smooth_damp, smooth_damp_angle, yaw_from_direction};
use crate::locomotion::{
    DeviceClass, EnvironmentSensor, LocomotionOutputs, LocomotionTuning, MovementIntent, MovementState,
    OverlapQuery,
};

/// The physical embodiment moved by the controller.
pub trait CharacterMotor {
    fn position(&self) -> Vec3;
    /// Move by `displacement`, resolving collisions.
    fn move_by(&mut self, displacement: Vec3);
    fn set_rotation(&mut self, rotation: Quat);
    fn radius(&self) -> f32;
    fn set_radius(&mut self, radius: f32);
}

/// Collaborators for one tick.
pub struct TickContext<'a> {
    pub ground: &'a dyn OverlapQuery,
    pub water: &'a dyn OverlapQuery,
    pub motor: &'a mut dyn CharacterMotor,
    /// Yaw of the observing camera, if one exists.
    pub camera_yaw: Option<f32>,
}

#[derive(Component, Debug, Clone)]
pub struct LocomotionController {
    pub tuning: LocomotionTuning,
    pub ground_sensor: EnvironmentSensor,
    pub water_sensor: EnvironmentSensor,
    state: MovementState,
    velocity: Vec3,
    speed: f32,
    speed_velocity: f32,
    yaw: f32,
    yaw_velocity: f32,
    target_yaw: f32,
    jumping: bool,
    fall_start: Option<Vec3>,
    base_radius: Option<f32>,
    can_move: bool,
    can_jump: bool,
}

impl LocomotionController {
    pub fn new(
        tuning: LocomotionTuning,
        ground_sensor: EnvironmentSensor,
        water_sensor: EnvironmentSensor,
    ) -> Self {
        let mut controller = Self {
            tuning,
            ground_sensor,
            water_sensor,
            state: MovementState::Grounded,
            velocity: Vec3::ZERO,
            speed: 0.0,
            speed_velocity: 0.0,
            yaw: 0.0,
            yaw_velocity: 0.0,
            target_yaw: 0.0,
            jumping: false,
            fall_start: None,
            base_radius: None,
            can_move: true,
            can_jump: true,
        };
        controller.initialize(0.0);
        controller
    }

    /// Reset all runtime state, facing `yaw`. Configuration and the recorded
    /// base radius are kept.
    pub fn initialize(&mut self, yaw: f32) {
        self.state = MovementState::Grounded;
        self.velocity = Vec3::ZERO;
        self.speed = 0.0;
        self.speed_velocity = 0.0;
        self.yaw = yaw;
        self.yaw_velocity = 0.0;
        self.target_yaw = yaw;
        self.jumping = false;
        self.fall_start = None;
        self.can_move = true;
        self.can_jump = true;
    }

    pub fn state(&self) -> MovementState {
        self.state
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn is_jumping(&self) -> bool {
        self.jumping
    }

    pub fn base_radius(&self) -> Option<f32> {
        self.base_radius
    }

    pub fn can_move(&self) -> bool {
        self.can_move
    }

    pub fn can_jump(&self) -> bool {
        self.can_jump
    }

    /// Gate used by animation states that must hold the character still.
    pub fn enable_movement(&mut self, enabled: bool) {
        self.can_move = enabled;
    }

    pub fn enable_jump(&mut self, enabled: bool) {
        self.can_jump = enabled;
    }

    /// Unit vector the body currently faces, on the horizontal plane.
    pub fn forward(&self) -> Vec3 {
        Vec3::new(self.yaw.sin(), 0.0, self.yaw.cos())
    }

    #[cfg(test)]
    pub(crate) fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    pub fn tick(
        &mut self,
        dt: f32,
        intent: &mut MovementIntent,
        ctx: &mut TickContext<'_>,
    ) -> LocomotionOutputs {
        let mut outputs = LocomotionOutputs::default();
        let position = ctx.motor.position();
        let previous = self.state;
        let vertical_before = self.velocity.y;

        // 1. Water first; a submerged body is never judged airborne.
        if self.water_sensor.check(ctx.water, position) {
            if self.state != MovementState::InWater {
                self.enter_water(ctx.motor);
                outputs.water_landing = previous == MovementState::Airborne
                    && vertical_before < -self.tuning.water_landing_speed;
            }
        } else {
            if self.state == MovementState::InWater {
                self.exit_water(ctx.motor);
            }
            // 2. Ground.
            let on_ground = self.ground_sensor.check(ctx.ground, position);
            self.apply_ground_sample(on_ground, position, &mut outputs);
        }

        // 3. Vertical velocity policy.
        match self.state {
            MovementState::Airborne => {
                self.velocity.y += self.tuning.gravity * dt;
                if self.tuning.max_fall_speed > 0.0 {
                    self.velocity.y = self.velocity.y.max(-self.tuning.max_fall_speed);
                }
            }
            // Still touching ground on the way up: the arc integrates from
            // the launch tick. A jump that tops out before clearing the
            // ground sensor ends there.
            MovementState::Grounded if self.jumping => {
                self.velocity.y += self.tuning.gravity * dt;
                if self.velocity.y <= 0.0 {
                    self.jumping = false;
                    self.velocity.y = self.tuning.ground_snap_velocity(dt);
                }
            }
            MovementState::Grounded => {
                self.velocity.y = self.tuning.ground_snap_velocity(dt);
            }
            MovementState::InWater => self.velocity.y = 0.0,
        }

        // 4. Jump. The request is consumed whether or not it is honoured.
        if intent.take_jump() && self.state == MovementState::Grounded && self.can_jump {
            self.velocity.y = self.tuning.jump_velocity();
            self.jumping = true;
            outputs.jump = true;
            debug!("Jump: vy={:.3}", self.velocity.y);
        }

        // 5. Planar input direction.
        let axis = intent.move_axis();
        let (direction, magnitude) = if intent.auto_run() {
            (self.forward(), 1.0)
        } else {
            (Vec3::new(axis.x, 0.0, axis.y), intent.magnitude())
        };
        let has_input = direction != Vec3::ZERO;

        // 6. Target speed with dead-band.
        let target_speed = if has_input && self.can_move {
            self.max_speed(intent) * magnitude
        } else {
            0.0
        };
        let current_speed = self.speed;
        if (current_speed - target_speed).abs() > self.tuning.speed_dead_band {
            let smooth_time = self
                .tuning
                .profile(self.state)
                .smooth_time(current_speed, target_speed);
            self.speed = smooth_damp(
                current_speed,
                target_speed,
                &mut self.speed_velocity,
                smooth_time,
                dt,
            );
        } else {
            self.speed = target_speed;
            self.speed_velocity = 0.0;
        }

        // 7. Facing.
        if has_input && self.state != MovementState::Airborne {
            let mut target_yaw = yaw_from_direction(direction.x, direction.z);
            if !intent.auto_run() {
                target_yaw += ctx.camera_yaw.unwrap_or(0.0);
            }
            self.target_yaw = target_yaw;
            self.yaw = smooth_damp_angle(
                self.yaw,
                self.target_yaw,
                &mut self.yaw_velocity,
                self.tuning.rotation_smooth_time,
                dt,
            );
            ctx.motor.set_rotation(Quat::from_rotation_y(self.yaw));
        }

        // 8. Compose and apply.
        let heading = Vec3::new(self.target_yaw.sin(), 0.0, self.target_yaw.cos());
        self.velocity.x = heading.x * self.speed;
        self.velocity.z = heading.z * self.speed;
        ctx.motor.move_by(self.velocity * dt);

        // 9. Observable flags.
        outputs.move_speed = self.speed;
        outputs.grounded = self.state == MovementState::Grounded;
        outputs.falling = self.state == MovementState::Airborne;
        outputs.swimming = self.state == MovementState::InWater;
        outputs
    }

    fn max_speed(&self, intent: &MovementIntent) -> f32 {
        match self.state {
            MovementState::InWater => self.tuning.swim_speed,
            _ if intent.running() || intent.device() == DeviceClass::Gamepad => {
                self.tuning.run_speed
            }
            _ => self.tuning.walk_speed,
        }
    }

    fn apply_ground_sample(&mut self, on_ground: bool, position: Vec3, outputs: &mut LocomotionOutputs) {
        match (self.state, on_ground) {
            (MovementState::Grounded, false) => {
                self.state = MovementState::Airborne;
                self.fall_start = Some(position);
                if !self.jumping {
                    self.velocity.y = 0.0;
                }
                debug!("Left ground at y={:.2}, jumping={}", position.y, self.jumping);
            }
            (MovementState::Airborne, true) => {
                let distance = self
                    .fall_start
                    .take()
                    .map_or(0.0, |start| (position.y - start.y).abs());
                outputs.landed = true;
                outputs.hard_land = distance > self.tuning.hard_land_distance;
                self.jumping = false;
                self.state = MovementState::Grounded;
                debug!(
                    "Landed: fall_distance={:.2}, hard_land={}",
                    distance, outputs.hard_land
                );
            }
            (MovementState::InWater, true) => {
                self.state = MovementState::Grounded;
                debug!("Left water onto ground");
            }
            (MovementState::InWater, false) => {
                self.state = MovementState::Airborne;
                self.fall_start = Some(position);
                debug!("Left water into the air at y={:.2}", position.y);
            }
            _ => {}
        }
    }

    fn enter_water(&mut self, motor: &mut dyn CharacterMotor) {
        let base = *self.base_radius.get_or_insert_with(|| motor.radius());
        motor.set_radius(self.tuning.swim_radius);
        self.state = MovementState::InWater;
        self.jumping = false;
        self.fall_start = None;
        debug!(
            "Entered water: radius {:.2} -> {:.2}",
            base, self.tuning.swim_radius
        );
    }

    fn exit_water(&mut self, motor: &mut dyn CharacterMotor) {
        if let Some(base) = self.base_radius {
            motor.set_radius(base);
        }
    }
}
