//! Locomotion domain: critically damped smoothing helpers.

use std::f32::consts::{PI, TAU};

/// Smallest accepted smoothing time, in seconds.
pub const MIN_SMOOTH_TIME: f32 = 0.0001;

/// Move `current` toward `target` with a critically damped spring.
///
/// `velocity` is the caller-owned rate accumulator and must persist between
/// calls. The spring reaches the target in roughly `smooth_time` seconds and
/// never overshoots it.
pub fn smooth_damp(current: f32, target: f32, velocity: &mut f32, smooth_time: f32, dt: f32) -> f32 {
    let smooth_time = smooth_time.max(MIN_SMOOTH_TIME);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    // Pade-style approximation of exp(-x)
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * decay;
    let output = target + (change + temp) * decay;

    if (target - current > 0.0) == (output > target) {
        *velocity = 0.0;
        return target;
    }
    output
}

/// Shortest signed difference from `current` to `target`, in radians.
pub fn delta_angle(current: f32, target: f32) -> f32 {
    let delta = (target - current).rem_euclid(TAU);
    if delta > PI { delta - TAU } else { delta }
}

/// [`smooth_damp`] for angles in radians, always turning the short way round.
pub fn smooth_damp_angle(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    dt: f32,
) -> f32 {
    let target = current + delta_angle(current, target);
    smooth_damp(current, target, velocity, smooth_time, dt)
}

/// Yaw (radians around +Y) whose forward vector points along `direction`.
/// Yaw zero faces +Z.
pub fn yaw_from_direction(x: f32, z: f32) -> f32 {
    x.atan2(z)
}
