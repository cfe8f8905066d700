//! Locomotion domain: collide-and-slide over swept shape casts.

use avian3d::prelude::*;
use bevy::prelude::*;

/// Gap kept between the body and whatever it hits.
pub(crate) const SKIN_WIDTH: f32 = 0.01;
/// Bounces per move before the remainder is dropped.
pub(crate) const MAX_SLIDES: usize = 4;

/// First blocking contact along a sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct SweepHit {
    pub distance: f32,
    pub normal: Vec3,
}

/// Move from `start` by `displacement`, sliding along every surface hit.
///
/// `cast(origin, direction, max_distance)` sweeps the body and reports the
/// first blocking contact.
pub(crate) fn collide_and_slide(
    start: Vec3,
    displacement: Vec3,
    mut cast: impl FnMut(Vec3, Dir3, f32) -> Option<SweepHit>,
) -> Vec3 {
    let mut position = start;
    let mut remaining = displacement;

    for _ in 0..MAX_SLIDES {
        let Ok((direction, length)) = Dir3::new_and_length(remaining) else {
            break;
        };

        let Some(hit) = cast(position, direction, length + SKIN_WIDTH) else {
            position += remaining;
            break;
        };

        let travel = (hit.distance - SKIN_WIDTH).clamp(0.0, length);
        position += direction * travel;
        let leftover = direction * (length - travel);
        remaining = leftover - hit.normal * leftover.dot(hit.normal);
    }

    position
}

/// Sweep `collider` through the physics world against `filter`.
pub(crate) fn physics_sweep<'a>(
    spatial: &'a SpatialQuery,
    collider: &'a Collider,
    rotation: Quat,
    filter: &'a SpatialQueryFilter,
) -> impl FnMut(Vec3, Dir3, f32) -> Option<SweepHit> + 'a {
    move |origin, direction, max_distance| {
        let config = ShapeCastConfig {
            ignore_origin_penetration: true,
            ..ShapeCastConfig::from_max_distance(max_distance)
        };
        spatial
            .cast_shape(collider, origin, rotation, direction, &config, filter)
            .map(|hit| SweepHit {
                distance: hit.distance,
                normal: hit.normal1,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A single infinite wall facing -X at `x`.
    fn wall_at(x: f32) -> impl FnMut(Vec3, Dir3, f32) -> Option<SweepHit> {
        move |origin, direction, max_distance| {
            if direction.x <= 0.0 {
                return None;
            }
            let distance = (x - origin.x) / direction.x;
            (distance >= 0.0 && distance <= max_distance).then_some(SweepHit {
                distance,
                normal: Vec3::NEG_X,
            })
        }
    }

    #[test]
    fn test_free_move_is_unchanged() {
        let end = collide_and_slide(Vec3::ZERO, Vec3::new(1.0, 0.0, 2.0), |_, _, _| None);
        assert_eq!(end, Vec3::new(1.0, 0.0, 2.0));
    }

    #[test]
    fn test_zero_move_never_casts() {
        let end = collide_and_slide(Vec3::ONE, Vec3::ZERO, |_, _, _| {
            panic!("cast for a zero move")
        });
        assert_eq!(end, Vec3::ONE);
    }

    #[test]
    fn test_head_on_hit_stops_at_skin() {
        let end = collide_and_slide(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0), wall_at(1.0));
        assert!((end.x - (1.0 - SKIN_WIDTH)).abs() < 1e-5);
    }

    #[test]
    fn test_oblique_hit_slides_along_wall() {
        let end = collide_and_slide(Vec3::ZERO, Vec3::new(2.0, 0.0, 2.0), wall_at(1.0));
        assert!(end.x < 1.0);
        assert!((end.z - 2.0).abs() < 1e-4);
    }
}
