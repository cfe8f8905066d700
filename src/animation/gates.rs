//! Animation domain: timed windows that lock movement and jumping.

use bevy::prelude::*;

use crate::animation::Animator;
use crate::locomotion::LocomotionController;

/// Lock state change reported by [`GateWindows::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateChange {
    Locked,
    Released,
}

/// Hard-land recovery window. While open, the controller may neither move
/// nor jump.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct GateWindows {
    pub hard_land_lock: f32,
    remaining: f32,
}

impl GateWindows {
    pub fn new(hard_land_lock: f32) -> Self {
        Self {
            hard_land_lock,
            remaining: 0.0,
        }
    }

    pub fn is_locked(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Advance by `dt`. A hard landing (re)opens the full window; the tick
    /// that opens it does not count against it.
    pub fn advance(&mut self, hard_land: bool, dt: f32) -> Option<GateChange> {
        if hard_land && self.hard_land_lock > 0.0 {
            let was_locked = self.is_locked();
            self.remaining = self.hard_land_lock;
            return (!was_locked).then_some(GateChange::Locked);
        }

        if !self.is_locked() {
            return None;
        }

        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            Some(GateChange::Released)
        } else {
            None
        }
    }
}

/// Consume the animator's HardLand trigger, advance `gates` and open or close
/// the controller's movement and jump gates to match.
pub fn apply_gate_windows(
    gates: &mut GateWindows,
    animator: &mut Animator,
    controller: &mut LocomotionController,
    hard_land_id: u32,
    dt: f32,
) -> Option<GateChange> {
    let hard_land = animator.consume_trigger(hard_land_id);
    let change = gates.advance(hard_land, dt);
    match change {
        Some(GateChange::Locked) => {
            controller.enable_movement(false);
            controller.enable_jump(false);
        }
        Some(GateChange::Released) => {
            controller.enable_movement(true);
            controller.enable_jump(true);
        }
        None => {}
    }
    change
}
