//! Debug domain: sensor gizmos, a state overlay and respawn for fast
//! iteration. Built only with the `dev-tools` feature.
//!
//! Hotkeys:
//! - F1 toggles the state overlay
//! - F2 toggles sensor gizmos
//! - F3 respawns the player at the origin

mod systems;

use bevy::prelude::*;

use crate::debug::systems::{
    draw_sensor_gizmos, handle_debug_hotkeys, update_debug_info_overlay,
};

/// Resource tracking debug mode state
#[derive(Resource, Debug)]
pub struct DebugState {
    /// Whether the state overlay is visible
    pub show_info: bool,
    /// Whether environment sensors are drawn
    pub show_sensors: bool,
}

impl Default for DebugState {
    fn default() -> Self {
        Self {
            show_info: false,
            show_sensors: true,
        }
    }
}

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>().add_systems(
            Update,
            (
                handle_debug_hotkeys,
                update_debug_info_overlay,
                draw_sensor_gizmos.run_if(|state: Res<DebugState>| state.show_sensors),
            )
                .chain(),
        );
    }
}
