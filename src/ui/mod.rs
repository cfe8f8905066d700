//! UI domain: on-screen controls hint.

mod controls;

use bevy::prelude::*;

use crate::ui::controls::{spawn_controls_hint, update_controls_hint};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_controls_hint)
            .add_systems(Update, update_controls_hint);
    }
}
