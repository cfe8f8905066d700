//! Content domain: data-driven controller configuration.

mod data;
mod loader;

#[cfg(test)]
mod tests;

pub use data::{CONFIG_SCHEMA_VERSION, ControllerConfig};
pub use loader::{
    ContentLoadError, load_controller_config, parse_controller_config, write_controller_config,
};

use bevy::prelude::*;
use std::path::Path;

/// Location of the controller config, relative to the working directory.
pub const CONTROLLER_CONFIG_PATH: &str = "assets/data/controller.ron";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, load_content);
    }
}

fn load_content(mut commands: Commands) {
    let config = match load_controller_config(Path::new(CONTROLLER_CONFIG_PATH)) {
        Ok(config) => {
            info!("Loaded controller config from {}", CONTROLLER_CONFIG_PATH);
            config
        }
        Err(e) => {
            warn!("{}; using built-in defaults", e);
            ControllerConfig::default()
        }
    };
    commands.insert_resource(config);
}
