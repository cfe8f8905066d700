//! Loader for the controller RON file at startup.

use ron::Options;
use std::fs;
use std::path::Path;

use super::data::{CONFIG_SCHEMA_VERSION, ControllerConfig};

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

impl std::error::Error for ContentLoadError {}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse a controller config from RON text. `file` only labels errors.
pub fn parse_controller_config(file: &str, contents: &str) -> Result<ControllerConfig, ContentLoadError> {
    let config: ControllerConfig = ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file.to_string(),
            message: format!("Parse error: {}", e),
        })?;

    if config.schema_version != CONFIG_SCHEMA_VERSION {
        return Err(ContentLoadError {
            file: file.to_string(),
            message: format!(
                "Unsupported schema_version {} (expected {})",
                config.schema_version, CONFIG_SCHEMA_VERSION
            ),
        });
    }

    Ok(config)
}

/// Load the controller config from a RON file.
pub fn load_controller_config(path: &Path) -> Result<ControllerConfig, ContentLoadError> {
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    parse_controller_config(&file_name, &contents)
}

/// Serialize a config back to pretty RON.
pub fn write_controller_config(config: &ControllerConfig) -> Result<String, ContentLoadError> {
    ron_options()
        .to_string_pretty(config, ron::ser::PrettyConfig::default())
        .map_err(|e| ContentLoadError {
            file: "<memory>".to_string(),
            message: format!("Serialize error: {}", e),
        })
}
