//! On-disk configuration for plexus.
//!
//! The file is TOML, split into `[field]`, `[tilt]` and `[display]` sections.
//! Every section and key is optional; anything left out takes its default.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use plexus_core::{FieldSettings, Theme, TiltSettings};
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "config.toml";
const LOG_FILE: &str = "plexus.log";

/// Errors raised while loading or saving configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid setting: {0}")]
    Invalid(String),
}

/// Terminal rendering options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Target refresh rate of the animation.
    pub fps: u32,
    /// Virtual pixels spanned by one terminal column.
    pub cell_width: f64,
    /// Virtual pixels spanned by one terminal row.
    pub cell_height: f64,
    pub theme: Theme,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            fps: 60,
            cell_width: 8.0,
            cell_height: 16.0,
            theme: Theme::default(),
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub field: FieldSettings,
    pub tilt: TiltSettings,
    pub display: DisplaySettings,
}

impl Config {
    /// Platform config file location, if a home directory can be resolved.
    pub fn path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load from the platform location, falling back to defaults when the
    /// file does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load and validate the file at `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Write to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reject settings the renderer cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let field = &self.field;
        let tilt = &self.tilt;
        let display = &self.display;
        for (name, value) in [
            ("field.connection_distance", field.connection_distance),
            ("field.max_speed", field.max_speed),
            ("field.min_radius", field.min_radius),
            ("field.max_radius", field.max_radius),
            ("field.line_width", field.line_width),
            ("field.line_opacity", field.line_opacity as f64),
            ("tilt.max_angle", tilt.max_angle),
            ("tilt.perspective", tilt.perspective),
            ("tilt.lift", tilt.lift),
            ("display.cell_width", display.cell_width),
            ("display.cell_height", display.cell_height),
        ] {
            if !value.is_finite() {
                return Err(invalid(&format!("{name} must be a finite number")));
            }
        }

        if field.particle_count == 0 {
            return Err(invalid("field.particle_count must be at least 1"));
        }
        if !(field.connection_distance > 0.0) {
            return Err(invalid("field.connection_distance must be positive"));
        }
        if field.max_speed < 0.0 {
            return Err(invalid("field.max_speed must not be negative"));
        }
        if field.min_radius < 0.0 || field.max_radius < field.min_radius {
            return Err(invalid(
                "field radius range must satisfy 0 <= min_radius <= max_radius",
            ));
        }
        if !(0.0..=1.0).contains(&field.line_opacity) {
            return Err(invalid("field.line_opacity must be within 0..=1"));
        }
        if field.line_width < 0.0 {
            return Err(invalid("field.line_width must not be negative"));
        }
        if tilt.max_angle < 0.0 {
            return Err(invalid("tilt.max_angle must not be negative"));
        }
        if !(tilt.perspective > 0.0) {
            return Err(invalid("tilt.perspective must be positive"));
        }
        if display.fps == 0 {
            return Err(invalid("display.fps must be at least 1"));
        }
        if !(display.cell_width > 0.0 && display.cell_height > 0.0) {
            return Err(invalid("display cell size must be positive"));
        }
        Ok(())
    }
}

/// Where the log file is written, if a data directory can be resolved.
pub fn log_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_local_dir().join(LOG_FILE))
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "plexus")
}

fn invalid(msg: &str) -> ConfigError {
    ConfigError::Invalid(msg.to_string())
}
