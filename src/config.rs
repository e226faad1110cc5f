//! Runtime flight configuration loaded from `assets/warpwake.toml`.
//!
//! [`FlightConfig`] is a Bevy [`Resource`] holding every tunable of the ship,
//! the catalog setup and the gravity grid. Missing keys fall back to the
//! compiled defaults, so a minimal TOML can override just the values you care
//! about:
//!
//! ```toml
//! warp_max_speed = 6.0
//! randomize_initial_angles = false
//! ```

use std::path::Path;

use bevy::math::DVec3;
use bevy::prelude::*;
use serde::Deserialize;

/// Default location of the configuration file.
pub const CONFIG_PATH: &str = "assets/warpwake.toml";

/// Errors raised while loading the configuration file.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    /// Whether the file simply does not exist.
    pub fn is_missing(&self) -> bool {
        matches!(self, ConfigError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Runtime-tunable flight, catalog and grid configuration.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FlightConfig {
    // ── Drive: Normal ─────────────────────────────────────────────────────────
    pub normal_max_speed: f64,
    pub normal_acceleration: f64,
    /// Autopilot cruise speed outside warp.
    pub cruise_speed: f64,

    // ── Drive: Warp ───────────────────────────────────────────────────────────
    pub warp_max_speed: f64,
    pub warp_acceleration: f64,
    /// Warp cruise speed as a fraction of `warp_max_speed`.
    pub warp_cruise_factor: f64,

    // ── Handling ──────────────────────────────────────────────────────────────
    /// Yaw/pitch increment in radians per tick.
    pub rotation_speed: f64,
    /// Vertical translation per tick.
    pub vertical_step: f64,
    /// Strafe translation per tick.
    pub strafe_step: f64,
    /// Speed multiplier per tick without thrust input.
    pub drag: f64,
    pub collision_radius: f64,
    pub arrival_distance: f64,
    pub start_position: [f64; 3],

    // ── Visuals ───────────────────────────────────────────────────────────────
    pub base_scale: f64,
    /// Visual scale in warp as a fraction of `base_scale`.
    pub warp_scale_factor: f64,

    // ── Catalog ───────────────────────────────────────────────────────────────
    pub randomize_initial_angles: bool,

    // ── Gravity Grid ──────────────────────────────────────────────────────────
    pub grid_size: f64,
    pub grid_divisions: usize,
    pub grid_height: f64,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            normal_max_speed: 1.2,
            normal_acceleration: 0.03,
            cruise_speed: 0.9,
            warp_max_speed: 4.5,
            warp_acceleration: 0.09,
            warp_cruise_factor: 0.7,
            rotation_speed: 0.02,
            vertical_step: 0.5,
            strafe_step: 0.5,
            drag: 0.98,
            collision_radius: 2.0,
            arrival_distance: 30.0,
            start_position: [0.0, 0.0, 200.0],
            base_scale: 0.4,
            warp_scale_factor: 0.75,
            randomize_initial_angles: true,
            grid_size: 4000.0,
            grid_divisions: 60,
            grid_height: -30.0,
        }
    }
}

impl FlightConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(contents: &str, path: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    /// Read and parse a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        Self::from_toml_str(&contents, &display)
    }

    /// Load from `path`, falling back to defaults on any failure.
    ///
    /// A missing file is expected; a broken one is worth a warning.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => {
                info!("Loaded flight config from {}", path.display());
                config
            }
            Err(err) if err.is_missing() => {
                info!("No {} found; using compiled defaults", path.display());
                Self::default()
            }
            Err(err) => {
                warn!("{err}; using compiled defaults");
                Self::default()
            }
        }
    }

    /// Ship start position as a vector.
    pub fn start_position(&self) -> DVec3 {
        DVec3::from_array(self.start_position)
    }
}
