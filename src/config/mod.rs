mod loader;

use serde::{Deserialize, Serialize};
use std::path::Path;

pub use loader::load_config;

/// Application configuration as read from YAML
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub screen: ScreenSettings,
    #[serde(default)]
    pub torus: TorusSettings,
    #[serde(default)]
    pub animation: AnimationSettings,
}

/// Output surface settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScreenSettings {
    /// Width and height in character cells
    #[serde(default = "default_screen_size")]
    pub size: usize,
    /// Prefix written before every row
    #[serde(default)]
    pub indent: String,
}

fn default_screen_size() -> usize {
    crate::DEFAULT_SCREEN_SIZE
}

impl Default for ScreenSettings {
    fn default() -> Self {
        Self {
            size: default_screen_size(),
            indent: String::new(),
        }
    }
}

/// Torus geometry and sampling density
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TorusSettings {
    /// Tube radius (R1)
    #[serde(default = "default_minor_radius")]
    pub minor_radius: f64,
    /// Distance from the torus center to the tube center (R2)
    #[serde(default = "default_major_radius")]
    pub major_radius: f64,
    /// Distance from the viewer to the torus center (K2)
    #[serde(default = "default_viewer_distance")]
    pub viewer_distance: f64,
    #[serde(default = "default_theta_step")]
    pub theta_step: f64,
    #[serde(default = "default_phi_step")]
    pub phi_step: f64,
}

fn default_minor_radius() -> f64 {
    1.0
}

fn default_major_radius() -> f64 {
    2.0
}

fn default_viewer_distance() -> f64 {
    15.0
}

fn default_theta_step() -> f64 {
    0.007
}

fn default_phi_step() -> f64 {
    0.02
}

impl Default for TorusSettings {
    fn default() -> Self {
        Self {
            minor_radius: default_minor_radius(),
            major_radius: default_major_radius(),
            viewer_distance: default_viewer_distance(),
            theta_step: default_theta_step(),
            phi_step: default_phi_step(),
        }
    }
}

/// Rotation and timing of the animation loop
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnimationSettings {
    #[serde(default = "default_initial_angle")]
    pub initial_a: f64,
    #[serde(default = "default_initial_angle")]
    pub initial_b: f64,
    #[serde(default = "default_delta_a")]
    pub delta_a: f64,
    #[serde(default = "default_delta_b")]
    pub delta_b: f64,
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
}

fn default_initial_angle() -> f64 {
    1.0
}

fn default_delta_a() -> f64 {
    0.14
}

fn default_delta_b() -> f64 {
    0.06
}

fn default_frame_interval_ms() -> u64 {
    10
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            initial_a: default_initial_angle(),
            initial_b: default_initial_angle(),
            delta_a: default_delta_a(),
            delta_b: default_delta_b(),
            frame_interval_ms: default_frame_interval_ms(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        load_config(path)
    }

    /// Load from `path` when given, otherwise use built-in defaults
    pub fn load_or_default(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        match config_path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Build the validated sampler configuration
    pub fn torus_config(&self) -> Result<TorusConfig, ConfigError> {
        TorusConfig::with_settings(self.screen.size, &self.torus)
    }
}

/// Validated, immutable parameters of one rendering session.
///
/// `K1` is derived once here so that the torus fills roughly 3/8 of the
/// screen width at its widest point.
#[derive(Debug, Clone, PartialEq)]
pub struct TorusConfig {
    r1: f64,
    r2: f64,
    k1: f64,
    k2: f64,
    width: usize,
    height: usize,
    theta_step: f64,
    phi_step: f64,
}

impl TorusConfig {
    /// Reference geometry on a `size` x `size` screen
    pub fn new(size: usize) -> Result<Self, ConfigError> {
        Self::with_settings(size, &TorusSettings::default())
    }

    pub fn with_settings(size: usize, settings: &TorusSettings) -> Result<Self, ConfigError> {
        if size == 0 || size > crate::MAX_SCREEN_SIZE {
            return Err(ConfigError::InvalidScreenSize(size));
        }

        let r1 = settings.minor_radius;
        let r2 = settings.major_radius;
        if !(r1.is_finite() && r2.is_finite()) || r1 <= 0.0 || r1 >= r2 {
            return Err(ConfigError::InvalidRadii { minor: r1, major: r2 });
        }

        let k2 = settings.viewer_distance;
        if !k2.is_finite() || k2 <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "viewer_distance must be positive, got {}",
                k2
            )));
        }

        for (name, step) in [("theta_step", settings.theta_step), ("phi_step", settings.phi_step)] {
            if !step.is_finite() || step <= 0.0 {
                return Err(ConfigError::Validation(format!(
                    "{} must be positive, got {}",
                    name, step
                )));
            }
        }

        let width = size;
        let height = size;
        let k1 = width as f64 * k2 * 3.0 / (8.0 * (r1 + r2));

        Ok(Self {
            r1,
            r2,
            k1,
            k2,
            width,
            height,
            theta_step: settings.theta_step,
            phi_step: settings.phi_step,
        })
    }

    pub fn minor_radius(&self) -> f64 {
        self.r1
    }

    pub fn major_radius(&self) -> f64 {
        self.r2
    }

    /// Projection scale (K1)
    pub fn projection_scale(&self) -> f64 {
        self.k1
    }

    pub fn viewer_distance(&self) -> f64 {
        self.k2
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn theta_step(&self) -> f64 {
        self.theta_step
    }

    pub fn phi_step(&self) -> f64 {
        self.phi_step
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Screen size must be between 1 and {max}, got {0}", max = crate::MAX_SCREEN_SIZE)]
    InvalidScreenSize(usize),

    #[error("Invalid torus radii: minor {minor} must be positive and smaller than major {major}")]
    InvalidRadii { minor: f64, major: f64 },

    #[error("Configuration validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_projection_scale() {
        let config = TorusConfig::new(20).unwrap();
        // 20 * 15 * 3 / (8 * 3)
        assert!((config.projection_scale() - 37.5).abs() < 1e-12);
        assert_eq!(config.width(), 20);
        assert_eq!(config.height(), 20);
    }

    #[test]
    fn test_zero_size_rejected() {
        let result = TorusConfig::new(0);
        assert!(matches!(result, Err(ConfigError::InvalidScreenSize(0))));
    }

    #[test]
    fn test_oversized_screen_rejected() {
        let result = TorusConfig::new(usize::MAX);
        assert!(matches!(result, Err(ConfigError::InvalidScreenSize(_))));

        let result = TorusConfig::new(crate::MAX_SCREEN_SIZE + 1);
        assert!(matches!(result, Err(ConfigError::InvalidScreenSize(_))));

        assert!(TorusConfig::new(crate::MAX_SCREEN_SIZE).is_ok());
    }

    #[test]
    fn test_inverted_radii_rejected() {
        let settings = TorusSettings {
            minor_radius: 3.0,
            major_radius: 2.0,
            ..TorusSettings::default()
        };
        let result = TorusConfig::with_settings(20, &settings);
        assert!(matches!(result, Err(ConfigError::InvalidRadii { .. })));
    }

    #[test]
    fn test_equal_radii_rejected() {
        let settings = TorusSettings {
            minor_radius: 2.0,
            major_radius: 2.0,
            ..TorusSettings::default()
        };
        assert!(TorusConfig::with_settings(20, &settings).is_err());
    }

    #[test]
    fn test_non_positive_step_rejected() {
        let settings = TorusSettings {
            phi_step: 0.0,
            ..TorusSettings::default()
        };
        let result = TorusConfig::with_settings(20, &settings);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_nan_viewer_distance_rejected() {
        let settings = TorusSettings {
            viewer_distance: f64::NAN,
            ..TorusSettings::default()
        };
        assert!(TorusConfig::with_settings(20, &settings).is_err());
    }

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.screen.size, 20);
        assert!(config.screen.indent.is_empty());
        assert_eq!(config.torus, TorusSettings::default());
        assert_eq!(config.animation.frame_interval_ms, 10);
        assert!((config.animation.delta_a - 0.14).abs() < f64::EPSILON);
        assert!((config.animation.delta_b - 0.06).abs() < f64::EPSILON);
    }

    #[test]
    fn test_load_or_default_without_path() {
        let config = AppConfig::load_or_default(None).unwrap();
        assert_eq!(config.screen.size, crate::DEFAULT_SCREEN_SIZE);
        assert!(config.torus_config().is_ok());
    }
}
