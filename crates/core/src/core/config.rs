//! Configuration for the backend endpoint and the particle view.

use serde::{Deserialize, Serialize};

use crate::camera::DEFAULT_DISTANCE;
use crate::error::ConfigError;
use crate::field::DEFAULT_PARTICLE_COUNT;
use crate::raster::{BACKGROUND, PARTICLE_COLOR};

/// Environment variable naming the backend base URL.
///
/// Read at compile time for the browser build and at run time natively.
pub const API_URL_ENV: &str = "INKLOOP_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitlistConfig {
    api_base_url: String,
}

impl WaitlistConfig {
    /// Validate and normalise a base URL (trailing slashes dropped).
    pub fn new(api_base_url: &str) -> Result<Self, ConfigError> {
        let url = api_base_url.trim().trim_end_matches('/');
        if url.is_empty() {
            return Err(ConfigError::EmptyUrl);
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::UnsupportedScheme(url.to_string()));
        }
        Ok(Self {
            api_base_url: url.to_string(),
        })
    }

    /// URL baked in at build time, falling back to the local default.
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::new(option_env!("INKLOOP_API_URL").unwrap_or(DEFAULT_API_URL))
    }

    /// URL from the process environment, falling back to the build-time value.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(API_URL_ENV) {
            Ok(url) => Self::new(&url),
            Err(_) => Self::from_build_env(),
        }
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Join an absolute path (`/waitlist`) onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}

impl Default for WaitlistConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
        }
    }
}

/// Particle view settings. Every field has a default, so a partial JSON
/// object (or `{}`) is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub particle_count: usize,
    /// Side of the square viewport, in pixels.
    pub viewport: u32,
    pub seed: u64,
    pub background: u32,
    pub particle_color: u32,
    pub camera_distance: f32,
    /// Perspective point-size constant (`size · scale / depth`).
    pub point_scale: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            viewport: 550,
            seed: 0x1A4C_100F,
            background: BACKGROUND,
            particle_color: PARTICLE_COLOR,
            camera_distance: DEFAULT_DISTANCE,
            point_scale: 50.0,
        }
    }
}

impl FieldConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.viewport == 0 || self.viewport > 8192 {
            return Err(ConfigError::InvalidField(format!(
                "viewport must be in 1..=8192, got {}",
                self.viewport
            )));
        }
        if !(self.camera_distance.is_finite() && self.camera_distance > 0.0) {
            return Err(ConfigError::InvalidField(format!(
                "camera_distance must be positive, got {}",
                self.camera_distance
            )));
        }
        if !(self.point_scale.is_finite() && self.point_scale > 0.0) {
            return Err(ConfigError::InvalidField(format!(
                "point_scale must be positive, got {}",
                self.point_scale
            )));
        }
        Ok(())
    }
}
