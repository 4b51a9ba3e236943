//! Viewer configuration
//!
//! Stored as RON. Every field is optional in the file; missing ones take
//! the defaults below.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::rasterizer::{Color, CullMode, Light, Mat4, RenderMode, RenderSettings, Vec3, HEIGHT, WIDTH};

/// Largest framebuffer side; the screen texture takes 16-bit dimensions
pub const MAX_DIMENSION: usize = u16::MAX as usize;

/// Config file looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "flatcube.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Framebuffer size in pixels
    pub width: usize,
    pub height: usize,
    /// Window size = framebuffer size * window_scale
    pub window_scale: f32,

    pub fov_degrees: f32,
    pub z_near: f32,
    pub z_far: f32,

    /// Geometry file; the builtin cube is used when unset or unloadable
    pub mesh_path: Option<PathBuf>,
    /// Image drawn behind the mesh every frame
    pub backdrop_path: Option<PathBuf>,

    pub camera_position: Vec3,
    pub light_direction: Vec3,
    pub mesh_translation: Vec3,
    pub mesh_scale: Vec3,

    /// Rotation added per reference tick, radians per axis
    pub rotation_per_tick: Vec3,
    /// Length of the reference tick in seconds
    pub reference_tick: f32,

    /// Dot grid spacing in pixels, 0 disables it
    pub grid_spacing: usize,
    pub background: Color,
    pub grid_color: Color,
    pub wire_color: Color,
    pub vertex_color: Color,

    pub render_mode: RenderMode,
    pub cull_mode: CullMode,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            window_scale: 1.0,
            fov_degrees: 60.0,
            z_near: 0.1,
            z_far: 100.0,
            mesh_path: None,
            backdrop_path: None,
            camera_position: Vec3::ZERO,
            light_direction: Vec3::new(0.0, 0.0, 1.0),
            mesh_translation: Vec3::new(0.0, 0.0, 5.0),
            mesh_scale: Vec3::ONE,
            rotation_per_tick: Vec3::new(0.01, 0.01, 0.01),
            reference_tick: 1.0 / 30.0,
            grid_spacing: 50,
            background: Color::BLACK,
            grid_color: Color::GRAY,
            wire_color: Color::WHITE,
            vertex_color: Color::RED,
            render_mode: RenderMode::default(),
            cull_mode: CullMode::default(),
        }
    }
}

impl ViewerConfig {
    /// Load a config from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron(&contents)
    }

    /// Parse and validate a RON string
    pub fn from_ron(s: &str) -> Result<Self, ConfigError> {
        let config: ViewerConfig = ron::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Save a config to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .indentor("  ".to_string());
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Config from an explicit path, else `flatcube.ron` if present, else
    /// defaults. A broken file is logged and replaced by defaults.
    pub fn discover(explicit: Option<&Path>) -> Self {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => {
                let p = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !p.exists() {
                    log::info!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    return Self::default();
                }
                p
            }
        };

        match Self::load(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::error!("Failed to load config {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "framebuffer size {}x{} is empty",
                self.width, self.height
            )));
        }
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            return Err(ConfigError::Invalid(format!(
                "framebuffer size {}x{} exceeds {}",
                self.width, self.height, MAX_DIMENSION
            )));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!("fov {} out of range", self.fov_degrees)));
        }
        if !(self.z_near > 0.0 && self.z_far > self.z_near) {
            return Err(ConfigError::Invalid(format!(
                "clip planes near={} far={}",
                self.z_near, self.z_far
            )));
        }
        if !(self.reference_tick > 0.0) {
            return Err(ConfigError::Invalid("reference_tick must be positive".into()));
        }
        if !(self.window_scale > 0.0) {
            return Err(ConfigError::Invalid("window_scale must be positive".into()));
        }
        Ok(())
    }

    /// Radians per second; reproduces `rotation_per_tick` at the reference tick
    pub fn angular_velocity(&self) -> Vec3 {
        self.rotation_per_tick * (1.0 / self.reference_tick)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective(
            self.fov_degrees.to_radians(),
            self.height as f32 / self.width as f32,
            self.z_near,
            self.z_far,
        )
    }

    pub fn light(&self) -> Light {
        Light::new(self.light_direction)
    }

    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            mode: self.render_mode,
            cull: self.cull_mode,
            wire_color: self.wire_color,
            vertex_color: self.vertex_color,
        }
    }
}
