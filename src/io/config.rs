use crate::core::fit::FitParams;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub fit: FitConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default = "default_lights")]
    pub lights: Vec<LightConfig>,
    #[serde(default)]
    pub export: ExportConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            fit: FitConfig::default(),
            camera: CameraConfig::default(),
            lights: default_lights(),
            export: ExportConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RenderConfig {
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
    #[serde(default = "default_ambient")]
    pub ambient_light: [f32; 3],
    pub background_color: Option<[f32; 3]>,
    pub background_gradient_top: Option<[f32; 3]>,
    pub background_gradient_bottom: Option<[f32; 3]>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            ambient_light: default_ambient(),
            background_color: None,
            background_gradient_top: Some([0.2, 0.2, 0.3]),
            background_gradient_bottom: Some([0.05, 0.05, 0.1]),
        }
    }
}

/// Fit-engine policy values; see [`FitParams`] for their meaning.
#[derive(Debug, Deserialize)]
pub struct FitConfig {
    #[serde(default = "default_target_size")]
    pub target_size: f32,
    #[serde(default = "default_distance_multiplier")]
    pub distance_multiplier: f32,
    #[serde(default = "default_elevation_ratio")]
    pub elevation_ratio: f32,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            target_size: default_target_size(),
            distance_multiplier: default_distance_multiplier(),
            elevation_ratio: default_elevation_ratio(),
        }
    }
}

impl FitConfig {
    pub fn to_params(&self) -> FitParams {
        FitParams {
            target_size: self.target_size,
            distance_multiplier: self.distance_multiplier,
            elevation_ratio: self.elevation_ratio,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_camera_position")]
    pub position: [f32; 3],
    #[serde(default)]
    pub target: [f32; 3],
    #[serde(default = "default_fov")]
    pub fov: f32,
    #[serde(default = "default_projection")]
    pub projection: String,
    #[serde(default = "default_ortho_height")]
    pub ortho_height: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: default_camera_position(),
            target: [0.0, 0.0, 0.0],
            fov: default_fov(),
            projection: default_projection(),
            ortho_height: default_ortho_height(),
            near: default_near(),
            far: default_far(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LightConfig {
    pub r#type: String,
    pub position: Option<[f32; 3]>,
    pub direction: Option<[f32; 3]>,
    pub color: [f32; 3],
    pub intensity: f32,
    pub attenuation: Option<[f32; 3]>,
}

#[derive(Debug, Deserialize)]
pub struct ExportConfig {
    /// Turntable frame count for one full revolution.
    #[serde(default = "default_frames")]
    pub frames: usize,
    /// Per-frame delay in the encoded GIF.
    #[serde(default = "default_frame_delay_ms")]
    pub frame_delay_ms: u32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            frames: default_frames(),
            frame_delay_ms: default_frame_delay_ms(),
        }
    }
}

fn default_width() -> usize {
    800
}
fn default_height() -> usize {
    600
}
fn default_ambient() -> [f32; 3] {
    // 0x404040 soft white, linearized-ish
    [0.25, 0.25, 0.25]
}
fn default_target_size() -> f32 {
    5.0
}
fn default_distance_multiplier() -> f32 {
    1.5
}
fn default_elevation_ratio() -> f32 {
    0.5
}
fn default_camera_position() -> [f32; 3] {
    [0.0, 1.0, 5.0]
}
fn default_fov() -> f32 {
    75.0
}
fn default_projection() -> String {
    "perspective".to_string()
}
fn default_ortho_height() -> f32 {
    10.0
}
fn default_near() -> f32 {
    0.1
}
fn default_far() -> f32 {
    1000.0
}
fn default_frames() -> usize {
    60
}
fn default_frame_delay_ms() -> u32 {
    100
}
fn default_lights() -> Vec<LightConfig> {
    vec![
        LightConfig {
            r#type: "directional".to_string(),
            direction: Some([-1.0, -1.0, -2.0]),
            color: [1.0, 1.0, 1.0],
            intensity: 1.0,
            position: None,
            attenuation: None,
        },
        LightConfig {
            r#type: "point".to_string(),
            position: Some([5.0, 5.0, 5.0]),
            color: [1.0, 1.0, 1.0],
            intensity: 0.5,
            attenuation: Some([1.0, 0.09, 0.032]),
            direction: None,
        },
    ]
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::Config(format!(
                "failed to read '{}': {e}",
                path.as_ref().display()
            ))
        })?;
        let config: Config =
            toml::from_str(&content).map_err(|e| Error::Config(format!("invalid TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the fit engine and renderer cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.render.width == 0 || self.render.height == 0 {
            return Err(Error::Config("render size must be non-zero".into()));
        }
        if self.fit.target_size <= 0.0 || !self.fit.target_size.is_finite() {
            return Err(Error::Config("fit.target_size must be positive".into()));
        }
        if self.fit.distance_multiplier <= 0.0 || !self.fit.distance_multiplier.is_finite() {
            return Err(Error::Config(
                "fit.distance_multiplier must be positive".into(),
            ));
        }
        if self.camera.projection != "perspective" && self.camera.projection != "orthographic" {
            return Err(Error::Config(format!(
                "unknown camera projection '{}'",
                self.camera.projection
            )));
        }
        if self.export.frames == 0 {
            return Err(Error::Config("export.frames must be non-zero".into()));
        }
        Ok(())
    }
}
