//! Engine configuration resource.
//!
//! Canvas size, display placement and window settings, loaded from an INI
//! file. Missing keys keep their defaults, so a partial file is fine.
//!
//! # Configuration File Format
//!
//! ```ini
//! [canvas]
//! width = 320
//! height = 200
//!
//! [display]
//! scale = 3.0
//! origin_x = 0
//! origin_y = 0
//! auto_scale = true
//!
//! [window]
//! width = 960
//! height = 600
//! target_fps = 60
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::error::EngineError;

const DEFAULT_CANVAS_WIDTH: u32 = 320;
const DEFAULT_CANVAS_HEIGHT: u32 = 200;
const DEFAULT_SCALE: f32 = 1.0;
const DEFAULT_AUTO_SCALE: bool = true;
const DEFAULT_WINDOW_WIDTH: u32 = 960;
const DEFAULT_WINDOW_HEIGHT: u32 = 600;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_CONFIG_PATH: &str = "./spritestage.ini";

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Logical draw surface width in pixels.
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Host pixels per canvas pixel, used when `auto_scale` is off.
    pub scale: f32,
    pub origin_x: f32,
    pub origin_y: f32,
    /// Fit the canvas to the window instead of using `scale`.
    pub auto_scale: bool,
    pub window_width: u32,
    pub window_height: u32,
    pub target_fps: u32,
    pub config_path: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            scale: DEFAULT_SCALE,
            origin_x: 0.0,
            origin_y: 0.0,
            auto_scale: DEFAULT_AUTO_SCALE,
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load values from `config_path`. Keys that are missing or fail to
    /// parse keep their current values.
    pub fn load_from_file(&mut self) -> Result<(), EngineError> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(EngineError::ConfigLoad)?;

        let uint = |section: &str, key: &str| {
            config
                .getuint(section, key)
                .ok()
                .flatten()
                .and_then(|v| u32::try_from(v).ok())
        };
        let float = |section: &str, key: &str| {
            config.getfloat(section, key).ok().flatten().map(|v| v as f32)
        };

        if let Some(width) = uint("canvas", "width") {
            self.canvas_width = width;
        }
        if let Some(height) = uint("canvas", "height") {
            self.canvas_height = height;
        }

        if let Some(scale) = float("display", "scale").filter(|s| *s > 0.0) {
            self.scale = scale;
        }
        if let Some(x) = float("display", "origin_x") {
            self.origin_x = x;
        }
        if let Some(y) = float("display", "origin_y") {
            self.origin_y = y;
        }
        if let Some(auto) = config.getbool("display", "auto_scale").ok().flatten() {
            self.auto_scale = auto;
        }

        if let Some(width) = uint("window", "width") {
            self.window_width = width;
        }
        if let Some(height) = uint("window", "height") {
            self.window_height = height;
        }
        if let Some(fps) = uint("window", "target_fps") {
            self.target_fps = fps;
        }

        info!(
            "Loaded config: {}x{} canvas, {}x{} window, scale={} (auto={}), fps={}",
            self.canvas_width,
            self.canvas_height,
            self.window_width,
            self.window_height,
            self.scale,
            self.auto_scale,
            self.target_fps
        );

        Ok(())
    }

    /// Write the current values to `config_path`, creating the file if needed.
    pub fn save_to_file(&self) -> Result<(), EngineError> {
        let mut config = Ini::new();

        config.set("canvas", "width", Some(self.canvas_width.to_string()));
        config.set("canvas", "height", Some(self.canvas_height.to_string()));

        config.set("display", "scale", Some(self.scale.to_string()));
        config.set("display", "origin_x", Some(self.origin_x.to_string()));
        config.set("display", "origin_y", Some(self.origin_y.to_string()));
        config.set("display", "auto_scale", Some(self.auto_scale.to_string()));

        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| EngineError::ConfigSave(e.to_string()))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    pub fn canvas_size(&self) -> (u32, u32) {
        (self.canvas_width, self.canvas_height)
    }

    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}
