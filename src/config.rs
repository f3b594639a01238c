// src/config.rs

use std::path::Path;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::CLASSIC_HALF_SIZE;
use crate::mapping_lib::{LeakGuard, DEFAULT_STEP_BUDGET};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Flat colour over everything out of view.
    #[default]
    Classic,
    /// Redraws the level texture tinted by `visibility`.
    Fast,
    /// Re-renders the scene without hidden drawables into an offscreen target.
    Fancy,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcclusionConfig {
    pub render_mode: RenderMode,
    /// How much of the out-of-view level stays visible, `0..=1`.
    pub visibility: f32,
    /// Blend from black towards the palette's black, `0..=1`.
    pub brightness: f32,
    /// Sub-tile shrink in world units. `10` selects whole-tile edges.
    pub tile_size: f32,
    /// Mapper steps per tick.
    pub mapper_budget: usize,
    pub leak_guard: LeakGuard,
}

impl Default for OcclusionConfig {
    fn default() -> Self {
        Self {
            render_mode: RenderMode::Classic,
            visibility: 0.0,
            brightness: 0.0,
            tile_size: CLASSIC_HALF_SIZE,
            mapper_budget: DEFAULT_STEP_BUDGET,
            leak_guard: LeakGuard::LeftOnly,
        }
    }
}

impl OcclusionConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: OcclusionConfig = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&data)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let unit = 0.0..=1.0;
        if !unit.contains(&self.visibility) {
            return Err(ConfigError::Invalid(format!("visibility {} not in [0, 1]", self.visibility)));
        }
        if !unit.contains(&self.brightness) {
            return Err(ConfigError::Invalid(format!("brightness {} not in [0, 1]", self.brightness)));
        }
        if !(0.0..=CLASSIC_HALF_SIZE).contains(&self.tile_size) {
            return Err(ConfigError::Invalid(format!(
                "tile_size {} not in [0, {}]",
                self.tile_size, CLASSIC_HALF_SIZE
            )));
        }
        if self.mapper_budget == 0 {
            return Err(ConfigError::Invalid("mapper_budget must be positive".to_string()));
        }
        Ok(())
    }

    /// Colour of the out-of-view blocker given the room palette's black.
    pub fn blocker_tint(&self, palette_black: [f32; 4]) -> [f32; 4] {
        match self.render_mode {
            RenderMode::Fast => [1.0 - self.visibility, 0.0, 0.0, 1.0],
            RenderMode::Classic | RenderMode::Fancy => {
                let b = self.brightness;
                [
                    palette_black[0] * b,
                    palette_black[1] * b,
                    palette_black[2] * b,
                    1.0 + (palette_black[3] - 1.0) * b,
                ]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = OcclusionConfig::from_yaml_str("tile_size: 7.5\nrender_mode: fancy\n").unwrap();
        assert_eq!(config.tile_size, 7.5);
        assert_eq!(config.render_mode, RenderMode::Fancy);
        assert_eq!(config.mapper_budget, DEFAULT_STEP_BUDGET);
        assert_eq!(config.leak_guard, LeakGuard::LeftOnly);
    }

    #[test]
    fn leak_guard_parses() {
        let config = OcclusionConfig::from_yaml_str("leak_guard: symmetric").unwrap();
        assert_eq!(config.leak_guard, LeakGuard::Symmetric);
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(matches!(
            OcclusionConfig::from_yaml_str("tile_size: 12"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            OcclusionConfig::from_yaml_str("visibility: 1.5"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            OcclusionConfig::from_yaml_str("mapper_budget: 0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            OcclusionConfig::from_yaml_str("render_mode: [1, 2]"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = OcclusionConfig::load_from_path("/nonexistent/los.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn blocker_tint_by_mode() {
        let palette = [0.2, 0.1, 0.0, 1.0];
        let fast = OcclusionConfig { render_mode: RenderMode::Fast, visibility: 0.25, ..Default::default() };
        assert_eq!(fast.blocker_tint(palette), [0.75, 0.0, 0.0, 1.0]);

        let classic = OcclusionConfig { brightness: 0.5, ..Default::default() };
        assert_eq!(classic.blocker_tint(palette), [0.1, 0.05, 0.0, 1.0]);
    }
}
