use crate::types::{Animation, HexColor, Selection, Shape, SpawnCount};
use crate::ui::starfield::DEFAULT_STAR_COUNT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const MAX_STAR_COUNT: usize = 5_000;
pub const DEFAULT_FPS: u32 = 30;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write config {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Startup settings. Seeds the initial selection; the session never writes back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub star_count: usize,
    pub shape: Shape,
    pub animation: Animation,
    pub color: HexColor,
    pub spawn_count: SpawnCount,
    pub trail: bool,
    pub fps: u32,
    /// Oldest shapes are evicted past this many. `None` keeps every shape.
    pub max_shapes: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        let selection = Selection::default();
        Self {
            star_count: DEFAULT_STAR_COUNT,
            shape: selection.shape,
            animation: selection.animation,
            color: selection.color,
            spawn_count: selection.spawn_count,
            trail: selection.trail_enabled,
            fps: DEFAULT_FPS,
            max_shapes: None,
        }
    }
}

impl Config {
    pub fn selection(&self) -> Selection {
        Selection {
            shape: self.shape,
            color: self.color,
            animation: self.animation,
            spawn_count: self.spawn_count,
            trail_enabled: self.trail,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.star_count > MAX_STAR_COUNT {
            return Err(ConfigError::Invalid(format!(
                "starCount {} exceeds {}",
                self.star_count, MAX_STAR_COUNT
            )));
        }
        if !(1..=240).contains(&self.fps) {
            return Err(ConfigError::Invalid(format!(
                "fps {} is outside 1..=240",
                self.fps
            )));
        }
        if self.max_shapes == Some(0) {
            return Err(ConfigError::Invalid(
                "maxShapes must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// `<config_dir>/starshapes/config.json`
pub fn config_path() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("starshapes").join("config.json")
}

/// Load the config from `path`, returning defaults if the file is missing.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let config: Config = serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate()?;
    Ok(config)
}

/// Persist the config to `path`, creating parent directories.
pub fn save_config(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("starshapes-test-{}-{}", std::process::id(), name))
            .join("config.json")
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let path = scratch_path("missing");
        assert_eq!(load_config(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "shape": "star", "spawnCount": 99, "animation": "wiggle" }"#)
                .unwrap();
        assert_eq!(config.shape, Shape::Star);
        assert_eq!(config.spawn_count.get(), 20);
        assert_eq!(config.animation, Animation::Fade);
        assert_eq!(config.star_count, DEFAULT_STAR_COUNT);
        assert!(config.trail);
        assert_eq!(config.max_shapes, None);
    }

    #[test]
    fn test_bad_color_is_a_parse_error() {
        let path = scratch_path("badcolor");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{ "color": "red" }"#).unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Parse { .. })));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let config = Config {
            fps: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        let config = Config {
            star_count: MAX_STAR_COUNT + 1,
            ..Config::default()
        };
        assert!(config.validate().is_err());
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_zero_max_shapes_rejected() {
        let config = Config {
            max_shapes: Some(0),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        let config = Config {
            max_shapes: Some(1),
            ..Config::default()
        };
        assert!(config.validate().is_ok());

        let path = scratch_path("zeromax");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{ "maxShapes": 0 }"#).unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Invalid(_))));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_save_then_load() {
        let path = scratch_path("save");
        let config = Config {
            shape: Shape::Triangle,
            color: HexColor::new(0x33, 0x66, 0x99),
            max_shapes: Some(200),
            ..Config::default()
        };
        save_config(&config, &path).unwrap();
        assert_eq!(load_config(&path).unwrap(), config);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
