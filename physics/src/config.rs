use crate::bounds::Bounds;
use glam::Vec2;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{
    fmt,
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // pixels per second squared, y down
    pub gravity: f32,
    pub substeps: u32,
    pub world_size: Vec2,
    pub restitution: f32,
    pub follow_gain: f32,
    pub rest_speed_sq: f32,
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity: 9.82 * 30.0,
            substeps: 4,
            world_size: Vec2::new(1024.0, 768.0),
            restitution: 0.8,
            follow_gain: 6.0,
            rest_speed_sq: 0.01,
            seed: 0x853c_49e6_748f_ea9b,
        }
    }
}

impl SimulationConfig {
    pub fn world_bounds(&self) -> Bounds {
        Bounds::from_size(self.world_size)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.gravity.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "gravity must be finite, got {}",
                self.gravity
            )));
        }
        if self.substeps == 0 {
            return Err(ConfigError::Invalid(
                "substeps must be at least 1".to_string(),
            ));
        }
        if !self.world_size.is_finite() || self.world_size.cmple(Vec2::ZERO).any() {
            return Err(ConfigError::Invalid(format!(
                "world_size must be positive, got {}",
                self.world_size
            )));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(ConfigError::Invalid(format!(
                "restitution must be within [0, 1], got {}",
                self.restitution
            )));
        }
        if !(self.follow_gain.is_finite() && self.follow_gain >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "follow_gain must be non-negative, got {}",
                self.follow_gain
            )));
        }
        if !(self.rest_speed_sq.is_finite() && self.rest_speed_sq >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "rest_speed_sq must be non-negative, got {}",
                self.rest_speed_sq
            )));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "config io error: {}", err),
            ConfigError::Parse(err) => write!(f, "config parse error: {}", err),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Parse(err) => Some(err),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

pub fn load_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T, ConfigError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let value = serde_json::from_reader(reader)?;

    Ok(value)
}

pub fn save_json<T: Serialize, P: AsRef<Path>>(path: P, value: &T) -> Result<(), ConfigError> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, value)?;

    Ok(())
}

#[cfg(test)]
mod test {
    use super::{load_json, save_json, ConfigError, SimulationConfig};
    use glam::Vec2;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("physics-{}-{}.json", name, std::process::id()))
    }

    fn load_config(path: impl AsRef<std::path::Path>) -> Result<SimulationConfig, ConfigError> {
        let config: SimulationConfig = load_json(path)?;
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();
        assert!((config.gravity - 294.6).abs() < 1e-3);
        assert_eq!(4, config.substeps);
        assert_eq!(Vec2::new(1024.0, 768.0), config.world_size);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects() {
        let bad = [
            SimulationConfig {
                substeps: 0,
                ..SimulationConfig::default()
            },
            SimulationConfig {
                gravity: f32::NAN,
                ..SimulationConfig::default()
            },
            SimulationConfig {
                world_size: Vec2::new(0.0, 768.0),
                ..SimulationConfig::default()
            },
            SimulationConfig {
                restitution: 1.5,
                ..SimulationConfig::default()
            },
            SimulationConfig {
                follow_gain: -1.0,
                ..SimulationConfig::default()
            },
            SimulationConfig {
                rest_speed_sq: f32::INFINITY,
                ..SimulationConfig::default()
            },
        ];
        for config in &bad {
            assert!(
                matches!(config.validate(), Err(ConfigError::Invalid(_))),
                "{:?}",
                config
            );
        }
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("save-load");
        let config = SimulationConfig {
            gravity: 10.0,
            substeps: 8,
            ..SimulationConfig::default()
        };
        save_json(&path, &config).unwrap();
        let loaded = load_config(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let path = temp_path("partial");
        std::fs::write(&path, r#"{ "substeps": 2 }"#).unwrap();
        let loaded = load_config(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(2, loaded.substeps);
        assert_eq!(SimulationConfig::default().gravity, loaded.gravity);
    }

    #[test]
    fn test_load_errors() {
        let missing = load_config(temp_path("does-not-exist"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));

        let path = temp_path("garbage");
        std::fs::write(&path, "not json").unwrap();
        let garbage = load_config(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(garbage, Err(ConfigError::Parse(_))));

        let path = temp_path("invalid");
        std::fs::write(&path, r#"{ "substeps": 0 }"#).unwrap();
        let invalid = load_config(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(invalid, Err(ConfigError::Invalid(_))));
    }
}
