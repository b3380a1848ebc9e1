use bevy::prelude::*;
use physics::config::{load_json, save_json, ConfigError, SimulationConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SETTINGS_PATH: &str = "sandbox.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Resource)]
#[serde(default)]
pub struct SandboxSettings {
    pub simulation: SimulationConfig,
    pub large_radius: f32,
    pub small_radius: f32,
    // seconds
    pub max_frame_secs: f32,
}

impl Default for SandboxSettings {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            large_radius: 132.0,
            small_radius: 2.0,
            max_frame_secs: 0.25,
        }
    }
}

impl SandboxSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.simulation.validate()?;
        for (name, radius) in [
            ("large_radius", self.large_radius),
            ("small_radius", self.small_radius),
        ] {
            if !(radius.is_finite() && radius > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be positive, got {}",
                    name, radius
                )));
            }
        }
        if !(self.max_frame_secs.is_finite() && self.max_frame_secs > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "max_frame_secs must be positive, got {}",
                self.max_frame_secs
            )));
        }
        Ok(())
    }
}

pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<SandboxSettings, ConfigError> {
    let settings: SandboxSettings = load_json(path)?;
    settings.validate()?;
    Ok(settings)
}

// loading happens before the log subscriber exists, so the outcome is reported at startup
#[derive(Clone, Debug, PartialEq, Resource)]
pub enum SettingsSource {
    Loaded(PathBuf),
    Created(PathBuf),
    Defaults { path: PathBuf, reason: String },
}

/// Loads the settings file, writing out the defaults if there isn't one yet. A file that
/// exists but can't be used is left alone.
pub fn load_or_create_settings<P: AsRef<Path>>(path: P) -> (SandboxSettings, SettingsSource) {
    let path = path.as_ref().to_path_buf();
    if !path.exists() {
        let settings = SandboxSettings::default();
        let source = match save_json(&path, &settings) {
            Ok(()) => SettingsSource::Created(path),
            Err(err) => SettingsSource::Defaults {
                path,
                reason: err.to_string(),
            },
        };
        return (settings, source);
    }

    match load_settings(&path) {
        Ok(settings) => (settings, SettingsSource::Loaded(path)),
        Err(err) => (
            SandboxSettings::default(),
            SettingsSource::Defaults {
                path,
                reason: err.to_string(),
            },
        ),
    }
}

pub fn report_settings_system(source: Res<SettingsSource>) {
    match &*source {
        SettingsSource::Loaded(path) => info!("loaded settings from {}", path.display()),
        SettingsSource::Created(path) => info!("wrote default settings to {}", path.display()),
        SettingsSource::Defaults { path, reason } => {
            warn!("using default settings, {}: {}", path.display(), reason)
        }
    }
}

#[cfg(test)]
mod test {
    use super::{load_or_create_settings, load_settings, SandboxSettings, SettingsSource};
    use physics::config::ConfigError;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("sandbox-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_creates_missing_file() {
        let path = temp_path("missing");
        let _ = std::fs::remove_file(&path);

        let (settings, source) = load_or_create_settings(&path);
        assert_eq!(SandboxSettings::default(), settings);
        assert_eq!(SettingsSource::Created(path.clone()), source);
        assert!(path.exists());
        assert_eq!(settings, load_settings(&path).unwrap());

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_bad_file_is_kept() {
        let path = temp_path("bad");
        std::fs::write(&path, r#"{ "small_radius": -2.0 }"#).unwrap();

        let (settings, source) = load_or_create_settings(&path);
        assert_eq!(SandboxSettings::default(), settings);
        assert!(matches!(source, SettingsSource::Defaults { .. }));
        assert!(matches!(load_settings(&path), Err(ConfigError::Invalid(_))));
        let contents = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(contents.contains("-2.0"));
    }

    #[test]
    fn test_partial_file() {
        let path = temp_path("partial");
        std::fs::write(&path, r#"{ "large_radius": 50.0, "simulation": { "substeps": 8 } }"#)
            .unwrap();

        let settings = load_settings(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(50.0, settings.large_radius);
        assert_eq!(2.0, settings.small_radius);
        assert_eq!(8, settings.simulation.substeps);
    }
}
