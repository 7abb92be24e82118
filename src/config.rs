/// Tutorial configuration
///
/// Timing constants, the maneuver guard threshold, the log level and the key
/// bindings the input observers recognize. Stored as JSON in the user config
/// directory.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

/// Application directory name under the platform config dir
pub const APP_DIR_NAME: &str = "OrbitalTutorial";

/// Key names bound to tutorial actions.
///
/// Keys are lowercase names as reported by the host shell ("enter", "space",
/// "1", "s"). The same key may be bound to actions of different steps; only
/// the active step consumes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Confirms a satisfied step and advances
    pub confirm: String,

    /// Switches the camera to the Earth view
    pub earth_view: String,

    /// Switches the camera to the spaceship view
    pub spaceship_view: String,

    /// Prograde thrust
    pub thrust_forward: String,

    /// Retrograde thrust
    pub thrust_backward: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            confirm: "enter".to_string(),
            earth_view: "1".to_string(),
            spaceship_view: "s".to_string(),
            thrust_forward: "w".to_string(),
            thrust_backward: "s".to_string(),
        }
    }
}

impl KeyBindings {
    /// Check whether `key` matches `binding` (case-insensitive)
    pub fn matches(binding: &str, key: &str) -> bool {
        binding.eq_ignore_ascii_case(key)
    }

    /// Label used in hints, e.g. "ENTER"
    pub fn label(binding: &str) -> String {
        binding.to_ascii_uppercase()
    }

    /// Keys bound to more than one action, with the actions sharing them
    pub fn shared_keys(&self) -> Vec<(String, Vec<&'static str>)> {
        let entries: [(&'static str, &str); 5] = [
            ("confirm", &self.confirm),
            ("earth_view", &self.earth_view),
            ("spaceship_view", &self.spaceship_view),
            ("thrust_forward", &self.thrust_forward),
            ("thrust_backward", &self.thrust_backward),
        ];

        let mut shared: Vec<(String, Vec<&'static str>)> = Vec::new();
        for (name, key) in entries {
            let key = key.to_ascii_lowercase();
            match shared.iter_mut().find(|(k, _)| *k == key) {
                Some((_, names)) => names.push(name),
                None => shared.push((key, vec![name])),
            }
        }
        shared.retain(|(_, names)| names.len() > 1);
        shared
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TutorialConfig {
    /// Delay between a satisfied step and entering the next one
    pub transition_delay_ms: u64,

    /// How long a feedback notification stays visible
    pub feedback_duration_ms: u64,

    /// Squared velocity-adjustment magnitude above which a paused player
    /// counts as mid-maneuver
    pub maneuver_epsilon: f32,

    /// Key bindings for tutorial actions
    pub bindings: KeyBindings,

    /// Log filter directive for the host (`RUST_LOG` takes precedence)
    pub log_level: String,
}

impl Default for TutorialConfig {
    fn default() -> Self {
        Self {
            transition_delay_ms: 500,
            feedback_duration_ms: 2000,
            maneuver_epsilon: 1e-3,
            bindings: KeyBindings::default(),
            log_level: "info".to_string(),
        }
    }
}

impl TutorialConfig {
    pub fn transition_delay(&self) -> Duration {
        Duration::from_millis(self.transition_delay_ms)
    }

    pub fn feedback_duration(&self) -> Duration {
        Duration::from_millis(self.feedback_duration_ms)
    }

    /// Validate values that would make the flow misbehave
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.maneuver_epsilon.is_finite() && self.maneuver_epsilon >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "maneuver_epsilon must be a non-negative number, got {}",
                self.maneuver_epsilon
            )));
        }

        if self.log_level.trim().is_empty() {
            return Err(ConfigError::Invalid("log_level is empty".to_string()));
        }

        let b = &self.bindings;
        for (name, key) in [
            ("confirm", &b.confirm),
            ("earth_view", &b.earth_view),
            ("spaceship_view", &b.spaceship_view),
            ("thrust_forward", &b.thrust_forward),
            ("thrust_backward", &b.thrust_backward),
        ] {
            if key.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("binding '{}' is empty", name)));
            }
        }

        Ok(())
    }

    /// Load configuration from the platform config directory, creating the
    /// default file if it doesn't exist
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;

        if path.exists() {
            let config = Self::load_from(&path)?;
            tracing::info!("✓ Loaded tutorial config from: {}", path.display());
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(&path)?;
            tracing::info!("✓ Created default tutorial config at: {}", path.display());
            Ok(config)
        }
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| load_failed(path, e))?;
        let config: TutorialConfig =
            serde_json::from_str(&content).map_err(|e| load_failed(path, e))?;
        config.validate()?;

        for (key, names) in config.bindings.shared_keys() {
            tracing::debug!("Key '{}' is shared by {}", key, names.join(", "));
        }

        Ok(config)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| save_failed(path, e))?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| save_failed(path, e))?;
        fs::write(path, json).map_err(|e| save_failed(path, e))?;

        Ok(())
    }

    /// Directory holding config, progress and logs
    pub fn app_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Self::app_dir()
            .map(|dir| dir.join("tutorial.json"))
            .ok_or(ConfigError::NoConfigDir)
    }
}

fn load_failed<E>(path: &Path, source: E) -> ConfigError
where
    E: std::error::Error + Send + Sync + 'static,
{
    ConfigError::LoadFailed {
        path: path.display().to_string(),
        source: Box::new(source),
    }
}

fn save_failed<E>(path: &Path, source: E) -> ConfigError
where
    E: std::error::Error + Send + Sync + 'static,
{
    ConfigError::SaveFailed {
        path: path.display().to_string(),
        source: Box::new(source),
    }
}
