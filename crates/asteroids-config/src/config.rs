//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the persisted configuration inside the config directory.
const CONFIG_FILE: &str = "config.ron";

/// Top-level demo configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window settings.
    pub window: WindowConfig,
    /// Input settings.
    pub input: InputConfig,
    /// Ship flight model tuning.
    pub flight: FlightConfig,
    /// Chase camera settings.
    pub camera: CameraConfig,
    /// Solar system construction settings.
    pub system: SystemConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    /// Start in fullscreen mode.
    pub fullscreen: bool,
    /// Allow the user to resize the window.
    pub resizable: bool,
    /// Window title.
    pub title: String,
}

/// Which preset keybinding set drives the ship.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum ControlScheme {
    /// Keyboard-only flight. Strafe keys are mirrored relative to `MouseLook`.
    Classic,
    /// Keyboard flight plus right-mouse drag to pitch and yaw.
    #[default]
    MouseLook,
}

/// Input configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Preset keybinding set.
    pub scheme: ControlScheme,
    /// Optional RON keybinding file that replaces the preset bindings.
    pub keybindings_file: Option<PathBuf>,
    /// Hide and capture the cursor while the look button is held.
    pub capture_cursor_on_look: bool,
}

/// Ship flight model tuning. All damping factors are applied once per frame.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlightConfig {
    /// Linear acceleration in units per second squared per held impulse.
    pub acceleration: f32,
    /// Per-frame linear velocity retention in `[0, 1)`. Closer to 1 = more drift.
    pub damping: f32,
    /// Yaw rate in radians per second set by a yaw impulse.
    pub rotation_speed: f32,
    /// Per-frame yaw-drift retention in `[0, 1)`.
    pub yaw_damping: f32,
    /// Enable pitch/yaw from mouse motion while the look button is held.
    pub mouse_look: bool,
    /// Scale applied to raw pointer deltas.
    pub mouse_sensitivity: f32,
    /// How quickly pointer motion spins the ship.
    pub angular_acceleration: f32,
    /// Per-frame angular velocity retention in `[0, 1)`.
    pub angular_damping: f32,
    /// Optional cap on linear speed. `None` leaves speed unbounded.
    pub max_speed: Option<f32>,
}

/// Chase camera configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Camera offset in the ship's local frame.
    pub offset: [f32; 3],
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Near clip plane distance.
    pub near: f32,
    /// Far clip plane distance.
    pub far: f32,
}

/// Solar system construction settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SystemConfig {
    /// RNG seed for initial orbit angles and moon counts. `None` uses OS entropy.
    pub seed: Option<u64>,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Seconds between ship telemetry log lines. 0 disables telemetry.
    pub telemetry_interval_secs: f32,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fullscreen: false,
            resizable: true,
            title: "Asteroids".to_string(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            scheme: ControlScheme::default(),
            keybindings_file: None,
            capture_cursor_on_look: true,
        }
    }
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            acceleration: 10.0,
            damping: 0.95,
            rotation_speed: 1.0,
            yaw_damping: 0.5,
            mouse_look: true,
            mouse_sensitivity: 0.11,
            angular_acceleration: 5.0,
            angular_damping: 0.92,
            max_speed: None,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            offset: [0.0, 2.0, -6.0],
            fov_y_degrees: 100.0,
            near: 1.0,
            far: 1000.0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            telemetry_interval_secs: 1.0,
        }
    }
}

/// Platform config directory for the demo, e.g. `~/.config/asteroids` on Linux.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("asteroids"))
}

// --- Load / Save / Reload ---

/// Read and parse `config.ron` at `path`.
fn read(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

impl Config {
    /// Load `config.ron` from `config_dir`, writing the defaults there first
    /// if the file does not exist yet.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);
        if config_path.exists() {
            let config = read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            return Ok(config);
        }
        let config = Config::default();
        config.save(config_dir)?;
        log::info!("Created default config at {}", config_path.display());
        Ok(config)
    }

    /// Write `config.ron` into `config_dir`, creating the directory.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: config_dir.join(CONFIG_FILE),
            source,
        };
        std::fs::create_dir_all(config_dir).map_err(write_err)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(config_dir.join(CONFIG_FILE), serialized).map_err(write_err)
    }

    /// Re-read `config.ron`. `Some` only when the file differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = read(&config_dir.join(CONFIG_FILE))?;
        if &new_config == self {
            return Ok(None);
        }
        log::info!("Config reloaded with changes");
        Ok(Some(new_config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("width: 1280"));
        assert!(ron_str.contains("damping: 0.95"));
        assert!(ron_str.contains("scheme: MouseLook"));
    }

    #[test]
    fn test_flight_defaults_match_demo_tuning() {
        let flight = FlightConfig::default();
        assert_eq!(flight.acceleration, 10.0);
        assert_eq!(flight.damping, 0.95);
        assert_eq!(flight.yaw_damping, 0.5);
        assert_eq!(flight.angular_damping, 0.92);
        assert!(flight.max_speed.is_none());
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(window: (), debug: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.flight, FlightConfig::default());
        assert_eq!(config.camera, CameraConfig::default());
    }

    #[test]
    fn test_partial_section_keeps_other_fields() {
        let ron_str = "(flight: (damping: 0.8, max_speed: Some(50.0)))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.flight.damping, 0.8);
        assert_eq!(config.flight.max_speed, Some(50.0));
        assert_eq!(config.flight.acceleration, 10.0);
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.window.width = 1920;
        config.input.scheme = ControlScheme::Classic;
        config.system.seed = Some(42);

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.flight.acceleration = 25.0;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().flight.acceleration, 25.0);
    }

    #[test]
    fn test_reload_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::default().reload(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{{not valid}}").unwrap();
        let err = Config::load_or_create(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert_eq!(err.path(), Some(dir.path().join(CONFIG_FILE).as_path()));
    }
}
