//! Configuration for the Asteroids flight demo.
//!
//! Settings persist to disk as `config.ron`. Missing fields fall back to
//! defaults, unknown fields are ignored, and command-line flags parsed with
//! clap override whatever was loaded.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CameraConfig, Config, ControlScheme, DebugConfig, FlightConfig, InputConfig, SystemConfig,
    WindowConfig, default_config_dir,
};
pub use error::ConfigError;
