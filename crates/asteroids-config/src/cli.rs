//! Command-line overrides for the demo configuration.

use std::path::PathBuf;

use clap::Args;

use crate::{Config, ControlScheme};

/// Command-line flags that override settings loaded from `config.ron`.
#[derive(Args, Debug, Default, Clone)]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Start in fullscreen.
    #[arg(long)]
    pub fullscreen: Option<bool>,

    /// Control scheme preset.
    #[arg(long, value_enum)]
    pub scheme: Option<ControlScheme>,

    /// Seed for orbit angles and moon counts.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(fs) = args.fullscreen {
            self.window.fullscreen = fs;
        }
        if let Some(scheme) = args.scheme {
            self.input.scheme = scheme;
            // The classic preset has no look button.
            self.flight.mouse_look = scheme == ControlScheme::MouseLook;
        }
        if let Some(seed) = args.seed {
            self.system.seed = Some(seed);
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
