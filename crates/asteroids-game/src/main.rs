//! Asteroids flight demo entry point.
//!
//! A box ship drifts through a small solar system: the sun at the origin,
//! ten textured planets on circular orbits and a few moons around some of
//! them. WASD/Space/Shift thrust, Q/E yaw, right mouse drag looks around.
//!
//! Run with: `cargo run -p asteroids-game`

mod demo;
mod scene;

use asteroids_app::{AppError, Frame, HeadlessRunner, PlatformDirs, run_with_config};
use asteroids_config::{CliArgs, Config};
use asteroids_input::InputMap;
use clap::Parser;
use demo::Demo;
use std::path::Path;
use tracing::{error, info, warn};

/// Keybinding file picked up from the config directory when the config
/// does not name one.
const DEFAULT_KEYBINDINGS_FILE: &str = "input.ron";
const HEADLESS_DT: f64 = 1.0 / 60.0;
const HEADLESS_DEFAULT_FRAMES: u64 = 600;

/// CLI arguments for the game binary.
#[derive(Parser, Debug)]
#[command(name = "asteroids-game", about = "Asteroids flight demo")]
struct GameArgs {
    #[command(flatten)]
    cli: CliArgs,

    /// Run without a window at a fixed 60 Hz step.
    #[arg(long)]
    headless: bool,

    /// Stop after this many frames.
    #[arg(long)]
    frames: Option<u64>,
}

fn main() {
    let args = GameArgs::parse();
    if let Err(e) = run(args) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: GameArgs) -> Result<(), AppError> {
    let dirs = match &args.cli.config {
        Some(dir) => PlatformDirs::with_config_dir(dir.clone()),
        None => PlatformDirs::resolve()?,
    };
    dirs.create_dirs()?;

    // Logging needs the config for its level, so a load failure is only
    // reported once the subscriber is up.
    let (on_disk, load_error) = match Config::load_or_create(&dirs.config_dir) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    let mut config = on_disk.clone();
    config.apply_cli_overrides(&args.cli);

    asteroids_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    if let Some(e) = load_error {
        warn!("Using default config: {e}");
    }

    info!("Asteroids flight demo");
    info!(
        "Window: {}x{} | Scheme: {:?} | Config: {}",
        config.window.width,
        config.window.height,
        config.input.scheme,
        dirs.config_dir.display()
    );

    let input_map = load_input_map(&config, &dirs.config_dir);
    let window = config.window.clone();
    let mut demo =
        Demo::new(config, input_map).watch_config(dirs.config_dir.clone(), on_disk, args.cli);

    if args.headless {
        let frames = args.frames.unwrap_or(HEADLESS_DEFAULT_FRAMES);
        let ran = HeadlessRunner::new(HEADLESS_DT, frames, window.width, window.height)
            .run(|_, _, _| {}, |frame| demo.frame(frame));
        let position = demo.graph().world_transform(demo.player()).translation;
        info!(
            frames = ran,
            seconds = demo.elapsed(),
            speed = demo.ship().speed(),
            "Headless run done, ship at {position}"
        );
        return Ok(());
    }

    let ran = run_with_config(
        window,
        args.frames,
        Box::new(move |frame: &mut Frame<'_>| demo.frame(frame)),
    )?;
    info!("Exited after {ran} frames");
    Ok(())
}

/// The configured keybinding file, else `input.ron` beside the config,
/// else the preset for the configured scheme.
fn load_input_map(config: &Config, config_dir: &Path) -> InputMap {
    let scheme = config.input.scheme;
    match &config.input.keybindings_file {
        Some(file) => {
            let path = if file.is_absolute() {
                file.clone()
            } else {
                config_dir.join(file)
            };
            info!("Loading keybindings from {}", path.display());
            InputMap::load_or_scheme(&path, scheme)
        }
        None => {
            let path = config_dir.join(DEFAULT_KEYBINDINGS_FILE);
            if path.exists() {
                info!("Loading keybindings from {}", path.display());
                InputMap::load_or_scheme(&path, scheme)
            } else {
                InputMap::for_scheme(scheme)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asteroids_config::ControlScheme;
    use asteroids_input::{Action, InputBinding};
    use winit::keyboard::KeyCode;

    #[test]
    fn test_args_parse() {
        let args = GameArgs::parse_from([
            "asteroids-game",
            "--headless",
            "--frames",
            "30",
            "--scheme",
            "classic",
            "--seed",
            "5",
        ]);
        assert!(args.headless);
        assert_eq!(args.frames, Some(30));
        assert_eq!(args.cli.scheme, Some(ControlScheme::Classic));
        assert_eq!(args.cli.seed, Some(5));
    }

    #[test]
    fn test_preset_when_no_keybinding_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.input.scheme = ControlScheme::Classic;
        let map = load_input_map(&config, dir.path());
        assert_eq!(
            map.get_bindings(Action::MoveRight),
            &[InputBinding::Key(KeyCode::KeyA)]
        );
    }

    #[test]
    fn test_relative_keybinding_file_resolves_in_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut custom = InputMap::mouse_look();
        custom.set_bindings(Action::MoveForward, vec![InputBinding::Key(KeyCode::ArrowUp)]);
        custom.save(&dir.path().join("keys.ron")).unwrap();

        let mut config = Config::default();
        config.input.keybindings_file = Some("keys.ron".into());
        let map = load_input_map(&config, dir.path());
        assert_eq!(
            map.get_bindings(Action::MoveForward),
            &[InputBinding::Key(KeyCode::ArrowUp)]
        );
    }

    #[test]
    fn test_default_input_ron_is_picked_up() {
        let dir = tempfile::tempdir().unwrap();
        InputMap::classic()
            .save(&dir.path().join(DEFAULT_KEYBINDINGS_FILE))
            .unwrap();
        let map = load_input_map(&Config::default(), dir.path());
        assert_eq!(
            map.get_bindings(Action::MoveLeft),
            &[InputBinding::Key(KeyCode::KeyD)]
        );
    }
}
