//! Per-frame wiring: input to flight model, orbits, chase camera.

use crate::scene::{SceneHandles, build_scene};
use asteroids_app::Frame;
use asteroids_config::{CliArgs, Config};
use asteroids_flight::{CameraPose, FlightInput, FollowCamera, MotionIntegrator, ShipState};
use asteroids_input::{Action, ActionResolver, ActionState, InputMap};
use asteroids_orbit::SolarSystem;
use asteroids_scene::{NodeId, SceneGraph};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// How often the config file is checked for edits, in seconds.
const CONFIG_RELOAD_INTERVAL: f32 = 2.0;

/// Hot-reload state for `config.ron`.
struct ConfigWatch {
    dir: PathBuf,
    /// The file contents as last read, before command-line overrides.
    on_disk: Config,
    /// Re-applied on top of every reloaded file.
    cli: CliArgs,
    timer: f32,
}

/// The running demo: scene, ship, orbits and camera.
pub struct Demo {
    graph: SceneGraph,
    player: NodeId,
    system: SolarSystem,
    ship: ShipState,
    integrator: MotionIntegrator,
    camera: FollowCamera,
    pose: CameraPose,
    input_map: InputMap,
    actions: ActionState,
    capture_cursor_on_look: bool,
    /// Width over height of the drawable surface.
    aspect: f32,
    seed: u64,
    config: Config,
    watch: Option<ConfigWatch>,
    telemetry_timer: f32,
    elapsed: f64,
}

impl Demo {
    /// Build the scene from `config`. Without a configured seed one is drawn
    /// from the OS and logged so the layout can be reproduced.
    pub fn new(config: Config, input_map: InputMap) -> Self {
        let seed = config
            .system
            .seed
            .unwrap_or_else(|| rand::rng().random());
        info!("Orbit seed {seed}");
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let mut graph = SceneGraph::new();
        let SceneHandles { player, system } = build_scene(&mut graph, &mut rng);

        let camera = FollowCamera::new(&config.camera);
        debug!(
            fov_y_degrees = camera.fov_y().to_degrees(),
            near = camera.near(),
            far = camera.far(),
            "Chase camera"
        );
        let pose = camera.pose(&graph.world_transform(player));

        Self {
            graph,
            player,
            system,
            ship: ShipState::default(),
            integrator: MotionIntegrator::new(config.flight.clone()),
            camera,
            pose,
            input_map,
            actions: ActionState::new(),
            capture_cursor_on_look: config.input.capture_cursor_on_look,
            aspect: config.window.width as f32 / config.window.height.max(1) as f32,
            seed,
            config,
            watch: None,
            telemetry_timer: 0.0,
            elapsed: 0.0,
        }
    }

    /// Watch `config.ron` in `dir` for edits to the flight and camera tuning.
    ///
    /// `on_disk` is the file as loaded at startup and `cli` the flags that
    /// were applied over it; the flags keep winning after every reload.
    pub fn watch_config(mut self, dir: PathBuf, on_disk: Config, cli: CliArgs) -> Self {
        self.watch = Some(ConfigWatch {
            dir,
            on_disk,
            cli,
            timer: 0.0,
        });
        self
    }

    /// Run one frame from raw keyboard and mouse state.
    pub fn frame(&mut self, frame: &mut Frame<'_>) {
        ActionResolver::resolve(&self.input_map, frame.keyboard, frame.mouse, &mut self.actions);

        let wants_capture = self.capture_cursor_on_look && self.integrator.config().mouse_look;
        if wants_capture && self.actions.action_just_activated(Action::Look) {
            frame.set_cursor_captured(true);
        } else if frame.mouse.is_captured()
            && !(wants_capture && self.actions.is_action_active(Action::Look))
        {
            frame.set_cursor_captured(false);
        }
        self.aspect = frame.aspect_ratio();

        let input = FlightInput::from_actions(&self.actions, frame.mouse);
        self.update(frame.dt, &input);
        self.poll_config(frame.dt);
    }

    /// Advance the ship, the orbits and the camera by `dt` seconds.
    pub fn update(&mut self, dt: f32, input: &FlightInput) {
        // Thrust follows the view from the previous frame's camera.
        let heading = self.pose.heading();
        let orientation = self.graph.local_transform(self.player).rotation;
        let delta = self
            .integrator
            .step(&mut self.ship, orientation, heading, input, dt);
        delta.apply(self.graph.local_transform_mut(self.player));

        self.system.advance(&mut self.graph, dt);

        self.pose = self.camera.pose(&self.graph.world_transform(self.player));

        self.elapsed += f64::from(dt);
        self.telemetry_timer += dt;
        let interval = self.config.debug.telemetry_interval_secs;
        if interval > 0.0 && self.telemetry_timer >= interval {
            self.telemetry_timer = 0.0;
            let position = self.graph.local_transform(self.player).translation;
            info!(
                t = self.elapsed,
                speed = self.ship.speed(),
                x = position.x,
                y = position.y,
                z = position.z,
                yaw_velocity = self.ship.yaw_velocity,
                sun_in_view = self.sun_in_view(),
                "Ship"
            );
        }
    }

    /// Whether the sun's centre falls inside the camera frustum.
    pub fn sun_in_view(&self) -> bool {
        let view_proj = self.camera.projection(self.aspect) * self.pose.view_matrix();
        let sun = self.graph.world_transform(self.system.sun()).translation;
        let clip = view_proj * sun.extend(1.0);
        // Right-handed projection with depth in [0, w].
        clip.w > 0.0
            && clip.x.abs() <= clip.w
            && clip.y.abs() <= clip.w
            && (0.0..=clip.w).contains(&clip.z)
    }

    fn poll_config(&mut self, dt: f32) {
        let Some(watch) = &mut self.watch else {
            return;
        };
        watch.timer += dt;
        if watch.timer < CONFIG_RELOAD_INTERVAL {
            return;
        }
        watch.timer = 0.0;
        match watch.on_disk.reload(&watch.dir) {
            Ok(Some(on_disk)) => {
                let mut config = on_disk.clone();
                config.apply_cli_overrides(&watch.cli);
                watch.on_disk = on_disk;
                self.apply_config(config);
            }
            Ok(None) => {}
            Err(e) => warn!("Config reload failed: {e}"),
        }
    }

    /// Swap in new flight, camera and telemetry settings. The scene and the
    /// key bindings are left as built.
    pub fn apply_config(&mut self, config: Config) {
        if config.flight != self.config.flight {
            debug!(flight = ?config.flight, "Flight tuning changed");
            self.integrator = MotionIntegrator::new(config.flight.clone());
        }
        if config.camera != self.config.camera {
            self.camera = FollowCamera::new(&config.camera);
            self.pose = self.camera.pose(&self.graph.world_transform(self.player));
        }
        self.capture_cursor_on_look = config.input.capture_cursor_on_look;
        self.config = config;
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn player(&self) -> NodeId {
        self.player
    }

    pub fn ship(&self) -> &ShipState {
        &self.ship
    }

    pub fn system(&self) -> &SolarSystem {
        &self.system
    }

    pub fn camera_pose(&self) -> &CameraPose {
        &self.pose
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}
