//! Fixed-step frame driver without a window.

use crate::frame_clock::FrameClock;
use crate::window::Frame;
use asteroids_input::{KeyboardState, MouseState};
use tracing::{debug, info};
use winit::dpi::PhysicalSize;

/// Runs a fixed number of frames of constant length, feeding scripted input.
pub struct HeadlessRunner {
    dt: f64,
    frames: u64,
    size: PhysicalSize<u32>,
    clock: FrameClock,
    keyboard: KeyboardState,
    mouse: MouseState,
}

impl HeadlessRunner {
    /// `frames` frames of `dt` seconds each on a `width`x`height` surface.
    pub fn new(dt: f64, frames: u64, width: u32, height: u32) -> Self {
        Self {
            dt,
            frames,
            size: PhysicalSize::new(width, height),
            clock: FrameClock::new(),
            keyboard: KeyboardState::new(),
            mouse: MouseState::new(),
        }
    }

    /// Run every frame. Before each update `script` may press keys, move the
    /// mouse or press buttons; transients are cleared after the update.
    /// Returns the number of frames run.
    pub fn run<S, U>(mut self, mut script: S, mut update: U) -> u64
    where
        S: FnMut(u64, &mut KeyboardState, &mut MouseState),
        U: FnMut(&mut Frame<'_>),
    {
        info!(frames = self.frames, dt = self.dt, "Headless run started");
        for index in 0..self.frames {
            script(index, &mut self.keyboard, &mut self.mouse);
            let dt = self.clock.advance(self.dt);
            let mut frame = Frame {
                dt,
                index,
                keyboard: &self.keyboard,
                mouse: &mut self.mouse,
                window: None,
                size: self.size,
            };
            update(&mut frame);
            self.keyboard.clear_transients();
            self.mouse.clear_transients();
        }
        debug!(simulated_secs = self.clock.total_time(), "Headless run finished");
        self.clock.frame_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asteroids_input::RawKeyEvent;
    use glam::Vec2;
    use winit::keyboard::{KeyCode, PhysicalKey};

    #[test]
    fn test_runs_requested_frames_with_fixed_dt() {
        let mut dts = Vec::new();
        let ran = HeadlessRunner::new(0.02, 5, 640, 480).run(
            |_, _, _| {},
            |frame| dts.push(frame.dt),
        );
        assert_eq!(ran, 5);
        assert_eq!(dts.len(), 5);
        assert!(dts.iter().all(|dt| (dt - 0.02).abs() < 1e-7));
    }

    #[test]
    fn test_dt_is_clamped() {
        let mut dts = Vec::new();
        HeadlessRunner::new(2.0, 1, 640, 480).run(|_, _, _| {}, |frame| dts.push(frame.dt));
        assert!((dts[0] - 0.25).abs() < 1e-7);
    }

    #[test]
    fn test_script_input_visible_then_cleared() {
        let mut seen = Vec::new();
        HeadlessRunner::new(0.016, 3, 640, 480).run(
            |index, keyboard, mouse| {
                if index == 0 {
                    keyboard.process_raw(RawKeyEvent::press(PhysicalKey::Code(KeyCode::KeyW)));
                    mouse.inject_motion(Vec2::new(4.0, 0.0));
                }
            },
            |frame| {
                seen.push((
                    frame.index,
                    frame.keyboard.just_pressed(PhysicalKey::Code(KeyCode::KeyW)),
                    frame.keyboard.is_pressed(PhysicalKey::Code(KeyCode::KeyW)),
                    frame.mouse.delta(),
                ));
            },
        );
        assert_eq!(seen[0], (0, true, true, Vec2::new(4.0, 0.0)));
        assert_eq!(seen[1], (1, false, true, Vec2::ZERO));
        assert_eq!(seen[2].0, 2);
    }

    #[test]
    fn test_zero_frames() {
        let mut calls = 0;
        let ran = HeadlessRunner::new(0.016, 0, 1, 1).run(|_, _, _| {}, |_| calls += 1);
        assert_eq!(ran, 0);
        assert_eq!(calls, 0);
    }
}
