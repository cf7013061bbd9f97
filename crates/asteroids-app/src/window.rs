//! Window creation and event handling via winit.
//!
//! [`AppState`] implements winit's [`ApplicationHandler`]: it forwards input
//! events into [`KeyboardState`] and [`MouseState`], and on every redraw
//! measures the frame, calls the update function once, clears per-frame
//! input transients and requests the next redraw.

use crate::error::AppError;
use crate::frame_clock::FrameClock;
use asteroids_config::WindowConfig;
use asteroids_input::{KeyboardState, MouseState};
use tracing::{error, info, instrument};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{DeviceEvent, DeviceId, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Fullscreen, Window, WindowAttributes, WindowId};

/// Everything the update function sees for one frame.
pub struct Frame<'a> {
    /// Clamped seconds since the previous frame.
    pub dt: f32,
    /// Zero-based frame number.
    pub index: u64,
    pub keyboard: &'a KeyboardState,
    /// Mutable so the update can capture or release the cursor.
    pub mouse: &'a mut MouseState,
    /// `None` in headless runs.
    pub window: Option<&'a Window>,
    /// Drawable size in physical pixels.
    pub size: PhysicalSize<u32>,
}

impl Frame<'_> {
    /// Width over height, or 1 for a zero-height surface.
    pub fn aspect_ratio(&self) -> f32 {
        if self.size.height == 0 {
            1.0
        } else {
            self.size.width as f32 / self.size.height as f32
        }
    }

    /// Hide and lock the cursor, or restore it. Only the flag changes when
    /// there is no window.
    pub fn set_cursor_captured(&mut self, captured: bool) {
        match self.window {
            Some(window) => self.mouse.set_captured(window, captured),
            None => self.mouse.set_captured_flag(captured),
        }
    }
}

/// Per-frame update callback.
pub type FrameFn = Box<dyn FnMut(&mut Frame<'_>)>;

/// Window attributes from the `[window]` section of the config.
pub fn window_attributes(config: &WindowConfig) -> WindowAttributes {
    let attrs = WindowAttributes::default()
        .with_title(config.title.clone())
        .with_inner_size(LogicalSize::new(
            f64::from(config.width),
            f64::from(config.height),
        ))
        .with_resizable(config.resizable);
    if config.fullscreen {
        attrs.with_fullscreen(Some(Fullscreen::Borderless(None)))
    } else {
        attrs
    }
}

/// Window, input state and frame timing for one run of the event loop.
pub struct AppState {
    window: Option<Window>,
    config: WindowConfig,
    clock: FrameClock,
    keyboard: KeyboardState,
    mouse: MouseState,
    size: PhysicalSize<u32>,
    update: Option<FrameFn>,
    /// Stop after this many frames.
    max_frames: Option<u64>,
    error: Option<AppError>,
}

impl AppState {
    pub fn new(config: WindowConfig) -> Self {
        let size = PhysicalSize::new(config.width, config.height);
        Self {
            window: None,
            config,
            clock: FrameClock::new(),
            keyboard: KeyboardState::new(),
            mouse: MouseState::new(),
            size,
            update: None,
            max_frames: None,
            error: None,
        }
    }

    pub fn with_update(mut self, update: FrameFn) -> Self {
        self.update = Some(update);
        self
    }

    pub fn with_max_frames(mut self, max_frames: Option<u64>) -> Self {
        self.max_frames = max_frames;
        self
    }

    pub fn frame_count(&self) -> u64 {
        self.clock.frame_count()
    }

    pub fn surface_size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Error that stopped the loop early, if any.
    pub fn take_error(&mut self) -> Option<AppError> {
        self.error.take()
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let index = self.clock.frame_count();
        let dt = self.clock.tick();

        if let Some(update) = &mut self.update {
            let mut frame = Frame {
                dt,
                index,
                keyboard: &self.keyboard,
                mouse: &mut self.mouse,
                window: self.window.as_ref(),
                size: self.size,
            };
            update(&mut frame);
        }

        // Clear per-frame transient input state after the update has run.
        self.keyboard.clear_transients();
        self.mouse.clear_transients();

        if let Some(max) = self.max_frames
            && self.clock.frame_count() >= max
        {
            info!("Reached {max} frames, shutting down");
            event_loop.exit();
            return;
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        match event_loop.create_window(window_attributes(&self.config)) {
            Ok(window) => {
                self.size = window.inner_size();
                info!(
                    "Window created: {}x{} (scale: {:.2})",
                    self.size.width,
                    self.size.height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!("Window creation failed: {e}");
                self.error = Some(AppError::CreateWindow(e));
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                self.size = new_size;
                info!("Window resized to {}x{}", new_size.width, new_size.height);
            }
            WindowEvent::Focused(false) => {
                // Key-up events are lost while unfocused.
                self.keyboard.release_all();
                self.mouse.release_buttons();
                if let Some(window) = &self.window {
                    self.mouse.set_captured(window, false);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.keyboard.process_event(&event);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse.on_cursor_moved(position.x, position.y);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.mouse.on_button(button, state);
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.mouse.on_raw_motion(delta.0, delta.1);
        }
    }
}

/// Open a window and call `update` once per frame until the window closes
/// or `max_frames` frames have run.
///
/// # Errors
///
/// Returns [`AppError`] if the event loop or the window cannot be created.
#[instrument(skip_all)]
pub fn run_with_config(
    config: WindowConfig,
    max_frames: Option<u64>,
    update: FrameFn,
) -> Result<u64, AppError> {
    let event_loop = EventLoop::new()?;
    let mut app = AppState::new(config)
        .with_update(update)
        .with_max_frames(max_frames);
    event_loop.run_app(&mut app)?;
    if let Some(e) = app.take_error() {
        return Err(e);
    }
    Ok(app.frame_count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_initial_size_from_config() {
        let state = AppState::new(WindowConfig::default());
        assert_eq!(state.surface_size(), PhysicalSize::new(1280, 720));
        assert!(state.window.is_none());
        assert_eq!(state.frame_count(), 0);
    }

    #[test]
    fn test_window_attributes_build() {
        let config = WindowConfig {
            fullscreen: true,
            ..WindowConfig::default()
        };
        // WindowAttributes has no getters for most fields; building must not panic.
        let attrs = window_attributes(&config);
        assert!(attrs.fullscreen.is_some());
        assert_eq!(attrs.title, "Asteroids");
    }

    #[test]
    fn test_frame_aspect_ratio_and_capture_flag() {
        let keyboard = KeyboardState::new();
        let mut mouse = MouseState::new();
        let mut frame = Frame {
            dt: 0.016,
            index: 0,
            keyboard: &keyboard,
            mouse: &mut mouse,
            window: None,
            size: PhysicalSize::new(1920, 1080),
        };
        assert!((frame.aspect_ratio() - 16.0 / 9.0).abs() < 1e-6);
        frame.set_cursor_captured(true);
        assert!(mouse.is_captured());
    }

    #[test]
    fn test_zero_height_aspect_is_one() {
        let keyboard = KeyboardState::new();
        let mut mouse = MouseState::new();
        let frame = Frame {
            dt: 0.0,
            index: 0,
            keyboard: &keyboard,
            mouse: &mut mouse,
            window: None,
            size: PhysicalSize::new(800, 0),
        };
        assert_eq!(frame.aspect_ratio(), 1.0);
    }

    #[test]
    fn test_update_is_stored() {
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        let state = AppState::new(WindowConfig::default())
            .with_update(Box::new(move |_frame: &mut Frame<'_>| {
                seen.set(seen.get() + 1);
            }));
        assert!(state.update.is_some());
        assert_eq!(calls.get(), 0);
    }
}
