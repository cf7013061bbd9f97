//! Variable-step frame timing.
//!
//! The flight model and the orbits advance once per rendered frame by the
//! real elapsed time. Long stalls (window drags, breakpoints) are clamped so
//! a single frame cannot fling the ship across the system.

use std::time::Instant;
use tracing::warn;

/// Longest frame the simulation will see, in seconds.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// Measures wall-clock time between frames.
#[derive(Debug)]
pub struct FrameClock {
    previous: Option<Instant>,
    frame_count: u64,
    total_time: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            previous: None,
            frame_count: 0,
            total_time: 0.0,
        }
    }

    /// Elapsed seconds since the previous call, clamped to
    /// [`MAX_FRAME_TIME`]. The first call returns `0.0`.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let frame_time = self
            .previous
            .map_or(0.0, |prev| now.duration_since(prev).as_secs_f64());
        self.previous = Some(now);
        self.advance(frame_time)
    }

    /// Count a frame of explicit length. Used by [`tick`](Self::tick) and by
    /// runs that supply their own timing.
    pub fn advance(&mut self, frame_time: f64) -> f32 {
        let mut frame_time = if frame_time.is_finite() {
            frame_time.max(0.0)
        } else {
            0.0
        };
        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            frame_time = MAX_FRAME_TIME;
        }
        self.total_time += frame_time;
        self.frame_count += 1;
        frame_time as f32
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Sum of all clamped frame times, in seconds.
    pub fn total_time(&self) -> f64 {
        self.total_time
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tick_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(), 0.0);
        assert_eq!(clock.frame_count(), 1);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut clock = FrameClock::new();
        let dt = clock.advance(1.0);
        assert!((f64::from(dt) - MAX_FRAME_TIME).abs() < 1e-6);
        assert!((clock.total_time() - MAX_FRAME_TIME).abs() < 1e-9);
    }

    #[test]
    fn test_normal_frames_pass_through() {
        let mut clock = FrameClock::new();
        let frames = [0.017, 0.015, 0.020, 0.016, 0.033];
        for ft in frames {
            let dt = clock.advance(ft);
            assert!((f64::from(dt) - ft).abs() < 1e-6);
        }
        assert_eq!(clock.frame_count(), frames.len() as u64);
        assert!((clock.total_time() - frames.iter().sum::<f64>()).abs() < 1e-9);
    }

    #[test]
    fn test_negative_and_nan_become_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.advance(-0.5), 0.0);
        assert_eq!(clock.advance(f64::NAN), 0.0);
        assert_eq!(clock.frame_count(), 2);
    }

    #[test]
    fn test_tick_measures_elapsed_time() {
        let mut clock = FrameClock::new();
        clock.tick();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let dt = clock.tick();
        assert!(dt > 0.0);
        assert!(f64::from(dt) <= MAX_FRAME_TIME);
    }
}
