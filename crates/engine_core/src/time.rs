//! Time management for the game loop.
//!
//! The host (browser `requestAnimationFrame`, a native event loop, a test) hands
//! us monotonically increasing frame timestamps; we turn them into a clamped
//! delta so one long stall can't push a whole second of simulation into a
//! single step.

/// Default upper bound on a single simulation step, in seconds.
pub const DEFAULT_MAX_DELTA: f32 = 0.1;

/// Manages frame timing and delta time calculation.
#[derive(Debug, Clone)]
pub struct Time {
    /// Timestamp of the last frame in seconds, `None` before the first frame.
    last_frame: Option<f64>,
    /// Clamped duration of the last frame in seconds.
    delta: f32,
    /// Total simulated time (sum of clamped deltas).
    elapsed: f64,
    /// Frame count since start.
    frame_count: u64,
    /// Largest delta handed to the simulation.
    max_delta: f32,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    /// Create a new time manager with the default delta clamp.
    pub fn new() -> Self {
        Self::with_max_delta(DEFAULT_MAX_DELTA)
    }

    pub fn with_max_delta(max_delta: f32) -> Self {
        Self {
            last_frame: None,
            delta: 0.0,
            elapsed: 0.0,
            frame_count: 0,
            max_delta: max_delta.max(0.0),
        }
    }

    /// Advance to a new frame stamped `timestamp` seconds and return the clamped delta.
    ///
    /// The first frame yields zero. Timestamps that go backwards also yield zero.
    pub fn advance(&mut self, timestamp: f64) -> f32 {
        let raw = match self.last_frame {
            Some(last) => (timestamp - last).max(0.0) as f32,
            None => 0.0,
        };
        self.last_frame = Some(timestamp);

        if raw > self.max_delta {
            log::debug!("Frame delta {:.3}s clamped to {:.3}s", raw, self.max_delta);
        }
        self.delta = raw.min(self.max_delta);
        self.elapsed += self.delta as f64;
        self.frame_count += 1;
        self.delta
    }

    /// Advance using a millisecond timestamp (the browser's clock unit).
    pub fn advance_millis(&mut self, timestamp_ms: f64) -> f32 {
        self.advance(timestamp_ms / 1000.0)
    }

    /// Get the delta time in seconds.
    pub fn delta_seconds(&self) -> f32 {
        self.delta
    }

    /// Get total simulated time in seconds.
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed as f32
    }

    /// Get the current frame count.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn max_delta(&self) -> f32 {
        self.max_delta
    }

    /// Get the current FPS (averaged over last frame).
    pub fn fps(&self) -> f32 {
        if self.delta > 0.0 {
            1.0 / self.delta
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_has_zero_delta() {
        let mut t = Time::new();
        assert_eq!(t.advance(12.5), 0.0);
        assert_eq!(t.frame_count(), 1);
    }

    #[test]
    fn delta_is_difference_of_timestamps() {
        let mut t = Time::new();
        t.advance(1.0);
        let dt = t.advance(1.05);
        assert!((dt - 0.05).abs() < 1e-6);
        assert!((t.fps() - 20.0).abs() < 0.01);
    }

    #[test]
    fn long_stall_is_clamped() {
        let mut t = Time::with_max_delta(0.1);
        t.advance(0.0);
        assert_eq!(t.advance(5.0), 0.1);
        assert!((t.elapsed_seconds() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn backwards_timestamp_yields_zero() {
        let mut t = Time::new();
        t.advance(2.0);
        assert_eq!(t.advance(1.0), 0.0);
    }

    #[test]
    fn millis_are_converted() {
        let mut t = Time::new();
        t.advance_millis(1000.0);
        let dt = t.advance_millis(1016.0);
        assert!((dt - 0.016).abs() < 1e-5);
    }
}
