//! Frame timing.
//!
//! Elapsed time is resampled from the wall clock every frame; there is no
//! fixed timestep, so animation speed follows real time rather than the
//! display's refresh rate.
//!
//! # Example
//!
//! ```ignore
//! use galaxy::time::Time;
//!
//! let mut time = Time::new();
//!
//! // In your render loop:
//! let elapsed_ms = time.update();
//! log::trace!("frame {} at {:.1} ms ({:.1} FPS)", time.frame(), elapsed_ms, time.fps());
//! ```

use std::time::{Duration, Instant};

/// Time tracking for the render loop.
#[derive(Debug)]
pub struct Time {
    /// When the timer was created.
    start: Instant,
    /// When the last frame occurred.
    last_frame: Instant,
    /// Total elapsed time in milliseconds.
    elapsed_ms: f64,
    /// Time since last frame in seconds.
    delta_secs: f32,
    /// Total frames since start.
    frame_count: u64,
    /// Calculated FPS (updated periodically).
    fps: f32,
    /// Frame count at last FPS update.
    fps_frame_count: u64,
    /// Time of last FPS calculation.
    fps_update_time: Instant,
    /// How often to update FPS calculation.
    fps_update_interval: Duration,
}

impl Time {
    /// Create a new time tracker starting from now.
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create a time tracker whose clock started at `start`.
    pub fn starting_at(start: Instant) -> Self {
        Self {
            start,
            last_frame: start,
            elapsed_ms: 0.0,
            delta_secs: 0.0,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: start,
            fps_update_interval: Duration::from_millis(500),
        }
    }

    /// Update timing values. Call once per frame.
    ///
    /// Returns the elapsed time in milliseconds.
    pub fn update(&mut self) -> f64 {
        self.update_at(Instant::now())
    }

    /// Update timing values as if the current time were `now`.
    ///
    /// Times earlier than the previous frame are treated as no progress.
    pub fn update_at(&mut self, now: Instant) -> f64 {
        let now = now.max(self.last_frame);

        self.delta_secs = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.elapsed_ms = now.duration_since(self.start).as_secs_f64() * 1000.0;
        self.frame_count += 1;

        // Update FPS periodically
        let fps_elapsed = now.duration_since(self.fps_update_time);
        if fps_elapsed >= self.fps_update_interval {
            let frames_since = self.frame_count - self.fps_frame_count;
            self.fps = frames_since as f32 / fps_elapsed.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        self.elapsed_ms
    }

    /// Total elapsed time in milliseconds since start.
    #[inline]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    /// Time since last frame in seconds (delta time).
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta_secs
    }

    /// Total frames since start.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Calculated frames per second.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Whether the FPS value was refreshed by the last [`update`](Self::update).
    #[inline]
    pub fn fps_refreshed(&self) -> bool {
        self.frame_count > 0 && self.fps_frame_count == self.frame_count
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}
