//! Presentation pacing at the source frame rate
//!
//! The pacer owns a deadline for the next frame. Each shown frame moves the
//! deadline forward by exactly one frame period, no matter how early or late
//! the frame actually went out, so jitter never accumulates into drift.

use crate::error::{Error, Result};
use std::time::{Duration, Instant};

/// Shortest wait handed to the display, even when the loop is behind
pub const MIN_WAIT: Duration = Duration::from_millis(1);

/// Length of one frame, rounded to the nearest nanosecond
pub fn frame_period_for_fps(fps: f64) -> Result<Duration> {
    if !fps.is_finite() || fps <= 0.0 {
        return Err(Error::invalid_argument(format!(
            "frame rate must be positive, got {}",
            fps
        )));
    }
    Ok(Duration::from_nanos((1_000_000_000.0 / fps).round() as u64))
}

#[derive(Debug, Clone)]
pub struct Pacer {
    frame_period: Duration,
    next_deadline: Instant,
    /// Signed sum of raw waits in milliseconds since the last report
    pause_total_ms: i64,
}

impl Pacer {
    pub fn new(frame_period: Duration, start: Instant) -> Self {
        Self {
            frame_period,
            next_deadline: start,
            pause_total_ms: 0,
        }
    }

    pub fn from_fps(fps: f64, start: Instant) -> Result<Self> {
        Ok(Self::new(frame_period_for_fps(fps)?, start))
    }

    pub fn frame_period(&self) -> Duration {
        self.frame_period
    }

    pub fn next_deadline(&self) -> Instant {
        self.next_deadline
    }

    /// How long to wait at `now` before showing the pending frame.
    ///
    /// The time left until the deadline is truncated to whole milliseconds.
    /// Anything at or below zero becomes [`MIN_WAIT`]; late frames are shown,
    /// never skipped.
    pub fn wait_before_show(&mut self, now: Instant) -> Duration {
        let remaining_ms = signed_millis(self.next_deadline, now);
        self.pause_total_ms += remaining_ms;

        if remaining_ms > 0 {
            Duration::from_millis(remaining_ms as u64)
        } else {
            log::trace!("Behind schedule by {} ms", -remaining_ms);
            MIN_WAIT
        }
    }

    /// Move the deadline one frame period forward
    pub fn advance(&mut self) {
        self.next_deadline += self.frame_period;
    }

    /// Restart the schedule from `now`, used after the user un-pauses
    pub fn reset(&mut self, now: Instant) {
        self.next_deadline = now;
    }

    /// Average raw wait per frame since the last call, then start over.
    ///
    /// Negative values mean frames were going out late.
    pub fn take_average_pause(&mut self, frames: usize) -> f64 {
        let average = if frames > 0 {
            self.pause_total_ms as f64 / frames as f64
        } else {
            0.0
        };
        self.pause_total_ms = 0;
        average
    }
}

/// `deadline - now` in whole milliseconds, truncated toward zero
fn signed_millis(deadline: Instant, now: Instant) -> i64 {
    match deadline.checked_duration_since(now) {
        Some(ahead) => ahead.as_millis() as i64,
        None => -(now.duration_since(deadline).as_millis() as i64),
    }
}
