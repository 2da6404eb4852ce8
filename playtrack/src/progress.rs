/// Periodic progress lines for the console
use std::fmt;
use std::time::Instant;

/// One progress line
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressReport {
    pub frame: usize,
    pub total_frames: usize,
    pub average_pause_ms: f64,
    pub measured_fps: f64,
}

impl ProgressReport {
    pub fn percent(&self) -> f64 {
        if self.total_frames == 0 {
            0.0
        } else {
            100.0 * self.frame as f64 / self.total_frames as f64
        }
    }
}

impl fmt::Display for ProgressReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "-> processing frame # {}/{} ({:.1}%), average pause is {:.1} milliseconds, measured {:.1} FPS",
            self.frame,
            self.total_frames,
            self.percent(),
            self.average_pause_ms,
            self.measured_fps
        )
    }
}

/// Decides when to report and measures the real display rate in between
#[derive(Debug, Clone)]
pub struct ProgressMeter {
    total_frames: usize,
    interval: usize,
    last_report: Instant,
    frames_since_report: usize,
}

impl ProgressMeter {
    /// Report roughly once per second of video (`fps_rounded` frames)
    pub fn new(total_frames: usize, fps_rounded: usize, start: Instant) -> Self {
        Self {
            total_frames,
            interval: fps_rounded.max(1),
            last_report: start,
            frames_since_report: 0,
        }
    }

    /// Frames counted since the last report
    pub fn frames_since_report(&self) -> usize {
        self.frames_since_report
    }

    /// Count frame `frame` (1-based) and say whether a report is due
    pub fn tick(&mut self, frame: usize) -> bool {
        self.frames_since_report += 1;
        frame == self.total_frames || frame % self.interval == 0
    }

    /// Build the report for `frame` and start a new interval at `now`
    pub fn report(&mut self, frame: usize, now: Instant, average_pause_ms: f64) -> ProgressReport {
        let elapsed = now.duration_since(self.last_report).as_secs_f64();
        let measured_fps = if elapsed > 0.0 {
            self.frames_since_report as f64 / elapsed
        } else {
            0.0
        };
        self.last_report = now;
        self.frames_since_report = 0;

        ProgressReport {
            frame,
            total_frames: self.total_frames,
            average_pause_ms,
            measured_fps,
        }
    }
}
