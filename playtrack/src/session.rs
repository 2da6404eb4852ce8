//! Playback session: the single context object that runs a video through
//! decode, tracking, drawing, pacing and display.
//!
//! Stages:
//! 1. the first frame is captured, trackers are initialised on it and it is
//!    shown until a key is pressed; the stream is then rewound so playback
//!    starts from that same frame
//! 2. every frame is read, tracked, drawn, held until its deadline, shown
//! 3. after the last frame the window stays up until a key is pressed
//!
//! ESC at any wait cancels the session. Any other key during playback
//! pauses until the next key press.

use crate::bbox::Rect;
use crate::color::Color;
use crate::config::PlayerConfig;
use crate::error::{Error, Result};
use crate::geometry::{DisplayGeometry, FrameSize};
use crate::pacer::{frame_period_for_fps, Pacer};
use crate::progress::ProgressMeter;
use crate::registry::TrackRegistry;
use crate::tracker::TrackerFactory;
use std::time::{Duration, Instant};

/// Key code the display reports for ESC
pub const ESC_KEY: i32 = 27;

/// Frame rate assumed when the container does not report a usable one
pub const FALLBACK_FPS: f64 = 20.0;

/// Stream properties, read once when the source is opened
#[derive(Debug, Clone, PartialEq)]
pub struct VideoInfo {
    pub path: String,
    pub size: FrameSize,
    pub fps: f64,
    pub fps_rounded: usize,
    pub total_frames: usize,
}

impl VideoInfo {
    pub fn new(path: impl Into<String>, size: FrameSize, fps: f64, total_frames: usize) -> Self {
        let fps = if fps.is_finite() && fps > 0.0 {
            fps
        } else {
            log::warn!(
                "Video source returned invalid FPS ({}), defaulting to {:.1}",
                fps,
                FALLBACK_FPS
            );
            FALLBACK_FPS
        };

        Self {
            path: path.into(),
            size,
            fps,
            fps_rounded: fps.round() as usize,
            total_frames,
        }
    }

    /// Play time split into whole minutes and remaining seconds
    pub fn duration_parts(&self) -> (u64, f64) {
        let frames_per_minute = self.fps * 60.0;
        let minutes = (self.total_frames as f64 / frames_per_minute).floor();
        let seconds = (self.total_frames as f64 - minutes * frames_per_minute) / self.fps;
        (minutes as u64, seconds)
    }
}

/// Decoded frames, already scaled to the display size
pub trait VideoSource {
    type Frame;

    fn info(&self) -> &VideoInfo;

    /// Size every subsequent frame is resized to
    fn set_output_size(&mut self, size: FrameSize);

    /// Seek back to the first frame
    fn rewind(&mut self) -> Result<()>;

    /// Next frame, or `None` at end of stream (including unreadable frames)
    fn read_frame(&mut self) -> Result<Option<Self::Frame>>;
}

/// Window the annotated frames go to
pub trait DisplaySink<F> {
    fn open(&mut self, title: &str) -> Result<()>;

    fn draw_track(&mut self, frame: &mut F, rect: Rect, color: Color, label: &str) -> Result<()>;

    fn show(&mut self, frame: &F) -> Result<()>;

    /// Wait for a key press. `None` waits forever.
    ///
    /// Returns the key code, or `None` when the timeout expired.
    fn wait_key(&mut self, timeout: Option<Duration>) -> Result<Option<i32>>;
}

/// How a session ended, short of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// Every frame was shown
    Finished { frames_shown: usize },
    /// The user pressed ESC while `frame` was pending
    Cancelled { frame: usize },
}

impl PlaybackOutcome {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

pub struct PlaybackSession<S, D>
where
    S: VideoSource,
    D: DisplaySink<S::Frame>,
{
    source: S,
    sink: D,
    config: PlayerConfig,
    geometry: DisplayGeometry,
    frame_period: Duration,
    title: String,
    registry: TrackRegistry<S::Frame>,
    frames_shown: usize,
}

impl<S, D> PlaybackSession<S, D>
where
    S: VideoSource,
    D: DisplaySink<S::Frame>,
{
    /// Fix the display geometry and frame period for the whole run
    pub fn new(mut source: S, sink: D, config: PlayerConfig) -> Result<Self> {
        let info = source.info().clone();
        let geometry = DisplayGeometry::fit(info.size, config.max_display)?;
        let frame_period = frame_period_for_fps(info.fps)?;
        source.set_output_size(geometry.desired);

        let title = geometry.window_title(&config.window_title);
        let registry = TrackRegistry::new(config.grace_frames(info.fps_rounded)?);

        Ok(Self {
            source,
            sink,
            config,
            geometry,
            frame_period,
            title,
            registry,
            frames_shown: 0,
        })
    }

    pub fn info(&self) -> &VideoInfo {
        self.source.info()
    }

    pub fn geometry(&self) -> &DisplayGeometry {
        &self.geometry
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn registry(&self) -> &TrackRegistry<S::Frame> {
        &self.registry
    }

    pub fn frames_shown(&self) -> usize {
        self.frames_shown
    }

    pub fn sink(&self) -> &D {
        &self.sink
    }

    /// Statistics printed before anything is shown
    pub fn summary(&self) -> Vec<String> {
        let info = self.source.info();
        let (minutes, seconds) = info.duration_parts();
        let period_ns = self.frame_period.as_nanos();

        let mut lines = vec![
            format!("{}:", info.path),
            format!(
                "-> {} @ {} FPS for {}m{:.1}s ({} total frames)",
                info.size, info.fps, minutes, seconds, info.total_frames
            ),
            format!(
                "-> each frame is {} nanoseconds ({} milliseconds)",
                period_ns,
                period_ns as f64 / 1_000_000.0
            ),
        ];
        if self.geometry.needs_resize() {
            lines.push(format!(
                "-> each frame will be resized to {} (zoom factor of {})",
                self.geometry.desired, self.geometry.factor
            ));
        }
        lines
    }

    /// Run all three stages
    pub fn run(&mut self, factory: &mut dyn TrackerFactory<S::Frame>) -> Result<PlaybackOutcome> {
        for line in self.summary() {
            println!("{}", line);
        }

        self.sink.open(&self.title)?;

        if let Some(cancelled) = self.show_first_frame(factory)? {
            return Ok(cancelled);
        }

        let outcome = self.play()?;
        if let PlaybackOutcome::Finished { .. } = outcome {
            println!("Done! Press any key to exit.");
            self.sink.wait_key(None)?;
        }
        Ok(outcome)
    }

    /// Capture the first frame, start every tracker on it and hold it on
    /// screen until a key is pressed. Returns `Some` if that key was ESC.
    pub fn show_first_frame(
        &mut self,
        factory: &mut dyn TrackerFactory<S::Frame>,
    ) -> Result<Option<PlaybackOutcome>> {
        self.source.rewind()?;
        let mut frame = self.source.read_frame()?.ok_or_else(|| {
            Error::invalid_argument(format!("{} contains no frames", self.source.info().path))
        })?;
        self.source.rewind()?;

        self.registry.add_specs(
            &self.config.tracks,
            &frame,
            self.geometry.desired,
            0,
            factory,
        )?;

        for track in self.registry.drawable(0) {
            self.sink
                .draw_track(&mut frame, track.rect(), track.color(), track.name())?;
        }

        println!("Press any key to start..");
        self.sink.show(&frame)?;
        if self.sink.wait_key(None)? == Some(ESC_KEY) {
            return Ok(Some(PlaybackOutcome::Cancelled { frame: 0 }));
        }
        Ok(None)
    }

    /// Show every frame at the source rate
    pub fn play(&mut self) -> Result<PlaybackOutcome> {
        let info = self.source.info().clone();
        let start = Instant::now();
        let mut pacer = Pacer::new(self.frame_period, start);
        let mut progress = ProgressMeter::new(info.total_frames, info.fps_rounded, start);
        let mut frame_index = 0usize;

        loop {
            let mut frame = match self.source.read_frame()? {
                Some(frame) => frame,
                None => {
                    println!("-> finished showing {} frames", frame_index);
                    return Ok(PlaybackOutcome::Finished {
                        frames_shown: self.frames_shown,
                    });
                }
            };
            frame_index += 1;

            for event in self.registry.update_all(&frame, frame_index)? {
                println!("{}", event);
            }
            for track in self.registry.drawable(frame_index) {
                self.sink
                    .draw_track(&mut frame, track.rect(), track.color(), track.name())?;
            }

            let wait = pacer.wait_before_show(Instant::now());
            if let Some(key) = self.sink.wait_key(Some(wait))? {
                if key == ESC_KEY {
                    return Ok(PlaybackOutcome::Cancelled { frame: frame_index });
                }

                println!("-> paused on frame #{}", frame_index);
                if self.sink.wait_key(None)? == Some(ESC_KEY) {
                    return Ok(PlaybackOutcome::Cancelled { frame: frame_index });
                }
                // the pause must not count against the schedule
                pacer.reset(Instant::now());
            }

            self.sink.show(&frame)?;
            self.frames_shown += 1;
            pacer.advance();

            if progress.tick(frame_index) {
                let average_pause = pacer.take_average_pause(progress.frames_since_report());
                println!("{}", progress.report(frame_index, Instant::now(), average_pause));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_invalid_fps_falls_back() {
        let info = VideoInfo::new("clip.mp4", FrameSize::new(640, 480), 0.0, 100);
        assert_eq!(info.fps, FALLBACK_FPS);
        assert_eq!(info.fps_rounded, 20);

        let info = VideoInfo::new("clip.mp4", FrameSize::new(640, 480), f64::NAN, 100);
        assert_eq!(info.fps, FALLBACK_FPS);
    }

    #[test]
    fn test_fps_rounded_to_nearest() {
        let info = VideoInfo::new("clip.mp4", FrameSize::new(640, 480), 29.97, 100);
        assert_eq!(info.fps_rounded, 30);
        let info = VideoInfo::new("clip.mp4", FrameSize::new(640, 480), 23.4, 100);
        assert_eq!(info.fps_rounded, 23);
    }

    #[test]
    fn test_duration_parts() {
        let info = VideoInfo::new("clip.mp4", FrameSize::new(640, 480), 25.0, 1_600);
        let (minutes, seconds) = info.duration_parts();
        assert_eq!(minutes, 1);
        assert_abs_diff_eq!(seconds, 4.0, epsilon = 1e-9);
    }
}
