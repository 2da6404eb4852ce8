//! Command-line front end

use crate::csrt::csrt_factory;
use crate::display::HighGuiDisplay;
use crate::video::OpenCvVideoSource;
use clap::Parser;
use playtrack::{load_track_specs, FrameSize, PlaybackOutcome, PlaybackSession, PlayerConfig, Result};
use std::path::PathBuf;

/// Longest accepted `--grace-seconds`, one day
pub const MAX_GRACE_SECONDS: u32 = 86_400;

/// Play a video at its native frame rate while following objects with CSRT.
///
/// Press ESC to quit, any other key to pause.
#[derive(Parser, Debug, Clone)]
#[command(name = "csrt-player", version, about)]
pub struct Args {
    /// Video file to play
    #[arg(value_name = "VIDEO")]
    pub video: Option<String>,

    /// JSON list of objects to follow from the first frame
    #[arg(long, value_name = "FILE")]
    pub tracks: Option<PathBuf>,

    /// Frames wider than this (or taller than --max-height) are scaled down
    #[arg(long, default_value_t = 1024, value_parser = clap::value_parser!(i32).range(1..))]
    pub max_width: i32,

    #[arg(long, default_value_t = 768, value_parser = clap::value_parser!(i32).range(1..))]
    pub max_height: i32,

    /// Seconds a lost object may stay missing before it is given up
    #[arg(
        long,
        default_value_t = 3,
        value_parser = clap::value_parser!(u32).range(..=MAX_GRACE_SECONDS as i64)
    )]
    pub grace_seconds: u32,
}

impl Args {
    /// Path to open; an absent argument becomes the empty path, which fails
    /// at open time with a descriptive error
    pub fn video_path(&self) -> &str {
        self.video.as_deref().unwrap_or("")
    }

    pub fn to_config(&self) -> Result<PlayerConfig> {
        let tracks = match &self.tracks {
            Some(path) => load_track_specs(path)?,
            None => Vec::new(),
        };
        Ok(PlayerConfig {
            max_display: FrameSize::new(self.max_width, self.max_height),
            grace_seconds: self.grace_seconds as usize,
            tracks,
            ..Default::default()
        })
    }
}

/// Open the video, run the session and report how it ended
pub fn run(args: &Args) -> Result<PlaybackOutcome> {
    let config = args.to_config()?;
    let source = OpenCvVideoSource::open(args.video_path())?;
    let display = HighGuiDisplay::new(config.rect_thickness);

    if config.tracks.is_empty() {
        log::info!("No tracks given, playing without tracking");
    }

    let mut session = PlaybackSession::new(source, display, config)?;
    let outcome = session.run(&mut csrt_factory())?;
    log::info!("Session ended: {:?}", outcome);
    Ok(outcome)
}

/// Process exit status for a finished run.
///
/// 0 when every frame was shown, 1 for a recognized error or when the user
/// quit with ESC. Panics are mapped to 2 by the caller.
pub fn exit_code(result: &Result<PlaybackOutcome>) -> u8 {
    match result {
        Ok(PlaybackOutcome::Finished { .. }) => 0,
        Ok(PlaybackOutcome::Cancelled { .. }) | Err(_) => 1,
    }
}

/// Line printed for a run that did not finish normally
pub fn failure_message(result: &Result<PlaybackOutcome>) -> Option<String> {
    match result {
        Ok(PlaybackOutcome::Finished { .. }) => None,
        Ok(PlaybackOutcome::Cancelled { frame }) => {
            Some(format!("ERROR: user requested to quit (frame #{})", frame))
        }
        Err(e) => Some(format!("ERROR: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use playtrack::Error;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["csrt-player"]).unwrap();
        assert_eq!(args.video_path(), "");
        let config = args.to_config().unwrap();
        assert_eq!(config.max_display, FrameSize::new(1024, 768));
        assert_eq!(config.grace_seconds, 3);
        assert!(config.tracks.is_empty());
    }

    #[test]
    fn test_tracks_file_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"name": "car", "x": 0.5, "y": 0.5, "w": 0.1, "h": 0.1}}]"#).unwrap();

        let args = Args::try_parse_from([
            "csrt-player",
            "clip.mp4",
            "--tracks",
            file.path().to_str().unwrap(),
            "--max-width",
            "800",
            "--grace-seconds",
            "5",
        ])
        .unwrap();

        assert_eq!(args.video_path(), "clip.mp4");
        let config = args.to_config().unwrap();
        assert_eq!(config.tracks.len(), 1);
        assert_eq!(config.max_display, FrameSize::new(800, 768));
        assert_eq!(config.grace_seconds, 5);
    }

    #[test]
    fn test_zero_display_size_rejected() {
        assert!(Args::try_parse_from(["csrt-player", "--max-width", "0"]).is_err());
    }

    #[test]
    fn test_missing_video_fails_before_window() {
        let args = Args::try_parse_from(["csrt-player", "/definitely/not/here.mp4"]).unwrap();
        assert!(matches!(run(&args), Err(Error::OpenFailed { .. })));
    }

    #[test]
    fn test_overlong_grace_rejected() {
        assert!(Args::try_parse_from(["csrt-player", "--grace-seconds", "86401"]).is_err());
        assert!(
            Args::try_parse_from(["csrt-player", "--grace-seconds", "9223372036854775807"])
                .is_err()
        );
        let args = Args::try_parse_from(["csrt-player", "--grace-seconds", "86400"]).unwrap();
        assert_eq!(args.to_config().unwrap().grace_seconds, 86_400);
    }

    #[test]
    fn test_exit_codes() {
        let finished: Result<PlaybackOutcome> = Ok(PlaybackOutcome::Finished { frames_shown: 12 });
        let cancelled: Result<PlaybackOutcome> = Ok(PlaybackOutcome::Cancelled { frame: 7 });
        let failed: Result<PlaybackOutcome> = Err(Error::open_failed("clip.mp4"));

        assert_eq!(exit_code(&finished), 0);
        assert_eq!(exit_code(&cancelled), 1);
        assert_eq!(exit_code(&failed), 1);

        assert_eq!(failure_message(&finished), None);
        assert_eq!(
            failure_message(&cancelled).as_deref(),
            Some("ERROR: user requested to quit (frame #7)")
        );
        assert_eq!(
            failure_message(&failed).as_deref(),
            Some("ERROR: failed to open clip.mp4")
        );
    }
}
