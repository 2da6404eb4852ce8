//! Real-time annotated video playback
//!
//! Backend-agnostic pieces of a player that shows a video at its native
//! frame rate while following a handful of objects with an external
//! single-object tracker:
//!
//! - [`pacer`]: presentation deadlines that never drift
//! - [`geometry`]: one-time display scaling decision
//! - [`registry`]: per-track lifecycle with a loss grace window
//! - [`session`]: the decode / track / draw / wait / show loop
//!
//! Video decoding, windows and the tracking algorithm itself are supplied
//! through the [`session::VideoSource`], [`session::DisplaySink`] and
//! [`tracker::ObjectTracker`] traits.
//!
//! ```rust,ignore
//! use playtrack::{PlaybackSession, PlayerConfig};
//!
//! let mut session = PlaybackSession::new(source, sink, PlayerConfig::default())?;
//! let outcome = session.run(&mut factory)?;
//! ```

pub mod bbox;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod pacer;
pub mod progress;
pub mod registry;
pub mod session;
pub mod tracker;

pub use bbox::{NormalizedBox, Rect};
pub use color::{generate_color, Color};
pub use config::{load_track_specs, parse_track_specs, PlayerConfig, TrackSpec};
pub use error::{Error, Result};
pub use geometry::{DisplayGeometry, FrameSize, DEFAULT_MAX_DISPLAY};
pub use pacer::{frame_period_for_fps, Pacer};
pub use progress::{ProgressMeter, ProgressReport};
pub use registry::{Track, TrackEvent, TrackRegistry, TrackState};
pub use session::{DisplaySink, PlaybackOutcome, PlaybackSession, VideoInfo, VideoSource, ESC_KEY};
pub use tracker::{ObjectTracker, TrackerFactory};

/// Library version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
