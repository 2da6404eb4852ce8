//! Track registry and per-track lifecycle
//!
//! Each track moves through three states:
//!
//! ```text
//!   Active --(update fails)--> LostPending --(grace exceeded)--> Deactivated
//!      ^                            |
//!      +-----(update succeeds)------+
//! ```
//!
//! Deactivated tracks are never removed. They stay in the registry so that
//! iteration order and indices are stable, but they are neither updated nor
//! drawn again.

use crate::bbox::Rect;
use crate::color::Color;
use crate::config::TrackSpec;
use crate::error::Result;
use crate::geometry::FrameSize;
use crate::tracker::{ObjectTracker, TrackerFactory};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackState {
    /// Last update succeeded
    Active,
    /// Lost, but still inside the grace window
    LostPending,
    /// Lost for too long; terminal
    Deactivated,
}

/// Lifecycle transitions reported by [`TrackRegistry::update_all`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackEvent {
    Lost { name: String, frame: usize },
    Recovered { name: String, frame: usize },
    Deactivated { name: String, frame: usize },
}

impl std::fmt::Display for TrackEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lost { name, frame } => write!(f, "-> lost \"{}\" on frame #{}", name, frame),
            Self::Recovered { name, frame } => {
                write!(f, "-> found \"{}\" again on frame #{}", name, frame)
            }
            Self::Deactivated { name, frame } => {
                write!(f, "-> giving up on \"{}\" at frame #{}", name, frame)
            }
        }
    }
}

/// One followed object
pub struct Track<F> {
    name: String,
    color: Color,
    rect: Rect,
    last_success_frame: usize,
    state: TrackState,
    tracker: Box<dyn ObjectTracker<F>>,
}

impl<F> Track<F> {
    /// Initialise `tracker` on `frame` and start the track as Active.
    ///
    /// `frame_index` is the index of the frame the rectangle was taken from.
    pub fn new(
        name: impl Into<String>,
        color: Color,
        rect: Rect,
        frame: &F,
        frame_index: usize,
        mut tracker: Box<dyn ObjectTracker<F>>,
    ) -> Result<Self> {
        let name = name.into();
        tracker.init(frame, rect)?;
        log::info!(
            "Track \"{}\" initialised at {} with {}",
            name,
            rect,
            tracker.name()
        );
        Ok(Self {
            name,
            color,
            rect,
            last_success_frame: frame_index,
            state: TrackState::Active,
            tracker,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Current rectangle, or [`Rect::LOST`] while the object is lost
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn last_success_frame(&self) -> usize {
        self.last_success_frame
    }

    pub fn state(&self) -> TrackState {
        self.state
    }

    pub fn is_deactivated(&self) -> bool {
        self.state == TrackState::Deactivated
    }

    /// Drawn only on the frame where its own update succeeded
    pub fn is_drawable(&self, frame_index: usize) -> bool {
        self.state == TrackState::Active && self.last_success_frame == frame_index
    }

    fn update(
        &mut self,
        frame: &F,
        frame_index: usize,
        grace_frames: usize,
    ) -> Result<Option<TrackEvent>> {
        if self.is_deactivated() {
            return Ok(None);
        }

        match self.tracker.update(frame)? {
            Some(rect) => {
                let recovered = self.state == TrackState::LostPending;
                self.rect = rect;
                self.last_success_frame = frame_index;
                self.state = TrackState::Active;
                Ok(recovered.then(|| TrackEvent::Recovered {
                    name: self.name.clone(),
                    frame: frame_index,
                }))
            }
            None => {
                let was_active = self.state == TrackState::Active;
                self.rect = Rect::LOST;
                if frame_index > self.last_success_frame.saturating_add(grace_frames) {
                    self.state = TrackState::Deactivated;
                    return Ok(Some(TrackEvent::Deactivated {
                        name: self.name.clone(),
                        frame: frame_index,
                    }));
                }
                self.state = TrackState::LostPending;
                Ok(was_active.then(|| TrackEvent::Lost {
                    name: self.name.clone(),
                    frame: frame_index,
                }))
            }
        }
    }
}

impl<F> std::fmt::Debug for Track<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Track")
            .field("name", &self.name)
            .field("color", &self.color)
            .field("rect", &self.rect)
            .field("last_success_frame", &self.last_success_frame)
            .field("state", &self.state)
            .field("tracker", &self.tracker.name())
            .finish()
    }
}

/// Owns every track of a session and applies the loss policy
pub struct TrackRegistry<F> {
    tracks: Vec<Track<F>>,
    grace_frames: usize,
}

impl<F> TrackRegistry<F> {
    /// `grace_frames` is how many frames past its last success a lost track
    /// may stay pending before it is deactivated.
    pub fn new(grace_frames: usize) -> Self {
        Self {
            tracks: Vec::new(),
            grace_frames,
        }
    }

    /// Build one track per spec, resolving normalized boxes against
    /// `frame_size` (the size of the frames the trackers will see).
    pub fn from_specs(
        specs: &[TrackSpec],
        frame: &F,
        frame_size: FrameSize,
        frame_index: usize,
        grace_frames: usize,
        factory: &mut dyn TrackerFactory<F>,
    ) -> Result<Self> {
        let mut registry = Self::new(grace_frames);
        registry.add_specs(specs, frame, frame_size, frame_index, factory)?;
        Ok(registry)
    }

    /// Start one tracker per spec on `frame` and register the tracks
    pub fn add_specs(
        &mut self,
        specs: &[TrackSpec],
        frame: &F,
        frame_size: FrameSize,
        frame_index: usize,
        factory: &mut dyn TrackerFactory<F>,
    ) -> Result<()> {
        for (index, spec) in specs.iter().enumerate() {
            let rect = spec
                .normalized()
                .to_pixels(frame_size.width, frame_size.height);
            let track = Track::new(
                spec.name.clone(),
                spec.color_or_default(index),
                rect,
                frame,
                frame_index,
                factory.create()?,
            )?;
            self.add(track);
        }
        Ok(())
    }

    pub fn add(&mut self, track: Track<F>) {
        self.tracks.push(track);
    }

    pub fn grace_frames(&self) -> usize {
        self.grace_frames
    }

    pub fn tracks(&self) -> &[Track<F>] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Tracks that are not deactivated
    pub fn active_count(&self) -> usize {
        self.tracks.iter().filter(|t| !t.is_deactivated()).count()
    }

    /// Update every live track with `frame`, in registration order
    pub fn update_all(&mut self, frame: &F, frame_index: usize) -> Result<Vec<TrackEvent>> {
        let mut events = Vec::new();
        for track in self.tracks.iter_mut() {
            if let Some(event) = track.update(frame, frame_index, self.grace_frames)? {
                log::debug!("{:?}", event);
                events.push(event);
            }
        }
        Ok(events)
    }

    /// Tracks to render on `frame_index`
    pub fn drawable(&self, frame_index: usize) -> impl Iterator<Item = &Track<F>> {
        self.tracks
            .iter()
            .filter(move |t| t.is_drawable(frame_index))
    }
}
