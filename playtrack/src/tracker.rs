/// Tracker capability interface
///
/// Any visual tracking backend (OpenCV CSRT, a scripted fake in tests, ...)
/// can drive the registry as long as it implements this trait. `F` is the
/// backend's frame type.
use crate::bbox::Rect;
use crate::error::Result;

/// Single-object tracker
pub trait ObjectTracker<F> {
    /// Start following `rect` as it appears in `frame`
    fn init(&mut self, frame: &F, rect: Rect) -> Result<()>;

    /// Locate the object in the next frame.
    ///
    /// `Ok(None)` means the object was not found with acceptable confidence
    /// in this frame only. `Err` is reserved for backend failures.
    fn update(&mut self, frame: &F) -> Result<Option<Rect>>;

    /// Backend name (for logging)
    fn name(&self) -> &str;
}

/// Creates one fresh tracker per track
pub trait TrackerFactory<F> {
    fn create(&mut self) -> Result<Box<dyn ObjectTracker<F>>>;
}

impl<F, C> TrackerFactory<F> for C
where
    C: FnMut() -> Result<Box<dyn ObjectTracker<F>>>,
{
    fn create(&mut self) -> Result<Box<dyn ObjectTracker<F>>> {
        self()
    }
}
