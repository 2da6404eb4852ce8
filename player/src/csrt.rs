/// OpenCV CSRT tracking backend
use crate::image_utils::{from_cv_rect, to_cv_rect};
use opencv::{
    core::{self, Mat, Ptr},
    prelude::*,
    tracking::{TrackerCSRT, TrackerCSRT_Params},
};
use playtrack::{Error, ObjectTracker, Rect, Result};

/// Channel and Spatial Reliability Tracker, one instance per object
pub struct CsrtTracker {
    inner: Ptr<TrackerCSRT>,
}

impl CsrtTracker {
    pub fn new() -> Result<Self> {
        let params = TrackerCSRT_Params::default()
            .map_err(|e| Error::backend(format!("Failed to create CSRT parameters: {}", e)))?;
        let inner = TrackerCSRT::create(&params)
            .map_err(|e| Error::backend(format!("Failed to create CSRT tracker: {}", e)))?;
        Ok(Self { inner })
    }
}

impl ObjectTracker<Mat> for CsrtTracker {
    fn init(&mut self, frame: &Mat, rect: Rect) -> Result<()> {
        self.inner
            .init(frame, to_cv_rect(rect))
            .map_err(|e| Error::backend(format!("CSRT init at {} failed: {}", rect, e)))
    }

    fn update(&mut self, frame: &Mat) -> Result<Option<Rect>> {
        let mut bbox = core::Rect::default();
        let found = self
            .inner
            .update(frame, &mut bbox)
            .map_err(|e| Error::backend(format!("CSRT update failed: {}", e)))?;
        Ok(found.then(|| from_cv_rect(bbox)))
    }

    fn name(&self) -> &str {
        "CSRT"
    }
}

/// Factory handed to the playback session
pub fn csrt_factory() -> impl FnMut() -> Result<Box<dyn ObjectTracker<Mat>>> {
    || -> Result<Box<dyn ObjectTracker<Mat>>> { Ok(Box::new(CsrtTracker::new()?)) }
}
