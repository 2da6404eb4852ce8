//! Video file source backed by OpenCV's `VideoCapture`

use opencv::{
    core::{Mat, Size},
    imgproc,
    prelude::*,
    videoio::{self, VideoCapture, CAP_ANY},
};
use playtrack::{Error, FrameSize, Result, VideoInfo, VideoSource};

/// Decodes a file frame by frame, resizing each frame to the display size
pub struct OpenCvVideoSource {
    capture: VideoCapture,
    info: VideoInfo,
    output_size: Option<FrameSize>,
}

impl OpenCvVideoSource {
    /// Open `path` and read its properties.
    ///
    /// Fails with [`Error::OpenFailed`] when the file cannot be opened,
    /// including when `path` is empty.
    pub fn open(path: &str) -> Result<Self> {
        log::info!("Opening video source: {}", path);

        let capture = match VideoCapture::from_file(path, CAP_ANY) {
            Ok(capture) => capture,
            Err(e) => {
                log::debug!("VideoCapture::from_file({}) failed: {}", path, e);
                return Err(Error::open_failed(path));
            }
        };
        if !capture.is_opened().unwrap_or(false) {
            return Err(Error::open_failed(path));
        }

        let width = capture.get(videoio::CAP_PROP_FRAME_WIDTH).unwrap_or(0.0) as i32;
        let height = capture.get(videoio::CAP_PROP_FRAME_HEIGHT).unwrap_or(0.0) as i32;
        let fps = capture.get(videoio::CAP_PROP_FPS).unwrap_or(0.0);
        let total_frames = capture
            .get(videoio::CAP_PROP_FRAME_COUNT)
            .unwrap_or(0.0)
            .max(0.0) as usize;

        let info = VideoInfo::new(path, FrameSize::new(width, height), fps, total_frames);
        log::info!(
            "Video properties: {} @ {:.2} FPS, {} frames",
            info.size,
            info.fps,
            info.total_frames
        );

        Ok(Self {
            capture,
            info,
            output_size: None,
        })
    }

    fn resize_if_needed(&self, frame: Mat) -> Result<Mat> {
        let target = match self.output_size {
            Some(size) => Size::new(size.width, size.height),
            None => return Ok(frame),
        };
        let current = frame
            .size()
            .map_err(|e| Error::backend(format!("Failed to read frame size: {}", e)))?;
        if current == target {
            return Ok(frame);
        }

        log::trace!(
            "Resizing frame from {}x{} to {}x{}",
            current.width,
            current.height,
            target.width,
            target.height
        );

        let mut resized = Mat::default();
        imgproc::resize(&frame, &mut resized, target, 0.0, 0.0, imgproc::INTER_LINEAR)
            .map_err(|e| Error::backend(format!("Failed to resize frame: {}", e)))?;
        Ok(resized)
    }
}

impl VideoSource for OpenCvVideoSource {
    type Frame = Mat;

    fn info(&self) -> &VideoInfo {
        &self.info
    }

    fn set_output_size(&mut self, size: FrameSize) {
        self.output_size = Some(size);
    }

    fn rewind(&mut self) -> Result<()> {
        let moved = self
            .capture
            .set(videoio::CAP_PROP_POS_FRAMES, 0.0)
            .map_err(|e| Error::backend(format!("Failed to rewind {}: {}", self.info.path, e)))?;
        if !moved {
            log::warn!("{} did not accept a seek to the first frame", self.info.path);
        }
        Ok(())
    }

    fn read_frame(&mut self) -> Result<Option<Mat>> {
        let mut frame = Mat::default();
        // a read error is treated the same as running out of frames
        let read = match self.capture.read(&mut frame) {
            Ok(read) => read,
            Err(e) => {
                log::warn!("Failed to read frame from {}: {}", self.info.path, e);
                false
            }
        };
        if !read || frame.empty() {
            log::debug!("End of video stream {}", self.info.path);
            return Ok(None);
        }
        self.resize_if_needed(frame).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{Scalar, CV_8UC3};
    use opencv::videoio::VideoWriter;

    #[test]
    fn test_missing_file_fails_to_open() {
        let result = OpenCvVideoSource::open("/definitely/not/here/clip.mp4");
        assert!(matches!(result, Err(Error::OpenFailed { .. })));
    }

    #[test]
    fn test_empty_path_fails_to_open() {
        assert!(matches!(
            OpenCvVideoSource::open(""),
            Err(Error::OpenFailed { .. })
        ));
    }

    #[test]
    fn test_read_resize_and_rewind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.avi");
        let path = path.to_str().unwrap();

        let fourcc = VideoWriter::fourcc('M', 'J', 'P', 'G').unwrap();
        let mut writer = VideoWriter::new(path, fourcc, 10.0, Size::new(320, 240), true).unwrap();
        if !writer.is_opened().unwrap_or(false) {
            // no MJPG encoder in this OpenCV build
            return;
        }
        for i in 0..10 {
            let frame = Mat::new_rows_cols_with_default(
                240,
                320,
                CV_8UC3,
                Scalar::all((i * 20) as f64),
            )
            .unwrap();
            writer.write(&frame).unwrap();
        }
        writer.release().unwrap();

        let mut source = OpenCvVideoSource::open(path).unwrap();
        assert_eq!(source.info().size, FrameSize::new(320, 240));
        assert_eq!(source.info().fps_rounded, 10);

        source.set_output_size(FrameSize::new(160, 120));
        let first = source.read_frame().unwrap().expect("first frame");
        assert_eq!(first.size().unwrap(), Size::new(160, 120));

        let mut count = 1;
        while source.read_frame().unwrap().is_some() {
            count += 1;
        }
        assert_eq!(count, 10);

        source.rewind().unwrap();
        assert!(source.read_frame().unwrap().is_some());
    }
}
