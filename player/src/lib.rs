//! CSRT video tracking player
//!
//! OpenCV implementations of the `playtrack` collaborators: a
//! `VideoCapture` file source, a HighGUI window and the CSRT tracker, plus
//! the command-line front end that wires them into a playback session.

pub mod app;
pub mod csrt;
pub mod display;
pub mod image_utils;
pub mod video;

pub use app::{exit_code, failure_message, run, Args};
pub use csrt::{csrt_factory, CsrtTracker};
pub use display::HighGuiDisplay;
pub use video::OpenCvVideoSource;
