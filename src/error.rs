// One error type for the whole app. Every variant states *where* things went wrong.
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("window init error: {0}")]
    WindowInit(String),   // Creating a window failed
    #[error("window update error: {0}")]
    WindowUpdate(String), // Pushing a buffer to a window failed
    #[error("camera init error: {0}")]
    CameraInit(String),   // Opening/starting the camera failed
    #[error("camera frame error: {0}")]
    CameraFrame(String),  // Grabbing/decoding a frame failed (fatal for the session)
    #[error("config error in {}: {}", .path.display(), .reason)]
    Config { path: PathBuf, reason: String },
    #[error("failed to save drawing to {}: {}", .path.display(), .source)]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("buffer size mismatch: {0}")]
    Dimensions(String),
}
