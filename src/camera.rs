// Live video input. The tracker only needs "give me the next frame".
// Visual expectation: each `next_frame()` is one fresh camera image packed as
// 0x00RRGGBB, the same layout as the canvas.

use crate::error::Error;
use crate::types::FrameBuffer;

use nokhwa::{
    Camera,
    pixel_format::RgbFormat,
    utils::{
        CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution,
    },
};

/// Anything that produces same-size color frames at a steady rate.
/// An error means the source is gone; the session ends.
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<FrameBuffer, Error>;
    fn resolution(&self) -> (usize, usize);
}

/// A webcam opened through nokhwa.
pub struct Webcam {
    cam: Camera,
    width: u32,
    height: u32,
}

impl Webcam {
    /// Open camera `index` near the requested resolution (the driver may pick another).
    pub fn open(index: u32, width: u32, height: u32) -> Result<Self, Error> {
        let fmt = CameraFormat::new(
            Resolution::new(width, height),
            FrameFormat::YUYV, // uncompressed; cheap to convert to RGB
            30,
        );
        let req = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Closest(fmt));

        let mut cam = Camera::new(CameraIndex::Index(index), req)
            .map_err(|e| Error::CameraInit(format!("camera {index}: {e}")))?;
        cam.open_stream()
            .map_err(|e| Error::CameraInit(format!("open stream: {e}")))?;

        let actual = cam.resolution();
        Ok(Self { cam, width: actual.width(), height: actual.height() })
    }
}

impl FrameSource for Webcam {
    /// Blocks until the camera delivers a frame, then decodes it to RGB.
    fn next_frame(&mut self) -> Result<FrameBuffer, Error> {
        let frame = self
            .cam
            .frame()
            .map_err(|e| Error::CameraFrame(format!("fetch frame: {e}")))?;
        let rgb = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| Error::CameraFrame(format!("decode RGB: {e}")))?;

        let (w, h) = rgb.dimensions();
        if (w, h) != (self.width, self.height) {
            return Err(Error::CameraFrame(format!(
                "frame size changed from {}x{} to {w}x{h}",
                self.width, self.height
            )));
        }
        let pixels = rgb
            .pixels()
            .map(|p| (u32::from(p[0]) << 16) | (u32::from(p[1]) << 8) | u32::from(p[2]))
            .collect();
        Ok(FrameBuffer { width: w as usize, height: h as usize, pixels })
    }

    fn resolution(&self) -> (usize, usize) {
        (self.width as usize, self.height as usize)
    }
}
