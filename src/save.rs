// Saving the drawing as a timestamped PNG in a directory.
// Visual: a file like drawing_Mon_Oct_19_14-03-07_2026.png appears next to you.
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};
use image::{ImageBuffer, Rgb as ImageRgb, RgbImage};

use crate::error::Error;
use crate::types::{FrameBuffer, Rgb};

/// `drawing_<weekday>_<month>_<day>_<HH-MM-SS>_<year>.png`
pub fn drawing_file_name<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("drawing_{}.png", now.format("%a_%b_%d_%H-%M-%S_%Y"))
}

/// Convert the packed canvas to an `image` RGB buffer.
pub fn to_rgb_image(canvas: &FrameBuffer) -> RgbImage {
    ImageBuffer::from_fn(canvas.width as u32, canvas.height as u32, |x, y| {
        let c = Rgb::unpack(canvas.pixels[y as usize * canvas.width + x as usize]);
        ImageRgb([c.r, c.g, c.b])
    })
}

/// Write `canvas` into `dir` and return the path written.
pub fn save_drawing<Tz: TimeZone>(canvas: &FrameBuffer, dir: &Path, now: &DateTime<Tz>) -> Result<PathBuf, Error>
where
    Tz::Offset: std::fmt::Display,
{
    let path = dir.join(drawing_file_name(now));
    to_rgb_image(canvas)
        .save(&path)
        .map_err(|source| Error::Save { path: path.clone(), source })?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn file_name_embeds_a_readable_timestamp() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 14, 3, 7).unwrap();
        assert_eq!(drawing_file_name(&now), "drawing_Mon_Oct_19_14-03-07_2026.png");
    }

    #[test]
    fn saved_png_has_the_canvas_pixels() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut canvas = FrameBuffer::filled(8, 4, Rgb::WHITE);
        canvas.pixels[5] = Rgb::RED.pack();
        let now = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();

        let path = save_drawing(&canvas, dir.path(), &now).expect("save");
        assert!(path.starts_with(dir.path()));

        let back = image::open(&path).expect("readable png").to_rgb8();
        assert_eq!(back.dimensions(), (8, 4));
        assert_eq!(back.get_pixel(5, 0), &ImageRgb([255, 0, 0]));
        assert_eq!(back.get_pixel(0, 0), &ImageRgb([255, 255, 255]));
    }

    #[test]
    fn unwritable_directory_is_reported() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("no").join("such").join("dir");
        let canvas = FrameBuffer::filled(2, 2, Rgb::BLACK);
        let now = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        assert!(matches!(save_drawing(&canvas, &missing, &now), Err(Error::Save { .. })));
    }
}
