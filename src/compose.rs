// Display compositing: what the canvas and tracking windows show each tick.
use crate::error::Error;
use crate::types::{FrameBuffer, Rgb};
use crate::vision::Components;

/// Half-intensity white added on top of the tracked blob.
const HIGHLIGHT: u8 = 128;

#[inline]
fn add_saturating(a: Rgb, b: Rgb) -> Rgb {
    Rgb::new(a.r.saturating_add(b.r), a.g.saturating_add(b.g), a.b.saturating_add(b.b))
}

/// Overlay mode: live frame + canvas, per channel, clamped at 255.
/// Visual: strokes glow on top of the camera image; the near-black blank canvas
/// leaves the camera image untouched.
pub fn overlay(frame: &FrameBuffer, canvas: &FrameBuffer, out: &mut FrameBuffer) -> Result<(), Error> {
    if !frame.same_size(canvas) || !frame.same_size(out) {
        return Err(Error::Dimensions(format!(
            "overlay: frame {}x{}, canvas {}x{}, out {}x{}",
            frame.width, frame.height, canvas.width, canvas.height, out.width, out.height
        )));
    }
    for ((o, &f), &c) in out.pixels.iter_mut().zip(&frame.pixels).zip(&canvas.pixels) {
        *o = add_saturating(Rgb::unpack(f), Rgb::unpack(c)).pack();
    }
    Ok(())
}

/// Tracking view: the frame with the pixels of component `label` brightened.
pub fn highlight(frame: &FrameBuffer, components: &Components, label: u32, out: &mut FrameBuffer) -> Result<(), Error> {
    if !frame.same_size(out) || frame.width != components.width || frame.height != components.height {
        return Err(Error::Dimensions("highlight: frame, labels and output differ in size".into()));
    }
    let boost = Rgb::new(HIGHLIGHT, HIGHLIGHT, HIGHLIGHT);
    for ((o, &f), &l) in out.pixels.iter_mut().zip(&frame.pixels).zip(&components.labels) {
        *o = if l == label { add_saturating(Rgb::unpack(f), boost).pack() } else { f };
    }
    Ok(())
}
