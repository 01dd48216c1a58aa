// Windows + HUD drawing utilities.
// Visual effects provided here:
// 1) The windows that show the canvas, the tracking view and the score board.
// 2) An X marker on the tracked centroid.
// 3) A tiny 5x7 bitmap font for HUD text, region numbers and the score.

use crate::error::Error;
use crate::shapes::{draw_line, put_pixel};
use crate::types::{FrameBuffer, Point, Rgb};
use minifb::{Key, KeyRepeat, Window, WindowOptions};

pub struct Drawer {
    window: Window, // one on-screen window
}

impl Drawer {
    /// Create a window sized to the buffer it will show.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(format!("{title}: {e}")))?;
        Ok(Self { window })
    }

    /// Pace `present` to roughly `fps` updates per second (the input poll tick).
    pub fn limit_fps(&mut self, fps: usize) {
        self.window.set_target_fps(fps);
    }

    /// Push the pixels for this tick to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// Keys that went down since the last update (no auto-repeat).
    pub fn keys_pressed(&self) -> Vec<Key> {
        self.window.get_keys_pressed(KeyRepeat::No)
    }
}

/* ---------- Markers and tiny bitmap font ---------- */

/// Draw an X centered at `c` (arms of length `size`).
/// Visual: marks where the tracker thinks the pencil tip is.
pub fn draw_cross(fb: &mut FrameBuffer, c: Point, size: i32, color: Rgb) {
    draw_line(fb, Point::new(c.x - size, c.y - size), Point::new(c.x + size, c.y + size), 2, color);
    draw_line(fb, Point::new(c.x + size, c.y - size), Point::new(c.x - size, c.y + size), 2, color);
}

/// Return a 5x7 glyph bitmap for the supported character set.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    // Helper macro to define a glyph quickly
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b10001,0b01010,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '/' => g!(0b00000,0b00001,0b00010,0b00100,0b01000,0b10000,0b00000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),
        '+' => g!(0b00000,0b00100,0b00100,0b11111,0b00100,0b00100,0b00000),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y), each font pixel a `scale`×`scale` block.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: Rgb, scale: i32) {
    let Some(rows) = glyph5x7(ch) else { return };
    for (ry, rowbits) in rows.iter().enumerate() {
        for rx in 0..5 {
            if (rowbits & (1 << (4 - rx))) == 0 {
                continue;
            }
            for sy in 0..scale {
                for sx in 0..scale {
                    put_pixel(fb, x + rx * scale + sx, y + ry as i32 * scale + sy, color);
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs with 1-pixel spacing.
pub fn draw_text_5x7(fb: &mut FrameBuffer, x: i32, y: i32, text: &str, color: Rgb) {
    draw_text_scaled(fb, x, y, text, color, 1);
}

/// Same as `draw_text_5x7`, magnified by `scale`.
pub fn draw_text_scaled(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: Rgb, scale: i32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color, scale);
        x += 6 * scale; // 5 pixels glyph width + 1 pixel spacing
    }
}

/// HUD text with a 1-pixel black shadow so it reads on any background.
pub fn draw_hud(fb: &mut FrameBuffer, x: i32, y: i32, text: &str, color: Rgb) {
    draw_text_5x7(fb, x + 1, y + 1, text, Rgb::BLACK);
    draw_text_5x7(fb, x, y, text, color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_digit_has_a_glyph() {
        assert!(('0'..='9').all(|c| glyph5x7(c).is_some()));
        assert!(('A'..='Z').all(|c| glyph5x7(c).is_some()));
        assert_eq!(glyph5x7('s'), glyph5x7('S'));
        assert_eq!(glyph5x7('#'), None);
    }

    #[test]
    fn scaled_text_covers_a_larger_box() {
        let mut fb = FrameBuffer::filled(40, 20, Rgb::WHITE);
        draw_text_scaled(&mut fb, 0, 0, "1", Rgb::BLACK, 2);
        // Bottom row of '1' is 01110 -> x in 2..8 at scale 2, rows 12..14.
        assert_eq!(fb.get(2, 12), Some(Rgb::BLACK));
        assert_eq!(fb.get(7, 13), Some(Rgb::BLACK));
        assert_eq!(fb.get(0, 12), Some(Rgb::WHITE));
    }

    #[test]
    fn cross_marks_its_center() {
        let mut fb = FrameBuffer::filled(30, 30, Rgb::WHITE);
        draw_cross(&mut fb, Point::new(15, 15), 5, Rgb::RED);
        assert_eq!(fb.get(15, 15), Some(Rgb::RED));
        assert_eq!(fb.get(10, 10), Some(Rgb::RED));
        assert_eq!(fb.get(20, 10), Some(Rgb::RED));
        assert_eq!(fb.get(15, 10), Some(Rgb::WHITE));
    }
}
