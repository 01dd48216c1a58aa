// The virtual pencil: where it is, what it draws, and the two canvas buffers.
//
// Two states:
//   Idle    -> Line mode strokes straight into `committed`.
//   Shaping -> a circle/square/ellipse is stretched from the anchor to the
//              pencil; it lives in `preview` until `finalize` commits it.
//
// Visual: while shaping you see the shape follow your marker without smearing
// copies of itself; releasing it leaves exactly one shape on the canvas.
use tracing::debug;

use crate::shapes::{draw_circle, draw_ellipse, draw_line, draw_rect};
use crate::types::{FrameBuffer, Point, Rgb};

pub const MIN_THICKNESS: u32 = 1;
pub const MAX_THICKNESS: u32 = 10;
pub const DEFAULT_THICKNESS: u32 = 5;

/// What an accepted pencil update draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Line,
    Circle,
    Square,
    Ellipse,
}

impl Mode {
    pub fn is_shape(self) -> bool {
        !matches!(self, Mode::Line)
    }

    pub fn name(self) -> &'static str {
        match self {
            Mode::Line => "LINE",
            Mode::Circle => "CIRCLE",
            Mode::Square => "SQUARE",
            Mode::Ellipse => "ELLIPSE",
        }
    }
}

/// The committed drawing plus the in-progress preview.
#[derive(Clone, Debug)]
pub struct Canvas {
    pub committed: FrameBuffer,
    pub preview: FrameBuffer,
    blank: FrameBuffer,    // what `clear` goes back to
}

impl Canvas {
    pub fn new(blank: FrameBuffer) -> Self {
        Self { committed: blank.clone(), preview: blank.clone(), blank }
    }

    #[cfg(test)]
    pub fn blank(&self) -> &FrameBuffer {
        &self.blank
    }

    /// Start over from a different blank image (paint-by-number boards).
    pub fn reset_to(&mut self, blank: FrameBuffer) {
        self.blank = blank;
        self.clear();
    }

    pub fn clear(&mut self) {
        self.committed.pixels.copy_from_slice(&self.blank.pixels);
        self.preview.pixels.copy_from_slice(&self.blank.pixels);
    }
}

#[derive(Clone, Debug)]
pub struct DrawingCursor {
    pub position: Option<Point>,
    pub previous: Option<Point>,
    pub color: Rgb,
    pub thickness: u32,
    pub mode: Option<Mode>,  // None until the user picks one: pencil is up
    shaping: bool,
    anchor: Option<Point>,
    canvas: Canvas,
}

impl DrawingCursor {
    pub fn new(blank: FrameBuffer) -> Self {
        Self {
            position: None,
            previous: None,
            color: Rgb::WHITE,
            thickness: DEFAULT_THICKNESS,
            mode: None,
            shaping: false,
            anchor: None,
            canvas: Canvas::new(blank),
        }
    }

    pub fn is_shaping(&self) -> bool {
        self.shaping
    }

    #[cfg(test)]
    pub fn anchor(&self) -> Option<Point> {
        self.anchor
    }

    #[cfg(test)]
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn committed(&self) -> &FrameBuffer {
        &self.canvas.committed
    }

    /// The buffer to show this tick.
    pub fn display(&self) -> &FrameBuffer {
        if self.shaping { &self.canvas.preview } else { &self.canvas.committed }
    }

    /// Accepted pencil update: draw according to the current mode and state.
    pub fn extend(&mut self, p: Point) {
        self.move_to(p);
        if self.shaping {
            self.preview_shape();
        } else if self.mode == Some(Mode::Line) {
            if let Some(from) = self.previous {
                draw_line(&mut self.canvas.committed, from, p, self.thickness, self.color);
            }
        }
    }

    /// Rejected (jittery) update: the pencil moves but nothing is drawn.
    pub fn relocate(&mut self, p: Point) {
        self.move_to(p);
    }

    fn move_to(&mut self, p: Point) {
        self.previous = self.position;
        self.position = Some(p);
    }

    fn preview_shape(&mut self) {
        let Some(cur) = self.position else { return };
        let anchor = *self.anchor.get_or_insert(cur);
        let preview = &mut self.canvas.preview;
        preview.pixels.copy_from_slice(&self.canvas.committed.pixels);
        if anchor == cur {
            return; // nothing to stretch yet
        }

        let (t, k) = (self.thickness, self.color);
        match self.mode {
            Some(Mode::Circle) => {
                let radius = anchor.distance(cur) as i32;
                draw_circle(preview, anchor, radius, t, k);
            }
            Some(Mode::Square) => draw_rect(preview, anchor, cur, t, k),
            Some(Mode::Ellipse) => {
                draw_ellipse(preview, anchor, (cur.x - anchor.x).abs(), (cur.y - anchor.y).abs(), t, k);
            }
            Some(Mode::Line) | None => {}
        }
    }

    /// Switch what the pencil draws. Shape modes start (or continue) shaping;
    /// the anchor is kept and the preview redrawn as the new shape.
    /// Line commits any in-progress shape first.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode.is_shape() {
            if !self.shaping {
                self.canvas.preview.pixels.copy_from_slice(&self.canvas.committed.pixels);
            }
            self.shaping = true;
            self.mode = Some(mode);
            if self.anchor.is_some() {
                self.preview_shape();
            }
        } else {
            self.finalize();
            self.mode = Some(mode);
        }
    }

    /// Shaping -> Idle: the last preview becomes the drawing. No-op when Idle.
    pub fn finalize(&mut self) {
        if !self.shaping {
            return;
        }
        std::mem::swap(&mut self.canvas.committed, &mut self.canvas.preview);
        self.canvas.preview.pixels.copy_from_slice(&self.canvas.committed.pixels);
        self.shaping = false;
        self.anchor = None;
        debug!("shape committed");
    }

    /// Back to the blank canvas. Mode, color, thickness and shaping are kept.
    pub fn clear(&mut self) {
        self.canvas.clear();
    }

    /// Replace the blank canvas (and wipe the drawing).
    pub fn reset_canvas(&mut self, blank: FrameBuffer) {
        self.canvas.reset_to(blank);
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.color = color;
    }

    /// +1 up to MAX_THICKNESS. Returns false when already at the limit.
    pub fn thicker(&mut self) -> bool {
        if self.thickness >= MAX_THICKNESS {
            return false;
        }
        self.thickness += 1;
        true
    }

    /// -1 down to MIN_THICKNESS. Returns false when already at the limit.
    pub fn thinner(&mut self) -> bool {
        if self.thickness <= MIN_THICKNESS {
            return false;
        }
        self.thickness -= 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cursor() -> DrawingCursor {
        let mut c = DrawingCursor::new(FrameBuffer::filled(120, 100, Rgb::WHITE));
        c.set_color(Rgb::RED);
        c.thickness = 1;
        c
    }

    fn expected_circle(center: Point, through: Point) -> FrameBuffer {
        let mut fb = FrameBuffer::filled(120, 100, Rgb::WHITE);
        draw_circle(&mut fb, center, center.distance(through) as i32, 1, Rgb::RED);
        fb
    }

    #[test]
    fn starts_idle_with_pencil_up() {
        let mut c = cursor();
        c.extend(Point::new(10, 10));
        c.extend(Point::new(50, 50));
        assert!(!c.is_shaping());
        assert_eq!(c.committed(), c.canvas().blank());
    }

    #[test]
    fn line_mode_strokes_between_accepted_updates() {
        let mut c = cursor();
        c.set_mode(Mode::Line);
        assert!(!c.is_shaping());
        c.extend(Point::new(10, 10));
        assert_eq!(c.committed().get(10, 10), Some(Rgb::WHITE)); // no previous yet
        c.extend(Point::new(40, 10));
        assert_eq!(c.committed().get(10, 10), Some(Rgb::RED));
        assert_eq!(c.committed().get(25, 10), Some(Rgb::RED));
        assert_eq!(c.committed().get(40, 10), Some(Rgb::RED));
    }

    #[test]
    fn relocate_lifts_the_pencil() {
        let mut c = cursor();
        c.set_mode(Mode::Line);
        c.extend(Point::new(10, 10));
        c.relocate(Point::new(90, 90));
        assert_eq!(c.committed(), c.canvas().blank());
        c.extend(Point::new(90, 80));
        assert_eq!(c.committed().get(90, 85), Some(Rgb::RED));
        assert_eq!(c.committed().get(50, 50), Some(Rgb::WHITE));
    }

    #[test]
    fn circle_commit_leaves_only_the_final_shape() {
        let mut c = cursor();
        c.set_mode(Mode::Circle);
        assert!(c.is_shaping());
        assert_eq!(c.anchor(), None);

        let (anchor, c1, c2) = (Point::new(60, 50), Point::new(90, 50), Point::new(70, 50));
        c.extend(anchor);
        assert_eq!(c.anchor(), Some(anchor));
        c.extend(c1);
        assert_eq!(c.committed(), c.canvas().blank()); // only the preview changed
        c.extend(c2);
        c.finalize();

        assert!(!c.is_shaping());
        assert_eq!(c.anchor(), None);
        assert_eq!(c.committed(), &expected_circle(anchor, c2));
        assert_eq!(c.committed().get(90, 50), Some(Rgb::WHITE)); // no residue of the C1 preview
    }

    #[test]
    fn square_and_ellipse_follow_the_pencil() {
        let mut c = cursor();
        c.set_mode(Mode::Square);
        c.extend(Point::new(20, 20));
        c.extend(Point::new(50, 40));
        assert_eq!(c.display().get(50, 30), Some(Rgb::RED));
        assert_eq!(c.display().get(35, 30), Some(Rgb::WHITE));

        c.set_mode(Mode::Ellipse); // keeps the anchor
        assert_eq!(c.anchor(), Some(Point::new(20, 20)));
        c.extend(Point::new(50, 30));
        c.finalize();
        assert_eq!(c.committed().get(50, 20), Some(Rgb::RED));
        assert_eq!(c.committed().get(20, 30), Some(Rgb::RED));
        assert_eq!(c.committed().get(50, 40), Some(Rgb::WHITE)); // the square preview is gone
    }

    #[test]
    fn switching_shapes_redraws_the_preview() {
        let mut c = cursor();
        c.set_mode(Mode::Square);
        c.extend(Point::new(20, 20));
        c.extend(Point::new(50, 40));
        c.set_mode(Mode::Ellipse);
        assert_eq!(c.display().get(50, 40), Some(Rgb::WHITE)); // square corner gone
        assert_eq!(c.display().get(50, 20), Some(Rgb::RED));
        assert_eq!(c.display().get(20, 40), Some(Rgb::RED));
    }

    #[test]
    fn finalize_without_motion_commits_nothing() {
        let mut c = cursor();
        c.set_mode(Mode::Circle);
        c.extend(Point::new(60, 50));
        assert_eq!(c.display().get(60, 50), Some(Rgb::WHITE));
        c.finalize();
        assert!(!c.is_shaping());
        assert_eq!(c.committed(), c.canvas().blank());
    }

    #[test]
    fn finalize_when_idle_is_a_no_op() {
        let mut c = cursor();
        c.set_mode(Mode::Line);
        c.extend(Point::new(5, 5));
        c.extend(Point::new(15, 5));
        let before = c.committed().clone();
        c.finalize();
        assert_eq!(c.committed(), &before);
    }

    #[test]
    fn switching_to_line_commits_the_shape() {
        let mut c = cursor();
        c.set_mode(Mode::Square);
        c.extend(Point::new(10, 10));
        c.extend(Point::new(30, 30));
        c.set_mode(Mode::Line);
        assert!(!c.is_shaping());
        assert_eq!(c.committed().get(30, 20), Some(Rgb::RED));
    }

    #[test]
    fn clear_keeps_settings_and_shaping() {
        let mut c = cursor();
        c.set_mode(Mode::Circle);
        c.thicker();
        c.extend(Point::new(40, 40));
        c.extend(Point::new(60, 40));
        c.clear();
        assert!(c.is_shaping());
        assert_eq!(c.mode, Some(Mode::Circle));
        assert_eq!(c.thickness, 2);
        assert_eq!(c.display(), c.canvas().blank());
    }

    #[test]
    fn thickness_is_clamped() {
        let mut c = cursor();
        for _ in 0..20 {
            c.thicker();
        }
        assert_eq!(c.thickness, MAX_THICKNESS);
        assert!(!c.thicker());
        for _ in 0..20 {
            c.thinner();
        }
        assert_eq!(c.thickness, MIN_THICKNESS);
        assert!(!c.thinner());
    }

    proptest! {
        #[test]
        fn clearing_twice_equals_clearing_once(
            strokes in prop::collection::vec((0i32..120, 0i32..100), 1..12),
        ) {
            let mut c = cursor();
            c.set_mode(Mode::Line);
            for (x, y) in strokes {
                c.extend(Point::new(x, y));
            }
            c.clear();
            let once = c.committed().clone();
            c.clear();
            prop_assert_eq!(c.committed(), &once);
            prop_assert_eq!(&once, c.canvas().blank());
        }
    }
}
