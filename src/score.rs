// Paint-by-number scoring: is each region (roughly) the color its number asks for?
// Recomputed from scratch every tick so it always matches the canvas.
use crate::draw::draw_text_scaled;
use crate::segment::Region;
use crate::types::{BBox, FrameBuffer, Rgb};

pub const SCOREBOARD_SIZE: (usize, usize) = (300, 100);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

#[derive(Clone, Copy, Debug)]
pub struct ScoreEvaluator {
    threshold: f64, // max RGB distance that still counts as correct
}

impl ScoreEvaluator {
    /// Threshold is 200 / difficulty; `difficulty` must be positive.
    pub fn new(difficulty: f64) -> Self {
        Self { threshold: 200.0 / difficulty }
    }

    /// Count regions whose bounding-box mean color is close to their target.
    /// Regions without area are not counted in `total`.
    pub fn evaluate(&self, canvas: &FrameBuffer, regions: &[Region]) -> Score {
        let mut score = Score { correct: 0, total: 0 };
        for region in regions.iter().filter(|r| r.is_scoreable()) {
            score.total += 1;
            let Some(mean) = mean_color(canvas, region.bbox) else { continue };
            if mean.distance(region.target.color()) < self.threshold {
                score.correct += 1;
            }
        }
        score
    }
}

/// Average color inside `bbox` (clipped to the canvas). None if nothing is inside.
pub fn mean_color(canvas: &FrameBuffer, bbox: BBox) -> Option<Rgb> {
    let x0 = bbox.x0.max(0);
    let y0 = bbox.y0.max(0);
    let x1 = bbox.x1.min(canvas.width as i32 - 1);
    let y1 = bbox.y1.min(canvas.height as i32 - 1);
    if x0 > x1 || y0 > y1 {
        return None;
    }

    let (mut r, mut g, mut b) = (0u64, 0u64, 0u64);
    for y in y0..=y1 {
        let row = y as usize * canvas.width;
        for &px in &canvas.pixels[row + x0 as usize..=row + x1 as usize] {
            let c = Rgb::unpack(px);
            r += u64::from(c.r);
            g += u64::from(c.g);
            b += u64::from(c.b);
        }
    }
    let n = ((x1 - x0 + 1) as u64) * ((y1 - y0 + 1) as u64);
    Some(Rgb::new((r / n) as u8, (g / n) as u8, (b / n) as u8))
}

/// The score window image: "SCORE n / total" on a dark background.
pub fn render_scoreboard(score: Score) -> FrameBuffer {
    let (w, h) = SCOREBOARD_SIZE;
    let mut fb = FrameBuffer::filled(w, h, Rgb::new(1, 1, 1));
    let text = format!("SCORE {} / {}", score.correct, score.total);
    draw_text_scaled(&mut fb, 12, 36, &text, Rgb::WHITE, 3);
    fb
}
