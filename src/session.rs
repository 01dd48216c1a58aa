// One painting session: everything that changes from tick to tick, in one place.
// Per tick: frame -> mask -> blob -> (jitter) -> cursor; commands mutate the cursor;
// paint-by-number re-scores the committed canvas.
use std::path::PathBuf;

use chrono::Local;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, error, info, warn};

use crate::command::Command;
use crate::config::ColorRange;
use crate::cursor::{DrawingCursor, MAX_THICKNESS, MIN_THICKNESS};
use crate::jitter::{JitterFilter, Verdict};
use crate::save::save_drawing;
use crate::score::{Score, ScoreEvaluator};
use crate::segment::{Region, RegionSegmenter};
use crate::types::{FrameBuffer, Rgb};
use crate::vision::{Blob, BlobLocator, BlobStrategy, Components, color_mask, label_components};

/// Overlay canvases start near-black so adding them to the frame changes nothing.
pub const TRANSPARENT: Rgb = Rgb::new(1, 1, 1);

#[derive(Clone, Debug)]
pub struct SessionOptions {
    pub overlay: bool,
    pub paint_by_number: bool,
    pub shake_threshold: Option<u32>,
    pub strategy: BlobStrategy,
    pub difficulty: f64,
    pub seed: u64,
    pub save_dir: PathBuf,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            overlay: false,
            paint_by_number: false,
            shake_threshold: None,
            strategy: BlobStrategy::ComponentStats,
            difficulty: 1.0,
            seed: 0,
            save_dir: PathBuf::from("."),
        }
    }
}

/// Should the frame loop keep going?
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// What the tracker saw this tick (for the tracking window).
pub struct Tracking {
    pub components: Components,
    pub blob: Option<Blob>,
    pub verdict: Option<Verdict>,
}

struct PaintByNumber {
    segmenter: RegionSegmenter,
    rng: StdRng,
    regions: Vec<Region>,
    evaluator: ScoreEvaluator,
    last: Option<Score>,
}

pub struct Session {
    range: ColorRange,
    locator: BlobLocator,
    jitter: JitterFilter,
    cursor: DrawingCursor,
    paint: Option<PaintByNumber>,
    save_dir: PathBuf,
    width: usize,
    height: usize,
}

impl Session {
    pub fn new(options: SessionOptions, range: ColorRange, width: usize, height: usize) -> Self {
        let jitter = match options.shake_threshold {
            Some(t) => JitterFilter::new(t),
            None => JitterFilter::disabled(),
        };

        let mut blank = FrameBuffer::filled(width, height, if options.overlay { TRANSPARENT } else { Rgb::WHITE });
        let paint = if options.paint_by_number {
            let segmenter = RegionSegmenter::default();
            let mut rng = StdRng::seed_from_u64(options.seed);
            let board = segmenter.generate(width, height, &mut rng);
            info!(regions = board.regions.len(), seed = options.seed, "paint-by-number board generated");
            blank = board.image;
            Some(PaintByNumber {
                segmenter,
                rng,
                regions: board.regions,
                evaluator: ScoreEvaluator::new(options.difficulty),
                last: None,
            })
        } else {
            None
        };

        Self {
            range,
            locator: BlobLocator::new(options.strategy),
            jitter,
            cursor: DrawingCursor::new(blank),
            paint,
            save_dir: options.save_dir,
            width,
            height,
        }
    }

    pub fn cursor(&self) -> &DrawingCursor {
        &self.cursor
    }

    #[cfg(test)]
    pub fn regions(&self) -> &[Region] {
        match &self.paint {
            Some(p) => &p.regions,
            None => &[],
        }
    }

    pub fn is_paint_by_number(&self) -> bool {
        self.paint.is_some()
    }

    /// Find the marker in `frame` and move the pencil. No blob: nothing changes.
    pub fn track(&mut self, frame: &FrameBuffer) -> Tracking {
        let components = label_components(&color_mask(frame, &self.range));
        let blob = self.locator.locate_in(&components);
        let verdict = blob.map(|b| {
            let p = b.pixel();
            let verdict = self.jitter.filter(p);
            match verdict {
                Verdict::Accepted => self.cursor.extend(p),
                Verdict::Rejected => {
                    debug!(x = p.x, y = p.y, "jump rejected");
                    self.cursor.relocate(p);
                }
            }
            verdict
        });
        Tracking { components, blob, verdict }
    }

    pub fn apply(&mut self, command: Command) -> Flow {
        match command {
            Command::SetColor(color) => {
                self.cursor.set_color(color);
                info!(?color, "pencil color set");
            }
            Command::Thicker => {
                if self.cursor.thicker() {
                    info!(thickness = self.cursor.thickness, "pencil thickness increased");
                } else {
                    warn!("maximum thickness is {MAX_THICKNESS}");
                }
            }
            Command::Thinner => {
                if self.cursor.thinner() {
                    info!(thickness = self.cursor.thickness, "pencil thickness decreased");
                } else {
                    warn!("minimum thickness is {MIN_THICKNESS}");
                }
            }
            Command::Mode(mode) => {
                self.cursor.set_mode(mode);
                info!(mode = mode.name(), "drawing mode changed");
            }
            Command::Clear => {
                self.cursor.clear();
                info!("canvas cleared");
            }
            Command::Save => match save_drawing(self.cursor.committed(), &self.save_dir, &Local::now()) {
                Ok(path) => info!(path = %path.display(), "drawing saved"),
                Err(e) => error!(error = %e, "could not save drawing"),
            },
            Command::Quit => {
                info!("quitting");
                return Flow::Quit;
            }
            Command::Regenerate => self.regenerate(),
            Command::Finalize => self.cursor.finalize(),
        }
        Flow::Continue
    }

    fn regenerate(&mut self) {
        let Some(paint) = self.paint.as_mut() else {
            debug!("regenerate ignored outside paint-by-number mode");
            return;
        };
        let board = paint.segmenter.generate(self.width, self.height, &mut paint.rng);
        info!(regions = board.regions.len(), "new paint-by-number board");
        paint.regions = board.regions;
        paint.last = None;
        self.cursor.reset_canvas(board.image);
    }

    /// Score the committed canvas (paint-by-number only).
    pub fn rescore(&mut self) -> Option<Score> {
        let paint = self.paint.as_mut()?;
        let score = paint.evaluator.evaluate(self.cursor.committed(), &paint.regions);
        if paint.last != Some(score) {
            info!(correct = score.correct, total = score.total, "score");
            paint.last = Some(score);
        }
        Some(score)
    }

    /// One-line status for the canvas window.
    pub fn hud_text(&self) -> String {
        let mode = self.cursor.mode.map_or("PEN UP", |m| m.name());
        let mut text = format!("{mode} | T{}", self.cursor.thickness);
        if self.cursor.is_shaping() {
            text.push_str(" | SHAPING");
        }
        if self.jitter.enabled() {
            text.push_str(" | STEADY");
        }
        text
    }
}
