// Marker tracking: color mask -> connected components -> largest blob -> centroid.
// Visual expectation: the centroid lands in the middle of the colored marker you
// hold up to the camera; that pixel becomes the pencil tip.
use crate::config::ColorRange;
use crate::types::{BBox, FrameBuffer, Mask, Point, Rgb};

/// Threshold every frame pixel against the B/G/R box. Same size as the frame.
pub fn color_mask(frame: &FrameBuffer, range: &ColorRange) -> Mask {
    let on = frame
        .pixels
        .iter()
        .map(|&px| range.contains(Rgb::unpack(px)))
        .collect();
    Mask { width: frame.width, height: frame.height, on }
}

/// Per-component statistics gathered while labeling.
#[derive(Clone, Debug, PartialEq)]
pub struct ComponentStats {
    pub label: u32,
    pub area: usize,
    pub sum_x: u64,
    pub sum_y: u64,
    pub bbox: BBox,
    pub first: Point,      // first pixel in row-major order (contour start)
}

impl ComponentStats {
    /// Unweighted mean of the member pixel coordinates.
    pub fn centroid(&self) -> (f64, f64) {
        let n = self.area as f64;
        (self.sum_x as f64 / n, self.sum_y as f64 / n)
    }
}

/// Label image plus stats. Label 0 is background; component labels start at 1.
#[derive(Clone, Debug)]
pub struct Components {
    pub width: usize,
    pub height: usize,
    pub labels: Vec<u32>,
    pub stats: Vec<ComponentStats>, // stats[i].label == i + 1
}

impl Components {
    #[inline]
    pub fn label_at(&self, p: Point) -> u32 {
        if p.x < 0 || p.y < 0 || p.x as usize >= self.width || p.y as usize >= self.height {
            return 0;
        }
        self.labels[p.y as usize * self.width + p.x as usize]
    }

    pub fn get(&self, label: u32) -> Option<&ComponentStats> {
        self.stats.get((label as usize).checked_sub(1)?)
    }

    /// Largest component by area; ties go to the lowest label (first found).
    pub fn largest(&self) -> Option<&ComponentStats> {
        let mut best: Option<&ComponentStats> = None;
        for s in &self.stats {
            if best.is_none_or(|b| s.area > b.area) {
                best = Some(s);
            }
        }
        best
    }

    /// Outer boundary of one component.
    pub fn contour(&self, label: u32) -> Vec<Point> {
        match self.get(label) {
            Some(s) => trace_outer_contour(|p| self.label_at(p) == label, s.first),
            None => Vec::new(),
        }
    }
}

const NEIGHBORS_4: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// 4-connected labeling, scanning rows top to bottom.
pub fn label_components(mask: &Mask) -> Components {
    let (w, h) = (mask.width, mask.height);
    let mut labels = vec![0u32; w * h];
    let mut stats = Vec::new();
    let mut stack: Vec<Point> = Vec::new();

    for y in 0..h {
        for x in 0..w {
            let idx = y * w + x;
            if !mask.on[idx] || labels[idx] != 0 {
                continue;
            }
            let label = stats.len() as u32 + 1;
            let first = Point::new(x as i32, y as i32);
            let mut s = ComponentStats {
                label,
                area: 0,
                sum_x: 0,
                sum_y: 0,
                bbox: BBox::around(first),
                first,
            };

            labels[idx] = label;
            stack.push(first);
            while let Some(p) = stack.pop() {
                s.area += 1;
                s.sum_x += p.x as u64;
                s.sum_y += p.y as u64;
                s.bbox.include(p);
                for (dx, dy) in NEIGHBORS_4 {
                    let (nx, ny) = (p.x + dx, p.y + dy);
                    if !mask.is_on(nx, ny) {
                        continue;
                    }
                    let nidx = ny as usize * w + nx as usize;
                    if labels[nidx] == 0 {
                        labels[nidx] = label;
                        stack.push(Point::new(nx, ny));
                    }
                }
            }
            stats.push(s);
        }
    }

    Components { width: w, height: h, labels, stats }
}

// Moore neighborhood, clockwise on screen (y grows downward), starting West.
const MOORE: [(i32, i32); 8] = [
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
];

fn moore_index(from: Point, to: Point) -> usize {
    let d = (to.x - from.x, to.y - from.y);
    MOORE.iter().position(|&m| m == d).unwrap_or(0)
}

/// Moore-neighbor boundary trace of the region `inside`, starting at its first
/// pixel in row-major order (so its west neighbor is known to be outside).
/// Returns the boundary pixels clockwise, without repeating the start.
pub fn trace_outer_contour(inside: impl Fn(Point) -> bool, start: Point) -> Vec<Point> {
    let mut contour = vec![start];
    let mut cur = start;
    let mut back = Point::new(start.x - 1, start.y);
    // Guard against a walk that never closes.
    let limit = 1 << 24;

    while contour.len() < limit {
        let d0 = moore_index(cur, back);
        let mut prev = back;
        let mut next = None;
        for i in 1..=8 {
            let (dx, dy) = MOORE[(d0 + i) % 8];
            let cand = Point::new(cur.x + dx, cur.y + dy);
            if inside(cand) {
                next = Some(cand);
                break;
            }
            prev = cand;
        }
        let Some(next) = next else {
            break; // isolated pixel
        };
        if cur == start && contour.len() > 1 && next == contour[1] {
            contour.pop(); // we walked back onto the start; drop the duplicate
            break;
        }
        contour.push(next);
        back = prev;
        cur = next;
    }
    contour
}

/// Raw spatial moments of a closed polygon (Green's theorem).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Moments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
}

pub fn contour_moments(contour: &[Point]) -> Moments {
    let n = contour.len();
    let mut m = Moments::default();
    for i in 0..n {
        let a = contour[i];
        let b = contour[(i + 1) % n];
        let (x0, y0, x1, y1) = (f64::from(a.x), f64::from(a.y), f64::from(b.x), f64::from(b.y));
        let cross = x0 * y1 - x1 * y0;
        m.m00 += cross;
        m.m10 += (x0 + x1) * cross;
        m.m01 += (y0 + y1) * cross;
    }
    m.m00 /= 2.0;
    m.m10 /= 6.0;
    m.m01 /= 6.0;
    m
}

impl Moments {
    /// Enclosed area, regardless of winding direction.
    #[cfg(test)]
    pub fn area(&self) -> f64 {
        self.m00.abs()
    }

    /// (m10/m00, m01/m00), or None for a degenerate (zero-area) contour.
    pub fn centroid(&self) -> Option<(f64, f64)> {
        if self.m00.abs() < f64::EPSILON {
            return None;
        }
        Some((self.m10 / self.m00, self.m01 / self.m00))
    }
}

/// The largest foreground component and where its center is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Blob {
    pub label: u32,
    pub area: usize,
    pub centroid: (f64, f64),
}

impl Blob {
    /// Centroid truncated to whole pixels for the drawing routines.
    pub fn pixel(&self) -> Point {
        Point::new(self.centroid.0 as i32, self.centroid.1 as i32)
    }
}

/// How the blob centroid is computed. Both pick the same component.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlobStrategy {
    /// Mean of the member pixel coordinates.
    #[default]
    ComponentStats,
    /// Image moments of the component's outer contour.
    ContourMoments,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BlobLocator {
    pub strategy: BlobStrategy,
}

impl BlobLocator {
    pub fn new(strategy: BlobStrategy) -> Self {
        Self { strategy }
    }

    /// Label the mask and return its largest blob. No foreground -> None.
    pub fn locate(&self, mask: &Mask) -> Option<Blob> {
        self.locate_in(&label_components(mask))
    }

    /// Same as `locate` but on components the caller already has.
    pub fn locate_in(&self, components: &Components) -> Option<Blob> {
        let largest = components.largest()?;
        let centroid = match self.strategy {
            BlobStrategy::ComponentStats => largest.centroid(),
            BlobStrategy::ContourMoments => {
                contour_moments(&components.contour(largest.label)).centroid()?
            }
        };
        Some(Blob { label: largest.label, area: largest.area, centroid })
    }
}
