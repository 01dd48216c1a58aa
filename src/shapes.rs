// Software rasterizer for the pencil: thick lines, circles, rectangles, ellipses.
// Everything clips to the buffer and writes solid pixels (no anti-aliasing).
// Visual: these are the strokes and shapes you see appear on the canvas.
use crate::types::{FrameBuffer, Point, Rgb};

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
pub fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: Rgb) {
    if let Some(idx) = fb.index(x, y) {
        fb.pixels[idx] = color.pack();
    }
}

/// Solid disc of radius `r` centered at `c`.
pub fn fill_disc(fb: &mut FrameBuffer, c: Point, r: i32, color: Rgb) {
    let r2 = r * r;
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy <= r2 {
                put_pixel(fb, c.x + dx, c.y + dy, color);
            }
        }
    }
}

/// One brush dab exactly `thickness` pixels across. Even widths sit half a
/// pixel up-left of (x,y); the round test runs on doubled coordinates.
#[inline]
fn stamp(fb: &mut FrameBuffer, x: i32, y: i32, thickness: u32, color: Rgb) {
    let t = thickness.max(1) as i32;
    let lo = -(t / 2);
    let hi = lo + t - 1;
    let mid = lo + hi; // twice the dab center
    for dy in lo..=hi {
        for dx in lo..=hi {
            let (ex, ey) = (2 * dx - mid, 2 * dy - mid);
            if ex * ex + ey * ey <= t * t {
                put_pixel(fb, x + dx, y + dy, color);
            }
        }
    }
}

/// Straight stroke from `a` to `b` using Bresenham, dabbing the brush at each step.
pub fn draw_line(fb: &mut FrameBuffer, a: Point, b: Point, thickness: u32, color: Rgb) {
    let (mut x0, mut y0, x1, y1) = (a.x, a.y, b.x, b.y);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        stamp(fb, x0, y0, thickness, color);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// Connected segments through `points`; `closed` joins the last point to the first.
pub fn draw_polyline(fb: &mut FrameBuffer, points: &[Point], closed: bool, thickness: u32, color: Rgb) {
    for pair in points.windows(2) {
        draw_line(fb, pair[0], pair[1], thickness, color);
    }
    if closed && points.len() > 2 {
        draw_line(fb, points[points.len() - 1], points[0], thickness, color);
    }
}

/// Axis-aligned rectangle outline with opposite corners `a` and `b`.
pub fn draw_rect(fb: &mut FrameBuffer, a: Point, b: Point, thickness: u32, color: Rgb) {
    let corners = [a, Point::new(b.x, a.y), b, Point::new(a.x, b.y)];
    draw_polyline(fb, &corners, true, thickness, color);
}

/// Circle outline (midpoint algorithm), stroked with the brush.
pub fn draw_circle(fb: &mut FrameBuffer, c: Point, radius: i32, thickness: u32, color: Rgb) {
    let (mut x, mut y) = (radius.max(0), 0);
    let mut err = 1 - x;
    while x >= y {
        for (px, py) in [(x, y), (y, x), (-y, x), (-x, y), (-x, -y), (-y, -x), (y, -x), (x, -y)] {
            stamp(fb, c.x + px, c.y + py, thickness, color);
        }
        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

/// Axis-aligned ellipse outline centered at `c` with semi-axes (rx, ry).
/// Sampled around the perimeter and joined with line segments so it stays
/// closed even when one axis is zero (it collapses to a line).
pub fn draw_ellipse(fb: &mut FrameBuffer, c: Point, rx: i32, ry: i32, thickness: u32, color: Rgb) {
    let (rx, ry) = (rx.max(0), ry.max(0));
    let steps = ((std::f64::consts::TAU * f64::from(rx.max(ry))).ceil() as usize).max(8);
    let at = |i: usize| {
        let t = std::f64::consts::TAU * i as f64 / steps as f64;
        Point::new(
            c.x + (f64::from(rx) * t.cos()).round() as i32,
            c.y + (f64::from(ry) * t.sin()).round() as i32,
        )
    };
    let mut prev = at(0);
    for i in 1..=steps {
        let next = at(i);
        draw_line(fb, prev, next, thickness, color);
        prev = next;
    }
}
