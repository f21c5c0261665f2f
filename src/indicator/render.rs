//! Minimal software rasterizer used by the painter.
//!
//! Coverage is binary and sampled at pixel centers. Strokes use round caps
//! and joins, so a zero-length segment renders as a dot.

use crate::indicator::composite::{Rgba, RgbaBuffer};
use crate::indicator::geometry::RectF;
use std::f64::consts::TAU;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRect {
    /// Smallest pixel rect covering the area `[min, max]` in canvas space.
    /// Coordinates must be finite; far-away ones saturate at the `i32` range.
    pub fn covering(min: (f64, f64), max: (f64, f64)) -> Self {
        debug_assert!(
            [min.0, min.1, max.0, max.1].iter().all(|v| v.is_finite()),
            "non-finite bounds {min:?}..{max:?}"
        );
        let x0 = min.0.floor() as i32;
        let y0 = min.1.floor() as i32;
        let x1 = max.0.ceil() as i32;
        let y1 = max.1.ceil() as i32;
        Self {
            x: x0,
            y: y0,
            width: x1.saturating_sub(x0).max(1),
            height: y1.saturating_sub(y0).max(1),
        }
    }

    pub fn clamp(self, width: u32, height: u32) -> Option<PixelRect> {
        let max_w = width as i32;
        let max_h = height as i32;
        let x0 = self.x.clamp(0, max_w);
        let y0 = self.y.clamp(0, max_h);
        let x1 = self.x.saturating_add(self.width).clamp(0, max_w);
        let y1 = self.y.saturating_add(self.height).clamp(0, max_h);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(PixelRect {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        })
    }
}

/// Runs `covered` on the center of every pixel inside `bounds` and paints
/// the ones it accepts. Returns the number of pixels written.
fn rasterize<F>(canvas: &mut RgbaBuffer, bounds: PixelRect, color: Rgba, covered: F) -> u64
where
    F: Fn(f64, f64) -> bool,
{
    let Some(clip) = bounds.clamp(canvas.width, canvas.height) else {
        return 0;
    };
    let mut writes: u64 = 0;
    for y in clip.y..(clip.y + clip.height) {
        for x in clip.x..(clip.x + clip.width) {
            if covered(x as f64 + 0.5, y as f64 + 0.5) {
                canvas.set_pixel(x as u32, y as u32, color);
                writes = writes.saturating_add(1);
            }
        }
    }
    writes
}

fn around(center: (f64, f64), reach: f64) -> PixelRect {
    PixelRect::covering(
        (center.0 - reach, center.1 - reach),
        (center.0 + reach, center.1 + reach),
    )
}

pub fn fill_circle(canvas: &mut RgbaBuffer, center: (f64, f64), radius: f64, color: Rgba) -> u64 {
    let radius_sq = radius * radius;
    rasterize(canvas, around(center, radius), color, |px, py| {
        let dx = px - center.0;
        let dy = py - center.1;
        dx * dx + dy * dy <= radius_sq
    })
}

pub fn stroke_circle(
    canvas: &mut RgbaBuffer,
    center: (f64, f64),
    radius: f64,
    line_width: f64,
    color: Rgba,
) -> u64 {
    let half = line_width / 2.0;
    let inner = (radius - half).max(0.0);
    let outer = radius + half;
    rasterize(canvas, around(center, outer), color, |px, py| {
        let dist = ((px - center.0).powi(2) + (py - center.1).powi(2)).sqrt();
        dist >= inner && dist <= outer
    })
}

/// Strokes the arc from `start` sweeping counter-clockwise by `sweep`
/// radians. Angles are measured from the positive x axis with y pointing up.
pub fn stroke_arc(
    canvas: &mut RgbaBuffer,
    center: (f64, f64),
    radius: f64,
    start: f64,
    sweep: f64,
    line_width: f64,
    color: Rgba,
) -> u64 {
    if sweep >= TAU {
        return stroke_circle(canvas, center, radius, line_width, color);
    }
    let half = line_width / 2.0;
    let inner = (radius - half).max(0.0);
    let outer = radius + half;
    let start = start.rem_euclid(TAU);
    let mut writes = rasterize(canvas, around(center, outer), color, |px, py| {
        let dx = px - center.0;
        let dy = center.1 - py;
        let dist = (dx * dx + dy * dy).sqrt();
        if dist < inner || dist > outer {
            return false;
        }
        let angle = (dy.atan2(dx) - start).rem_euclid(TAU);
        angle <= sweep
    });

    let point_at = |theta: f64| {
        (
            center.0 + radius * theta.cos(),
            center.1 - radius * theta.sin(),
        )
    };
    writes += fill_circle(canvas, point_at(start), half, color);
    writes += fill_circle(canvas, point_at(start + sweep), half, color);
    writes
}

pub fn stroke_segment(
    canvas: &mut RgbaBuffer,
    start: (f64, f64),
    end: (f64, f64),
    line_width: f64,
    color: Rgba,
) -> u64 {
    let half = line_width / 2.0;
    let radius_sq = half * half;
    let bounds = PixelRect::covering(
        (start.0.min(end.0) - half, start.1.min(end.1) - half),
        (start.0.max(end.0) + half, start.1.max(end.1) + half),
    );
    rasterize(canvas, bounds, color, |px, py| {
        point_segment_distance_sq((px, py), start, end) <= radius_sq
    })
}

pub fn stroke_rect(canvas: &mut RgbaBuffer, rect: RectF, line_width: f64, color: Rgba) -> u64 {
    let x0 = rect.x;
    let y0 = rect.y;
    let x1 = rect.x + rect.width;
    let y1 = rect.y + rect.height;
    stroke_polygon(
        canvas,
        &[(x0, y0), (x1, y0), (x1, y1), (x0, y1)],
        line_width,
        color,
    )
}

pub fn stroke_polygon(
    canvas: &mut RgbaBuffer,
    points: &[(f64, f64)],
    line_width: f64,
    color: Rgba,
) -> u64 {
    let mut writes: u64 = 0;
    for (i, start) in points.iter().enumerate() {
        let end = points[(i + 1) % points.len()];
        writes = writes.saturating_add(stroke_segment(canvas, *start, end, line_width, color));
    }
    writes
}

/// Even-odd fill of a closed polygon.
pub fn fill_polygon(canvas: &mut RgbaBuffer, points: &[(f64, f64)], color: Rgba) -> u64 {
    if points.len() < 3 {
        return 0;
    }
    let (mut min, mut max) = (points[0], points[0]);
    for &(x, y) in points {
        min = (min.0.min(x), min.1.min(y));
        max = (max.0.max(x), max.1.max(y));
    }
    rasterize(canvas, PixelRect::covering(min, max), color, |px, py| {
        point_in_polygon((px, py), points)
    })
}

fn point_in_polygon(point: (f64, f64), points: &[(f64, f64)]) -> bool {
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (xi, yi) = points[i];
        let (xj, yj) = points[j];
        if (yi > point.1) != (yj > point.1) {
            let cross_x = xj + (point.1 - yj) * (xi - xj) / (yi - yj);
            if point.0 < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

fn point_segment_distance_sq(point: (f64, f64), start: (f64, f64), end: (f64, f64)) -> f64 {
    let (px, py) = point;
    let (x0, y0) = start;
    let vx = end.0 - x0;
    let vy = end.1 - y0;
    let len_sq = vx * vx + vy * vy;
    if len_sq <= f64::EPSILON {
        let dx = px - x0;
        let dy = py - y0;
        return dx * dx + dy * dy;
    }
    let t = (((px - x0) * vx + (py - y0) * vy) / len_sq).clamp(0.0, 1.0);
    let cx = x0 + vx * t;
    let cy = y0 + vy * t;
    let dx = px - cx;
    let dy = py - cy;
    dx * dx + dy * dy
}
