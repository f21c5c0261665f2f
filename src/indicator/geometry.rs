//! Logical design constants of the lock icon and their per-frame physical
//! resolution.
//!
//! All constants are in logical units on a 64x64 design grid with the icon
//! centered at (32, 32). [`IconGeometry::new`] multiplies them by the
//! effective scale once per frame so the painter never touches raw
//! constants.

use crate::indicator::model::IndicatorStyle;
use std::f64::consts::{FRAC_PI_2, PI, SQRT_2};

pub const ICON_CENTER: f64 = 32.0;
pub const ICON_DIAMETER: f64 = 2.0 * ICON_CENTER;
pub const ICON_RADIUS: f64 = 25.0;
pub const LINE_WIDTH: f64 = 3.0;

pub const KEYHOLE_OFFSET_Y: f64 = 4.0;
pub const KEYHOLE_RADIUS: f64 = 3.0;
pub const STEM_LENGTH: f64 = 4.5;

pub const BODY_LEFT: f64 = -11.0;
pub const BODY_TOP: f64 = -4.0;
pub const BODY_WIDTH: f64 = 22.0;
pub const BODY_HEIGHT: f64 = 19.0;

pub const SHACKLE_OFFSET_Y: f64 = -11.0;
pub const SHACKLE_RADIUS: f64 = 7.5;
pub const SHACKLE_LEG_LENGTH: f64 = 7.0;

pub const DEFAULT_DOT_RADIUS: f64 = ICON_RADIUS + 5.0;
/// Angular distance between two neighbouring progress dots.
pub const DOT_STEP: f64 = PI / 25.0;

pub const BACKGROUND_SCALE: f64 = 11.0;
pub const BORDER_WIDTH: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectF {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Physical lengths of one frame, in canvas pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct IconGeometry {
    pub scale: f64,
    pub diameter: u32,
    pub center: (f64, f64),
    pub ring_radius: f64,
    pub line_width: f64,
    pub keyhole_center: (f64, f64),
    pub keyhole_radius: f64,
    pub stem: ((f64, f64), (f64, f64)),
    pub body: RectF,
    pub shackle_center: (f64, f64),
    pub shackle_radius: f64,
    pub shackle_legs: [((f64, f64), (f64, f64)); 2],
    pub dot_radius: f64,
    pub octagon: [(f64, f64); 8],
    pub border_width: f64,
}

/// Side of the square canvas for `scale`.
pub fn physical_diameter(scale: f64) -> u32 {
    (scale * ICON_DIAMETER).ceil().max(1.0) as u32
}

impl IconGeometry {
    pub fn new(scale: f64, style: &IndicatorStyle) -> Self {
        let s = |v: f64| v * scale;
        let c = s(ICON_CENTER);
        let at = |dx: f64, dy: f64| (c + s(dx), c + s(dy));

        let keyhole_center = at(0.0, KEYHOLE_OFFSET_Y);
        let shackle_center = at(0.0, SHACKLE_OFFSET_Y);
        let leg = |dx: f64| {
            (
                at(dx, SHACKLE_OFFSET_Y),
                at(dx, SHACKLE_OFFSET_Y + SHACKLE_LEG_LENGTH),
            )
        };

        Self {
            scale,
            diameter: physical_diameter(scale),
            center: (c, c),
            ring_radius: s(ICON_RADIUS),
            line_width: s(LINE_WIDTH),
            keyhole_center,
            keyhole_radius: s(KEYHOLE_RADIUS),
            stem: (keyhole_center, at(0.0, KEYHOLE_OFFSET_Y + STEM_LENGTH)),
            body: RectF {
                x: c + s(BODY_LEFT),
                y: c + s(BODY_TOP),
                width: s(BODY_WIDTH),
                height: s(BODY_HEIGHT),
            },
            shackle_center,
            shackle_radius: s(SHACKLE_RADIUS),
            shackle_legs: [leg(-SHACKLE_RADIUS), leg(SHACKLE_RADIUS)],
            dot_radius: s(style.dot_radius),
            octagon: octagon_vertices((c, c), s(BACKGROUND_SCALE)),
            border_width: s(BORDER_WIDTH),
        }
    }

    /// Canvas position of the angle `theta` on the dot circle. Angles grow
    /// counter-clockwise from the positive x axis, so `π/2` is the top.
    pub fn dot_position(&self, theta: f64) -> (f64, f64) {
        (
            self.center.0 + self.dot_radius * theta.cos(),
            self.center.1 - self.dot_radius * theta.sin(),
        )
    }
}

/// Angles of `progress` dots, centered on the top of the circle and spaced
/// by [`DOT_STEP`].
pub fn dot_angles(progress: usize) -> Vec<f64> {
    if progress == 0 {
        return Vec::new();
    }
    let start = FRAC_PI_2 - DOT_STEP * (progress as f64 - 1.0) / 2.0;
    (0..progress).map(|i| start + DOT_STEP * i as f64).collect()
}

fn octagon_vertices(center: (f64, f64), unit: f64) -> [(f64, f64); 8] {
    let far = 1.0 + SQRT_2;
    let offsets = [
        (1.0, far),
        (far, 1.0),
        (far, -1.0),
        (1.0, -far),
        (-1.0, -far),
        (-far, -1.0),
        (-far, 1.0),
        (-1.0, far),
    ];
    offsets.map(|(dx, dy)| (center.0 + dx * unit, center.1 + dy * unit))
}
