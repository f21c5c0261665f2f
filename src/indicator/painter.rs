use crate::indicator::color::{Palette, Rgb};
use crate::indicator::composite::{Rgba, RgbaBuffer};
use crate::indicator::geometry::{dot_angles, physical_diameter, IconGeometry};
use crate::indicator::model::{IndicatorStyle, LockState};
use crate::indicator::render::{
    fill_circle, fill_polygon, stroke_arc, stroke_circle, stroke_polygon, stroke_rect,
    stroke_segment,
};
use std::f64::consts::PI;

/// Renders the indicator into a square, transparent canvas.
///
/// The painter holds only configuration; every call builds a fresh canvas,
/// so identical inputs always give identical pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorPainter {
    palette: Palette,
    style: IndicatorStyle,
    enabled: bool,
}

impl IndicatorPainter {
    pub fn new(palette: Palette, style: IndicatorStyle, enabled: bool) -> Self {
        Self {
            palette,
            style,
            enabled,
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn style(&self) -> &IndicatorStyle {
        &self.style
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Ring and glyph color. The whole glyph follows the auth state.
    pub fn state_color(&self, state: &LockState) -> Rgb {
        self.palette.for_auth(state.auth)
    }

    /// Caps Lock turns the dots into a warning regardless of auth state.
    pub fn dot_color(&self, state: &LockState) -> Rgb {
        if state.modifiers.caps_lock {
            self.palette.wrong
        } else {
            self.state_color(state)
        }
    }

    pub fn paint(&self, state: &LockState, scale: f64) -> RgbaBuffer {
        let diameter = physical_diameter(scale);
        let mut canvas = RgbaBuffer::new(diameter, diameter, Rgba::TRANSPARENT);
        if !self.enabled || !state.visibility.is_visible() {
            return canvas;
        }

        let geometry = IconGeometry::new(scale, &self.style);
        if self.style.background_polygon {
            self.paint_background(&mut canvas, &geometry);
        }

        let color = self.state_color(state).opaque();
        if self.style.outline_ring {
            stroke_circle(
                &mut canvas,
                geometry.center,
                geometry.ring_radius,
                geometry.line_width,
                color,
            );
        }
        paint_lock_glyph(&mut canvas, &geometry, color);

        if state.password_len > 0 {
            let dot_color = self.dot_color(state).opaque();
            for theta in dot_angles(state.password_len) {
                let dot = geometry.dot_position(theta);
                if !(dot.0.is_finite() && dot.1.is_finite()) {
                    continue;
                }
                stroke_segment(&mut canvas, dot, dot, geometry.line_width, dot_color);
            }
        }
        canvas
    }

    fn paint_background(&self, canvas: &mut RgbaBuffer, geometry: &IconGeometry) {
        fill_polygon(canvas, &geometry.octagon, self.palette.polygon_fill.opaque());
        stroke_polygon(
            canvas,
            &geometry.octagon,
            geometry.border_width,
            self.palette.border.opaque(),
        );
    }
}

fn paint_lock_glyph(canvas: &mut RgbaBuffer, geometry: &IconGeometry, color: Rgba) {
    let width = geometry.line_width;

    // keyhole
    fill_circle(canvas, geometry.keyhole_center, geometry.keyhole_radius, color);
    stroke_segment(canvas, geometry.stem.0, geometry.stem.1, width, color);

    stroke_rect(canvas, geometry.body, width, color);

    // shackle
    stroke_arc(
        canvas,
        geometry.shackle_center,
        geometry.shackle_radius,
        0.0,
        PI,
        width,
        color,
    );
    for (top, bottom) in geometry.shackle_legs {
        stroke_segment(canvas, top, bottom, width, color);
    }
}
