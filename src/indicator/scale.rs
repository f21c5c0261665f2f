//! DPI-derived scaling so the indicator keeps the same physical size on
//! every display.

pub const BASELINE_DPI: f64 = 96.0;
const MM_PER_INCH: f64 = 25.4;

/// Physical size of the root screen as reported by the display server.
/// Millimeters are signed because some backends report nonsense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenMetrics {
    pub height_px: u32,
    pub height_mm: i32,
}

impl ScreenMetrics {
    /// Metrics of a screen `height_px` tall at roughly `dpi` dots per inch.
    /// Millimeters are floored so [`ScreenMetrics::dpi`] never reads lower
    /// than requested.
    pub fn at_dpi(height_px: u32, dpi: f64) -> Self {
        let height_mm = if dpi > 0.0 {
            (height_px as f64 * MM_PER_INCH / dpi).floor() as i32
        } else {
            0
        };
        Self {
            height_px,
            height_mm,
        }
    }

    /// Whole-number DPI, truncated like the X server's own reporting.
    pub fn dpi(self) -> Option<u32> {
        if self.height_mm <= 0 {
            return None;
        }
        let dpi = (self.height_px as f64 * MM_PER_INCH / self.height_mm as f64).trunc();
        if dpi.is_finite() && dpi > 0.0 {
            Some(dpi as u32)
        } else {
            None
        }
    }
}

/// E.g. a 227 DPI panel yields `227 / 96 = 2.36`. Degenerate metrics yield
/// exactly `1.0`.
pub fn scale_factor(metrics: ScreenMetrics) -> f64 {
    match metrics.dpi() {
        Some(dpi) => dpi as f64 / BASELINE_DPI,
        None => 1.0,
    }
}
