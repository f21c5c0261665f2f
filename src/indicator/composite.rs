use crate::indicator::backdrop::{fill_backdrop, Backdrop};
use crate::indicator::monitor::{indicator_origins, MonitorRect};
use anyhow::{anyhow, Context, Result};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    };

    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Row-major RGBA8 pixel storage shared by the offscreen canvas, the
/// backdrop surface and decoded backdrop images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl RgbaBuffer {
    pub fn new(width: u32, height: u32, fill: Rgba) -> Self {
        let mut pixels = vec![0u8; (width as usize) * (height as usize) * 4];
        for chunk in pixels.chunks_exact_mut(4) {
            chunk[0] = fill.r;
            chunk[1] = fill.g;
            chunk[2] = fill.b;
            chunk[3] = fill.a;
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn from_pixels(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        assert_eq!(pixels.len(), (width as usize) * (height as usize) * 4);
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn from_image(image: image::RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self::from_pixels(width, height, image.into_raw())
    }

    pub fn to_image(&self) -> Result<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
            .ok_or_else(|| anyhow!("pixel buffer does not match {}x{}", self.width, self.height))
    }

    pub fn save_png(&self, path: &Path) -> Result<()> {
        self.to_image()?
            .save_with_format(path, image::ImageFormat::Png)
            .with_context(|| format!("write png {}", path.display()))
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgba {
        let idx = self.index(x, y);
        Rgba {
            r: self.pixels[idx],
            g: self.pixels[idx + 1],
            b: self.pixels[idx + 2],
            a: self.pixels[idx + 3],
        }
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = self.index(x, y);
        self.pixels[idx] = color.r;
        self.pixels[idx + 1] = color.g;
        self.pixels[idx + 2] = color.b;
        self.pixels[idx + 3] = color.a;
    }

    pub fn fill(&mut self, color: Rgba) {
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&[color.r, color.g, color.b, color.a]);
        }
    }

    pub fn is_fully_transparent(&self) -> bool {
        self.pixels.chunks_exact(4).all(|px| px[3] == 0)
    }

    fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + x as usize) * 4
    }
}

/// Composites `top` over `base` with its top-left corner at `origin`.
/// Pixels falling outside `base` are dropped.
pub fn blit_over(base: &mut RgbaBuffer, top: &RgbaBuffer, origin: (i32, i32)) {
    let x0 = origin.0.max(0);
    let y0 = origin.1.max(0);
    let x1 = (origin.0 + top.width as i32).min(base.width as i32);
    let y1 = (origin.1 + top.height as i32).min(base.height as i32);
    if x1 <= x0 || y1 <= y0 {
        return;
    }

    for y in y0..y1 {
        for x in x0..x1 {
            let src = top.pixel((x - origin.0) as u32, (y - origin.1) as u32);
            if src.a == 0 {
                continue;
            }
            let dst = base.pixel(x as u32, y as u32);
            base.set_pixel(x as u32, y as u32, blend_pixel(dst, src));
        }
    }
}

/// Builds a frame of `resolution` holding the backdrop and one indicator
/// copy per display.
pub fn compose(
    resolution: (u32, u32),
    backdrop: &Backdrop<'_>,
    canvas: &RgbaBuffer,
    displays: &[MonitorRect],
) -> RgbaBuffer {
    let mut frame = RgbaBuffer::new(resolution.0, resolution.1, Rgba::BLACK);
    compose_into(&mut frame, backdrop, canvas, displays);
    frame
}

/// Same as [`compose`] but draws into an already allocated target.
/// Returns the number of indicator copies placed.
pub fn compose_into(
    target: &mut RgbaBuffer,
    backdrop: &Backdrop<'_>,
    canvas: &RgbaBuffer,
    displays: &[MonitorRect],
) -> usize {
    fill_backdrop(target, backdrop);

    let origins = indicator_origins(target.size(), displays, canvas.width);
    for origin in &origins {
        blit_over(target, canvas, *origin);
    }
    origins.len()
}

fn blend_pixel(bottom: Rgba, top: Rgba) -> Rgba {
    let sa = top.a as f32 / 255.0;
    let da = bottom.a as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);

    if out_a <= f32::EPSILON {
        return Rgba::TRANSPARENT;
    }

    let blend = |s: u8, d: u8| -> u8 {
        (((s as f32 * sa) + (d as f32 * da * (1.0 - sa))) / out_a)
            .round()
            .clamp(0.0, 255.0) as u8
    };

    Rgba {
        r: blend(top.r, bottom.r),
        g: blend(top.g, bottom.g),
        b: blend(top.b, bottom.b),
        a: (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    }
}

pub(crate) fn blend_over(base: &mut RgbaBuffer, x: u32, y: u32, top: Rgba) {
    if top.a == 0 || x >= base.width || y >= base.height {
        return;
    }
    let dst = base.pixel(x, y);
    base.set_pixel(x, y, blend_pixel(dst, top));
}
