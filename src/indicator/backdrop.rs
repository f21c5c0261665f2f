use crate::indicator::color::Rgb;
use crate::indicator::composite::{blend_over, RgbaBuffer};
use anyhow::{Context, Result};
use std::path::Path;

/// Configured backdrop, owned by the render context.
#[derive(Debug, Clone, PartialEq)]
pub enum BackdropSpec {
    Solid,
    Image { image: RgbaBuffer, tile: bool },
    /// Snapshot of the desktop wallpaper, captured from the display each
    /// frame.
    Desktop,
}

/// Per-frame view of the backdrop with every source resolved.
#[derive(Debug, Clone, Copy)]
pub enum Backdrop<'a> {
    Solid(Rgb),
    Image {
        fill: Rgb,
        image: &'a RgbaBuffer,
        tile: bool,
    },
}

pub fn load_image(path: &Path) -> Result<RgbaBuffer> {
    let decoded = image::open(path)
        .with_context(|| format!("decode backdrop image {}", path.display()))?;
    Ok(RgbaBuffer::from_image(decoded.to_rgba8()))
}

impl BackdropSpec {
    /// `wallpaper` is only consulted for [`BackdropSpec::Desktop`]; without a
    /// capture the solid color is used.
    pub fn resolve<'a>(&'a self, fill: Rgb, wallpaper: Option<&'a RgbaBuffer>) -> Backdrop<'a> {
        match self {
            BackdropSpec::Solid => Backdrop::Solid(fill),
            BackdropSpec::Image { image, tile } => Backdrop::Image {
                fill,
                image,
                tile: *tile,
            },
            BackdropSpec::Desktop => match wallpaper {
                Some(image) => Backdrop::Image {
                    fill,
                    image,
                    tile: false,
                },
                None => {
                    tracing::warn!("desktop wallpaper unavailable, using background color");
                    Backdrop::Solid(fill)
                }
            },
        }
    }
}

pub fn fill_backdrop(target: &mut RgbaBuffer, backdrop: &Backdrop<'_>) {
    match backdrop {
        Backdrop::Solid(color) => target.fill(color.opaque()),
        Backdrop::Image { fill, image, tile } => {
            target.fill(fill.opaque());
            if *tile {
                tile_image(target, image);
            } else {
                paint_image(target, image);
            }
        }
    }
}

fn paint_image(target: &mut RgbaBuffer, image: &RgbaBuffer) {
    let width = image.width.min(target.width);
    let height = image.height.min(target.height);
    for y in 0..height {
        for x in 0..width {
            blend_over(target, x, y, image.pixel(x, y));
        }
    }
}

/// Repeats `image` from the origin across the whole target.
fn tile_image(target: &mut RgbaBuffer, image: &RgbaBuffer) {
    if image.width == 0 || image.height == 0 {
        return;
    }
    for y in 0..target.height {
        for x in 0..target.width {
            blend_over(target, x, y, image.pixel(x % image.width, y % image.height));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{fill_backdrop, load_image, Backdrop, BackdropSpec};
    use crate::indicator::color::Rgb;
    use crate::indicator::composite::{Rgba, RgbaBuffer};

    const GREY: Rgba = Rgba::rgba(0x40, 0x40, 0x40, 255);

    fn checker() -> RgbaBuffer {
        let mut image = RgbaBuffer::new(2, 2, Rgba::rgba(255, 0, 0, 255));
        image.set_pixel(1, 0, Rgba::rgba(0, 255, 0, 255));
        image.set_pixel(0, 1, Rgba::rgba(0, 0, 255, 255));
        image
    }

    fn grey() -> Rgb {
        Rgb::from_bytes([0x40, 0x40, 0x40])
    }

    #[test]
    fn solid_backdrop_fills_every_pixel() {
        let mut target = RgbaBuffer::new(3, 2, Rgba::TRANSPARENT);
        fill_backdrop(&mut target, &Backdrop::Solid(grey()));
        assert!(target.pixels.chunks_exact(4).all(|px| px == [0x40, 0x40, 0x40, 255]));
    }

    #[test]
    fn untiled_image_is_painted_once_at_origin() {
        let image = checker();
        let mut target = RgbaBuffer::new(4, 4, Rgba::TRANSPARENT);
        fill_backdrop(
            &mut target,
            &Backdrop::Image {
                fill: grey(),
                image: &image,
                tile: false,
            },
        );
        assert_eq!(target.pixel(1, 0), Rgba::rgba(0, 255, 0, 255));
        assert_eq!(target.pixel(3, 0), GREY);
        assert_eq!(target.pixel(2, 2), GREY);
    }

    #[test]
    fn tiled_image_repeats_without_gaps() {
        let image = checker();
        let mut target = RgbaBuffer::new(5, 3, Rgba::TRANSPARENT);
        fill_backdrop(
            &mut target,
            &Backdrop::Image {
                fill: grey(),
                image: &image,
                tile: true,
            },
        );
        for y in 0..3 {
            for x in 0..5 {
                assert_eq!(target.pixel(x, y), image.pixel(x % 2, y % 2), "({x}, {y})");
            }
        }
    }

    #[test]
    fn desktop_without_capture_falls_back_to_solid() {
        let spec = BackdropSpec::Desktop;
        assert!(matches!(spec.resolve(grey(), None), Backdrop::Solid(_)));
        let wallpaper = checker();
        assert!(matches!(
            spec.resolve(grey(), Some(&wallpaper)),
            Backdrop::Image { tile: false, .. }
        ));
    }

    #[test]
    fn missing_image_reports_path() {
        let err = load_image(std::path::Path::new("/nonexistent/backdrop.png")).unwrap_err();
        assert!(format!("{err:#}").contains("backdrop.png"));
    }
}
