//! Display-server seam used by the frame scheduler.
//!
//! A real backend wraps an X connection. [`MemoryDisplay`] keeps everything in
//! memory and backs the preview binary and the tests.

use crate::indicator::composite::{Rgba, RgbaBuffer};
use crate::indicator::monitor::MonitorRect;
use crate::indicator::scale::ScreenMetrics;
use anyhow::{anyhow, bail, Result};
use std::cell::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelOrder {
    Rgba,
    Bgra,
}

/// Pixel format of the root window, looked up once per render context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualFormat {
    pub id: u32,
    pub depth: u8,
    pub order: ChannelOrder,
}

impl Default for VisualFormat {
    fn default() -> Self {
        Self {
            id: 0x21,
            depth: 24,
            order: ChannelOrder::Bgra,
        }
    }
}

/// Server-side drawable the composed frame is drawn into before it becomes
/// the window background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    pub visual: VisualFormat,
    pub pixels: RgbaBuffer,
}

impl Surface {
    /// Bytes in the visual's channel order.
    pub fn encoded(&self) -> Vec<u8> {
        encode_for_visual(&self.pixels, self.visual.order)
    }
}

pub trait DisplayConnection {
    fn screen_metrics(&self) -> ScreenMetrics;

    fn root_visual(&self) -> Result<VisualFormat>;

    fn allocate_surface(&mut self, width: u32, height: u32, visual: VisualFormat)
        -> Result<Surface>;

    /// Takes ownership of `surface`; the server keeps the pixels.
    fn set_window_background(&mut self, surface: Surface) -> Result<()>;

    fn clear_area(&mut self, rect: MonitorRect) -> Result<()>;

    fn flush(&mut self) -> Result<()>;

    /// Current desktop wallpaper, when the backend can capture it.
    fn root_background(&self) -> Result<Option<RgbaBuffer>> {
        Ok(None)
    }
}

pub fn encode_for_visual(buffer: &RgbaBuffer, order: ChannelOrder) -> Vec<u8> {
    match order {
        ChannelOrder::Rgba => buffer.pixels.clone(),
        ChannelOrder::Bgra => {
            let mut out = vec![0u8; buffer.pixels.len()];
            for (src, dst) in buffer.pixels.chunks_exact(4).zip(out.chunks_exact_mut(4)) {
                dst[0] = src[2];
                dst[1] = src[1];
                dst[2] = src[0];
                dst[3] = src[3];
            }
            out
        }
    }
}

fn decode_from_visual(bytes: &[u8], order: ChannelOrder) -> Vec<u8> {
    // The swap is its own inverse.
    let mut out = bytes.to_vec();
    if order == ChannelOrder::Bgra {
        for px in out.chunks_exact_mut(4) {
            px.swap(0, 2);
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct InstalledBackground {
    width: u32,
    height: u32,
    order: ChannelOrder,
    bytes: Vec<u8>,
}

/// In-memory display. Holds the last installed background in the visual's
/// byte order and records every clear and flush.
#[derive(Debug)]
pub struct MemoryDisplay {
    metrics: ScreenMetrics,
    visual: VisualFormat,
    wallpaper: Option<RgbaBuffer>,
    background: Option<InstalledBackground>,
    clears: Vec<MonitorRect>,
    flushes: usize,
    fail_allocations: bool,
    visual_queries: Cell<usize>,
}

impl MemoryDisplay {
    pub fn new(metrics: ScreenMetrics) -> Self {
        Self {
            metrics,
            visual: VisualFormat::default(),
            wallpaper: None,
            background: None,
            clears: Vec::new(),
            flushes: 0,
            fail_allocations: false,
            visual_queries: Cell::new(0),
        }
    }

    pub fn with_visual(mut self, visual: VisualFormat) -> Self {
        self.visual = visual;
        self
    }

    pub fn with_wallpaper(mut self, wallpaper: RgbaBuffer) -> Self {
        self.wallpaper = Some(wallpaper);
        self
    }

    pub fn set_metrics(&mut self, metrics: ScreenMetrics) {
        self.metrics = metrics;
    }

    /// Makes every following `allocate_surface` fail until reset.
    pub fn set_fail_allocations(&mut self, fail: bool) {
        self.fail_allocations = fail;
    }

    /// Installed background converted back to RGBA.
    pub fn background_rgba(&self) -> Option<RgbaBuffer> {
        self.background.as_ref().map(|bg| {
            RgbaBuffer::from_pixels(bg.width, bg.height, decode_from_visual(&bg.bytes, bg.order))
        })
    }

    /// Installed background exactly as the server holds it.
    pub fn background_bytes(&self) -> Option<&[u8]> {
        self.background.as_ref().map(|bg| bg.bytes.as_slice())
    }

    pub fn clears(&self) -> &[MonitorRect] {
        &self.clears
    }

    pub fn flushes(&self) -> usize {
        self.flushes
    }

    pub fn visual_queries(&self) -> usize {
        self.visual_queries.get()
    }
}

impl DisplayConnection for MemoryDisplay {
    fn screen_metrics(&self) -> ScreenMetrics {
        self.metrics
    }

    fn root_visual(&self) -> Result<VisualFormat> {
        self.visual_queries.set(self.visual_queries.get() + 1);
        Ok(self.visual)
    }

    fn allocate_surface(
        &mut self,
        width: u32,
        height: u32,
        visual: VisualFormat,
    ) -> Result<Surface> {
        if self.fail_allocations {
            bail!("cannot allocate {width}x{height} pixmap");
        }
        if width == 0 || height == 0 {
            return Err(anyhow!("cannot allocate empty {width}x{height} pixmap"));
        }
        Ok(Surface {
            visual,
            pixels: RgbaBuffer::new(width, height, Rgba::BLACK),
        })
    }

    fn set_window_background(&mut self, surface: Surface) -> Result<()> {
        self.background = Some(InstalledBackground {
            width: surface.pixels.width,
            height: surface.pixels.height,
            order: surface.visual.order,
            bytes: surface.encoded(),
        });
        Ok(())
    }

    fn clear_area(&mut self, rect: MonitorRect) -> Result<()> {
        self.clears.push(rect);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.flushes += 1;
        Ok(())
    }

    fn root_background(&self) -> Result<Option<RgbaBuffer>> {
        Ok(self.wallpaper.clone())
    }
}
