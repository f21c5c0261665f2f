use crate::indicator::backdrop::BackdropSpec;
use crate::indicator::color::Palette;
use crate::indicator::composite::compose_into;
use crate::indicator::display::{DisplayConnection, VisualFormat};
use crate::indicator::model::LockState;
use crate::indicator::monitor::{MonitorLayout, MonitorRect};
use crate::indicator::painter::IndicatorPainter;
use crate::indicator::scale::scale_factor;
use crate::settings::Settings;
use anyhow::Result;
use once_cell::unsync::OnceCell;

/// Everything a frame needs besides the lock state. Built once per session.
#[derive(Debug)]
pub struct RenderContext {
    pub painter: IndicatorPainter,
    pub icon_scale: f64,
    pub backdrop: BackdropSpec,
    visual: OnceCell<VisualFormat>,
}

impl RenderContext {
    pub fn new(painter: IndicatorPainter, icon_scale: f64, backdrop: BackdropSpec) -> Self {
        Self {
            painter,
            icon_scale,
            backdrop,
            visual: OnceCell::new(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        settings.validate()?;
        let painter = IndicatorPainter::new(
            settings.palette()?,
            settings.style,
            settings.unlock_indicator,
        );
        Ok(Self::new(painter, settings.icon_scale, settings.backdrop()?))
    }

    pub fn palette(&self) -> &Palette {
        self.painter.palette()
    }

    /// Root visual, queried from `display` on first use only.
    pub fn visual<D: DisplayConnection + ?Sized>(&self, display: &D) -> Result<VisualFormat> {
        self.visual.get_or_try_init(|| display.root_visual()).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Presented { diameter: u32, copies: usize },
    Skipped,
}

pub struct FrameScheduler<D: DisplayConnection> {
    display: D,
    context: RenderContext,
    resolution: (u32, u32),
}

impl<D: DisplayConnection> FrameScheduler<D> {
    pub fn new(display: D, context: RenderContext, resolution: (u32, u32)) -> Self {
        Self {
            display,
            context,
            resolution,
        }
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    pub fn resolution(&self) -> (u32, u32) {
        self.resolution
    }

    /// Takes effect on the next redraw.
    pub fn set_resolution(&mut self, resolution: (u32, u32)) {
        self.resolution = resolution;
    }

    /// Rebuilds the window background from scratch. Display failures drop
    /// the frame; the previous background stays installed.
    pub fn redraw(&mut self, state: &LockState, monitors: &dyn MonitorLayout) -> FrameOutcome {
        match self.build_and_present(state, monitors) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(?err, "failed to present unlock indicator frame");
                FrameOutcome::Skipped
            }
        }
    }

    /// Recomputes visibility from the password length, then redraws.
    pub fn clear_indicator_if_empty(
        &mut self,
        state: &mut LockState,
        monitors: &dyn MonitorLayout,
    ) -> FrameOutcome {
        state.refresh_visibility();
        self.redraw(state, monitors)
    }

    fn build_and_present(
        &mut self,
        state: &LockState,
        monitors: &dyn MonitorLayout,
    ) -> Result<FrameOutcome> {
        let metrics = self.display.screen_metrics();
        let scale = scale_factor(metrics) * self.context.icon_scale;
        let canvas = self.context.painter.paint(state, scale);
        tracing::debug!(
            scale,
            diameter = canvas.width,
            visibility = ?state.visibility,
            "painting unlock indicator"
        );

        let visual = self.context.visual(&self.display)?;
        let (width, height) = self.resolution;
        let mut surface = self.display.allocate_surface(width, height, visual)?;

        let wallpaper = match self.context.backdrop {
            BackdropSpec::Desktop => self.display.root_background()?,
            _ => None,
        };
        let backdrop = self
            .context
            .backdrop
            .resolve(self.context.palette().background, wallpaper.as_ref());
        let displays: Vec<MonitorRect> = monitors.monitors();
        let copies = compose_into(&mut surface.pixels, &backdrop, &canvas, &displays);

        self.display.set_window_background(surface)?;
        self.display
            .clear_area(MonitorRect::full_screen(self.resolution))?;
        self.display.flush()?;

        Ok(FrameOutcome::Presented {
            diameter: canvas.width,
            copies,
        })
    }
}
