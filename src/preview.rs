use crate::indicator::composite::RgbaBuffer;
use crate::indicator::display::MemoryDisplay;
use crate::indicator::model::{AuthState, LockState, Modifiers};
use crate::indicator::monitor::MonitorRect;
use crate::indicator::scale::{ScreenMetrics, BASELINE_DPI};
use crate::indicator::scheduler::{FrameOutcome, FrameScheduler, RenderContext};
use crate::indicator::state::VisibilityState;
use crate::settings::Settings;
use anyhow::{anyhow, Result};
use chrono::Local;
use std::path::{Path, PathBuf};

pub fn timestamped_stem(now: chrono::DateTime<Local>) -> String {
    now.format("%Y%m%d_%H%M%S").to_string()
}

pub fn build_filename(stem: &str) -> String {
    format!("unlock_indicator_{}.png", stem)
}

pub fn default_output(dir: &Path, now: chrono::DateTime<Local>) -> PathBuf {
    dir.join(build_filename(&timestamped_stem(now)))
}

/// Lock state shown in previews: a few typed characters while idle.
pub fn sample_state() -> LockState {
    LockState {
        auth: AuthState::Idle,
        password_len: 6,
        modifiers: Modifiers::default(),
        visibility: VisibilityState::KeyPressed,
    }
}

/// Renders one frame through the in-memory display at the baseline DPI.
pub fn render(settings: &Settings, state: &LockState) -> Result<RgbaBuffer> {
    let resolution = settings.preview_resolution;
    let context = RenderContext::from_settings(settings)?;
    let display = MemoryDisplay::new(ScreenMetrics::at_dpi(resolution.1, BASELINE_DPI));
    let mut scheduler = FrameScheduler::new(display, context, resolution);

    let layout = vec![MonitorRect::full_screen(resolution)];
    match scheduler.redraw(state, &layout) {
        FrameOutcome::Presented { .. } => scheduler
            .display()
            .background_rgba()
            .ok_or_else(|| anyhow!("display holds no background after presenting")),
        FrameOutcome::Skipped => Err(anyhow!(
            "frame of {}x{} was skipped",
            resolution.0,
            resolution.1
        )),
    }
}
