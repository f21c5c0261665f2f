use crate::indicator::backdrop::{load_image, BackdropSpec};
use crate::indicator::color::{Palette, PaletteConfig};
use crate::indicator::geometry::{ICON_CENTER, LINE_WIDTH};
use crate::indicator::model::IndicatorStyle;
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// Draw the indicator at all. When `false` only the backdrop is shown.
    #[serde(default = "default_true")]
    pub unlock_indicator: bool,
    /// Extra factor applied on top of the DPI scale. Must be positive.
    #[serde(default = "default_icon_scale")]
    pub icon_scale: f64,
    #[serde(default)]
    pub style: IndicatorStyle,
    #[serde(default)]
    pub colors: PaletteConfig,
    /// Image painted over the background color. Takes precedence over
    /// `use_desktop_background`.
    #[serde(default)]
    pub image_path: Option<PathBuf>,
    /// Repeat `image_path` across the whole screen instead of painting it
    /// once at the top-left corner.
    #[serde(default)]
    pub tile: bool,
    #[serde(default)]
    pub use_desktop_background: bool,
    /// When enabled the logger starts at debug level.
    #[serde(default)]
    pub debug: bool,
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    /// Frame size used by the preview binary.
    #[serde(default = "default_preview_resolution")]
    pub preview_resolution: (u32, u32),
}

fn default_true() -> bool {
    true
}

fn default_icon_scale() -> f64 {
    1.0
}

fn default_preview_resolution() -> (u32, u32) {
    (1920, 1080)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            unlock_indicator: true,
            icon_scale: default_icon_scale(),
            style: IndicatorStyle::default(),
            colors: PaletteConfig::default(),
            image_path: None,
            tile: false,
            use_desktop_background: false,
            debug: false,
            log_file: None,
            preview_resolution: default_preview_resolution(),
        }
    }
}

impl Settings {
    /// Missing or empty files yield the defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let settings: Self = serde_json::from_str(&content)
            .with_context(|| format!("parse settings {}", path.display()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("create settings dir {}", dir.display()))?;
        }
        std::fs::write(path, json).with_context(|| format!("write settings {}", path.display()))?;
        Ok(())
    }

    /// `<config dir>/unlock-indicator/settings.json`, falling back to the
    /// working directory when the platform has no config dir.
    pub fn default_path() -> PathBuf {
        dirs_next::config_dir()
            .map(|dir| dir.join("unlock-indicator"))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("settings.json")
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !(self.icon_scale.is_finite() && self.icon_scale > 0.0) {
            bail!("icon_scale must be positive, got {}", self.icon_scale);
        }
        // Dots must stay inside the canvas.
        let dot_radius = self.style.dot_radius;
        let max_radius = ICON_CENTER - LINE_WIDTH / 2.0;
        if !(dot_radius.is_finite() && (0.0..=max_radius).contains(&dot_radius)) {
            bail!("style.dot_radius must be between 0 and {max_radius}, got {dot_radius}");
        }
        self.colors.resolve()?;
        Ok(())
    }

    pub fn palette(&self) -> anyhow::Result<Palette> {
        self.colors.resolve()
    }

    /// Decodes the configured image, if any.
    pub fn backdrop(&self) -> anyhow::Result<BackdropSpec> {
        if let Some(path) = &self.image_path {
            let image = load_image(path)?;
            return Ok(BackdropSpec::Image {
                image,
                tile: self.tile,
            });
        }
        if self.use_desktop_background {
            return Ok(BackdropSpec::Desktop);
        }
        Ok(BackdropSpec::Solid)
    }
}
