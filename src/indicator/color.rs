use crate::indicator::composite::Rgba;
use crate::indicator::model::AuthState;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

/// Color with channels normalized to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self {
            r: bytes[0] as f64 / 255.0,
            g: bytes[1] as f64 / 255.0,
            b: bytes[2] as f64 / 255.0,
        }
    }

    /// Parses `rrggbb` (optionally prefixed with `#`). Each two-digit group
    /// is read as base-16 and divided by 255.
    pub fn from_hex(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        let raw = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if raw.len() != 6 {
            return Err(anyhow!(
                "color {value:?} must have exactly 6 hex digits, found {}",
                raw.len()
            ));
        }
        let mut bytes = [0u8; 3];
        hex::decode_to_slice(raw, &mut bytes)
            .with_context(|| format!("color {value:?} is not valid hex"))?;
        Ok(Self::from_bytes(bytes))
    }

    pub fn to_rgba(self, alpha: u8) -> Rgba {
        let channel = |c: f64| (c * 255.0).round().clamp(0.0, 255.0) as u8;
        Rgba::rgba(channel(self.r), channel(self.g), channel(self.b), alpha)
    }

    pub fn opaque(self) -> Rgba {
        self.to_rgba(255)
    }
}

/// Palette slots as written in the settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteConfig {
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default = "default_base")]
    pub base: String,
    #[serde(default = "default_verify")]
    pub verify: String,
    #[serde(default = "default_wrong")]
    pub wrong: String,
    #[serde(default = "default_border")]
    pub border: String,
    #[serde(default = "default_polygon_fill")]
    pub polygon_fill: String,
}

fn default_background() -> String {
    "ffffff".into()
}

fn default_base() -> String {
    "000000".into()
}

fn default_verify() -> String {
    "33aaff".into()
}

fn default_wrong() -> String {
    "cc2222".into()
}

fn default_border() -> String {
    "222222".into()
}

fn default_polygon_fill() -> String {
    "f0f0f0".into()
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            background: default_background(),
            base: default_base(),
            verify: default_verify(),
            wrong: default_wrong(),
            border: default_border(),
            polygon_fill: default_polygon_fill(),
        }
    }
}

impl PaletteConfig {
    /// Validates every slot. The first malformed slot aborts resolution and
    /// is named in the error.
    pub fn resolve(&self) -> Result<Palette> {
        let slot = |name: &str, value: &str| {
            Rgb::from_hex(value).with_context(|| format!("invalid `{name}` color"))
        };
        Ok(Palette {
            background: slot("background", &self.background)?,
            base: slot("base", &self.base)?,
            verify: slot("verify", &self.verify)?,
            wrong: slot("wrong", &self.wrong)?,
            border: slot("border", &self.border)?,
            polygon_fill: slot("polygon_fill", &self.polygon_fill)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Rgb,
    pub base: Rgb,
    pub verify: Rgb,
    pub wrong: Rgb,
    pub border: Rgb,
    pub polygon_fill: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgb::from_bytes([0xff, 0xff, 0xff]),
            base: Rgb::from_bytes([0x00, 0x00, 0x00]),
            verify: Rgb::from_bytes([0x33, 0xaa, 0xff]),
            wrong: Rgb::from_bytes([0xcc, 0x22, 0x22]),
            border: Rgb::from_bytes([0x22, 0x22, 0x22]),
            polygon_fill: Rgb::from_bytes([0xf0, 0xf0, 0xf0]),
        }
    }
}

impl Palette {
    pub fn for_auth(&self, auth: AuthState) -> Rgb {
        match auth {
            AuthState::Idle => self.base,
            AuthState::Verifying => self.verify,
            AuthState::Wrong => self.wrong,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Palette, PaletteConfig, Rgb};
    use crate::indicator::composite::Rgba;
    use crate::indicator::model::AuthState;

    #[test]
    fn hex_groups_are_divided_by_255() {
        let color = Rgb::from_hex("ff8000").unwrap();
        assert_eq!(color.r, 1.0);
        assert!((color.g - 128.0 / 255.0).abs() < 1e-12);
        assert_eq!(color.b, 0.0);
        assert_eq!(color.opaque(), Rgba::rgba(255, 128, 0, 255));
    }

    #[test]
    fn leading_hash_and_uppercase_are_accepted() {
        assert_eq!(
            Rgb::from_hex("#A0B0C0").unwrap(),
            Rgb::from_hex("a0b0c0").unwrap()
        );
    }

    #[test]
    fn channels_stay_in_unit_range_for_sampled_inputs() {
        for value in ["000000", "ffffff", "123456", "abcdef", "7f7f7f", "00ff00"] {
            let first = Rgb::from_hex(value).unwrap();
            let second = Rgb::from_hex(value).unwrap();
            assert_eq!(first, second);
            for channel in [first.r, first.g, first.b] {
                assert!((0.0..=1.0).contains(&channel), "{value} -> {channel}");
            }
        }
    }

    #[test]
    fn malformed_colors_are_rejected() {
        for value in ["", "fff", "fffffff", "gg0000", "#12345", "12 456", "ffééff"] {
            assert!(Rgb::from_hex(value).is_err(), "{value:?} should be rejected");
        }
    }

    #[test]
    fn palette_error_names_the_bad_slot() {
        let config = PaletteConfig {
            wrong: "zz0000".into(),
            ..PaletteConfig::default()
        };
        let err = config.resolve().unwrap_err();
        assert!(format!("{err:#}").contains("`wrong`"), "{err:#}");
    }

    #[test]
    fn default_config_resolves_to_default_palette() {
        assert_eq!(PaletteConfig::default().resolve().unwrap(), Palette::default());
    }

    #[test]
    fn auth_state_selects_palette_slot() {
        let palette = Palette::default();
        assert_eq!(palette.for_auth(AuthState::Idle), palette.base);
        assert_eq!(palette.for_auth(AuthState::Verifying), palette.verify);
        assert_eq!(palette.for_auth(AuthState::Wrong), palette.wrong);
    }
}
