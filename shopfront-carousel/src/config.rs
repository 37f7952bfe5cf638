//! Per-instance carousel configuration and the settings file that groups
//! the storefront's three carousels.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{CarouselError, Result};

/// Fraction of one item width an offset track may drift past its real range
/// before it rebases to the opposite end.
pub const DEFAULT_WRAP_SLACK: f64 = 0.5;

/// Delay between a silent reposition and re-enabling animated transitions.
pub const DEFAULT_REENABLE_DELAY_MS: u64 = 50;

/// How the slide image fills its frame. Presentation only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fit {
    #[default]
    Cover,
    Contain,
}

/// Static configuration for a carousel instance.
///
/// The clone-padding width is not part of the configuration: it is fixed by
/// the track type the carousel is built with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Enables the autoplay scheduler.
    pub auto_play: bool,
    /// Autoplay interval in milliseconds.
    pub delay_ms: u64,
    /// Items advanced per autoplay tick or arrow press. Offset tracks only.
    pub step_cards: usize,
    /// Rebase slack as a fraction of one item width. Offset tracks only.
    pub wrap_slack: f64,
    /// Delay before transitions are re-enabled after a silent reposition.
    pub reenable_delay_ms: u64,
    pub fit: Fit,
    pub rounded: bool,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self::banner()
    }
}

impl CarouselConfig {
    /// Full-width promotional banners.
    pub const fn banner() -> Self {
        Self {
            auto_play: true,
            delay_ms: 5_000,
            step_cards: 1,
            wrap_slack: DEFAULT_WRAP_SLACK,
            reenable_delay_ms: DEFAULT_REENABLE_DELAY_MS,
            fit: Fit::Cover,
            rounded: true,
        }
    }

    /// Horizontally scrolling product cards.
    pub const fn product_rail() -> Self {
        Self {
            auto_play: true,
            delay_ms: 3_500,
            step_cards: 1,
            wrap_slack: DEFAULT_WRAP_SLACK,
            reenable_delay_ms: DEFAULT_REENABLE_DELAY_MS,
            fit: Fit::Cover,
            rounded: false,
        }
    }

    /// Category tiles; navigated by hand only.
    pub const fn category_strip() -> Self {
        Self {
            auto_play: false,
            delay_ms: 5_000,
            step_cards: 1,
            wrap_slack: DEFAULT_WRAP_SLACK,
            reenable_delay_ms: DEFAULT_REENABLE_DELAY_MS,
            fit: Fit::Cover,
            rounded: true,
        }
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn reenable_delay(&self) -> Duration {
        Duration::from_millis(self.reenable_delay_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.delay_ms == 0 {
            return Err(CarouselError::InvalidConfig(
                "delay_ms must be greater than zero".into(),
            ));
        }
        if self.step_cards == 0 {
            return Err(CarouselError::InvalidConfig(
                "step_cards must be at least 1".into(),
            ));
        }
        if !(self.wrap_slack > 0.0 && self.wrap_slack <= 1.0) {
            return Err(CarouselError::InvalidConfig(format!(
                "wrap_slack must be in (0, 1], got {}",
                self.wrap_slack
            )));
        }
        Ok(())
    }
}

/// Settings for every carousel on the storefront home page.
///
/// Each section is optional in the TOML file; fields left out of a section
/// keep the value of that carousel's preset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarouselSettings {
    pub banner: CarouselConfig,
    pub product_rail: CarouselConfig,
    pub category_strip: CarouselConfig,
}

impl Default for CarouselSettings {
    fn default() -> Self {
        Self {
            banner: CarouselConfig::banner(),
            product_rail: CarouselConfig::product_rail(),
            category_strip: CarouselConfig::category_strip(),
        }
    }
}

/// One settings-file section: any subset of [`CarouselConfig`] fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigOverrides {
    auto_play: Option<bool>,
    delay_ms: Option<u64>,
    step_cards: Option<usize>,
    wrap_slack: Option<f64>,
    reenable_delay_ms: Option<u64>,
    fit: Option<Fit>,
    rounded: Option<bool>,
}

impl ConfigOverrides {
    fn apply(self, mut base: CarouselConfig) -> CarouselConfig {
        if let Some(auto_play) = self.auto_play {
            base.auto_play = auto_play;
        }
        if let Some(delay_ms) = self.delay_ms {
            base.delay_ms = delay_ms;
        }
        if let Some(step_cards) = self.step_cards {
            base.step_cards = step_cards;
        }
        if let Some(wrap_slack) = self.wrap_slack {
            base.wrap_slack = wrap_slack;
        }
        if let Some(reenable_delay_ms) = self.reenable_delay_ms {
            base.reenable_delay_ms = reenable_delay_ms;
        }
        if let Some(fit) = self.fit {
            base.fit = fit;
        }
        if let Some(rounded) = self.rounded {
            base.rounded = rounded;
        }
        base
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SettingsFile {
    banner: ConfigOverrides,
    product_rail: ConfigOverrides,
    category_strip: ConfigOverrides,
}

impl CarouselSettings {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let file: SettingsFile = toml::from_str(raw)?;
        let settings = Self {
            banner: file.banner.apply(CarouselConfig::banner()),
            product_rail: file
                .product_rail
                .apply(CarouselConfig::product_rail()),
            category_strip: file
                .category_strip
                .apply(CarouselConfig::category_strip()),
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| {
            CarouselError::ConfigRead {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let settings = Self::from_toml_str(&raw)?;
        log::debug!("Loaded carousel settings from {}", path.display());
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        self.banner.validate()?;
        self.product_rail.validate()?;
        self.category_strip.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_match_storefront_defaults() {
        let settings = CarouselSettings::default();
        assert_eq!(settings.banner.delay_ms, 5_000);
        assert!(settings.banner.auto_play);
        assert_eq!(settings.product_rail.delay_ms, 3_500);
        assert_eq!(settings.product_rail.step_cards, 1);
        assert!(!settings.category_strip.auto_play);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn missing_sections_fall_back_to_presets() {
        let settings = CarouselSettings::from_toml_str(
            r#"
            [product_rail]
            auto_play = false
            step_cards = 2
            "#,
        )
        .unwrap();
        assert!(!settings.product_rail.auto_play);
        assert_eq!(settings.product_rail.step_cards, 2);
        assert_eq!(settings.product_rail.delay_ms, 3_500);
        assert_eq!(settings.banner, CarouselConfig::banner());
        assert_eq!(settings.category_strip, CarouselConfig::category_strip());
    }

    #[test]
    fn zero_delay_is_rejected() {
        let err = CarouselSettings::from_toml_str("[banner]\ndelay_ms = 0\n")
            .unwrap_err();
        assert!(matches!(err, CarouselError::InvalidConfig(_)));
    }

    #[test]
    fn wrap_slack_must_be_a_fraction() {
        let mut config = CarouselConfig::product_rail();
        config.wrap_slack = 0.0;
        assert!(config.validate().is_err());
        config.wrap_slack = 1.5;
        assert!(config.validate().is_err());
        config.wrap_slack = 0.25;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = CarouselSettings::from_toml_str("[banner\n").unwrap_err();
        assert!(matches!(err, CarouselError::ConfigParse(_)));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err =
            CarouselSettings::from_toml_str("[banner]\nclone_width = 3\n")
                .unwrap_err();
        assert!(matches!(err, CarouselError::ConfigParse(_)));
    }

    #[test]
    fn load_reads_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("carousels.toml");
        std::fs::write(&path, "[banner]\ndelay_ms = 4000\nfit = \"contain\"\n")
            .unwrap();

        let settings = CarouselSettings::load(&path).unwrap();
        assert_eq!(settings.banner.delay_ms, 4_000);
        assert_eq!(settings.banner.fit, Fit::Contain);

        let missing = CarouselSettings::load(dir.path().join("nope.toml"));
        assert!(matches!(missing, Err(CarouselError::ConfigRead { .. })));
    }
}
