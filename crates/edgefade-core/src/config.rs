use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub fade: FadeConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Axis along which the wrapped content scrolls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollDirection {
    /// Edges are top and bottom
    #[default]
    Vertical,
    /// Edges are left and right
    Horizontal,
}

/// Easing curve for the fade transitions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EasingType {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
    Cubic,
    Quintic,
}

/// Edge fade decorator settings
///
/// The explicit scroll source is not part of this struct; it is supplied when
/// the tracker is mounted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FadeConfig {
    /// Thickness of each fade band in cells
    #[serde(default = "default_size")]
    pub size: u16,
    /// Base gradient color as a hex string ("#RRGGBB" or "#RGB")
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub scroll_direction: ScrollDirection,
    /// Opacity transition duration in milliseconds
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
    #[serde(default)]
    pub curve: EasingType,
    /// When true the fade bands never capture pointer input
    #[serde(default = "default_true")]
    pub ignore_interaction: bool,
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            size: default_size(),
            color: default_color(),
            scroll_direction: ScrollDirection::default(),
            duration_ms: default_duration_ms(),
            curve: EasingType::default(),
            ignore_interaction: default_true(),
        }
    }
}

impl FadeConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Check that a scroll source will be resolvable for this configuration.
    ///
    /// `source_available` is true when an explicit controller is supplied or an
    /// ambient one is known to exist. Horizontal decorators cannot fall back to
    /// a locally created controller because nothing would drive it.
    pub fn validate(&self, source_available: bool) -> crate::Result<()> {
        if self.scroll_direction == ScrollDirection::Horizontal && !source_available {
            return Err(crate::Error::Config(
                "horizontal scroll fade requires an explicit or ambient scroll controller"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds while idle
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate while a fade is animating
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Number of rows in the demo list
    #[serde(default = "default_demo_items")]
    pub demo_items: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            demo_items: default_demo_items(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_size() -> u16 {
    15
}

fn default_color() -> String {
    "#9e9e9e".to_string()
}

fn default_duration_ms() -> u64 {
    300
}

fn default_true() -> bool {
    true
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    60
}

fn default_demo_items() -> usize {
    60
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/edgefade/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("edgefade")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fade_config() {
        let config = FadeConfig::default();
        assert_eq!(config.size, 15);
        assert_eq!(config.color, "#9e9e9e");
        assert_eq!(config.scroll_direction, ScrollDirection::Vertical);
        assert_eq!(config.duration(), Duration::from_millis(300));
        assert_eq!(config.curve, EasingType::EaseInOut);
        assert!(config.ignore_interaction);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [fade]
            size = 3
            scroll_direction = "horizontal"
            curve = "ease-out"
            "#,
        )
        .unwrap();
        assert_eq!(config.fade.size, 3);
        assert_eq!(config.fade.scroll_direction, ScrollDirection::Horizontal);
        assert_eq!(config.fade.curve, EasingType::EaseOut);
        assert_eq!(config.fade.duration_ms, 300);
        assert_eq!(config.ui.animation_fps, 60);
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let err = AppConfig::from_toml("[fade]\ncurve = \"wobbly\"").unwrap_err();
        assert!(matches!(err, crate::Error::TomlDe(_)));
    }

    #[test]
    fn test_toml_roundtrip_keeps_fade_settings() {
        let mut config = AppConfig::default();
        config.fade.color = "#112233".to_string();
        config.fade.ignore_interaction = false;
        let parsed = AppConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed.fade, config.fade);
    }

    #[test]
    fn test_validate_horizontal_requires_source() {
        let config = FadeConfig {
            scroll_direction: ScrollDirection::Horizontal,
            ..Default::default()
        };
        assert!(matches!(config.validate(false), Err(crate::Error::Config(_))));
        assert!(config.validate(true).is_ok());
        assert!(FadeConfig::default().validate(false).is_ok());
    }
}
