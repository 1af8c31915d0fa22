use anyhow::{ensure, Context, Result};
use image::Rgba;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub fullscreen: bool,
}

/// Named colors shared by every element. Stored as raw RGBA so the config file
/// stays a plain array per entry.
#[derive(Debug, Clone, Deserialize)]
pub struct Palette {
    #[serde(default = "Palette::default_bg")]
    pub bg: [u8; 4],
    #[serde(default = "Palette::default_fg")]
    pub fg: [u8; 4],
    #[serde(default = "Palette::default_fg2")]
    pub fg2: [u8; 4],
    #[serde(default = "Palette::default_placeholder")]
    pub placeholder: [u8; 4],
    #[serde(default = "Palette::default_error")]
    pub error: [u8; 4],
    #[serde(default = "Palette::default_success")]
    pub success: [u8; 4],
    #[serde(default = "Palette::default_failure")]
    pub failure: [u8; 4],
    #[serde(default = "Palette::default_category")]
    pub category: [u8; 4],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteRole {
    Background,
    Foreground,
    ForegroundAlt,
    Placeholder,
    Error,
    Success,
    Failure,
    Category,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextAreaConfig {
    #[serde(default = "TextAreaConfig::default_prompt_blink_period")]
    pub prompt_blink_period: f32,
    #[serde(default = "TextAreaConfig::default_error_blink_time")]
    pub error_blink_time: f32,
    #[serde(default = "TextAreaConfig::default_blink_frequency")]
    pub blink_frequency: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ButtonConfig {
    #[serde(default = "ButtonConfig::default_hover_duration")]
    pub hover_duration: f32,
    #[serde(default = "ButtonConfig::default_hover_amplify")]
    pub hover_amplify: f32,
    #[serde(default = "ButtonConfig::default_click_duration")]
    pub click_duration: f32,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub palette: Palette,
    #[serde(default)]
    pub text_area: TextAreaConfig,
    #[serde(default)]
    pub button: ButtonConfig,
}

#[derive(Debug, Clone, Default)]
pub struct AppConfigOverrides {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fullscreen: Option<bool>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { title: "Hackers Benchmark".to_string(), width: 1920, height: 1080, fullscreen: true }
    }
}

impl Palette {
    const fn default_bg() -> [u8; 4] {
        [0x00, 0x00, 0x00, 0xff]
    }

    const fn default_fg() -> [u8; 4] {
        [0xff, 0xff, 0xff, 0xff]
    }

    const fn default_fg2() -> [u8; 4] {
        [0xee, 0xee, 0xee, 0xff]
    }

    const fn default_placeholder() -> [u8; 4] {
        [0xaa, 0xaa, 0xaa, 0xff]
    }

    const fn default_error() -> [u8; 4] {
        [0xf2, 0x74, 0x55, 0xff]
    }

    const fn default_success() -> [u8; 4] {
        [0x88, 0xf7, 0x5c, 0xff]
    }

    const fn default_failure() -> [u8; 4] {
        [0xf7, 0x78, 0x5c, 0xff]
    }

    const fn default_category() -> [u8; 4] {
        [0x88, 0xf7, 0x5c, 0xff]
    }

    pub fn color(&self, role: PaletteRole) -> Rgba<u8> {
        let raw = match role {
            PaletteRole::Background => self.bg,
            PaletteRole::Foreground => self.fg,
            PaletteRole::ForegroundAlt => self.fg2,
            PaletteRole::Placeholder => self.placeholder,
            PaletteRole::Error => self.error,
            PaletteRole::Success => self.success,
            PaletteRole::Failure => self.failure,
            PaletteRole::Category => self.category,
        };
        Rgba(raw)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            bg: Self::default_bg(),
            fg: Self::default_fg(),
            fg2: Self::default_fg2(),
            placeholder: Self::default_placeholder(),
            error: Self::default_error(),
            success: Self::default_success(),
            failure: Self::default_failure(),
            category: Self::default_category(),
        }
    }
}

impl TextAreaConfig {
    const fn default_prompt_blink_period() -> f32 {
        0.5
    }

    const fn default_error_blink_time() -> f32 {
        0.5
    }

    const fn default_blink_frequency() -> f32 {
        2.0
    }
}

impl Default for TextAreaConfig {
    fn default() -> Self {
        Self {
            prompt_blink_period: Self::default_prompt_blink_period(),
            error_blink_time: Self::default_error_blink_time(),
            blink_frequency: Self::default_blink_frequency(),
        }
    }
}

impl ButtonConfig {
    const fn default_hover_duration() -> f32 {
        0.07
    }

    const fn default_hover_amplify() -> f32 {
        0.07
    }

    const fn default_click_duration() -> f32 {
        0.19
    }
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            hover_duration: Self::default_hover_duration(),
            hover_amplify: Self::default_hover_amplify(),
            click_duration: Self::default_click_duration(),
        }
    }
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read config file {}", path.display()))?;
        let cfg: Self = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        cfg.validate().with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(cfg)
    }

    /// Animation durations must be positive and finite; widgets build their
    /// tweens from them.
    pub fn validate(&self) -> Result<()> {
        let durations = [
            ("button.hover_duration", self.button.hover_duration),
            ("button.click_duration", self.button.click_duration),
            ("text_area.prompt_blink_period", self.text_area.prompt_blink_period),
            ("text_area.error_blink_time", self.text_area.error_blink_time),
        ];
        for (field, value) in durations {
            ensure!(value > 0.0 && value.is_finite(), "{field} must be a positive duration, got {value}");
        }
        ensure!(
            self.text_area.blink_frequency.is_finite() && self.text_area.blink_frequency >= 0.0,
            "text_area.blink_frequency must be non-negative, got {}",
            self.text_area.blink_frequency
        );
        Ok(())
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(err) => {
                tracing::warn!("Config load error: {err:?}. Falling back to defaults.");
                Self::default()
            }
        }
    }

    pub fn apply_overrides(&mut self, overrides: &AppConfigOverrides) {
        if let Some(width) = overrides.width {
            self.display.width = width;
        }
        if let Some(height) = overrides.height {
            self.display.height = height;
        }
        if let Some(fullscreen) = overrides.fullscreen {
            self.display.fullscreen = fullscreen;
        }
    }
}

impl AppConfigOverrides {
    pub fn is_empty(&self) -> bool {
        self.width.is_none() && self.height.is_none() && self.fullscreen.is_none()
    }

    pub fn applied_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.width.is_some() {
            fields.push("width");
        }
        if self.height.is_some() {
            fields.push("height");
        }
        if self.fullscreen.is_some() {
            fields.push("fullscreen");
        }
        fields
    }
}
