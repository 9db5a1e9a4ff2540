//! Render options: typed defaults and a validating merge
//!
//! Requests carry their options as a loose JSON object. [`RenderConfig::merge`]
//! walks that object key by key: recognized keys are validated and applied,
//! unrecognized keys are reported back and otherwise ignored.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::color::{Color, GradientDirection};
use crate::error::{ConfigError, RenderError};

/// Largest accepted canvas side, in pixels
pub const MAX_DIMENSION: u32 = 8192;

/// Largest accepted `border_width`
pub const MAX_BORDER_WIDTH: u32 = 500;

/// Largest accepted `outline_width`
pub const MAX_OUTLINE_WIDTH: u32 = 50;

/// Largest accepted `font_size`, `footer_font_size` and `logo_size`
pub const MAX_GLYPH_SIZE: u32 = 2048;

/// Named canvas sizes for the supported social formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatPreset {
    #[default]
    InstagramSquare,
    InstagramStory,
    InstagramPortrait,
    FacebookPost,
    FacebookStory,
    TwitterPost,
    PinterestPin,
    /// Use the `width` and `height` options
    Custom,
}

impl FormatPreset {
    /// Every preset, in the order they are listed to users
    pub const ALL: [FormatPreset; 8] = [
        FormatPreset::InstagramSquare,
        FormatPreset::InstagramStory,
        FormatPreset::InstagramPortrait,
        FormatPreset::FacebookPost,
        FormatPreset::FacebookStory,
        FormatPreset::TwitterPost,
        FormatPreset::PinterestPin,
        FormatPreset::Custom,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FormatPreset::InstagramSquare => "instagram_square",
            FormatPreset::InstagramStory => "instagram_story",
            FormatPreset::InstagramPortrait => "instagram_portrait",
            FormatPreset::FacebookPost => "facebook_post",
            FormatPreset::FacebookStory => "facebook_story",
            FormatPreset::TwitterPost => "twitter_post",
            FormatPreset::PinterestPin => "pinterest_pin",
            FormatPreset::Custom => "custom",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| preset.name() == name)
    }

    /// Fixed canvas size, `None` for [`FormatPreset::Custom`]
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        match self {
            FormatPreset::InstagramSquare => Some((1080, 1080)),
            FormatPreset::InstagramStory | FormatPreset::FacebookStory => Some((1080, 1920)),
            FormatPreset::InstagramPortrait => Some((1080, 1350)),
            FormatPreset::FacebookPost => Some((1200, 630)),
            FormatPreset::TwitterPost => Some((1200, 675)),
            FormatPreset::PinterestPin => Some((1000, 1500)),
            FormatPreset::Custom => None,
        }
    }
}

/// Horizontal placement of text lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Canvas corner a logo is pinned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogoPosition {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Encoded artifact format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OutputFormat {
    #[default]
    #[serde(alias = "png", alias = "Png")]
    Png,
    #[serde(alias = "jpeg", alias = "Jpeg", alias = "JPG", alias = "jpg", alias = "Jpg")]
    Jpeg,
}

impl OutputFormat {
    /// File extension used for artifacts
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg => "image/jpeg",
        }
    }
}

/// Every option a render request may set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderConfig {
    pub format: FormatPreset,
    pub width: u32,
    pub height: u32,

    pub font_name: String,
    pub font_size: u32,
    pub text_color: Color,
    pub text_align: TextAlign,
    pub line_spacing: f32,
    pub max_width_percent: f32,

    pub background_color: Color,
    pub background_image: Option<String>,
    pub background_gradient: Option<(Color, Color)>,
    pub gradient_direction: GradientDirection,
    pub background_blur: f32,
    pub background_overlay: bool,
    pub overlay_opacity: f32,

    pub text_shadow: bool,
    pub shadow_color: Color,
    pub shadow_offset: (i32, i32),
    pub text_outline: bool,
    pub outline_width: u32,
    pub outline_color: Color,

    pub add_border: bool,
    pub border_width: u32,
    pub border_color: Color,

    pub add_logo: bool,
    pub logo_path: Option<String>,
    pub logo_position: LogoPosition,
    pub logo_size: u32,

    pub add_footer: bool,
    pub footer_text: String,
    pub footer_font_size: u32,
    pub footer_color: Color,

    pub quality: u8,
    pub format_output: OutputFormat,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            format: FormatPreset::InstagramSquare,
            width: 1080,
            height: 1080,

            font_name: "Amiri-Regular.ttf".to_string(),
            font_size: 80,
            text_color: Color::white(),
            text_align: TextAlign::Center,
            line_spacing: 1.5,
            max_width_percent: 85.0,

            background_color: Color::rgb(0x1a, 0x47, 0x2a),
            background_image: None,
            background_gradient: None,
            gradient_direction: GradientDirection::Vertical,
            background_blur: 0.0,
            background_overlay: true,
            overlay_opacity: 0.6,

            text_shadow: true,
            shadow_color: Color::black(),
            shadow_offset: (3, 3),
            text_outline: false,
            outline_width: 2,
            outline_color: Color::black(),

            add_border: false,
            border_width: 20,
            border_color: Color::rgb(0xff, 0xd7, 0x00),

            add_logo: false,
            logo_path: None,
            logo_position: LogoPosition::TopRight,
            logo_size: 100,

            add_footer: false,
            footer_text: String::new(),
            footer_font_size: 30,
            footer_color: Color::rgb(0xcc, 0xcc, 0xcc),

            quality: 95,
            format_output: OutputFormat::Png,
        }
    }
}

/// Keys [`RenderConfig::merge`] understands
pub const RECOGNIZED_KEYS: &[&str] = &[
    "format",
    "width",
    "height",
    "font_name",
    "font_size",
    "text_color",
    "text_align",
    "line_spacing",
    "max_width_percent",
    "background_color",
    "background_image",
    "background_gradient",
    "gradient_direction",
    "background_blur",
    "background_overlay",
    "overlay_opacity",
    "text_shadow",
    "shadow_color",
    "shadow_offset",
    "text_outline",
    "outline_width",
    "outline_color",
    "add_border",
    "border_width",
    "border_color",
    "add_logo",
    "logo_path",
    "logo_position",
    "logo_size",
    "add_footer",
    "footer_text",
    "footer_font_size",
    "footer_color",
    "quality",
    "format_output",
];

/// What a merge did with the keys it was given
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub applied: Vec<String>,
    pub ignored: Vec<String>,
}

impl RenderConfig {
    /// Defaults overridden by a JSON object; `null` means "all defaults".
    pub fn from_json(value: &Value) -> Result<(Self, MergeReport), ConfigError> {
        let mut config = Self::default();
        let report = match value {
            Value::Null => MergeReport::default(),
            Value::Object(map) => config.merge(map)?,
            _ => return Err(ConfigError::NotAnObject),
        };
        Ok((config, report))
    }

    /// Apply every recognized key of `overrides` on top of `self`.
    ///
    /// The merge is all-or-nothing: on the first invalid value `self` is left
    /// untouched and the error names the offending key.
    pub fn merge(&mut self, overrides: &Map<String, Value>) -> Result<MergeReport, ConfigError> {
        let mut next = self.clone();
        let mut report = MergeReport::default();

        for (key, value) in overrides {
            if next.apply(key, value)? {
                report.applied.push(key.clone());
            } else {
                log::debug!("Ignoring unrecognized config key `{}`", key);
                report.ignored.push(key.clone());
            }
        }

        *self = next;
        Ok(report)
    }

    /// Returns `Ok(false)` for keys this config does not know about
    fn apply(&mut self, key: &str, value: &Value) -> Result<bool, ConfigError> {
        match key {
            "format" => {
                let name = string(key, value)?;
                self.format = variant(key, value).unwrap_or_else(|_| {
                    log::warn!("Unknown format `{}`, using custom dimensions", name);
                    FormatPreset::Custom
                });
            },
            "width" => self.width = bounded_int(key, value, 1, MAX_DIMENSION)?,
            "height" => self.height = bounded_int(key, value, 1, MAX_DIMENSION)?,
            "font_name" => self.font_name = non_empty_string(key, value)?,
            "font_size" => self.font_size = bounded_int(key, value, 1, MAX_GLYPH_SIZE)?,
            "text_color" => self.text_color = color(value)?,
            "text_align" => self.text_align = variant(key, value)?,
            "line_spacing" => {
                let spacing = number(key, value)?;
                if spacing <= 0.0 {
                    return Err(ConfigError::invalid(key, "must be greater than 0"));
                }
                self.line_spacing = spacing;
            },
            "max_width_percent" => {
                let percent = number(key, value)?;
                if percent <= 0.0 || percent > 100.0 {
                    return Err(ConfigError::invalid(key, "must be in (0, 100]"));
                }
                self.max_width_percent = percent;
            },
            "background_color" => self.background_color = color(value)?,
            "background_image" => self.background_image = optional_string(key, value)?,
            "background_gradient" => {
                self.background_gradient = match value {
                    Value::Null => None,
                    Value::Array(stops) if stops.len() == 2 => {
                        Some((color(&stops[0])?, color(&stops[1])?))
                    },
                    _ => return Err(ConfigError::invalid(key, "expected two hex colors or null")),
                }
            },
            "gradient_direction" => self.gradient_direction = variant::<GradientDirection>(key, value)?,
            "background_blur" => {
                let blur = number(key, value)?;
                if blur < 0.0 {
                    return Err(ConfigError::invalid(key, "must not be negative"));
                }
                self.background_blur = blur;
            },
            "background_overlay" => self.background_overlay = boolean(key, value)?,
            "overlay_opacity" => {
                let opacity = number(key, value)?;
                if !(0.0..=1.0).contains(&opacity) {
                    return Err(ConfigError::invalid(key, "must be in [0, 1]"));
                }
                self.overlay_opacity = opacity;
            },
            "text_shadow" => self.text_shadow = boolean(key, value)?,
            "shadow_color" => self.shadow_color = color(value)?,
            "shadow_offset" => {
                self.shadow_offset = match value {
                    Value::Array(pair) if pair.len() == 2 => {
                        (signed_int(key, &pair[0])?, signed_int(key, &pair[1])?)
                    },
                    _ => return Err(ConfigError::invalid(key, "expected [dx, dy]")),
                }
            },
            "text_outline" => self.text_outline = boolean(key, value)?,
            "outline_width" => self.outline_width = bounded_int(key, value, 0, MAX_OUTLINE_WIDTH)?,
            "outline_color" => self.outline_color = color(value)?,
            "add_border" => self.add_border = boolean(key, value)?,
            "border_width" => self.border_width = bounded_int(key, value, 0, MAX_BORDER_WIDTH)?,
            "border_color" => self.border_color = color(value)?,
            "add_logo" => self.add_logo = boolean(key, value)?,
            "logo_path" => self.logo_path = optional_string(key, value)?,
            "logo_position" => self.logo_position = variant(key, value)?,
            "logo_size" => self.logo_size = bounded_int(key, value, 1, MAX_GLYPH_SIZE)?,
            "add_footer" => self.add_footer = boolean(key, value)?,
            "footer_text" => self.footer_text = string(key, value)?,
            "footer_font_size" => self.footer_font_size = bounded_int(key, value, 1, MAX_GLYPH_SIZE)?,
            "footer_color" => self.footer_color = color(value)?,
            "quality" => self.quality = bounded_int(key, value, 1, 100)? as u8,
            "format_output" => self.format_output = variant(key, value)?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// Canvas size: the preset's, or `width`×`height` for custom formats
    pub fn dimensions(&self) -> (u32, u32) {
        self.format
            .dimensions()
            .unwrap_or((self.width, self.height))
    }

    /// [`dimensions`](Self::dimensions), refused when a side is 0 or larger
    /// than [`MAX_DIMENSION`]
    pub fn checked_dimensions(&self) -> Result<(u32, u32), RenderError> {
        let (width, height) = self.dimensions();
        let valid = 1..=MAX_DIMENSION;
        if !valid.contains(&width) || !valid.contains(&height) {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        Ok((width, height))
    }

    /// Width of the text column for a canvas `canvas_width` pixels wide
    pub fn max_text_width(&self, canvas_width: u32) -> u32 {
        (canvas_width as f32 * self.max_width_percent / 100.0) as u32
    }

    /// Vertical distance between consecutive baselines
    pub fn line_height(&self) -> u32 {
        (self.font_size as f32 * self.line_spacing) as u32
    }
}

fn string(key: &str, value: &Value) -> Result<String, ConfigError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| ConfigError::invalid(key, "expected a string"))
}

fn non_empty_string(key: &str, value: &Value) -> Result<String, ConfigError> {
    let s = string(key, value)?;
    if s.trim().is_empty() {
        return Err(ConfigError::invalid(key, "must not be empty"));
    }
    Ok(s)
}

fn optional_string(key: &str, value: &Value) -> Result<Option<String>, ConfigError> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        _ => Err(ConfigError::invalid(key, "expected a string or null")),
    }
}

fn boolean(key: &str, value: &Value) -> Result<bool, ConfigError> {
    value
        .as_bool()
        .ok_or_else(|| ConfigError::invalid(key, "expected true or false"))
}

fn number(key: &str, value: &Value) -> Result<f32, ConfigError> {
    value
        .as_f64()
        .filter(|v| v.is_finite())
        .map(|v| v as f32)
        .ok_or_else(|| ConfigError::invalid(key, "expected a number"))
}

fn signed_int(key: &str, value: &Value) -> Result<i32, ConfigError> {
    let n = value
        .as_f64()
        .filter(|v| v.fract() == 0.0)
        .ok_or_else(|| ConfigError::invalid(key, "expected an integer"))?;
    if n < i32::MIN as f64 || n > i32::MAX as f64 {
        return Err(ConfigError::invalid(key, "out of range"));
    }
    Ok(n as i32)
}

fn non_negative_int(key: &str, value: &Value) -> Result<u32, ConfigError> {
    let n = signed_int(key, value)?;
    u32::try_from(n).map_err(|_| ConfigError::invalid(key, "must not be negative"))
}

fn bounded_int(key: &str, value: &Value, min: u32, max: u32) -> Result<u32, ConfigError> {
    let n = non_negative_int(key, value)?;
    if n < min || n > max {
        return Err(ConfigError::invalid(key, format!("must be in [{min}, {max}]")));
    }
    Ok(n)
}

/// One enum option, by its serde name
fn variant<T: DeserializeOwned>(key: &str, value: &Value) -> Result<T, ConfigError> {
    serde_json::from_value(value.clone()).map_err(|e| ConfigError::invalid(key, e.to_string()))
}

fn color(value: &Value) -> Result<Color, ConfigError> {
    match value.as_str() {
        Some(hex) => Color::from_hex(hex),
        None => Err(ConfigError::InvalidColor(value.to_string())),
    }
}
