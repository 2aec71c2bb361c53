use std::{fmt, path::Path, str::FromStr};

use anyhow::Context as _;

use crate::foundation::{
    core::Size,
    error::{PanelizerError, PanelizerResult},
};

/// Canvas height used when a configuration document omits `canvas_height`.
pub const DEFAULT_CANVAS_HEIGHT: u32 = 2500;
/// Uniform border percentage used when a uniform document omits `padding.uniform`.
pub const DEFAULT_UNIFORM_BORDER_PCT: f64 = 5.0;

/// Layout strategy for a batch.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Fixed-ratio canvas with percentage padding on each edge.
    #[default]
    Framing,
    /// Canvas follows the image; a uniform border is grown outward or trimmed inward.
    Uniform,
}

/// Supported canvas aspect ratios (width:height).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum CanvasRatio {
    #[serde(rename = "3:4")]
    R3x4,
    #[default]
    #[serde(rename = "4:5")]
    R4x5,
    #[serde(rename = "2:3")]
    R2x3,
    #[serde(rename = "9:16")]
    R9x16,
}

impl CanvasRatio {
    pub const ALL: [CanvasRatio; 4] = [Self::R3x4, Self::R4x5, Self::R2x3, Self::R9x16];

    /// Width divided by height.
    pub fn value(self) -> f64 {
        match self {
            Self::R3x4 => 3.0 / 4.0,
            Self::R4x5 => 4.0 / 5.0,
            Self::R2x3 => 2.0 / 3.0,
            Self::R9x16 => 9.0 / 16.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::R3x4 => "3:4",
            Self::R4x5 => "4:5",
            Self::R2x3 => "2:3",
            Self::R9x16 => "9:16",
        }
    }
}

/// Named flat background colors.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundColor {
    #[default]
    White,
    Black,
    LightGray,
    DarkGray,
}

impl BackgroundColor {
    pub const ALL: [BackgroundColor; 4] = [
        Self::White,
        Self::Black,
        Self::LightGray,
        Self::DarkGray,
    ];

    pub fn hex(self) -> &'static str {
        match self {
            Self::White => "#FFFFFF",
            Self::Black => "#000000",
            Self::LightGray => "#D3D3D3",
            Self::DarkGray => "#333333",
        }
    }

    pub fn rgb(self) -> [u8; 3] {
        match self {
            Self::White => [0xFF, 0xFF, 0xFF],
            Self::Black => [0x00, 0x00, 0x00],
            Self::LightGray => [0xD3, 0xD3, 0xD3],
            Self::DarkGray => [0x33, 0x33, 0x33],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
            Self::LightGray => "lightgray",
            Self::DarkGray => "darkgray",
        }
    }
}

/// Which way a uniform border grows.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Canvas stays at the scaled image size; the border trims the image edges.
    #[default]
    Inward,
    /// Canvas grows by the border on every side; the image stays intact.
    Outward,
}

/// Framing padding, each edge a percentage of canvas width (left/right) or height (top/bottom).
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FramingPadding {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl FramingPadding {
    pub const fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }
}

/// Uniform border, a percentage of canvas height applied to every edge.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UniformPadding {
    pub border: f64,
    pub orientation: Orientation,
}

impl Default for UniformPadding {
    fn default() -> Self {
        Self {
            border: DEFAULT_UNIFORM_BORDER_PCT,
            orientation: Orientation::Inward,
        }
    }
}

/// Mode-dependent padding. The variant decides the [`Layout`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Padding {
    Framing(FramingPadding),
    Uniform(UniformPadding),
}

impl Padding {
    pub fn layout(&self) -> Layout {
        match self {
            Self::Framing(_) => Layout::Framing,
            Self::Uniform(_) => Layout::Uniform,
        }
    }
}

impl Default for Padding {
    fn default() -> Self {
        Self::Framing(FramingPadding::default())
    }
}

/// Validated, fully-resolved layout configuration for one batch.
///
/// Built once at the caller boundary (see [`ConfigDocument`] for the JSON form) and never
/// mutated while a batch runs. The engine applies no defaults of its own.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(into = "ConfigDocument", try_from = "ConfigDocument")]
pub struct LayoutConfig {
    /// Reference canvas height in pixels; width derives from the ratio.
    pub canvas_height: u32,
    /// Canvas ratio used by framing layouts and panorama splitting.
    pub canvas_ratio: CanvasRatio,
    pub background_color: BackgroundColor,
    pub padding: Padding,
    /// Split single images wider than [`crate::WIDE_SPLIT_ASPECT`] into several panels.
    pub split_wide_images: bool,
    /// Merge runs of similar landscape images into one stacked panel.
    pub stack_landscape_images: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            canvas_ratio: CanvasRatio::default(),
            background_color: BackgroundColor::default(),
            padding: Padding::default(),
            split_wide_images: false,
            stack_landscape_images: false,
        }
    }
}

impl LayoutConfig {
    /// A framing configuration with the given padding and default everything else.
    pub fn framing(padding: FramingPadding) -> Self {
        Self {
            padding: Padding::Framing(padding),
            ..Self::default()
        }
    }

    /// A uniform-border configuration with default everything else.
    pub fn uniform(border: f64, orientation: Orientation) -> Self {
        Self {
            padding: Padding::Uniform(UniformPadding {
                border,
                orientation,
            }),
            ..Self::default()
        }
    }

    pub fn layout(&self) -> Layout {
        self.padding.layout()
    }

    /// The fixed-ratio canvas `(canvas_height * ratio, canvas_height)`.
    pub fn canvas_size(&self) -> Size {
        Size::new(
            (f64::from(self.canvas_height) * self.canvas_ratio.value()) as u32,
            self.canvas_height,
        )
    }

    pub fn validate(&self) -> PanelizerResult<()> {
        if self.canvas_height == 0 {
            return Err(PanelizerError::validation("canvas_height must be > 0"));
        }
        if self.canvas_size().width == 0 {
            return Err(PanelizerError::validation(format!(
                "canvas_height {} is too small for ratio {}",
                self.canvas_height,
                self.canvas_ratio.label()
            )));
        }

        match self.padding {
            Padding::Framing(p) => {
                for (name, v) in [
                    ("left", p.left),
                    ("right", p.right),
                    ("top", p.top),
                    ("bottom", p.bottom),
                ] {
                    validate_pct(name, v)?;
                }
                if p.left + p.right >= 100.0 {
                    return Err(PanelizerError::validation(
                        "padding left + right must be < 100",
                    ));
                }
                if p.top + p.bottom >= 100.0 {
                    return Err(PanelizerError::validation(
                        "padding top + bottom must be < 100",
                    ));
                }
            }
            Padding::Uniform(u) => {
                validate_pct("uniform", u.border)?;
                if u.border >= 50.0 {
                    return Err(PanelizerError::validation(
                        "padding uniform must be < 50",
                    ));
                }
            }
        }
        Ok(())
    }

    pub fn from_json_str(s: &str) -> PanelizerResult<Self> {
        let doc: ConfigDocument = serde_json::from_str(s)
            .map_err(|e| PanelizerError::validation(format!("parse config JSON: {e}")))?;
        Self::try_from(doc)
    }

    pub fn from_json_file(path: &Path) -> PanelizerResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }
}

fn validate_pct(name: &str, v: f64) -> PanelizerResult<()> {
    if !v.is_finite() || !(0.0..=100.0).contains(&v) {
        return Err(PanelizerError::validation(format!(
            "padding {name} must be a percentage in 0..=100, got {v}"
        )));
    }
    Ok(())
}

/// Serialized configuration, every field optional.
///
/// This is the shape callers hand over (a JSON object or CLI flags). Converting it into a
/// [`LayoutConfig`] resolves defaults and validates. Padding keys that do not apply to the
/// selected layout are ignored.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ConfigDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Layout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas_height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas_ratio: Option<CanvasRatio>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<BackgroundColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<PaddingDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_wide_images: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_landscape_images: Option<bool>,
}

/// Serialized padding. Framing reads `left/right/top/bottom`, uniform reads
/// `uniform/orientation`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PaddingDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uniform: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Orientation>,
}

impl TryFrom<ConfigDocument> for LayoutConfig {
    type Error = PanelizerError;

    fn try_from(doc: ConfigDocument) -> Result<Self, Self::Error> {
        let pad = doc.padding.unwrap_or_default();
        let padding = match doc.layout.unwrap_or_default() {
            Layout::Framing => Padding::Framing(FramingPadding {
                left: pad.left.unwrap_or(0.0),
                right: pad.right.unwrap_or(0.0),
                top: pad.top.unwrap_or(0.0),
                bottom: pad.bottom.unwrap_or(0.0),
            }),
            Layout::Uniform => Padding::Uniform(UniformPadding {
                border: pad.uniform.unwrap_or(DEFAULT_UNIFORM_BORDER_PCT),
                orientation: pad.orientation.unwrap_or_default(),
            }),
        };

        let cfg = LayoutConfig {
            canvas_height: doc.canvas_height.unwrap_or(DEFAULT_CANVAS_HEIGHT),
            canvas_ratio: doc.canvas_ratio.unwrap_or_default(),
            background_color: doc.background_color.unwrap_or_default(),
            padding,
            split_wide_images: doc.split_wide_images.unwrap_or(false),
            stack_landscape_images: doc.stack_landscape_images.unwrap_or(false),
        };
        cfg.validate()?;
        Ok(cfg)
    }
}

impl From<LayoutConfig> for ConfigDocument {
    fn from(cfg: LayoutConfig) -> Self {
        let padding = match cfg.padding {
            Padding::Framing(p) => PaddingDocument {
                left: Some(p.left),
                right: Some(p.right),
                top: Some(p.top),
                bottom: Some(p.bottom),
                ..PaddingDocument::default()
            },
            Padding::Uniform(u) => PaddingDocument {
                uniform: Some(u.border),
                orientation: Some(u.orientation),
                ..PaddingDocument::default()
            },
        };
        Self {
            layout: Some(cfg.layout()),
            canvas_height: Some(cfg.canvas_height),
            canvas_ratio: Some(cfg.canvas_ratio),
            background_color: Some(cfg.background_color),
            padding: Some(padding),
            split_wide_images: Some(cfg.split_wide_images),
            stack_landscape_images: Some(cfg.stack_landscape_images),
        }
    }
}

impl FromStr for Layout {
    type Err = PanelizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "framing" => Ok(Self::Framing),
            "uniform" => Ok(Self::Uniform),
            other => Err(PanelizerError::validation(format!(
                "unknown layout '{other}' (expected framing|uniform)"
            ))),
        }
    }
}

impl FromStr for CanvasRatio {
    type Err = PanelizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|r| r.label() == s)
            .ok_or_else(|| {
                PanelizerError::validation(format!(
                    "unknown canvas ratio '{s}' (expected 3:4|4:5|2:3|9:16)"
                ))
            })
    }
}

impl FromStr for BackgroundColor {
    type Err = PanelizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| {
                PanelizerError::validation(format!(
                    "unknown background color '{s}' (expected white|black|lightgray|darkgray)"
                ))
            })
    }
}

impl FromStr for Orientation {
    type Err = PanelizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inward" => Ok(Self::Inward),
            "outward" => Ok(Self::Outward),
            other => Err(PanelizerError::validation(format!(
                "unknown orientation '{other}' (expected inward|outward)"
            ))),
        }
    }
}

impl fmt::Display for CanvasRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl fmt::Display for BackgroundColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
