use crate::foundation::error::{PanelizerError, PanelizerResult};

/// Integer pixel dimensions.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width over height. Zero-height sizes report an aspect of 0.
    pub fn aspect(self) -> f64 {
        if self.height == 0 {
            0.0
        } else {
            f64::from(self.width) / f64::from(self.height)
        }
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Scale both axes by `factor`, truncating toward zero.
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            width: scale_px(self.width, factor),
            height: scale_px(self.height, factor),
        }
    }

    pub fn ensure_non_empty(self, what: &str) -> PanelizerResult<Self> {
        if self.is_empty() {
            return Err(PanelizerError::validation(format!(
                "{what} must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(self)
    }
}

impl From<(u32, u32)> for Size {
    fn from((width, height): (u32, u32)) -> Self {
        Self { width, height }
    }
}

/// Top-left position of a layer pasted onto a canvas. May be negative for layers that
/// overhang the canvas edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Offset {
    pub x: i64,
    pub y: i64,
}

impl Offset {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned pixel rectangle (crop boxes, placed content).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn size(self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Per-edge pixel amounts (padding, borders).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelEdges {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl PixelEdges {
    pub const fn uniform(px: u32) -> Self {
        Self {
            left: px,
            right: px,
            top: px,
            bottom: px,
        }
    }

    pub fn horizontal(self) -> u32 {
        self.left.saturating_add(self.right)
    }

    pub fn vertical(self) -> u32 {
        self.top.saturating_add(self.bottom)
    }
}

/// Horizontal alignment of content inside its safe area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// `value * factor`, truncated, never negative.
pub(crate) fn scale_px(value: u32, factor: f64) -> u32 {
    (f64::from(value) * factor) as u32
}

/// `total * pct / 100`, truncated. Percentages are clamped to be non-negative.
pub(crate) fn percent_of(total: u32, pct: f64) -> u32 {
    (f64::from(total) * (pct.max(0.0) / 100.0)) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
