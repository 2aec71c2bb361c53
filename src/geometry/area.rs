use crate::{
    config::model::{FramingPadding, LayoutConfig, Orientation, Padding, UniformPadding},
    foundation::core::{PixelEdges, Size, percent_of},
};

/// How a single canvas edge treats its configured padding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EdgeMode {
    /// Apply the configured padding/border.
    #[default]
    Normal,
    /// Force this edge to zero so content runs flush to the canvas edge.
    Suppressed,
}

/// Per-edge [`EdgeMode`]s for one panel.
///
/// Panorama slices suppress their shared inner edges so neighbouring panels abut.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct EdgeModes {
    pub left: EdgeMode,
    pub right: EdgeMode,
    pub top: EdgeMode,
    pub bottom: EdgeMode,
}

impl EdgeModes {
    pub const NORMAL: Self = Self {
        left: EdgeMode::Normal,
        right: EdgeMode::Normal,
        top: EdgeMode::Normal,
        bottom: EdgeMode::Normal,
    };

    pub const fn with_left(self, left: EdgeMode) -> Self {
        Self { left, ..self }
    }

    pub const fn with_right(self, right: EdgeMode) -> Self {
        Self { right, ..self }
    }

    /// Zero every suppressed edge of `edges`.
    pub fn apply(self, edges: PixelEdges) -> PixelEdges {
        fn pick(mode: EdgeMode, px: u32) -> u32 {
            match mode {
                EdgeMode::Normal => px,
                EdgeMode::Suppressed => 0,
            }
        }
        PixelEdges {
            left: pick(self.left, edges.left),
            right: pick(self.right, edges.right),
            top: pick(self.top, edges.top),
            bottom: pick(self.bottom, edges.bottom),
        }
    }
}

/// Framing padding in pixels: left/right relative to `target.width`, top/bottom to
/// `target.height`.
pub fn base_padding(target: Size, padding: &FramingPadding) -> PixelEdges {
    PixelEdges {
        left: percent_of(target.width, padding.left),
        right: percent_of(target.width, padding.right),
        top: percent_of(target.height, padding.top),
        bottom: percent_of(target.height, padding.bottom),
    }
}

/// Uniform border in pixels, relative to the canvas height.
pub fn uniform_border_px(canvas_height: u32, padding: &UniformPadding) -> u32 {
    percent_of(canvas_height, padding.border)
}

/// Content area of a `canvas`-sized panel under `config`.
///
/// Outward uniform borders grow the canvas instead, so the safe area is the whole canvas.
/// Padding larger than the canvas clamps the result to zero rather than wrapping.
pub fn safe_area(canvas: Size, config: &LayoutConfig) -> Size {
    match &config.padding {
        Padding::Uniform(u) => match u.orientation {
            Orientation::Outward => canvas,
            Orientation::Inward => {
                let border = uniform_border_px(canvas.height, u);
                inset(canvas, PixelEdges::uniform(border))
            }
        },
        Padding::Framing(p) => inset(canvas, base_padding(canvas, p)),
    }
}

pub(crate) fn inset(size: Size, edges: PixelEdges) -> Size {
    Size::new(
        size.width.saturating_sub(edges.horizontal()),
        size.height.saturating_sub(edges.vertical()),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/area.rs"]
mod tests;
