use crate::{
    config::model::{FramingPadding, Orientation, UniformPadding},
    foundation::core::{HAlign, Offset, PixelEdges, Rect, Size, scale_px},
    geometry::area::{EdgeModes, base_padding, inset, uniform_border_px},
};

/// Where and how one source image lands on its canvas.
///
/// Applied in order: resize the source to `resize_to` (if any), crop to `crop` (if any), then
/// paste the result at `offset` on a background-filled canvas of size `canvas`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub canvas: Size,
    pub resize_to: Option<Size>,
    pub crop: Option<Rect>,
    pub offset: Offset,
}

impl Placement {
    /// Size of the pasted layer for a source of size `source`.
    pub fn content_size(&self, source: Size) -> Size {
        match (self.crop, self.resize_to) {
            (Some(c), _) => c.size(),
            (None, Some(r)) => r,
            (None, None) => source,
        }
    }
}

/// Largest size with `content`'s aspect ratio that fits inside `bounds`.
///
/// The axis that binds is set exactly to the bound; the other is rounded half-to-even. Upscales
/// as well as downscales.
pub fn contain_size(content: Size, bounds: Size) -> Size {
    if content.is_empty() || bounds.is_empty() {
        return bounds;
    }
    let im_ratio = content.aspect();
    let dest_ratio = bounds.aspect();
    if im_ratio > dest_ratio {
        let h = (f64::from(content.height) / f64::from(content.width) * f64::from(bounds.width))
            .round_ties_even() as u32;
        Size::new(bounds.width, h.max(1))
    } else if im_ratio < dest_ratio {
        let w = (f64::from(content.width) / f64::from(content.height)
            * f64::from(bounds.height))
        .round_ties_even() as u32;
        Size::new(w.max(1), bounds.height)
    } else {
        bounds
    }
}

/// Framing placement on a fixed `canvas`.
///
/// Content is contained in the safe area left by `padding` (with suppressed edges zeroed),
/// aligned horizontally per `align` and centered vertically. With `bypass_resize` the content
/// keeps its own size; panorama slices are pre-sized this way.
pub fn framing_placement(
    content: Size,
    canvas: Size,
    padding: &FramingPadding,
    align: HAlign,
    edges: EdgeModes,
    bypass_resize: bool,
) -> Placement {
    let pad = edges.apply(base_padding(canvas, padding));
    let safe = inset(canvas, pad);

    let placed = if bypass_resize {
        content
    } else {
        contain_size(content, safe)
    };

    let y = i64::from(pad.top) + centered(safe.height, placed.height);
    let x = match align {
        HAlign::Left => i64::from(pad.left),
        HAlign::Right => {
            i64::from(canvas.width) - i64::from(pad.right) - i64::from(placed.width)
        }
        HAlign::Center => i64::from(pad.left) + centered(safe.width, placed.width),
    };

    Placement {
        canvas,
        resize_to: (placed != content).then_some(placed),
        crop: None,
        offset: Offset::new(x, y),
    }
}

/// Uniform-border placement. The canvas follows the image rather than a fixed ratio.
///
/// The source is scaled to exactly `canvas_height` tall. Outward borders grow the canvas around
/// the intact image; inward borders keep the canvas at the scaled size and trim the image edges
/// so the background shows through. Pre-sized content (`bypass_resize`) always gets the
/// outward treatment, with suppressed edges contributing no border.
pub fn uniform_placement(
    content: Size,
    canvas_height: u32,
    padding: &UniformPadding,
    edges: EdgeModes,
    bypass_resize: bool,
) -> Placement {
    let border = edges.apply(PixelEdges::uniform(uniform_border_px(canvas_height, padding)));

    let scaled = if bypass_resize {
        content
    } else {
        let scale = if content.height == 0 {
            1.0
        } else {
            f64::from(canvas_height) / f64::from(content.height)
        };
        Size::new(scale_px(content.width, scale).max(1), canvas_height)
    };
    let resize_to = (scaled != content).then_some(scaled);
    let offset = Offset::new(i64::from(border.left), i64::from(border.top));

    if padding.orientation == Orientation::Outward || bypass_resize {
        return Placement {
            canvas: Size::new(
                scaled.width.saturating_add(border.horizontal()),
                scaled.height.saturating_add(border.vertical()),
            ),
            resize_to,
            crop: None,
            offset,
        };
    }

    Placement {
        canvas: scaled,
        resize_to,
        crop: Some(inward_crop(scaled, border)),
        offset,
    }
}

/// Crop box trimming `border` off every edge. Degenerate boxes collapse to the 1x1 region at
/// the image center.
fn inward_crop(size: Size, border: PixelEdges) -> Rect {
    let right = size.width.saturating_sub(border.right);
    let bottom = size.height.saturating_sub(border.bottom);
    if right <= border.left || bottom <= border.top {
        return Rect::new(size.width / 2, size.height / 2, 1, 1);
    }
    Rect::new(border.left, border.top, right - border.left, bottom - border.top)
}

/// Offset that centers `inner` within `outer`, flooring like integer division.
fn centered(outer: u32, inner: u32) -> i64 {
    (i64::from(outer) - i64::from(inner)).div_euclid(2)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/placement.rs"]
mod tests;
