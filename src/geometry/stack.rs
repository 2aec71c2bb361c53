use crate::{
    config::model::{LayoutConfig, Orientation, Padding},
    foundation::{
        core::{Offset, Size, percent_of, scale_px},
        error::{PanelizerError, PanelizerResult},
    },
    geometry::area::{base_padding, safe_area, uniform_border_px},
};

/// Lower (exclusive) aspect bound for stackable landscape images.
pub const STACK_MIN_ASPECT: f64 = 1.77;
/// Upper (exclusive) aspect bound; wider images are left for panorama splitting.
pub const STACK_MAX_ASPECT: f64 = 2.2;
/// Maximum relative aspect deviation between a stack anchor and its followers.
pub const STACK_RATIO_TOLERANCE: f64 = 0.05;
/// Maximum number of images in one stack.
pub const MAX_STACK_LEN: usize = 3;
/// Gap between framing-stack images, as a percentage of canvas height.
pub const FRAMING_STACK_GAP_PCT: f64 = 5.0;

/// One image of a planned stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StackItem {
    /// Final pasted size.
    pub size: Size,
    pub offset: Offset,
}

/// Canvas and per-image placement for a vertical stack.
#[derive(Clone, Debug, PartialEq)]
pub struct StackPlan {
    pub canvas: Size,
    /// Single scale factor applied to every width-normalized image.
    pub scale: f64,
    pub gap: u32,
    pub items: Vec<StackItem>,
}

pub fn is_stackable_aspect(aspect: f64) -> bool {
    STACK_MIN_ASPECT < aspect && aspect < STACK_MAX_ASPECT
}

/// Whether `next` may join a stack anchored by an image of aspect `anchor`.
pub fn is_compatible_aspect(anchor: f64, next: f64) -> bool {
    is_stackable_aspect(next) && (anchor - next).abs() / anchor <= STACK_RATIO_TOLERANCE
}

/// Bring every size to the widest width, scaling heights to match.
pub fn normalized_sizes(sizes: &[Size]) -> Vec<Size> {
    let max_w = sizes.iter().map(|s| s.width).max().unwrap_or(0);
    sizes
        .iter()
        .map(|&s| {
            if s.width == max_w || s.width == 0 {
                s
            } else {
                let h = scale_px(s.height, f64::from(max_w) / f64::from(s.width));
                Size::new(max_w, h.max(1))
            }
        })
        .collect()
}

/// Plan a vertical stack of width-normalized images (see [`normalized_sizes`]).
///
/// Framing stacks use the fixed-ratio canvas: one scale factor contains the whole block
/// (including gaps) in the safe area, the block is centered vertically in the safe area and
/// each image horizontally on the canvas. Uniform stacks size the canvas around the block, with
/// the border doubling as the gap: outward keeps the images at their normalized size, inward
/// scales the block to fill the canvas height inside the border.
pub fn plan_stack(normalized: &[Size], config: &LayoutConfig) -> PanelizerResult<StackPlan> {
    if normalized.len() < 2 {
        return Err(PanelizerError::validation(format!(
            "a stack needs at least 2 images, got {}",
            normalized.len()
        )));
    }
    for s in normalized {
        s.ensure_non_empty("stack image")?;
    }

    let n = normalized.len() as u32;
    let max_w = normalized.iter().map(|s| s.width).max().unwrap_or(0);
    let total_h: u32 = normalized.iter().map(|s| s.height).sum();

    match &config.padding {
        Padding::Framing(pad) => {
            let canvas = config.canvas_size();
            let top = base_padding(canvas, pad).top;
            let gap = percent_of(canvas.height, FRAMING_STACK_GAP_PCT);
            let total_gaps = gap * (n - 1);
            let safe = safe_area(canvas, config);
            let available_h = fit_height(safe.height, total_gaps)?;

            let scale_w = f64::from(safe.width) / f64::from(max_w);
            let scale_h = f64::from(available_h) / f64::from(total_h);
            let scale = scale_w.min(scale_h);

            let sizes: Vec<Size> = normalized.iter().map(|s| scaled_item(*s, scale)).collect();
            let block_h = sizes.iter().map(|s| s.height).sum::<u32>() + total_gaps;
            let mut y = i64::from(top) + (i64::from(safe.height) - i64::from(block_h)).div_euclid(2);

            let items = sizes
                .into_iter()
                .map(|size| {
                    let x = (i64::from(canvas.width) - i64::from(size.width)).div_euclid(2);
                    let item = StackItem {
                        size,
                        offset: Offset::new(x, y),
                    };
                    y += i64::from(size.height) + i64::from(gap);
                    item
                })
                .collect();

            Ok(StackPlan {
                canvas,
                scale,
                gap,
                items,
            })
        }
        Padding::Uniform(u) => {
            let border = uniform_border_px(config.canvas_height, u);
            let gap = border;
            let total_gaps = gap * (n - 1);

            let (scale, sizes, canvas_h) = match u.orientation {
                Orientation::Outward => {
                    let canvas_h = total_h + total_gaps + 2 * border;
                    (1.0, normalized.to_vec(), canvas_h)
                }
                Orientation::Inward => {
                    let canvas_h = config.canvas_height;
                    let available_h =
                        fit_height(canvas_h.saturating_sub(2 * border), total_gaps)?;
                    let scale = f64::from(available_h) / f64::from(total_h);
                    let sizes = normalized.iter().map(|s| scaled_item(*s, scale)).collect();
                    (scale, sizes, canvas_h)
                }
            };

            let block_w = sizes.iter().map(|s: &Size| s.width).max().unwrap_or(0);
            let canvas = Size::new(block_w + 2 * border, canvas_h);

            let mut y = i64::from(border);
            let items = sizes
                .into_iter()
                .map(|size| {
                    let item = StackItem {
                        size,
                        offset: Offset::new(i64::from(border), y),
                    };
                    y += i64::from(size.height) + i64::from(gap);
                    item
                })
                .collect();

            Ok(StackPlan {
                canvas,
                scale,
                gap,
                items,
            })
        }
    }
}

fn fit_height(safe_h: u32, total_gaps: u32) -> PanelizerResult<u32> {
    match safe_h.checked_sub(total_gaps) {
        Some(h) if h > 0 => Ok(h),
        _ => Err(PanelizerError::validation(format!(
            "stack gaps ({total_gaps}px) leave no room in a {safe_h}px safe area"
        ))),
    }
}

fn scaled_item(s: Size, scale: f64) -> Size {
    Size::new(
        scale_px(s.width, scale).max(1),
        scale_px(s.height, scale).max(1),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/stack.rs"]
mod tests;
