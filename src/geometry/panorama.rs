use crate::{
    foundation::{
        core::{HAlign, Size},
        error::{PanelizerError, PanelizerResult},
    },
    geometry::area::{EdgeMode, EdgeModes},
};

/// Single images wider than this (width / height) are split when splitting is enabled.
pub const WIDE_SPLIT_ASPECT: f64 = 1.5;

/// Narrowest trailing panel (width / safe height) allowed to stand on its own.
pub const MIN_SPLIT_ASPECT: f64 = 2.0 / 3.0;

/// Threshold multiplier for safe areas already narrower than [`MIN_SPLIT_ASPECT`].
const NARROW_SAFE_AREA_FACTOR: f64 = 0.25;

/// One left-to-right crop of the projected panorama.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PanoramaSlice {
    /// Zero-based position in the sequence.
    pub index: usize,
    /// Left edge of the crop in projected pixels.
    pub x: u32,
    pub width: u32,
    pub align: HAlign,
    /// Shared inner edges are suppressed so adjacent panels abut.
    pub edges: EdgeModes,
}

impl PanoramaSlice {
    /// File stem suffix, `_1`, `_2`, ...
    pub fn suffix(&self) -> String {
        format!("_{}", self.index + 1)
    }
}

/// How a wide source image is cut into panels.
#[derive(Clone, Debug, PartialEq)]
pub struct PanoramaPlan {
    pub safe: Size,
    /// Size the whole source is resized to before slicing.
    pub projected: Size,
    pub slices: Vec<PanoramaSlice>,
}

/// Whether a single image should go through [`plan_panorama`] when splitting is enabled.
pub fn is_wide(source: Size) -> bool {
    source.aspect() > WIDE_SPLIT_ASPECT
}

/// Plan the split of `source` into panels whose content area is `safe`.
///
/// The source is projected to the safe height and cut into `safe.width`-wide slices. When the
/// trailing slice would be thinner than the split threshold, the projection shrinks so the
/// content exactly fills one panel fewer.
pub fn plan_panorama(source: Size, safe: Size) -> PanelizerResult<PanoramaPlan> {
    source.ensure_non_empty("panorama source")?;
    safe.ensure_non_empty("panorama safe area")?;

    let safe_aspect = safe.aspect();
    let threshold = if safe_aspect < MIN_SPLIT_ASPECT {
        safe_aspect * NARROW_SAFE_AREA_FACTOR
    } else {
        MIN_SPLIT_ASPECT
    };

    let mut projected = source.scaled(f64::from(safe.height) / f64::from(source.height));
    let mut num_panels = projected.width.div_ceil(safe.width).max(1);

    let mut remainder = projected
        .width
        .saturating_sub((num_panels - 1) * safe.width);
    if remainder == 0 {
        remainder = safe.width;
    }
    let remainder_aspect = f64::from(remainder) / f64::from(safe.height);

    if num_panels > 1 && remainder_aspect < threshold {
        let target_w = (num_panels - 1) * safe.width;
        projected = source.scaled(f64::from(target_w) / f64::from(source.width));
        num_panels -= 1;
    }

    if projected.is_empty() {
        return Err(PanelizerError::validation(format!(
            "panorama projection of {}x{} into {}x{} is empty",
            source.width, source.height, safe.width, safe.height
        )));
    }

    let last = num_panels - 1;
    let slices = (0..num_panels)
        .map(|i| {
            let x = i * safe.width;
            let end = (x + safe.width).min(projected.width);
            let mut edges = EdgeModes::NORMAL;
            if i != last {
                edges = edges.with_right(EdgeMode::Suppressed);
            }
            if i != 0 {
                edges = edges.with_left(EdgeMode::Suppressed);
            }
            PanoramaSlice {
                index: i as usize,
                x,
                width: end.saturating_sub(x).max(1),
                align: if i == 0 { HAlign::Right } else { HAlign::Left },
                edges,
            }
        })
        .collect();

    Ok(PanoramaPlan {
        safe,
        projected,
        slices,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/panorama.rs"]
mod tests;
