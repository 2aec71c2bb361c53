use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::{
    config::model::{LayoutConfig, Padding},
    foundation::{
        core::{HAlign, Rect, Size},
        error::{PanelizerError, PanelizerResult},
    },
    geometry::{
        area::{EdgeModes, safe_area},
        panorama::plan_panorama,
        placement::{Placement, framing_placement, uniform_placement},
        stack::{normalized_sizes, plan_stack},
    },
    render::{
        canvas::{blank_canvas, compose, crop, dimensions, open_rgb, paste, resize_exact},
        writer::{
            ensure_output_dir, file_stem_lossy, panel_file_name, remove_outputs, stack_file_name,
            write_jpeg,
        },
    },
};

/// Placement of a `content`-sized image under `config`.
pub fn panel_placement(
    content: Size,
    config: &LayoutConfig,
    align: HAlign,
    edges: EdgeModes,
    bypass_resize: bool,
) -> Placement {
    match &config.padding {
        Padding::Framing(p) => framing_placement(
            content,
            config.canvas_size(),
            p,
            align,
            edges,
            bypass_resize,
        ),
        Padding::Uniform(u) => {
            uniform_placement(content, config.canvas_height, u, edges, bypass_resize)
        }
    }
}

/// Lay out one image on its panel.
pub fn compose_panel(
    img: &RgbImage,
    config: &LayoutConfig,
    align: HAlign,
    edges: EdgeModes,
    bypass_resize: bool,
) -> RgbImage {
    let placement = panel_placement(dimensions(img), config, align, edges, bypass_resize);
    compose(img, &placement, config.background_color)
}

/// Split a wide image into seamless panels, left to right.
pub fn compose_panorama(img: &RgbImage, config: &LayoutConfig) -> PanelizerResult<Vec<RgbImage>> {
    let safe = safe_area(config.canvas_size(), config);
    let plan = plan_panorama(dimensions(img), safe)?;
    tracing::debug!(
        panels = plan.slices.len(),
        projected_w = plan.projected.width,
        projected_h = plan.projected.height,
        "panorama plan"
    );

    let projected = resize_exact(img, plan.projected);
    Ok(plan
        .slices
        .iter()
        .map(|s| {
            let slice = crop(&projected, Rect::new(s.x, 0, s.width, plan.projected.height));
            compose_panel(&slice, config, s.align, s.edges, true)
        })
        .collect())
}

/// Stack 2-3 images vertically on one panel.
pub fn compose_stack(images: &[RgbImage], config: &LayoutConfig) -> PanelizerResult<RgbImage> {
    let sizes: Vec<Size> = images.iter().map(dimensions).collect();
    let normalized = normalized_sizes(&sizes);
    let plan = plan_stack(&normalized, config)?;
    tracing::debug!(
        images = images.len(),
        scale = plan.scale,
        gap = plan.gap,
        "stack plan"
    );

    let mut canvas = blank_canvas(plan.canvas, config.background_color);
    for (img, item) in images.iter().zip(&plan.items) {
        paste(&mut canvas, &resize_exact(img, item.size), item.offset);
    }
    Ok(canvas)
}

/// Render `img` as `<stem>_panel.jpg` next to `source`.
pub fn render_panel(
    img: &RgbImage,
    config: &LayoutConfig,
    source: &Path,
    align: HAlign,
) -> PanelizerResult<PathBuf> {
    let panel = compose_panel(img, config, align, EdgeModes::NORMAL, false);
    let out = ensure_output_dir(source)?.join(panel_file_name(&file_stem_lossy(source), ""));
    write_jpeg(&panel, &out)?;
    Ok(out)
}

/// Render `img` as `<stem>_1_panel.jpg`, `<stem>_2_panel.jpg`, ... next to `source`.
pub fn render_panorama(
    img: &RgbImage,
    config: &LayoutConfig,
    source: &Path,
) -> PanelizerResult<Vec<PathBuf>> {
    let panels = compose_panorama(img, config)?;
    let dir = ensure_output_dir(source)?;
    let stem = file_stem_lossy(source);
    let mut written = Vec::with_capacity(panels.len());
    for (i, panel) in panels.iter().enumerate() {
        let out = dir.join(panel_file_name(&stem, &format!("_{}", i + 1)));
        if let Err(e) = write_jpeg(panel, &out) {
            remove_outputs(&written);
            return Err(e);
        }
        written.push(out);
    }
    Ok(written)
}

/// Decode `paths` and render them as `<first stem>_stacked.jpg`.
pub fn render_stack(paths: &[PathBuf], config: &LayoutConfig) -> PanelizerResult<PathBuf> {
    let first = paths
        .first()
        .ok_or_else(|| PanelizerError::validation("render_stack called with no paths"))?;
    let images = paths
        .iter()
        .map(|p| open_rgb(p))
        .collect::<PanelizerResult<Vec<_>>>()?;
    let panel = compose_stack(&images, config)?;
    let out = ensure_output_dir(first)?.join(stack_file_name(&file_stem_lossy(first)));
    write_jpeg(&panel, &out)?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/render/panel.rs"]
mod tests;
