use std::path::Path;

use image::{Rgb, RgbImage, imageops};

use crate::{
    config::model::BackgroundColor,
    foundation::{
        core::{Offset, Rect, Size},
        error::{PanelizerError, PanelizerResult},
    },
    geometry::placement::Placement,
};

/// Fully decode `path` and flatten it to RGB8. Alpha is dropped.
pub fn open_rgb(path: &Path) -> PanelizerResult<RgbImage> {
    let img = image::ImageReader::open(path)
        .map_err(|e| PanelizerError::io(path, e))?
        .with_guessed_format()
        .map_err(|e| PanelizerError::io(path, e))?
        .decode()
        .map_err(|e| PanelizerError::decode(path, e))?;
    Ok(img.to_rgb8())
}

/// Read only the header of `path`, sniffing the format from its contents like [`open_rgb`].
pub fn probe_dimensions(path: &Path) -> PanelizerResult<Size> {
    let (width, height) = image::ImageReader::open(path)
        .map_err(|e| PanelizerError::io(path, e))?
        .with_guessed_format()
        .map_err(|e| PanelizerError::io(path, e))?
        .into_dimensions()
        .map_err(|e| PanelizerError::decode(path, e))?;
    Ok(Size::new(width, height))
}

pub fn dimensions(img: &RgbImage) -> Size {
    Size::new(img.width(), img.height())
}

/// A `size` canvas filled with `color`.
pub fn blank_canvas(size: Size, color: BackgroundColor) -> RgbImage {
    RgbImage::from_pixel(size.width, size.height, Rgb(color.rgb()))
}

/// Lanczos resample to exactly `size`. Returns a copy when the size already matches.
pub fn resize_exact(img: &RgbImage, size: Size) -> RgbImage {
    if dimensions(img) == size {
        return img.clone();
    }
    imageops::resize(
        img,
        size.width.max(1),
        size.height.max(1),
        imageops::FilterType::Lanczos3,
    )
}

/// Copy out `rect`, clipped to the image bounds.
pub fn crop(img: &RgbImage, rect: Rect) -> RgbImage {
    imageops::crop_imm(img, rect.x, rect.y, rect.width, rect.height).to_image()
}

/// Replace the pixels under `layer` at `offset`; parts outside the canvas are dropped.
pub fn paste(canvas: &mut RgbImage, layer: &RgbImage, offset: Offset) {
    imageops::replace(canvas, layer, offset.x, offset.y);
}

/// Apply a [`Placement`] to `source`, producing the finished panel.
pub fn compose(source: &RgbImage, placement: &Placement, background: BackgroundColor) -> RgbImage {
    let mut canvas = blank_canvas(placement.canvas, background);
    let resized;
    let mut layer = source;
    if let Some(size) = placement.resize_to {
        resized = resize_exact(source, size);
        layer = &resized;
    }
    match placement.crop {
        Some(rect) => paste(&mut canvas, &crop(layer, rect), placement.offset),
        None => paste(&mut canvas, layer, placement.offset),
    }
    canvas
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
