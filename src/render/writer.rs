use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use image::{RgbImage, codecs::jpeg::JpegEncoder};

use crate::foundation::error::{PanelizerError, PanelizerResult};

/// Name of the output directory created next to each source file.
pub const OUTPUT_DIR_NAME: &str = "panelizer_output";
/// JPEG quality for every written panel. The encoder keeps full-resolution chroma (4:4:4).
pub const JPEG_QUALITY: u8 = 95;
pub const PANEL_SUFFIX: &str = "_panel";
pub const STACK_SUFFIX: &str = "_stacked";
pub const FAILED_EXTENSION: &str = "failed";

/// `<parent of source>/panelizer_output`.
pub fn output_dir_for(source: &Path) -> PathBuf {
    source
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(OUTPUT_DIR_NAME)
}

/// Create the output directory for `source` if it does not exist yet.
pub fn ensure_output_dir(source: &Path) -> PanelizerResult<PathBuf> {
    let dir = output_dir_for(source);
    std::fs::create_dir_all(&dir).map_err(|e| PanelizerError::io(&dir, e))?;
    Ok(dir)
}

pub fn file_stem_lossy(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// `<stem><suffix>_panel.jpg`, where `suffix` is `""` or a panorama index like `_2`.
pub fn panel_file_name(stem: &str, suffix: &str) -> String {
    format!("{stem}{suffix}{PANEL_SUFFIX}.jpg")
}

/// `<stem>_stacked.jpg`.
pub fn stack_file_name(stem: &str) -> String {
    format!("{stem}{STACK_SUFFIX}.jpg")
}

/// Encode `img` as a quality-95 baseline JPEG at `path`.
///
/// On failure the partially written file is removed.
pub fn write_jpeg(img: &RgbImage, path: &Path) -> PanelizerResult<()> {
    let f = File::create(path).map_err(|e| PanelizerError::io(path, e))?;
    if let Err(e) = encode_jpeg(img, f, path) {
        remove_outputs(&[path.to_path_buf()]);
        return Err(e);
    }
    tracing::debug!(path = %path.display(), width = img.width(), height = img.height(), "wrote panel");
    Ok(())
}

fn encode_jpeg(img: &RgbImage, f: File, path: &Path) -> PanelizerResult<()> {
    let mut w = BufWriter::new(f);
    img.write_with_encoder(JpegEncoder::new_with_quality(&mut w, JPEG_QUALITY))
        .map_err(|e| PanelizerError::encode(path, e))?;
    w.flush().map_err(|e| PanelizerError::io(path, e))
}

/// Best-effort removal of panels already written for a unit that went on to fail.
pub fn remove_outputs(paths: &[PathBuf]) {
    for p in paths {
        if let Err(e) = std::fs::remove_file(p)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!(path = %p.display(), error = %e, "could not remove partial output");
        }
    }
}

/// Diagnostic text stored in a `.failed` sidecar.
pub fn failure_message(source: &Path, error: &dyn std::fmt::Display) -> String {
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.display().to_string());
    format!("Export failed for {name} (or stack).\nDetails: {error}")
}

/// Write `<output dir>/<file name>.failed` describing `error`.
pub fn write_failure_sidecar(
    source: &Path,
    error: &dyn std::fmt::Display,
) -> PanelizerResult<PathBuf> {
    let dir = ensure_output_dir(source)?;
    let mut name = source
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".");
    name.push(FAILED_EXTENSION);
    let path = dir.join(name);
    std::fs::write(&path, failure_message(source, error))
        .map_err(|e| PanelizerError::io(&path, e))?;
    Ok(path)
}

#[cfg(test)]
#[path = "../../tests/unit/render/writer.rs"]
mod tests;
