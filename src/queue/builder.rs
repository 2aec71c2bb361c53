use std::path::{Path, PathBuf};

use crate::{
    config::model::LayoutConfig,
    foundation::{
        core::Size,
        error::{PanelizerError, PanelizerResult},
    },
    geometry::stack::{MAX_STACK_LEN, is_compatible_aspect, is_stackable_aspect},
    render::canvas::probe_dimensions,
};

/// File extensions picked up by [`collect_images`].
pub const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// One independently processable unit: one image, or a run of stackable landscape images.
#[derive(Clone, Debug, PartialEq)]
pub struct WorkUnit {
    /// Source files, in queue order. Never empty when built by [`build_queue`].
    pub paths: Vec<PathBuf>,
    pub config: LayoutConfig,
}

impl WorkUnit {
    pub fn single(path: impl Into<PathBuf>, config: LayoutConfig) -> Self {
        Self {
            paths: vec![path.into()],
            config,
        }
    }

    pub fn is_stack(&self) -> bool {
        self.paths.len() > 1
    }

    /// Display label: `Stack (N): <first>...` for stacks, the bare file name otherwise.
    pub fn display_name(&self) -> String {
        let first = self
            .paths
            .first()
            .map(|p| file_name_lossy(p))
            .unwrap_or_default();
        if self.is_stack() {
            format!("Stack ({}): {first}...", self.paths.len())
        } else {
            first
        }
    }
}

/// Group `files` into work units.
///
/// Without stacking every file becomes its own unit. With stacking, a file whose aspect falls in
/// the stack band absorbs up to two immediately following files of compatible aspect.
/// Unreadable files never stack. Only image headers are read.
#[tracing::instrument(skip_all, fields(files = files.len(), stacking = config.stack_landscape_images))]
pub fn build_queue<P: AsRef<Path>>(files: &[P], config: &LayoutConfig) -> Vec<WorkUnit> {
    build_queue_with(files, config, |p| {
        probe_dimensions(p)
            .inspect_err(|e| tracing::debug!(path = %p.display(), error = %e, "dimension probe failed"))
            .ok()
    })
}

/// [`build_queue`] with a caller-supplied dimension probe (`None` = unreadable).
pub fn build_queue_with<P, F>(files: &[P], config: &LayoutConfig, mut probe: F) -> Vec<WorkUnit>
where
    P: AsRef<Path>,
    F: FnMut(&Path) -> Option<Size>,
{
    if !config.stack_landscape_images {
        return files
            .iter()
            .map(|f| WorkUnit::single(f.as_ref(), *config))
            .collect();
    }

    let mut aspects: Vec<Option<Option<f64>>> = vec![None; files.len()];
    let mut aspect_at = |i: usize| -> Option<f64> {
        *aspects[i].get_or_insert_with(|| {
            probe(files[i].as_ref())
                .filter(|s| !s.is_empty())
                .map(Size::aspect)
        })
    };

    let mut queue = Vec::new();
    let mut i = 0;
    while i < files.len() {
        let mut run = vec![files[i].as_ref().to_path_buf()];

        if let Some(anchor) = aspect_at(i).filter(|a| is_stackable_aspect(*a)) {
            while run.len() < MAX_STACK_LEN {
                let j = i + run.len();
                if j >= files.len() {
                    break;
                }
                match aspect_at(j) {
                    Some(next) if is_compatible_aspect(anchor, next) => {
                        run.push(files[j].as_ref().to_path_buf());
                    }
                    _ => break,
                }
            }
        }

        if run.len() > 1 {
            tracing::debug!(anchor = %run[0].display(), len = run.len(), "stacked landscape run");
        }
        i += run.len();
        queue.push(WorkUnit {
            paths: run,
            config: *config,
        });
    }
    queue
}

/// One display label per unit of `build_queue(files, config)`.
pub fn queue_names<P: AsRef<Path>>(files: &[P], config: &LayoutConfig) -> Vec<String> {
    build_queue(files, config)
        .iter()
        .map(WorkUnit::display_name)
        .collect()
}

/// Image files directly inside `dir` (jpg/jpeg/png, case-insensitive), sorted by file name.
pub fn collect_images(dir: &Path) -> PanelizerResult<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| PanelizerError::io(dir, e))?;
    let mut out = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| PanelizerError::io(dir, e))?;
        let path = entry.path();
        if path.is_file() && has_image_extension(&path) {
            out.push(path);
        }
    }
    out.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(out)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|ok| e.eq_ignore_ascii_case(ok))
        })
        .unwrap_or(false)
}

fn file_name_lossy(p: &Path) -> String {
    p.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| p.display().to_string())
}

#[cfg(test)]
#[path = "../../tests/unit/queue/builder.rs"]
mod tests;
