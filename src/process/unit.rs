use std::path::{Path, PathBuf};

use crate::{
    config::model::LayoutConfig,
    foundation::{core::HAlign, error::PanelizerResult},
    geometry::panorama::is_wide,
    queue::builder::WorkUnit,
    render::{
        canvas::{dimensions, open_rgb},
        panel::{render_panel, render_panorama, render_stack},
        writer::write_failure_sidecar,
    },
};

/// Result of processing one [`WorkUnit`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UnitOutcome {
    /// Panels written, in order.
    Written(Vec<PathBuf>),
    /// None of the unit's paths exist. Nothing is written.
    Missing,
    /// Rendering failed. `sidecar` is the `.failed` file, if it could be written.
    Failed {
        sidecar: Option<PathBuf>,
        error: String,
    },
}

impl UnitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Written(_))
    }
}

/// Process one unit; `true` on success.
///
/// Failures never propagate: see [`process_unit_detailed`].
pub fn process_unit(unit: &WorkUnit) -> bool {
    process_unit_detailed(unit).is_success()
}

/// Process one unit, reporting what happened.
///
/// Paths that no longer exist are dropped first; a unit left empty is [`UnitOutcome::Missing`].
/// Any error while decoding, laying out or writing becomes a `.failed` sidecar next to the first
/// existing path. If the sidecar itself cannot be written the secondary failure is logged and
/// the unit is still reported as failed.
#[tracing::instrument(skip_all, fields(unit = %unit.display_name()))]
pub fn process_unit_detailed(unit: &WorkUnit) -> UnitOutcome {
    let valid: Vec<PathBuf> = unit.paths.iter().filter(|p| p.exists()).cloned().collect();
    let Some(first) = valid.first() else {
        tracing::warn!(paths = unit.paths.len(), "no source file exists, skipping unit");
        return UnitOutcome::Missing;
    };

    match render_unit(&valid, &unit.config) {
        Ok(written) => {
            tracing::info!(panels = written.len(), "unit exported");
            UnitOutcome::Written(written)
        }
        Err(err) => {
            tracing::warn!(error = %err, "unit failed");
            let sidecar = match write_failure_sidecar(first, &err) {
                Ok(path) => Some(path),
                Err(secondary) => {
                    tracing::warn!(
                        source_path = %first.display(),
                        error = %err,
                        secondary = %secondary,
                        "could not write failure sidecar"
                    );
                    None
                }
            };
            UnitOutcome::Failed {
                sidecar,
                error: err.to_string(),
            }
        }
    }
}

fn render_unit(valid: &[PathBuf], config: &LayoutConfig) -> PanelizerResult<Vec<PathBuf>> {
    config.validate()?;

    if valid.len() > 1 {
        return Ok(vec![render_stack(valid, config)?]);
    }

    let path: &Path = &valid[0];
    let img = open_rgb(path)?;
    if config.split_wide_images && is_wide(dimensions(&img)) {
        render_panorama(&img, config, path)
    } else {
        Ok(vec![render_panel(&img, config, path, HAlign::Center)?])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/process/unit.rs"]
mod tests;
