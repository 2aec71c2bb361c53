//! Panelizer lays photos out on fixed-ratio canvases for carousel-style posting.
//!
//! A batch of input files becomes a queue of work units; each unit renders to one or more
//! JPEG panels written into a `panelizer_output` directory next to its source.
//!
//! # Pipeline overview
//!
//! 1. **Queue**: [`build_queue`] groups consecutive compatible landscape images into stacks
//!    and leaves everything else as single-image units.
//! 2. **Plan**: pure geometry ([`framing_placement`], [`uniform_placement`],
//!    [`plan_panorama`], [`plan_stack`]) turns source sizes and a [`LayoutConfig`] into
//!    canvas sizes, resize targets, crops and offsets.
//! 3. **Render**: [`process_unit`] decodes, composes and writes the unit. A failing unit
//!    leaves a `.failed` sidecar and never aborts the rest of the batch.
//!
//! Two layout modes exist:
//!
//! - **Framing**: a fixed canvas (`canvas_height` by ratio) with per-side percentage padding.
//!   Images wider than [`WIDE_SPLIT_ASPECT`] may be split into panorama slices.
//! - **Uniform**: the canvas follows the image; one border percentage of `canvas_height`
//!   either grows the canvas (outward) or is cropped into the image (inward).
#![forbid(unsafe_code)]

mod config;
mod foundation;
mod geometry;
mod process;
mod queue;
mod render;

pub use config::model::{
    BackgroundColor, CanvasRatio, ConfigDocument, DEFAULT_CANVAS_HEIGHT,
    DEFAULT_UNIFORM_BORDER_PCT, FramingPadding, Layout, LayoutConfig, Orientation, Padding,
    PaddingDocument, UniformPadding,
};
pub use foundation::core::{HAlign, Offset, PixelEdges, Rect, Size};
pub use foundation::error::{PanelizerError, PanelizerResult};
pub use geometry::area::{EdgeMode, EdgeModes, base_padding, safe_area, uniform_border_px};
pub use geometry::panorama::{
    MIN_SPLIT_ASPECT, PanoramaPlan, PanoramaSlice, WIDE_SPLIT_ASPECT, is_wide, plan_panorama,
};
pub use geometry::placement::{Placement, contain_size, framing_placement, uniform_placement};
pub use geometry::stack::{
    FRAMING_STACK_GAP_PCT, MAX_STACK_LEN, STACK_MAX_ASPECT, STACK_MIN_ASPECT,
    STACK_RATIO_TOLERANCE, StackItem, StackPlan, is_compatible_aspect, is_stackable_aspect,
    normalized_sizes, plan_stack,
};
pub use process::batch::{BatchOptions, BatchReport, process_batch, run_batch};
pub use process::unit::{UnitOutcome, process_unit, process_unit_detailed};
pub use queue::builder::{
    IMAGE_EXTENSIONS, WorkUnit, build_queue, build_queue_with, collect_images, queue_names,
};
pub use render::canvas::{
    blank_canvas, compose, crop, dimensions, open_rgb, paste, probe_dimensions, resize_exact,
};
pub use render::panel::{
    compose_panel, compose_panorama, compose_stack, panel_placement, render_panel,
    render_panorama, render_stack,
};
pub use render::writer::{
    FAILED_EXTENSION, JPEG_QUALITY, OUTPUT_DIR_NAME, PANEL_SUFFIX, STACK_SUFFIX,
    ensure_output_dir, failure_message, file_stem_lossy, output_dir_for, panel_file_name,
    remove_outputs, stack_file_name, write_failure_sidecar, write_jpeg,
};
