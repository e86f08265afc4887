mod external_command;
mod geometry_probe;
mod image_optimizer;
mod image_resizer;
mod output_dir;
mod path_validator;
mod sheet_compositor;
mod snapshot_extractor;

pub use external_command::run_command;
pub use geometry_probe::{GeometryProbe, IdentifyGeometryProbe};
pub use image_optimizer::{
    ImageOptimizer, JpegoptimOptimizer, OptipngOptimizer, optimize_all, optimizer_for,
};
pub use image_resizer::{
    DEFAULT_THUMB_WIDTH, ImageResizer, MogrifyResizer, SipsResizer, resize_all,
};
pub use output_dir::{prepare_output_dir, remove_bitrate_suffix};
pub use path_validator::{ensure_directory_exists, is_remote_video, validate_video_input};
pub use sheet_compositor::{MontageCompositor, SheetCompositor, sheet_paths, split_cells};
pub use snapshot_extractor::{
    FfmpegSnapshotExtractor, SNAPSHOT_PATTERN, SnapshotExtractor, collect_snapshots,
};
