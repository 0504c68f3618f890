use std::path::PathBuf;

use crate::dimensions::{DEFAULT_NUM_WORKERS, DimensionConfig};
use crate::plot_hist::DEFAULT_BIN_WIDTH;

/// Square bins used for the width x height heatmap.
pub const DEFAULT_DIM_BIN_SIZE: (u32, u32) = (100, 100);
pub const DEFAULT_TOKEN_BIN_WIDTH: usize = DEFAULT_BIN_WIDTH;

/// Everything one analysis run needs.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub json_path: PathBuf,
    pub images_folder: PathBuf,
    /// Where the PNG files are written.
    pub output_dir: PathBuf,
    pub num_workers: usize,
    pub dim_bin_size: (u32, u32),
    pub token_bin_width: usize,
    pub show_progress: bool,
}

impl AnalysisConfig {
    pub fn new(json_path: impl Into<PathBuf>, images_folder: impl Into<PathBuf>) -> Self {
        Self {
            json_path: json_path.into(),
            images_folder: images_folder.into(),
            output_dir: PathBuf::from("."),
            num_workers: DEFAULT_NUM_WORKERS,
            dim_bin_size: DEFAULT_DIM_BIN_SIZE,
            token_bin_width: DEFAULT_TOKEN_BIN_WIDTH,
            show_progress: true,
        }
    }

    pub fn dimension_config(&self) -> DimensionConfig {
        DimensionConfig {
            num_workers: self.num_workers,
            show_progress: self.show_progress,
        }
    }
}
