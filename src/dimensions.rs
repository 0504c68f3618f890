//! Image dimension extraction, fanned out over a fixed-size worker pool.

use image::{ImageError, ImageReader};
use log::{error, info};
use rayon::prelude::*;
use std::path::Path;

use crate::dataset::Record;
use crate::progress::progress_bar;

pub const DEFAULT_NUM_WORKERS: usize = 96;

#[derive(Debug, Clone)]
pub struct DimensionConfig {
    /// Worker threads in the extraction pool. `0` lets rayon pick.
    pub num_workers: usize,
    pub show_progress: bool,
}

impl Default for DimensionConfig {
    fn default() -> Self {
        Self {
            num_workers: DEFAULT_NUM_WORKERS,
            show_progress: true,
        }
    }
}

/// Widths and heights of the images that could be read, in input order.
///
/// `widths[i]` and `heights[i]` belong to the same image. `failed` counts the
/// records whose image could not be read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DimensionStats {
    pub widths: Vec<u32>,
    pub heights: Vec<u32>,
    pub failed: usize,
}

impl DimensionStats {
    pub fn max_width(&self) -> Option<u32> {
        self.widths.iter().copied().max()
    }

    pub fn max_height(&self) -> Option<u32> {
        self.heights.iter().copied().max()
    }

    fn from_samples(samples: Vec<Option<(u32, u32)>>) -> Self {
        let mut stats = Self::default();
        for sample in samples {
            match sample {
                Some((w, h)) => {
                    stats.widths.push(w);
                    stats.heights.push(h);
                }
                None => stats.failed += 1,
            }
        }
        stats
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DimensionError {
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

fn read_dimensions(path: &Path) -> Result<(u32, u32), ImageError> {
    // Header-only read; the file is closed when the reader is dropped.
    let reader = ImageReader::open(path)?.with_guessed_format()?;
    reader.into_dimensions()
}

/// Reads the pixel size of the record's image.
///
/// Failures are logged with the resolved path and reported as `None` so a
/// single bad file never stops the batch.
pub fn calculate_image_dimension(record: &Record, images_folder: &Path) -> Option<(u32, u32)> {
    let Some(image) = record.image.as_deref() else {
        error!("Error opening record without image key");
        return None;
    };
    let image_path = images_folder.join(image);
    match read_dimensions(&image_path) {
        Ok(dims) => Some(dims),
        Err(e) => {
            error!("Error opening {}: {e}", image_path.display());
            None
        }
    }
}

/// Maps [`calculate_image_dimension`] over `records` on a dedicated pool.
///
/// Results are collected in input order; failed reads are dropped from the
/// width/height sequences and counted in [`DimensionStats::failed`].
pub fn calculate_image_dimensions_parallel(
    records: &[&Record],
    images_folder: &Path,
    config: &DimensionConfig,
) -> Result<DimensionStats, DimensionError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.num_workers)
        .thread_name(|i| format!("dims-{i}"))
        .build()?;
    info!(
        "reading dimensions of {} images with {} workers",
        records.len(),
        pool.current_num_threads()
    );

    let pb = progress_bar(
        records.len(),
        "Calculating image dimensions",
        config.show_progress,
    );
    let samples: Vec<Option<(u32, u32)>> = pool.install(|| {
        records
            .par_iter()
            .map(|record| {
                let dims = calculate_image_dimension(record, images_folder);
                pb.inc(1);
                dims
            })
            .collect()
    });
    pb.finish();

    Ok(DimensionStats::from_samples(samples))
}
