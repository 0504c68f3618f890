//! The full load -> filter -> measure -> plot pipeline.

use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::AnalysisConfig;
use crate::dataset::{DatasetError, filter_data, load_data};
use crate::dimensions::{DimensionError, calculate_image_dimensions_parallel};
use crate::plot_hist::{HistogramPlot, PlotError, plot_2d_histogram, plot_histogram};
use crate::tokenize::calculate_tokenized_lengths;

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    #[error(transparent)]
    Dimensions(#[from] DimensionError),
    #[error(transparent)]
    Plot(#[from] PlotError),
    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no image dimensions could be read: max() arg is an empty sequence")]
    NoDimensions,
}

/// What one run observed and where it wrote its charts.
#[derive(Debug, Clone)]
pub struct AnalysisSummary {
    pub total_items: usize,
    pub filtered_items: usize,
    pub failed_images: usize,
    pub max_width: u32,
    pub max_height: u32,
    pub token_samples: usize,
    pub dimension_plot: PathBuf,
    pub length_plot: PathBuf,
}

/// Base name of the dataset file with `.json` removed, used to name the charts.
pub fn output_prefix(json_path: &Path) -> String {
    json_path
        .file_name()
        .map(|n| n.to_string_lossy().replace(".json", ""))
        .unwrap_or_default()
}

pub fn run_analysis(config: &AnalysisConfig) -> Result<AnalysisSummary, AnalysisError> {
    let data = load_data(&config.json_path)?;
    let filtered = filter_data(&data);
    println!(
        "Total data items: {}, Filtered data items: {}",
        data.len(),
        filtered.len()
    );

    let dims = calculate_image_dimensions_parallel(
        &filtered,
        &config.images_folder,
        &config.dimension_config(),
    )?;
    let (Some(max_width), Some(max_height)) = (dims.max_width(), dims.max_height()) else {
        return Err(AnalysisError::NoDimensions);
    };
    println!("Max width: {max_width}, Max height: {max_height}");
    if dims.failed > 0 {
        println!("Failed to read {} images", dims.failed);
    }

    if !config.output_dir.as_os_str().is_empty() {
        fs::create_dir_all(&config.output_dir).map_err(|source| AnalysisError::OutputDir {
            path: config.output_dir.clone(),
            source,
        })?;
    }

    let prefix = output_prefix(&config.json_path);
    let dims_title = format!("dist_{prefix}_2d_w_h");
    let dimension_plot = plot_2d_histogram(
        &dims.widths,
        &dims.heights,
        &HistogramPlot {
            title: &dims_title,
            x_label: "Width",
            y_label: "Height",
            output_dir: &config.output_dir,
        },
        config.dim_bin_size,
    )?;

    let lengths = calculate_tokenized_lengths(&filtered, config.show_progress);
    info!("{} conversation turns tokenized", lengths.len());
    let length_title = format!("dist_{prefix}_tokenized_length");
    let length_plot = plot_histogram(
        &lengths,
        &HistogramPlot {
            title: &length_title,
            x_label: "Tokenized Length",
            y_label: "Count (log scale)",
            output_dir: &config.output_dir,
        },
        config.token_bin_width,
    )?;

    Ok(AnalysisSummary {
        total_items: data.len(),
        filtered_items: filtered.len(),
        failed_images: dims.failed,
        max_width,
        max_height,
        token_samples: lengths.len(),
        dimension_plot,
        length_plot,
    })
}
