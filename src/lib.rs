//! Summary statistics for multimodal instruction datasets: image dimension
//! and whitespace-token length distributions, rendered as PNG histograms.

pub mod analysis;
pub mod config;
pub mod dataset;
pub mod dimensions;
pub mod histogram;
pub mod plot_hist;
pub mod progress;
pub mod tokenize;
