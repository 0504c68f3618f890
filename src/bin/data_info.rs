use clap::Parser;
use env_logger::{Env, Target};
use std::error::Error;
use std::path::PathBuf;

use dataset_info::analysis::run_analysis;
use dataset_info::config::{AnalysisConfig, DEFAULT_DIM_BIN_SIZE, DEFAULT_TOKEN_BIN_WIDTH};
use dataset_info::dimensions::DEFAULT_NUM_WORKERS;

#[derive(Parser, Debug)]
#[command(
    name = "data_info",
    about = "Image size and conversation length distributions of a multimodal dataset",
    version
)]
struct Cli {
    /// Path to the JSON file containing data
    #[arg(long = "json_path")]
    json_path: PathBuf,

    /// Path to the folder containing images
    #[arg(long = "images_folder")]
    images_folder: PathBuf,

    /// Directory the histogram PNGs are written to
    #[arg(long = "output_dir", default_value = ".")]
    output_dir: PathBuf,

    /// Worker threads used to read image headers
    #[arg(long = "num_workers", default_value_t = DEFAULT_NUM_WORKERS)]
    num_workers: usize,

    /// Width and height of each cell in the 2D size histogram
    #[arg(long = "dim_bin_size", default_value_t = DEFAULT_DIM_BIN_SIZE.0)]
    dim_bin_size: u32,

    /// Bin width of the tokenized length histogram
    #[arg(long = "token_bin_width", default_value_t = DEFAULT_TOKEN_BIN_WIDTH)]
    token_bin_width: usize,

    /// Hide progress bars
    #[arg(long = "no_progress")]
    no_progress: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stdout)
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();

    let mut config = AnalysisConfig::new(cli.json_path, cli.images_folder);
    config.output_dir = cli.output_dir;
    config.num_workers = cli.num_workers;
    config.dim_bin_size = (cli.dim_bin_size, cli.dim_bin_size);
    config.token_bin_width = cli.token_bin_width;
    config.show_progress = !cli.no_progress;

    let summary = run_analysis(&config)?;
    println!(
        "Wrote {} and {}",
        summary.dimension_plot.display(),
        summary.length_plot.display()
    );

    Ok(())
}
