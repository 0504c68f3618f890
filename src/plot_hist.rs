use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

use crate::histogram::{Histogram1d, Histogram2d, HistogramError};

pub const DEFAULT_BIN_WIDTH: usize = 10;
pub const DEFAULT_2D_BIN_SIZE: (u32, u32) = (500, 500);

const BAR_SIZE: (u32, u32) = (1200, 600);
const HEATMAP_SIZE: (u32, u32) = (1200, 1200);
const COLORBAR_WIDTH: i32 = 110;
const LOG_FLOOR: f64 = 0.5;
const MAX_X_LABELS: usize = 60;

const BAR_FILL: RGBColor = RGBColor(31, 119, 180);

/// Title, axis labels and destination of one chart. The file is `<output_dir>/<title>.png`.
#[derive(Debug, Clone, Copy)]
pub struct HistogramPlot<'a> {
    pub title: &'a str,
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub output_dir: &'a Path,
}

impl HistogramPlot<'_> {
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.png", self.title))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    #[error(transparent)]
    Histogram(#[from] HistogramError),
    #[error("plot backend error: {0}")]
    Backend(String),
    #[error("failed to build {width}x{height} image buffer")]
    Buffer { width: u32, height: u32 },
    #[error("failed to write {path}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

fn backend<E: std::fmt::Display>(e: E) -> PlotError {
    PlotError::Backend(e.to_string())
}

/// Matplotlib-style "jet" colormap, `t` in `[0, 1]`.
fn jet(t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0);
    let channel = |offset: f64| ((1.5 - (4.0 * t - offset).abs()).clamp(0.0, 1.0) * 255.0) as u8;
    RGBColor(channel(3.0), channel(2.0), channel(1.0))
}

/// Renders into an RGB buffer of `size` and writes it as a PNG.
fn render_png<F>(path: &Path, size: (u32, u32), draw: F) -> Result<(), PlotError>
where
    F: FnOnce(&DrawingArea<BitMapBackend<'_>, Shift>) -> Result<(), PlotError>,
{
    let (width, height) = size;
    let pixel_count = (width as usize)
        .checked_mul(height as usize)
        .ok_or(PlotError::Buffer { width, height })?;
    let mut rgb = vec![255u8; pixel_count * 3];

    {
        let root = BitMapBackend::with_buffer(&mut rgb, size).into_drawing_area();
        root.fill(&WHITE).map_err(backend)?;
        draw(&root)?;
        root.present().map_err(backend)?;
    }

    let img = image::RgbImage::from_raw(width, height, rgb)
        .ok_or(PlotError::Buffer { width, height })?;
    img.save(path).map_err(|source| PlotError::Save {
        path: path.to_path_buf(),
        source,
    })
}

/// Bar chart of `values` in bins of `bin_width` with a logarithmic count axis.
///
/// Fails with [`HistogramError::EmptyInput`] before touching the filesystem
/// when `values` is empty.
pub fn plot_histogram(
    values: &[usize],
    plot: &HistogramPlot<'_>,
    bin_width: usize,
) -> Result<PathBuf, PlotError> {
    let hist = Histogram1d::from_values(values, bin_width)?;
    let path = plot.output_path();

    let x_end = hist.upper_edge() as f64;
    let y_top = (hist.max_count() as f64 * 2.0).max(2.0);
    // Bars one unit narrower than the bin leave a visible gap.
    let bar_width = (bin_width as f64 - 1.0).max(bin_width as f64 * 0.9);

    render_png(&path, BAR_SIZE, |root| {
        let mut chart = ChartBuilder::on(root)
            .caption(plot.title, ("sans-serif", 16))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(70)
            .build_cartesian_2d(0f64..x_end, (LOG_FLOOR..y_top).log_scale())
            .map_err(backend)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels((hist.counts.len() + 1).min(MAX_X_LABELS))
            .x_label_formatter(&|x| format!("{x:.0}"))
            .x_desc(plot.x_label)
            .y_desc(plot.y_label)
            .draw()
            .map_err(backend)?;

        let filled: Vec<(usize, u64)> = hist.bins().filter(|&(_, count)| count > 0).collect();
        chart
            .draw_series(filled.iter().map(|&(lo, count)| {
                let x0 = lo as f64;
                Rectangle::new(
                    [(x0, LOG_FLOOR), (x0 + bar_width, count as f64)],
                    BAR_FILL.filled(),
                )
            }))
            .map_err(backend)?;
        chart
            .draw_series(filled.iter().map(|&(lo, count)| {
                let x0 = lo as f64;
                Rectangle::new(
                    [(x0, LOG_FLOOR), (x0 + bar_width, count as f64)],
                    BLACK.stroke_width(1),
                )
            }))
            .map_err(backend)?;
        Ok(())
    })?;

    info!("wrote {}", path.display());
    Ok(path)
}

/// Density heatmap of `(width, height)` pairs with a colour bar.
///
/// The title is suffixed with the observed maxima.
pub fn plot_2d_histogram(
    widths: &[u32],
    heights: &[u32],
    plot: &HistogramPlot<'_>,
    bin_size: (u32, u32),
) -> Result<PathBuf, PlotError> {
    let hist = Histogram2d::from_pairs(widths, heights, bin_size)?;
    let path = plot.output_path();

    let max_width = widths.iter().copied().max().unwrap_or_default();
    let max_height = heights.iter().copied().max().unwrap_or_default();
    let caption = format!(
        "{} | Max width: {max_width}, Max height: {max_height}",
        plot.title
    );
    let max_density = hist.max_density();
    let (x_end, y_end) = hist.upper_edges();

    render_png(&path, HEATMAP_SIZE, |root| {
        let (main, bar) = root.split_horizontally(HEATMAP_SIZE.0 as i32 - COLORBAR_WIDTH);

        let mut chart = ChartBuilder::on(&main)
            .caption(&caption, ("sans-serif", 18))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(70)
            .build_cartesian_2d(
                f64::from(hist.x_origin)..x_end as f64,
                f64::from(hist.y_origin)..y_end as f64,
            )
            .map_err(backend)?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc(plot.x_label)
            .y_desc(plot.y_label)
            .draw()
            .map_err(backend)?;

        let (bw, bh) = (f64::from(hist.bin_size.0), f64::from(hist.bin_size.1));
        let (x0, y0) = (f64::from(hist.x_origin), f64::from(hist.y_origin));
        chart
            .draw_series(
                (0..hist.rows())
                    .flat_map(|row| (0..hist.cols()).map(move |col| (row, col)))
                    .map(|(row, col)| {
                        let left = x0 + col as f64 * bw;
                        let bottom = y0 + row as f64 * bh;
                        let color = jet(hist.density(row, col) / max_density);
                        Rectangle::new([(left, bottom), (left + bw, bottom + bh)], color.filled())
                    }),
            )
            .map_err(backend)?;

        draw_colorbar(&bar, max_density)
    })?;

    info!("wrote {}", path.display());
    Ok(path)
}

fn draw_colorbar(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    max_density: f64,
) -> Result<(), PlotError> {
    const STEPS: usize = 256;
    let mut chart = ChartBuilder::on(area)
        .margin_top(60)
        .margin_bottom(80)
        .margin_right(10)
        .y_label_area_size(70)
        .build_cartesian_2d(0f64..1.0, 0f64..max_density)
        .map_err(backend)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_labels(6)
        .y_label_formatter(&|v| format!("{v:.1e}"))
        .draw()
        .map_err(backend)?;

    let step = max_density / STEPS as f64;
    chart
        .draw_series((0..STEPS).map(|i| {
            let lo = i as f64 * step;
            let color = jet(i as f64 / (STEPS - 1) as f64);
            Rectangle::new([(0.0, lo), (1.0, lo + step)], color.filled())
        }))
        .map_err(backend)?;
    Ok(())
}
