//! Fixed-width binning used by the renderers in [`crate::plot_hist`].
//!
//! All bins are half-open, `[lo, lo + width)`, and the bin count is chosen so
//! the largest value always lands in the last bin.

use log::debug;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HistogramError {
    #[error("max() arg is an empty sequence")]
    EmptyInput,
    #[error("bin width must be non-zero")]
    ZeroBinWidth,
    #[error("width/height length mismatch: {widths} widths, {heights} heights")]
    LengthMismatch { widths: usize, heights: usize },
}

/// Counts of values in bins `[k * bin_width, (k + 1) * bin_width)` starting at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram1d {
    pub bin_width: usize,
    pub counts: Vec<u64>,
}

impl Histogram1d {
    pub fn from_values(values: &[usize], bin_width: usize) -> Result<Self, HistogramError> {
        if bin_width == 0 {
            return Err(HistogramError::ZeroBinWidth);
        }
        let max = values.iter().copied().max().ok_or(HistogramError::EmptyInput)?;
        let mut counts = vec![0u64; max / bin_width + 1];
        for &v in values {
            counts[v / bin_width] += 1;
        }
        debug!("{} values into {} bins of width {bin_width}", values.len(), counts.len());
        Ok(Self { bin_width, counts })
    }

    /// `(lower_edge, count)` for every bin.
    pub fn bins(&self) -> impl Iterator<Item = (usize, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(|(i, &c)| (i * self.bin_width, c))
    }

    /// Upper edge of the last bin.
    pub fn upper_edge(&self) -> usize {
        self.counts.len() * self.bin_width
    }

    pub fn count_at(&self, value: usize) -> u64 {
        self.counts.get(value / self.bin_width).copied().unwrap_or(0)
    }

    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// Width x height counts over bins anchored at the observed minima.
///
/// `counts[row][col]`: `row` indexes height bins, `col` width bins.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram2d {
    pub x_origin: u32,
    pub y_origin: u32,
    pub bin_size: (u32, u32),
    pub counts: Vec<Vec<u64>>,
    pub total: u64,
}

impl Histogram2d {
    pub fn from_pairs(
        widths: &[u32],
        heights: &[u32],
        bin_size: (u32, u32),
    ) -> Result<Self, HistogramError> {
        if bin_size.0 == 0 || bin_size.1 == 0 {
            return Err(HistogramError::ZeroBinWidth);
        }
        if widths.len() != heights.len() {
            return Err(HistogramError::LengthMismatch {
                widths: widths.len(),
                heights: heights.len(),
            });
        }
        let (Some(&x_min), Some(&x_max)) = (widths.iter().min(), widths.iter().max()) else {
            return Err(HistogramError::EmptyInput);
        };
        let (Some(&y_min), Some(&y_max)) = (heights.iter().min(), heights.iter().max()) else {
            return Err(HistogramError::EmptyInput);
        };

        let cols = ((x_max - x_min) / bin_size.0 + 1) as usize;
        let rows = ((y_max - y_min) / bin_size.1 + 1) as usize;
        let mut counts = vec![vec![0u64; cols]; rows];
        for (&w, &h) in widths.iter().zip(heights) {
            let col = ((w - x_min) / bin_size.0) as usize;
            let row = ((h - y_min) / bin_size.1) as usize;
            counts[row][col] += 1;
        }
        debug!("{} pairs into {rows}x{cols} bins of {bin_size:?}", widths.len());

        Ok(Self {
            x_origin: x_min,
            y_origin: y_min,
            bin_size,
            counts,
            total: widths.len() as u64,
        })
    }

    pub fn cols(&self) -> usize {
        self.counts.first().map_or(0, Vec::len)
    }

    pub fn rows(&self) -> usize {
        self.counts.len()
    }

    /// Probability density of a cell: integrates to 1 over the binned area.
    pub fn density(&self, row: usize, col: usize) -> f64 {
        let area = f64::from(self.bin_size.0) * f64::from(self.bin_size.1);
        self.counts[row][col] as f64 / (self.total as f64 * area)
    }

    pub fn max_density(&self) -> f64 {
        (0..self.rows())
            .flat_map(|r| (0..self.cols()).map(move |c| (r, c)))
            .map(|(r, c)| self.density(r, c))
            .fold(0.0, f64::max)
    }

    /// Upper edges `(x, y)` of the last column and row.
    pub fn upper_edges(&self) -> (u64, u64) {
        (
            u64::from(self.x_origin) + self.cols() as u64 * u64::from(self.bin_size.0),
            u64::from(self.y_origin) + self.rows() as u64 * u64::from(self.bin_size.1),
        )
    }
}
