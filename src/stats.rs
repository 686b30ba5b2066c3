/// Statistics primitives over trial samples
/// Functions taking `sorted` expect ascending order (see `sort_ascending`)

use crate::models::HistogramBin;

const MIN_BINS: f64 = 10.0;
const MAX_BINS: f64 = 15.0;
/// Target width of a histogram bin, in servings
const BIN_SPAN: f64 = 5.0;

pub fn sort_ascending(values: &mut [f64]) {
    values.sort_by(|a, b| a.total_cmp(b));
}

/// Arithmetic mean, 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median of a sorted slice, averaging the middle pair for even lengths
pub fn median(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        0.0
    } else if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Empirical percentile: the element at index `floor(level / 100 * len)`.
/// Levels of 100 and above return the maximum.
pub fn percentile(sorted: &[f64], level: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let index = ((level / 100.0) * sorted.len() as f64).floor().max(0.0) as usize;
    sorted[index.min(sorted.len() - 1)]
}

/// Equal-width histogram over `[floor(min), ceil(max)]` with 10 to 15 bins.
/// Bins are right-exclusive except the last one, and the bin holding
/// `marker` is flagged.
pub fn histogram(sorted: &[f64], marker: f64) -> Vec<HistogramBin> {
    let (Some(&min), Some(&max)) = (sorted.first(), sorted.last()) else {
        return Vec::new();
    };

    let lower = min.floor();
    let mut upper = max.ceil();
    if upper <= lower {
        // every sample sits on the same integer
        upper = lower + 1.0;
    }

    let bin_count = ((max - min) / BIN_SPAN).ceil().clamp(MIN_BINS, MAX_BINS) as usize;
    let width = (upper - lower) / bin_count as f64;
    let last = bin_count - 1;

    let mut bins: Vec<HistogramBin> = (0..bin_count)
        .map(|i| HistogramBin {
            lower_bound: lower + width * i as f64,
            upper_bound: if i == last { upper } else { lower + width * (i + 1) as f64 },
            count: 0,
            contains_recommendation: false,
        })
        .collect();

    for &value in sorted {
        bins[bin_index(value, lower, width, last)].count += 1;
    }

    if marker >= lower && marker <= upper {
        bins[bin_index(marker, lower, width, last)].contains_recommendation = true;
    }

    bins
}

fn bin_index(value: f64, lower: f64, width: f64, last: usize) -> usize {
    (((value - lower) / width).floor().max(0.0) as usize).min(last)
}
