//! Resolution-aware signal reduction
//!
//! Collapses sorted, non-overlapping numeric intervals into one summary
//! value per bin (typically one bin per screen pixel).
//!
//! The reduction is a single streaming pass:
//! 1. Compute the first and last bin each feature touches
//! 2. Fold the feature into the open bin if it starts there
//! 3. If the feature reaches past the open bin, close it, emit any
//!    multi-bin span as a pass-through interval, and open the feature's
//!    last bin
//! 4. Merge neighbouring outputs with identical values

use crate::core::error::{ReduceError, ReduceResult};
use crate::core::interval::{first_disorder, SignalInterval};
use std::fmt;
use std::str::FromStr;

/// Aggregation applied to the values falling into one bin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum WindowFunction {
    #[default]
    Mean,
    Min,
    Max,
    /// No reduction, features are passed through at any resolution
    None,
}

impl WindowFunction {
    pub fn as_str(&self) -> &'static str {
        match self {
            WindowFunction::Mean => "mean",
            WindowFunction::Min => "min",
            WindowFunction::Max => "max",
            WindowFunction::None => "none",
        }
    }

    /// Whether this function produces a per-bin summary
    pub fn is_aggregating(&self) -> bool {
        !matches!(self, WindowFunction::None)
    }
}

impl FromStr for WindowFunction {
    type Err = ReduceError;

    /// # Examples
    /// ```
    /// use variant_track::core::WindowFunction;
    ///
    /// assert_eq!("mean".parse::<WindowFunction>(), Ok(WindowFunction::Mean));
    /// assert_eq!("MAX".parse::<WindowFunction>(), Ok(WindowFunction::Max));
    /// assert!("median".parse::<WindowFunction>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mean" => Ok(WindowFunction::Mean),
            "min" => Ok(WindowFunction::Min),
            "max" => Ok(WindowFunction::Max),
            "none" => Ok(WindowFunction::None),
            _ => Err(ReduceError::InvalidWindowFunction(s.to_string())),
        }
    }
}

impl fmt::Display for WindowFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed-width bins anchored at an origin
#[derive(Debug, Clone, Copy)]
struct BinGrid {
    origin: u64,
    bin_size: f64,
}

impl BinGrid {
    /// Bin index containing `pos` (negative left of the origin)
    ///
    /// The float quotient can land one bin off for sizes such as 1.1, so the
    /// estimate is nudged until `bin_start(bin) <= pos < bin_start(bin + 1)`.
    #[inline]
    fn bin_of(&self, pos: u64) -> i64 {
        let mut bin = ((pos as f64 - self.origin as f64) / self.bin_size).floor() as i64;
        while bin > i64::MIN && self.bin_start(bin) > pos {
            bin -= 1;
        }
        while bin < i64::MAX && self.bin_start(bin + 1) <= pos {
            bin += 1;
        }
        bin
    }

    /// First integer position of bin `bin`
    ///
    /// For integral sizes this is `origin + bin * bin_size`.
    #[inline]
    fn bin_start(&self, bin: i64) -> u64 {
        let offset = (bin as f64 * self.bin_size).ceil() as i64;
        (self.origin as i64).saturating_add(offset).max(0) as u64
    }
}

/// Running summary of the values that fell into one bin
#[derive(Debug, Clone, PartialEq)]
struct BinAccumulator {
    bin: i64,
    sum: f64,
    count: usize,
    min: f64,
    max: f64,
}

impl BinAccumulator {
    fn seed(bin: i64, value: f64) -> Self {
        Self {
            bin,
            sum: value,
            count: 1,
            min: value,
            max: value,
        }
    }

    fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    fn aggregate(&self, window_function: WindowFunction) -> ReduceResult<f64> {
        match window_function {
            WindowFunction::Mean => Ok(self.sum / self.count as f64),
            WindowFunction::Min => Ok(self.min),
            WindowFunction::Max => Ok(self.max),
            WindowFunction::None => Err(ReduceError::InvalidWindowFunction(
                window_function.to_string(),
            )),
        }
    }

    fn finish(
        self,
        grid: &BinGrid,
        window_function: WindowFunction,
        chrom: &str,
    ) -> ReduceResult<SignalInterval> {
        let value = self.aggregate(window_function)?;
        Ok(
            SignalInterval::new(chrom, grid.bin_start(self.bin), grid.bin_start(self.bin + 1), value)
                .with_description(format!("{} of {} values", window_function, self.count)),
        )
    }
}

/// Streaming state: either no bin is open, or exactly one is
#[derive(Debug)]
enum BinState {
    Closed,
    Open(BinAccumulator),
}

impl BinState {
    fn step(
        self,
        feature: &SignalInterval,
        grid: &BinGrid,
        window_function: WindowFunction,
        chrom: &str,
        out: &mut Vec<SignalInterval>,
    ) -> ReduceResult<BinState> {
        let mut start_bin = grid.bin_of(feature.start);
        // Bin of the last covered base, so a feature ending on a bin boundary
        // does not open the following bin
        let end_bin = grid.bin_of(feature.end.saturating_sub(1).max(feature.start));

        let mut open = match self {
            BinState::Open(acc) => Some(acc),
            BinState::Closed => None,
        };

        if let Some(acc) = open.as_mut() {
            if acc.bin == start_bin {
                acc.add(feature.value);
                start_bin += 1;
            }
        }

        match open {
            Some(acc) if end_bin <= acc.bin => Ok(BinState::Open(acc)),
            open => {
                if let Some(acc) = open {
                    out.push(acc.finish(grid, window_function, chrom)?);
                }
                if end_bin > start_bin {
                    // Wide feature: pass through at its own value up to its last bin
                    let start = feature.start.max(grid.bin_start(start_bin));
                    out.push(SignalInterval::new(
                        chrom,
                        start,
                        grid.bin_start(end_bin),
                        feature.value,
                    ));
                }
                Ok(BinState::Open(BinAccumulator::seed(end_bin, feature.value)))
            }
        }
    }
}

/// Reduce numeric features to one summary interval per bin
///
/// # Arguments
/// * `features` - Intervals on one sequence, sorted by start, non-overlapping
/// * `origin` - Position of the left edge of bin 0
/// * `bin_size` - Bases per bin (bases per pixel)
/// * `window_function` - Aggregation applied within a bin
///
/// # Returns
/// The input unchanged when `bin_size <= 1`, the input is empty, or the
/// window function is `None`; otherwise the consolidated summary intervals.
///
/// # Examples
/// ```
/// use variant_track::core::{reduce, SignalInterval, WindowFunction};
///
/// let features = vec![
///     SignalInterval::new("chr1", 0, 1, 1.0),
///     SignalInterval::new("chr1", 1, 2, 2.0),
///     SignalInterval::new("chr1", 2, 3, 3.0),
/// ];
/// let reduced = reduce(&features, 0, 3.0, WindowFunction::Mean).unwrap();
/// assert_eq!(reduced.len(), 1);
/// assert_eq!(reduced[0].value, 2.0);
/// ```
pub fn reduce(
    features: &[SignalInterval],
    origin: u64,
    bin_size: f64,
    window_function: WindowFunction,
) -> ReduceResult<Vec<SignalInterval>> {
    if !bin_size.is_finite() {
        return Err(ReduceError::InvalidBinSize(bin_size));
    }
    if bin_size <= 1.0 || features.is_empty() || !window_function.is_aggregating() {
        return Ok(features.to_vec());
    }

    if let Some(index) = first_disorder(features) {
        log::warn!(
            "Signal features are unsorted or overlapping at index {} ({}:{}-{}); reduction is best-effort",
            index,
            features[index].chrom,
            features[index].start,
            features[index].end
        );
    }

    let grid = BinGrid { origin, bin_size };
    let chrom = features[0].chrom.as_str();
    let mut summary = Vec::with_capacity(features.len().min(4096));

    let mut state = BinState::Closed;
    for feature in features {
        state = state.step(feature, &grid, window_function, chrom, &mut summary)?;
    }
    if let BinState::Open(acc) = state {
        summary.push(acc.finish(&grid, window_function, chrom)?);
    }

    Ok(consolidate(summary))
}

/// Merge neighbouring intervals that touch or overlap and carry the same value
///
/// Exact float equality is intended: only identical aggregates merge.
#[allow(clippy::float_cmp)]
pub fn consolidate(intervals: Vec<SignalInterval>) -> Vec<SignalInterval> {
    let mut merged: Vec<SignalInterval> = Vec::with_capacity(intervals.len());
    for iv in intervals {
        match merged.last_mut() {
            Some(last) if last.value == iv.value && iv.start <= last.end => {
                last.end = iv.end;
            }
            _ => merged.push(iv),
        }
    }
    merged
}
