//! Signal track preparation
//!
//! Applies value scaling and resolution-aware reduction to the features of
//! one track before they are handed to a renderer.

use crate::core::error::ReduceResult;
use crate::core::interval::SignalInterval;
use crate::core::reducer::{reduce, WindowFunction};

/// Per-track settings for numeric (wig / bigwig / bedGraph) data
#[derive(Debug, Clone, PartialEq)]
pub struct SignalTrack {
    /// Aggregation applied when several bases share a pixel
    pub window_function: WindowFunction,
    /// Reduce features to the current resolution
    pub summarize: bool,
    /// User scale factor
    pub scale_factor: Option<f64>,
    /// Normalization factor supplied by the data source
    pub normalization_factor: Option<f64>,
}

impl Default for SignalTrack {
    fn default() -> Self {
        Self {
            window_function: WindowFunction::Mean,
            summarize: true,
            scale_factor: None,
            normalization_factor: None,
        }
    }
}

impl SignalTrack {
    pub fn new(window_function: WindowFunction) -> Self {
        Self {
            window_function,
            ..Self::default()
        }
    }

    pub fn with_scale_factor(mut self, factor: f64) -> Self {
        self.scale_factor = Some(factor);
        self
    }

    pub fn with_normalization_factor(mut self, factor: f64) -> Self {
        self.normalization_factor = Some(factor);
        self
    }

    pub fn with_summarize(mut self, summarize: bool) -> Self {
        self.summarize = summarize;
        self
    }

    /// Scale then reduce features for display
    ///
    /// # Arguments
    /// * `features` - Features of one sequence, sorted and non-overlapping
    /// * `start` - Left edge of the visible region (bin origin)
    /// * `bp_per_pixel` - Current resolution
    pub fn prepare(
        &self,
        mut features: Vec<SignalInterval>,
        start: u64,
        bp_per_pixel: f64,
    ) -> ReduceResult<Vec<SignalInterval>> {
        for factor in [self.normalization_factor, self.scale_factor].into_iter().flatten() {
            for f in features.iter_mut() {
                f.value *= factor;
            }
        }

        if self.summarize && self.window_function.is_aggregating() {
            reduce(&features, start, bp_per_pixel, self.window_function)
        } else {
            Ok(features)
        }
    }
}
