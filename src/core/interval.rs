//! Numeric interval features
//!
//! The unit of data exchanged between the feature-loading layer, the
//! signal reducer and the rendering layer.

/// A numeric value over a half-open genomic interval `[start, end)`
#[derive(Debug, Clone, PartialEq)]
pub struct SignalInterval {
    /// Sequence (chromosome) name
    pub chrom: String,
    /// Start position (0-based, inclusive)
    pub start: u64,
    /// End position (0-based, exclusive)
    pub end: u64,
    /// Signal value
    pub value: f64,
    /// Optional summary text, e.g. "mean of 12 values"
    pub description: Option<String>,
}

impl SignalInterval {
    pub fn new(chrom: impl Into<String>, start: u64, end: u64, value: f64) -> Self {
        Self {
            chrom: chrom.into(),
            start,
            end,
            value,
            description: None,
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Interval length in bases
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Format as bedGraph line
    pub fn to_bedgraph_line(&self) -> String {
        format!("{}\t{}\t{}\t{}", self.chrom, self.start, self.end, self.value)
    }
}

/// Check the reducer's input invariant: ascending by start and non-overlapping
///
/// Returns the index of the first feature that breaks the invariant.
pub fn first_disorder(features: &[SignalInterval]) -> Option<usize> {
    features
        .windows(2)
        .position(|w| w[1].start < w[0].start || w[0].end > w[1].start)
        .map(|i| i + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_len_and_empty() {
        let iv = SignalInterval::new("chr1", 10, 25, 1.0);
        assert_eq!(iv.len(), 15);
        assert!(!iv.is_empty());
        assert!(SignalInterval::new("chr1", 5, 5, 0.0).is_empty());
    }

    #[test]
    fn test_to_bedgraph_line() {
        let iv = SignalInterval::new("chr2", 100, 200, 1.5).with_description("mean of 2 values");
        assert_eq!(iv.to_bedgraph_line(), "chr2\t100\t200\t1.5");
        assert_eq!(iv.description.as_deref(), Some("mean of 2 values"));
    }

    #[test]
    fn test_first_disorder() {
        let sorted = vec![
            SignalInterval::new("chr1", 0, 10, 1.0),
            SignalInterval::new("chr1", 10, 20, 2.0),
        ];
        assert_eq!(first_disorder(&sorted), None);

        let overlapping = vec![
            SignalInterval::new("chr1", 0, 15, 1.0),
            SignalInterval::new("chr1", 10, 20, 2.0),
        ];
        assert_eq!(first_disorder(&overlapping), Some(1));

        let unsorted = vec![
            SignalInterval::new("chr1", 0, 5, 1.0),
            SignalInterval::new("chr1", 30, 40, 2.0),
            SignalInterval::new("chr1", 10, 20, 3.0),
        ];
        assert_eq!(first_disorder(&unsorted), Some(2));
    }
}
