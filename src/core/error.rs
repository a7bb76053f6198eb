//! Error types for VariantTrack
//!
//! Defines all error types used throughout the library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for VariantTrack operations
#[derive(Debug, Error)]
pub enum TrackError {
    /// Signal reduction errors
    #[error("Reduction error: {0}")]
    Reduce(#[from] ReduceError),

    /// Reference sequence fetch errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Input format errors
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while reducing signal data to bins
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReduceError {
    /// Aggregation mode outside of mean/min/max
    #[error("Unknown window function: {0}")]
    InvalidWindowFunction(String),

    /// Bin size that cannot address a coordinate axis
    #[error("Invalid bin size: {0}")]
    InvalidBinSize(f64),
}

/// Errors raised by a reference sequence fetch
#[derive(Debug, Error)]
pub enum FetchError {
    /// The fetcher could not produce the requested region
    #[error("Failed to fetch {chrom}:{start}-{end}: {message}")]
    Failed {
        chrom: String,
        start: u64,
        end: u64,
        message: String,
    },

    /// Requested region is not a valid half-open range
    #[error("Invalid fetch range: start ({start}) > end ({end})")]
    InvalidRange { start: u64, end: u64 },

    /// I/O error while reading reference data
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while reading host input formats
#[derive(Debug, Error)]
pub enum ParseError {
    /// Invalid wiggle / bedGraph content
    #[error("Invalid wiggle data at line {line}: {message}")]
    InvalidWig { line: usize, message: String },

    /// Invalid VCF record
    #[error("Invalid VCF format at line {line}: {message}")]
    InvalidVcf { line: usize, message: String },

    /// Invalid BED record
    #[error("Invalid BED format at line {line}: {message}")]
    InvalidBed { line: usize, message: String },

    /// Invalid FASTA content
    #[error("Invalid FASTA format at line {line}: {message}")]
    InvalidFasta { line: usize, message: String },

    /// Input file not found
    #[error("Input file not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O error during parsing
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for VariantTrack operations
pub type Result<T> = std::result::Result<T, TrackError>;

/// Result type alias for reduction operations
pub type ReduceResult<T> = std::result::Result<T, ReduceError>;

/// Result type alias for reference fetches
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for input parsing
pub type ParseResult<T> = std::result::Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduce_error_message() {
        let err = ReduceError::InvalidWindowFunction("median".to_string());
        assert_eq!(err.to_string(), "Unknown window function: median");
    }

    #[test]
    fn test_fetch_error_message() {
        let err = FetchError::Failed {
            chrom: "chr1".to_string(),
            start: 10,
            end: 20,
            message: "timeout".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to fetch chr1:10-20: timeout");
    }

    #[test]
    fn test_track_error_from() {
        let err: TrackError = ReduceError::InvalidBinSize(f64::NAN).into();
        assert!(matches!(err, TrackError::Reduce(_)));

        let err: TrackError = ParseError::FileNotFound(PathBuf::from("x.wig")).into();
        assert!(err.to_string().contains("x.wig"));
    }
}
