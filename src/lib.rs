//! VariantTrack - signal reduction and insertion-aware coordinates
//!
//! The non-visual core of a genome track renderer.
//!
//! # Features
//!
//! - Resolution-aware reduction of numeric tracks to one mean/min/max
//!   value per pixel bin
//! - Expanded coordinate space that reserves room for inserted bases,
//!   with a cached forward mapping and its inverse
//! - Expanded reference sequence with insertions spliced in
//!
//! # Example
//!
//! ```
//! use variant_track::{reduce, CoordinateSpace, SignalInterval, WindowFunction};
//!
//! // Reduce three bases to one 3 bp bin
//! let features = vec![
//!     SignalInterval::new("chr1", 0, 1, 1.0),
//!     SignalInterval::new("chr1", 1, 2, 2.0),
//!     SignalInterval::new("chr1", 2, 3, 3.0),
//! ];
//! let bins = reduce(&features, 0, 3.0, WindowFunction::Max).unwrap();
//! assert_eq!(bins[0].value, 3.0);
//!
//! // Shift coordinates past an insertion
//! let mut space = CoordinateSpace::new();
//! space.add_insertion("chr1", 100, "AAA");
//! assert_eq!(space.genomic_to_expanded("chr1", 105), 108);
//! assert_eq!(space.expanded_to_genomic("chr1", 108), 105);
//! ```

pub mod core;
pub mod formats;

// Re-export commonly used types
pub use self::core::{
    consolidate, project_regions, reduce, CacheStats, CoordinateSpace, FetchError, InMemoryReference,
    Insertion, ParseError, ProjectedRegion, ReduceError, RegionOfInterest, SequenceFetcher,
    SignalInterval, SignalTrack, TrackError, Viewport, WindowFunction,
};
pub use formats::{bed, fasta, vcf, wig};
