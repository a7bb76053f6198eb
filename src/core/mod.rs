//! Core signal reduction and coordinate functionality
//!
//! This module contains the resolution-aware signal reducer, the
//! insertion-aware coordinate space, and the track/overlay helpers
//! built on them.

mod coords;
pub mod dna;
mod error;
mod fetch;
mod interval;
pub mod io;
mod overlay;
mod reducer;
mod track;

pub use coords::{CacheStats, CoordinateSpace, Insertion};
pub use error::{
    FetchError, FetchResult, ParseError, ParseResult, ReduceError, ReduceResult, Result,
    TrackError,
};
pub use fetch::{InMemoryReference, SequenceFetcher};
pub use interval::{first_disorder, SignalInterval};
pub use io::{detect_compression, open_input, CompressionFormat, DEFAULT_BUFFER_SIZE};
pub use overlay::{project_regions, ProjectedRegion, RegionOfInterest, Viewport};
pub use reducer::{consolidate, reduce, WindowFunction};
pub use track::SignalTrack;
