//! Reference sequence access
//!
//! The coordinate space never owns reference data; it asks a
//! [`SequenceFetcher`] for the bases of a region.

use crate::core::error::{FetchError, FetchResult};
use std::collections::HashMap;

/// Asynchronous source of reference bases
///
/// `Ok(None)` means the source has no data for the region (unknown sequence,
/// region past the end); `Err` means the fetch itself failed.
#[allow(async_fn_in_trait)]
pub trait SequenceFetcher {
    async fn fetch(&self, chrom: &str, start: u64, end: u64) -> FetchResult<Option<String>>;
}

/// Reference sequences held in memory, keyed by sequence name
#[derive(Debug, Clone, Default)]
pub struct InMemoryReference {
    sequences: HashMap<String, String>,
}

impl InMemoryReference {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a sequence
    pub fn insert(&mut self, chrom: impl Into<String>, bases: impl Into<String>) {
        self.sequences.insert(chrom.into(), bases.into());
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Slice `[start, end)` of a sequence, clamped to its length
    pub fn slice(&self, chrom: &str, start: u64, end: u64) -> FetchResult<Option<&str>> {
        if start > end {
            return Err(FetchError::InvalidRange { start, end });
        }
        let Some(seq) = self.sequences.get(chrom) else {
            return Ok(None);
        };
        let len = seq.len() as u64;
        if start >= len {
            return Ok(None);
        }
        Ok(seq.get(start as usize..end.min(len) as usize))
    }
}

impl FromIterator<(String, String)> for InMemoryReference {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            sequences: iter.into_iter().collect(),
        }
    }
}

impl SequenceFetcher for InMemoryReference {
    async fn fetch(&self, chrom: &str, start: u64, end: u64) -> FetchResult<Option<String>> {
        Ok(self.slice(chrom, start, end)?.map(str::to_string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> InMemoryReference {
        let mut r = InMemoryReference::new();
        r.insert("chr1", "ACGTACGTAC");
        r
    }

    #[test]
    fn test_slice() {
        let r = reference();
        assert_eq!(r.slice("chr1", 0, 4).unwrap(), Some("ACGT"));
        assert_eq!(r.slice("chr1", 8, 20).unwrap(), Some("AC"));
        assert_eq!(r.slice("chr1", 10, 12).unwrap(), None);
        assert_eq!(r.slice("chr2", 0, 4).unwrap(), None);
        assert!(r.slice("chr1", 5, 4).is_err());
    }

    #[tokio::test]
    async fn test_fetch() {
        let r = reference();
        assert_eq!(r.fetch("chr1", 2, 5).await.unwrap(), Some("GTA".to_string()));
        assert_eq!(r.fetch("chrX", 2, 5).await.unwrap(), None);
    }
}
