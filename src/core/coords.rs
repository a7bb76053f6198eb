//! Insertion-aware coordinate space
//!
//! Maps genomic (reference) positions to an expanded axis that reserves room
//! for inserted bases, and back.
//!
//! For a sequence with insertions `I` sorted by position:
//! ```text
//! expanded(pos) = pos + Σ len(i.bases) for i in I where i.pos < pos
//! ```
//! The bases of an insertion at `pos` sit right after the reference base at
//! `pos`, i.e. on expanded positions `expanded(pos) + 1 ..= expanded(pos) + len`.

use crate::core::error::FetchResult;
use crate::core::fetch::SequenceFetcher;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

/// Bases inserted after a reference position
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Insertion {
    /// Genomic position (0-based) of the base the insertion follows
    pub pos: u64,
    /// Inserted bases
    pub bases: String,
}

impl Insertion {
    pub fn new(pos: u64, bases: impl Into<String>) -> Self {
        Self {
            pos,
            bases: bases.into(),
        }
    }

    /// Number of inserted bases
    #[inline]
    pub fn len(&self) -> u64 {
        self.bases.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }
}

/// Statistics for the position cache
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of positions currently cached
    pub size: usize,
}

impl CacheStats {
    /// Hit rate as a percentage
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

/// Cache of genomic -> expanded positions, keyed by sequence then position
#[derive(Debug, Default)]
struct PositionCache {
    entries: RwLock<HashMap<String, HashMap<u64, u64>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl PositionCache {
    fn get(&self, chrom: &str, pos: u64) -> Option<u64> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        match entries.get(chrom).and_then(|m| m.get(&pos)) {
            Some(expanded) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(*expanded)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    fn insert(&self, chrom: &str, pos: u64, expanded: u64) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        match entries.get_mut(chrom) {
            Some(m) => {
                m.insert(pos, expanded);
            }
            None => {
                entries.insert(chrom.to_string(), HashMap::from([(pos, expanded)]));
            }
        }
    }

    fn clear(&mut self) {
        self.entries
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(HashMap::len)
            .sum()
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            size: self.len(),
        }
    }
}

/// Per-session registry of insertions with forward/backward coordinate mapping
///
/// Mutators take `&mut self`, so no query can observe a half-applied edit.
/// Every edit clears the whole position cache.
#[derive(Debug, Default)]
pub struct CoordinateSpace {
    /// Sequence -> insertions sorted by position, at most one per position
    insertions: HashMap<String, Vec<Insertion>>,
    cache: PositionCache,
}

impl CoordinateSpace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an insertion, or widen the one already at `pos`
    ///
    /// An existing insertion is replaced only by strictly longer bases, so
    /// the stored insertion never shrinks and the call order does not matter.
    ///
    /// # Examples
    /// ```
    /// use variant_track::core::CoordinateSpace;
    ///
    /// let mut space = CoordinateSpace::new();
    /// space.add_insertion("chr1", 100, "AAAA");
    /// space.add_insertion("chr1", 100, "AA");
    /// assert_eq!(space.insertions("chr1")[0].bases, "AAAA");
    /// ```
    pub fn add_insertion(&mut self, chrom: &str, pos: u64, bases: impl Into<String>) {
        let bases = bases.into();
        let list = self.insertions.entry(chrom.to_string()).or_default();

        let stored = match list.binary_search_by_key(&pos, |ins| ins.pos) {
            Ok(i) => {
                if bases.len() > list[i].bases.len() {
                    list[i].bases = bases;
                }
                list[i].len()
            }
            Err(i) => {
                list.insert(i, Insertion::new(pos, bases));
                list[i].len()
            }
        };
        debug_assert!(list.windows(2).all(|w| w[0].pos < w[1].pos));

        log::debug!(
            "Added insertion at {}:{} ({} bases), total insertions: {}",
            chrom,
            pos,
            stored,
            list.len()
        );
        self.cache.clear();
    }

    /// Remove the insertion at `pos`, if any
    pub fn remove_insertion(&mut self, chrom: &str, pos: u64) -> Option<Insertion> {
        let list = self.insertions.get_mut(chrom)?;
        let i = list.binary_search_by_key(&pos, |ins| ins.pos).ok()?;
        let removed = list.remove(i);
        if list.is_empty() {
            self.insertions.remove(chrom);
        }
        self.cache.clear();
        Some(removed)
    }

    /// Drop every insertion and cached position (session reset)
    pub fn clear(&mut self) {
        self.insertions.clear();
        self.cache.clear();
    }

    /// Insertions of a sequence, sorted by position
    ///
    /// Unknown sequences have no insertions.
    pub fn insertions(&self, chrom: &str) -> &[Insertion] {
        self.insertions.get(chrom).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether a sequence has any insertion
    pub fn has_insertions(&self, chrom: &str) -> bool {
        !self.insertions(chrom).is_empty()
    }

    /// Total number of insertions over all sequences
    pub fn insertion_count(&self) -> usize {
        self.insertions.values().map(Vec::len).sum()
    }

    /// Insertions with `pos` in `[start, end)`
    pub fn get_insertions_in_region(&self, chrom: &str, start: u64, end: u64) -> &[Insertion] {
        let list = self.insertions(chrom);
        let lo = list.partition_point(|ins| ins.pos < start);
        let hi = list.partition_point(|ins| ins.pos < end).max(lo);
        &list[lo..hi]
    }

    /// Number of inserted bases strictly before `genomic_pos`
    pub fn inserted_length_before(&self, chrom: &str, genomic_pos: u64) -> u64 {
        let mut total = 0;
        for ins in self.insertions(chrom) {
            if ins.pos < genomic_pos {
                total = ins.len().saturating_add(total);
            } else {
                break;
            }
        }
        total
    }

    /// Map a genomic position to the expanded axis
    ///
    /// # Examples
    /// ```
    /// use variant_track::core::CoordinateSpace;
    ///
    /// let mut space = CoordinateSpace::new();
    /// space.add_insertion("chr1", 100, "AAA");
    /// assert_eq!(space.genomic_to_expanded("chr1", 100), 100);
    /// assert_eq!(space.genomic_to_expanded("chr1", 105), 108);
    /// assert_eq!(space.genomic_to_expanded("chr2", 105), 105);
    /// ```
    pub fn genomic_to_expanded(&self, chrom: &str, genomic_pos: u64) -> u64 {
        if let Some(expanded) = self.cache.get(chrom, genomic_pos) {
            return expanded;
        }
        let expanded = genomic_pos.saturating_add(self.inserted_length_before(chrom, genomic_pos));
        self.cache.insert(chrom, genomic_pos, expanded);
        expanded
    }

    /// Map an expanded position back to the genomic axis
    ///
    /// Left inverse of [`genomic_to_expanded`](Self::genomic_to_expanded).
    /// A position inside an insertion's own bases maps to the genomic
    /// position the insertion follows.
    ///
    /// # Examples
    /// ```
    /// use variant_track::core::CoordinateSpace;
    ///
    /// let mut space = CoordinateSpace::new();
    /// space.add_insertion("chr1", 100, "AAA");
    /// assert_eq!(space.expanded_to_genomic("chr1", 108), 105);
    /// assert_eq!(space.expanded_to_genomic("chr1", 102), 100);
    /// ```
    pub fn expanded_to_genomic(&self, chrom: &str, expanded_pos: u64) -> u64 {
        let mut genomic = expanded_pos;
        for ins in self.insertions(chrom) {
            let anchor = self.genomic_to_expanded(chrom, ins.pos);
            if anchor >= expanded_pos {
                break;
            }
            // Inside the inserted bases: snap to the base the insertion follows
            if expanded_pos <= anchor + ins.len() {
                return ins.pos;
            }
            genomic -= ins.len();
        }
        genomic
    }

    /// Map a genomic half-open range to the expanded axis
    ///
    /// Both ends go through [`genomic_to_expanded`](Self::genomic_to_expanded),
    /// so the expanded range includes insertions strictly inside it.
    pub fn genomic_range_to_expanded(&self, chrom: &str, start: u64, end: u64) -> (u64, u64) {
        (
            self.genomic_to_expanded(chrom, start),
            self.genomic_to_expanded(chrom, end),
        )
    }

    /// Reference bases of `[start, end)` with insertions spliced in
    ///
    /// Each insertion with `pos` in `[start, end)` is placed right after the
    /// reference base at `pos`. Returns `Ok(None)` when the fetcher has no
    /// data; fetch failures propagate unchanged.
    pub async fn get_expanded_sequence<F>(
        &self,
        chrom: &str,
        start: u64,
        end: u64,
        fetcher: &F,
    ) -> FetchResult<Option<String>>
    where
        F: SequenceFetcher + ?Sized,
    {
        let Some(reference) = fetcher.fetch(chrom, start, end).await? else {
            return Ok(None);
        };

        let relevant = self.get_insertions_in_region(chrom, start, end);
        if relevant.is_empty() {
            return Ok(Some(reference));
        }

        let mut expanded = reference.into_bytes();
        let mut offset = 0usize;
        for ins in relevant {
            let at = ((ins.pos - start) as usize + offset + 1).min(expanded.len());
            expanded.splice(at..at, ins.bases.bytes());
            offset += ins.bases.len();
        }

        Ok(Some(String::from_utf8(expanded).unwrap_or_else(|e| {
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        })))
    }

    /// Position cache statistics
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
