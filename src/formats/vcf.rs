//! VCF insertion loader
//!
//! Extracts insertions from VCF records and registers them in a
//! [`CoordinateSpace`]. Only the first five columns are inspected.

use crate::core::dna::{common_prefix_len, is_dna};
use crate::core::{open_input, CoordinateSpace, Insertion, ParseError, ParseResult};
use memchr::memchr;
use std::io::BufRead;
use std::path::Path;

/// Minimal view over the positional columns of a VCF data line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VcfRecordView<'a> {
    pub chrom: &'a str,
    /// Position (1-based)
    pub pos: u64,
    pub ref_allele: &'a str,
    pub alt_alleles: &'a str,
}

impl<'a> VcfRecordView<'a> {
    /// Parse the first five tab-separated columns of a data line
    pub fn parse(line: &'a str, line_num: usize) -> ParseResult<Self> {
        let invalid = |message: String| ParseError::InvalidVcf {
            line: line_num,
            message,
        };

        let bytes = line.as_bytes();
        let mut fields: [&str; 5] = [""; 5];
        let mut start = 0;
        for (i, field) in fields.iter_mut().enumerate() {
            let end = match memchr(b'\t', &bytes[start..]) {
                Some(offset) => start + offset,
                None if i == 4 => bytes.len(),
                None => return Err(invalid(format!("expected at least 5 fields, found {}", i + 1))),
            };
            *field = &line[start..end];
            start = (end + 1).min(bytes.len());
        }

        let pos = fields[1]
            .parse::<u64>()
            .map_err(|_| invalid(format!("invalid POS: {}", fields[1])))?;

        Ok(Self {
            chrom: fields[0],
            pos,
            ref_allele: fields[3],
            alt_alleles: fields[4],
        })
    }

    /// Insertions implied by this record's ALT alleles
    ///
    /// An ALT allele that starts with the REF allele and is longer than it
    /// inserts the extra bases after the last REF base. Symbolic, breakend
    /// and non-DNA alleles are skipped.
    pub fn insertions(&self) -> Vec<Insertion> {
        if self.pos == 0 || self.ref_allele.is_empty() || !is_dna(self.ref_allele) {
            return Vec::new();
        }
        let ref_len = self.ref_allele.len();

        self.alt_alleles
            .split(',')
            .filter(|alt| alt.len() > ref_len && is_dna(alt))
            .filter(|alt| common_prefix_len(self.ref_allele, alt) == ref_len)
            .map(|alt| {
                // 0-based position of the last REF base
                let anchor = self.pos - 1 + ref_len as u64 - 1;
                Insertion::new(anchor, alt[ref_len..].to_ascii_uppercase())
            })
            .collect()
    }
}

/// Loading statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub records: usize,
    pub insertions: usize,
    pub skipped: usize,
}

/// Register every insertion found in a VCF stream
pub fn load_insertions<R: BufRead>(reader: R, space: &mut CoordinateSpace) -> ParseResult<LoadStats> {
    let mut stats = LoadStats::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_num = idx + 1;
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        stats.records += 1;

        let record = match VcfRecordView::parse(line.trim_end(), line_num) {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Skipping VCF record: {}", e);
                stats.skipped += 1;
                continue;
            }
        };

        for ins in record.insertions() {
            space.add_insertion(record.chrom, ins.pos, ins.bases);
            stats.insertions += 1;
        }
    }

    log::info!(
        "Loaded {} insertions from {} VCF records ({} skipped)",
        stats.insertions,
        stats.records,
        stats.skipped
    );
    Ok(stats)
}

/// Register every insertion found in a VCF file (optionally compressed)
pub fn load_insertions_from_path<P: AsRef<Path>>(
    path: P,
    space: &mut CoordinateSpace,
) -> ParseResult<LoadStats> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ParseError::FileNotFound(path.to_path_buf()));
    }
    load_insertions(open_input(path)?, space)
}
