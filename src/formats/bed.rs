//! BED region adapter
//!
//! Reads BED regions and rewrites them in expanded coordinates.

use crate::core::{open_input, CoordinateSpace, ParseError, ParseResult, RegionOfInterest, TrackError};
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

/// One BED line: the three coordinate columns plus any remaining columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BedRecord {
    pub region: RegionOfInterest,
    /// Columns after `end`, tab-joined, without the leading tab
    pub rest: Option<String>,
}

impl BedRecord {
    /// Parse a BED line
    pub fn parse(line: &str, line_num: usize) -> ParseResult<Self> {
        let invalid = |message: String| ParseError::InvalidBed {
            line: line_num,
            message,
        };

        let mut fields = line.splitn(4, '\t');
        let chrom = fields.next().filter(|c| !c.is_empty());
        let (Some(chrom), Some(start), Some(end)) = (chrom, fields.next(), fields.next()) else {
            return Err(invalid("expected at least 3 fields".to_string()));
        };
        let start: u64 = start
            .trim()
            .parse()
            .map_err(|_| invalid(format!("invalid start: {}", start)))?;
        let end: u64 = end
            .trim()
            .parse()
            .map_err(|_| invalid(format!("invalid end: {}", end)))?;
        if start > end {
            return Err(invalid(format!("start ({}) > end ({})", start, end)));
        }

        Ok(Self {
            region: RegionOfInterest::new(chrom, start, end),
            rest: fields.next().map(str::to_string),
        })
    }

    /// Format as a BED line
    pub fn to_line(&self) -> String {
        match &self.rest {
            Some(rest) => format!(
                "{}\t{}\t{}\t{}",
                self.region.chrom, self.region.start, self.region.end, rest
            ),
            None => format!("{}\t{}\t{}", self.region.chrom, self.region.start, self.region.end),
        }
    }

    /// Copy of this record with coordinates moved to the expanded axis
    pub fn to_expanded(&self, space: &CoordinateSpace) -> Self {
        let (start, end) =
            space.genomic_range_to_expanded(&self.region.chrom, self.region.start, self.region.end);
        Self {
            region: RegionOfInterest::new(self.region.chrom.as_str(), start, end),
            rest: self.rest.clone(),
        }
    }
}

/// Read BED records, skipping headers and comments
pub fn read_bed<R: BufRead>(reader: R) -> ParseResult<Vec<BedRecord>> {
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim_end();
        if trimmed.is_empty()
            || trimmed.starts_with('#')
            || trimmed.starts_with("track")
            || trimmed.starts_with("browser")
        {
            continue;
        }
        records.push(BedRecord::parse(trimmed, idx + 1)?);
    }
    Ok(records)
}

/// Rewrite a BED file in expanded coordinates
///
/// Returns the number of records written.
pub fn expand_bed<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    space: &CoordinateSpace,
) -> Result<usize, TrackError> {
    if !input.as_ref().exists() {
        return Err(ParseError::FileNotFound(input.as_ref().to_path_buf()).into());
    }
    let records = read_bed(open_input(input.as_ref())?)?;

    let mut writer = BufWriter::with_capacity(128 * 1024, File::create(output.as_ref())?);
    for record in &records {
        writeln!(writer, "{}", record.to_expanded(space).to_line())?;
    }
    writer.flush()?;

    Ok(records.len())
}
