//! Wiggle / bedGraph adapter
//!
//! Reads variableStep, fixedStep and bedGraph lines into [`SignalInterval`]s
//! and writes reduced intervals back out as bedGraph.

use crate::core::{open_input, ParseError, ParseResult, SignalInterval, SignalTrack, TrackError};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

/// Wiggle format type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WigFormat {
    VariableStep,
    FixedStep,
}

/// Wiggle declaration line parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WigDeclaration {
    pub format: WigFormat,
    pub chrom: String,
    pub span: u64,
    pub start: Option<u64>, // Only for fixedStep
    pub step: Option<u64>,  // Only for fixedStep
}

impl WigDeclaration {
    /// Parse a declaration line (variableStep or fixedStep)
    pub fn parse(line: &str, line_num: usize) -> ParseResult<Self> {
        let invalid = |message: String| ParseError::InvalidWig {
            line: line_num,
            message,
        };
        let number = |key: &str, value: &str| {
            value
                .parse::<u64>()
                .map_err(|_| invalid(format!("invalid {}: {}", key, value)))
        };

        let line = line.trim();
        let (format, rest) = if let Some(rest) = line.strip_prefix("variableStep") {
            (WigFormat::VariableStep, rest)
        } else if let Some(rest) = line.strip_prefix("fixedStep") {
            (WigFormat::FixedStep, rest)
        } else {
            return Err(invalid("expected variableStep or fixedStep".to_string()));
        };

        let mut chrom = None;
        let mut span = 1u64;
        let mut start = None;
        let mut step = None;

        for part in rest.split_whitespace() {
            if let Some((key, value)) = part.split_once('=') {
                match key {
                    "chrom" => chrom = Some(value.to_string()),
                    "span" => span = number(key, value)?,
                    "start" => start = Some(number(key, value)?),
                    "step" => step = Some(number(key, value)?),
                    _ => {} // Ignore unknown parameters
                }
            }
        }

        let chrom = chrom.ok_or_else(|| invalid("missing chrom parameter".to_string()))?;
        if format == WigFormat::FixedStep && start.is_none() {
            return Err(invalid("fixedStep requires start".to_string()));
        }
        if start == Some(0) {
            return Err(invalid("wiggle positions are 1-based".to_string()));
        }

        Ok(Self {
            format,
            chrom,
            span,
            start,
            step,
        })
    }
}

/// Streaming reader yielding one interval per data line
pub struct WigReader<R: BufRead> {
    reader: R,
    current_decl: Option<WigDeclaration>,
    current_pos: u64, // For fixedStep, 0-based
    line_num: usize,
    line_buffer: String,
}

impl<R: BufRead> WigReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            current_decl: None,
            current_pos: 0,
            line_num: 0,
            line_buffer: String::with_capacity(256),
        }
    }

    fn invalid(&self, message: impl Into<String>) -> ParseError {
        ParseError::InvalidWig {
            line: self.line_num,
            message: message.into(),
        }
    }

    fn parse_data_line(&mut self) -> ParseResult<SignalInterval> {
        let line = self.line_buffer.trim();
        let parts: Vec<&str> = line.split_whitespace().collect();

        // bedGraph: chrom start end value
        if parts.len() >= 4 {
            if let (Ok(start), Ok(end), Ok(value)) = (
                parts[1].parse::<u64>(),
                parts[2].parse::<u64>(),
                parts[3].parse::<f64>(),
            ) {
                return Ok(SignalInterval::new(parts[0], start, end, value));
            }
        }

        let Some(decl) = &self.current_decl else {
            return Err(self.invalid("data line before declaration"));
        };

        match decl.format {
            WigFormat::VariableStep => {
                if parts.len() < 2 {
                    return Err(self.invalid(format!("expected position and value: {}", line)));
                }
                let pos: u64 = match parts[0].parse() {
                    Ok(p) if p > 0 => p,
                    _ => return Err(self.invalid(format!("invalid position: {}", parts[0]))),
                };
                let value: f64 = parts[1]
                    .parse()
                    .map_err(|_| self.invalid(format!("invalid value: {}", parts[1])))?;

                // Wiggle uses 1-based coordinates
                let start = pos - 1;
                Ok(SignalInterval::new(decl.chrom.as_str(), start, start + decl.span, value))
            }
            WigFormat::FixedStep => {
                let value: f64 = line
                    .parse()
                    .map_err(|_| self.invalid(format!("invalid value: {}", line)))?;
                let start = self.current_pos;
                let interval = SignalInterval::new(decl.chrom.as_str(), start, start + decl.span, value);
                self.current_pos += decl.step.unwrap_or(decl.span);
                Ok(interval)
            }
        }
    }
}

impl<R: BufRead> Iterator for WigReader<R> {
    type Item = ParseResult<SignalInterval>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.line_buffer.clear();
            match self.reader.read_line(&mut self.line_buffer) {
                Ok(0) => return None,
                Ok(_) => self.line_num += 1,
                Err(e) => return Some(Err(ParseError::Io(e))),
            }

            let line = self.line_buffer.trim();
            if line.is_empty()
                || line.starts_with('#')
                || line.starts_with("track")
                || line.starts_with("browser")
            {
                continue;
            }

            if line.starts_with("variableStep") || line.starts_with("fixedStep") {
                match WigDeclaration::parse(line, self.line_num) {
                    Ok(decl) => {
                        if let Some(start) = decl.start {
                            self.current_pos = start - 1;
                        }
                        self.current_decl = Some(decl);
                        continue;
                    }
                    Err(e) => return Some(Err(e)),
                }
            }

            return Some(self.parse_data_line());
        }
    }
}

/// Read every interval, grouped by sequence and sorted by start
pub fn read_signal<R: BufRead>(reader: R) -> ParseResult<BTreeMap<String, Vec<SignalInterval>>> {
    let mut by_chrom: BTreeMap<String, Vec<SignalInterval>> = BTreeMap::new();
    for interval in WigReader::new(reader) {
        let interval = interval?;
        by_chrom.entry(interval.chrom.clone()).or_default().push(interval);
    }
    for intervals in by_chrom.values_mut() {
        intervals.sort_by_key(|iv| (iv.start, iv.end));
    }
    Ok(by_chrom)
}

/// Write intervals as bedGraph lines
pub fn write_bedgraph<W: Write>(writer: &mut W, intervals: &[SignalInterval]) -> std::io::Result<()> {
    for iv in intervals {
        writeln!(writer, "{}", iv.to_bedgraph_line())?;
    }
    Ok(())
}

/// Reduction statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReductionStats {
    pub sequences: usize,
    pub input: usize,
    pub output: usize,
}

/// Reduce a wiggle / bedGraph file to a bedGraph file
///
/// # Arguments
/// * `input` - Input wiggle or bedGraph (optionally compressed)
/// * `output` - Output bedGraph path
/// * `track` - Scaling and window function settings
/// * `origin` - Bin origin applied to every sequence
/// * `bin_size` - Bases per bin
pub fn reduce_wig<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    track: &SignalTrack,
    origin: u64,
    bin_size: f64,
) -> Result<ReductionStats, TrackError> {
    if !input.as_ref().exists() {
        return Err(ParseError::FileNotFound(input.as_ref().to_path_buf()).into());
    }
    let by_chrom = read_signal(open_input(input.as_ref())?)?;

    let mut stats = ReductionStats::default();
    let mut writer = BufWriter::with_capacity(128 * 1024, File::create(output.as_ref())?);

    for (chrom, features) in by_chrom {
        stats.sequences += 1;
        stats.input += features.len();
        let reduced = track.prepare(features, origin, bin_size)?;
        log::debug!("{}: reduced to {} intervals", chrom, reduced.len());
        stats.output += reduced.len();
        write_bedgraph(&mut writer, &reduced)?;
    }
    writer.flush()?;

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WindowFunction;
    use std::io::Cursor;

    fn read_all(content: &str) -> Vec<SignalInterval> {
        WigReader::new(Cursor::new(content.as_bytes()))
            .collect::<ParseResult<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_variable_step_declaration() {
        let decl = WigDeclaration::parse("variableStep chrom=chr1 span=10", 1).unwrap();
        assert_eq!(decl.format, WigFormat::VariableStep);
        assert_eq!(decl.chrom, "chr1");
        assert_eq!(decl.span, 10);
        assert!(decl.start.is_none());
    }

    #[test]
    fn test_fixed_step_declaration() {
        let decl = WigDeclaration::parse("fixedStep chrom=chr2 start=1000 step=100 span=50", 1).unwrap();
        assert_eq!(decl.format, WigFormat::FixedStep);
        assert_eq!(decl.start, Some(1000));
        assert_eq!(decl.step, Some(100));
        assert_eq!(decl.span, 50);
    }

    #[test]
    fn test_declaration_errors() {
        assert!(WigDeclaration::parse("variableStep span=10", 3).is_err());
        assert!(WigDeclaration::parse("fixedStep chrom=chr1 step=10", 3).is_err());
        assert!(WigDeclaration::parse("fixedStep chrom=chr1 start=0", 3).is_err());
        let err = WigDeclaration::parse("variableStep chrom=chr1 span=x", 7).unwrap_err();
        assert!(err.to_string().contains("line 7"));
    }

    #[test]
    fn test_reader_variable_step() {
        let points = read_all("variableStep chrom=chr1 span=5\n100 1.5\n200 2.5\n");
        assert_eq!(points.len(), 2);
        assert_eq!((points[0].start, points[0].end, points[0].value), (99, 104, 1.5));
        assert_eq!((points[1].start, points[1].end), (199, 204));
    }

    #[test]
    fn test_reader_fixed_step() {
        let points = read_all("fixedStep chrom=chr1 start=11 step=10 span=5\n1\n2\n3\n");
        let spans: Vec<(u64, u64)> = points.iter().map(|p| (p.start, p.end)).collect();
        assert_eq!(spans, vec![(10, 15), (20, 25), (30, 35)]);
    }

    #[test]
    fn test_reader_bedgraph_and_comments() {
        let points = read_all("track type=bedGraph\n# comment\nchr1\t0\t10\t0.5\n\nchr1\t10\t20\t1\n");
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].start, 10);
    }

    #[test]
    fn test_reader_data_before_declaration() {
        let result: Vec<_> = WigReader::new(Cursor::new(b"1.5\n".as_slice())).collect();
        assert!(result[0].is_err());
    }

    #[test]
    fn test_read_signal_groups_and_sorts() {
        let by_chrom = read_signal(Cursor::new(
            b"chr2\t50\t60\t1\nchr1\t20\t30\t2\nchr1\t0\t10\t3\n".as_slice(),
        ))
        .unwrap();
        assert_eq!(by_chrom.len(), 2);
        let chr1: Vec<u64> = by_chrom["chr1"].iter().map(|iv| iv.start).collect();
        assert_eq!(chr1, vec![0, 20]);
    }

    #[test]
    fn test_write_bedgraph() {
        let mut out = Vec::new();
        write_bedgraph(&mut out, &[SignalInterval::new("chr1", 0, 5, 2.0)]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "chr1\t0\t5\t2\n");
    }

    #[test]
    fn test_reduce_wig_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.bedGraph");
        let output = dir.path().join("out.bedGraph");
        std::fs::write(&input, "chr1\t0\t1\t1\nchr1\t1\t2\t2\nchr1\t2\t3\t3\nchr1\t3\t4\t6\n").unwrap();

        let track = SignalTrack::new(WindowFunction::Mean);
        let stats = reduce_wig(&input, &output, &track, 0, 2.0).unwrap();
        assert_eq!(stats, ReductionStats { sequences: 1, input: 4, output: 2 });

        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(written, "chr1\t0\t2\t1.5\nchr1\t2\t4\t4.5\n");
    }

    #[test]
    fn test_reduce_wig_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let track = SignalTrack::default();
        let result = reduce_wig(dir.path().join("nope.wig"), dir.path().join("o"), &track, 0, 2.0);
        assert!(matches!(result, Err(TrackError::Parse(ParseError::FileNotFound(_)))));
    }
}
