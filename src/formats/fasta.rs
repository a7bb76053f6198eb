//! Plain FASTA reference
//!
//! Loads every record of a (optionally compressed) FASTA file into memory
//! and serves region fetches from it.

use crate::core::{open_input, FetchResult, InMemoryReference, ParseError, ParseResult, SequenceFetcher};
use std::io::BufRead;
use std::path::Path;

/// In-memory FASTA reference
#[derive(Debug, Clone, Default)]
pub struct FastaReference {
    sequences: InMemoryReference,
}

impl FastaReference {
    /// Parse FASTA records from a reader
    ///
    /// Record names are the first word after `>`.
    pub fn from_reader<R: BufRead>(reader: R) -> ParseResult<Self> {
        let mut sequences = InMemoryReference::new();
        let mut current: Option<(String, String)> = None;

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end();
            if let Some(header) = line.strip_prefix('>') {
                if let Some((name, seq)) = current.take() {
                    sequences.insert(name, seq);
                }
                let name = header.split_whitespace().next().ok_or(ParseError::InvalidFasta {
                    line: idx + 1,
                    message: "empty record name".to_string(),
                })?;
                current = Some((name.to_string(), String::new()));
            } else if line.is_empty() || line.starts_with(';') {
                continue;
            } else {
                match current.as_mut() {
                    Some((_, seq)) => seq.push_str(line),
                    None => {
                        return Err(ParseError::InvalidFasta {
                            line: idx + 1,
                            message: "sequence before first header".to_string(),
                        })
                    }
                }
            }
        }
        if let Some((name, seq)) = current {
            sequences.insert(name, seq);
        }

        log::debug!("Loaded {} FASTA records", sequences.len());
        Ok(Self { sequences })
    }

    /// Load a FASTA file
    pub fn from_path<P: AsRef<Path>>(path: P) -> ParseResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ParseError::FileNotFound(path.to_path_buf()));
        }
        Self::from_reader(open_input(path)?)
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}

impl SequenceFetcher for FastaReference {
    async fn fetch(&self, chrom: &str, start: u64, end: u64) -> FetchResult<Option<String>> {
        self.sequences.fetch(chrom, start, end).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const FASTA: &str = ">chr1 test sequence\nACGT\nACGT\n>chr2\nGGGG\n";

    #[test]
    fn test_from_reader() {
        let reference = FastaReference::from_reader(Cursor::new(FASTA.as_bytes())).unwrap();
        assert_eq!(reference.len(), 2);
    }

    #[test]
    fn test_sequence_before_header() {
        let result = FastaReference::from_reader(Cursor::new(b"ACGT\n>chr1\nA\n".as_slice()));
        assert!(matches!(result, Err(ParseError::InvalidFasta { line: 1, .. })));
    }

    #[tokio::test]
    async fn test_fetch_joins_lines() {
        let reference = FastaReference::from_reader(Cursor::new(FASTA.as_bytes())).unwrap();
        assert_eq!(reference.fetch("chr1", 2, 6).await.unwrap().as_deref(), Some("GTAC"));
        assert_eq!(reference.fetch("chr2", 0, 2).await.unwrap().as_deref(), Some("GG"));
        assert_eq!(reference.fetch("chr3", 0, 2).await.unwrap(), None);
    }
}
