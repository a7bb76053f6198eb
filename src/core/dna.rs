//! DNA sequence utilities
//!
//! Validation helpers for bases coming from variant records and reference
//! files.

/// Check if a byte is a valid DNA base (standard or IUPAC)
#[inline]
pub fn is_dna_base(base: u8) -> bool {
    matches!(
        base.to_ascii_uppercase(),
        b'A' | b'T' | b'G' | b'C' | b'R' | b'Y' | b'S' | b'W' | b'K' | b'M' | b'B' | b'V' | b'D'
            | b'H' | b'N'
    )
}

/// Check if a string is a valid DNA sequence
///
/// # Examples
/// ```
/// use variant_track::core::dna::is_dna;
///
/// assert!(is_dna("ATGC"));
/// assert!(is_dna("atgcn"));
/// assert!(!is_dna("<INS>"));
/// assert!(is_dna(""));
/// ```
pub fn is_dna(seq: &str) -> bool {
    seq.bytes().all(is_dna_base)
}

/// Length of the shared prefix of two allele strings (case-insensitive)
///
/// # Examples
/// ```
/// use variant_track::core::dna::common_prefix_len;
///
/// assert_eq!(common_prefix_len("A", "ATTG"), 1);
/// assert_eq!(common_prefix_len("ACG", "acgTT"), 3);
/// assert_eq!(common_prefix_len("G", "TA"), 0);
/// ```
pub fn common_prefix_len(a: &str, b: &str) -> usize {
    a.bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x.eq_ignore_ascii_case(y))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_dna_base() {
        assert!(is_dna_base(b'A'));
        assert!(is_dna_base(b'a'));
        assert!(is_dna_base(b'N'));
        assert!(is_dna_base(b'r'));
        assert!(!is_dna_base(b'X'));
        assert!(!is_dna_base(b'<'));
        assert!(!is_dna_base(b' '));
    }

    #[test]
    fn test_is_dna() {
        assert!(is_dna("ATGCatgc"));
        assert!(is_dna("RYSWKMBVDHN"));
        assert!(!is_dna("ATGC "));
        assert!(!is_dna("*"));
        assert!(!is_dna("A[chr2:100["));
    }

    #[test]
    fn test_common_prefix_len() {
        assert_eq!(common_prefix_len("", "A"), 0);
        assert_eq!(common_prefix_len("AC", "AC"), 2);
        assert_eq!(common_prefix_len("ACT", "ACG"), 2);
    }
}
