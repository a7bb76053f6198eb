//! File format adapters
//!
//! Host-side adapters that feed the core: wiggle/bedGraph signal, VCF
//! insertions, BED regions and FASTA reference sequences.

pub mod bed;
pub mod fasta;
pub mod vcf;
pub mod wig;

pub use bed::{expand_bed, read_bed, BedRecord};
pub use fasta::FastaReference;
pub use vcf::{load_insertions, load_insertions_from_path, LoadStats, VcfRecordView};
pub use wig::{read_signal, reduce_wig, write_bedgraph, ReductionStats, WigDeclaration, WigFormat, WigReader};
