//! End-to-end tests over files: wiggle reduction, BED expansion and
//! expanded sequence extraction.

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use variant_track::core::{CoordinateSpace, SignalTrack, WindowFunction};
use variant_track::formats::{self, FastaReference};

const WIG: &str = "track type=wiggle_0 name=test\n\
                   variableStep chrom=chr1\n\
                   1 1.0\n\
                   2 2.0\n\
                   3 3.0\n\
                   4 4.0\n\
                   fixedStep chrom=chr2 start=1 step=10 span=10\n\
                   5\n\
                   5\n";

const VCF: &str = "##fileformat=VCFv4.2\n\
                   #CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n\
                   chr1\t3\t.\tG\tGTT\t.\tPASS\t.\n\
                   chr1\t101\t.\tA\tATTG\t.\tPASS\t.\n\
                   chr1\t120\t.\tC\tT\t.\tPASS\t.\n";

fn write_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn load_space(path: &Path) -> CoordinateSpace {
    let mut space = CoordinateSpace::new();
    formats::load_insertions_from_path(path, &mut space).unwrap();
    space
}

#[test]
fn test_reduce_wig_file() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "signal.wig", WIG);
    let output = dir.path().join("reduced.bedGraph");

    let track = SignalTrack::new(WindowFunction::Mean);
    let stats = formats::reduce_wig(&input, &output, &track, 0, 2.0).unwrap();

    assert_eq!(stats.sequences, 2);
    assert_eq!(stats.input, 6);
    assert_eq!(stats.output, 3);
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "chr1\t0\t2\t1.5\nchr1\t2\t4\t3.5\nchr2\t0\t20\t5\n"
    );
}

#[test]
fn test_reduce_wig_scaled_max() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "signal.wig", WIG);
    let output = dir.path().join("reduced.bedGraph");

    let track = SignalTrack::new(WindowFunction::Max).with_scale_factor(0.5);
    formats::reduce_wig(&input, &output, &track, 0, 4.0).unwrap();

    let content = fs::read_to_string(&output).unwrap();
    assert_eq!(content.lines().next(), Some("chr1\t0\t4\t2"));
}

#[test]
fn test_reduce_missing_input() {
    let dir = TempDir::new().unwrap();
    let result = formats::reduce_wig(
        dir.path().join("missing.wig"),
        dir.path().join("out.bedGraph"),
        &SignalTrack::default(),
        0,
        2.0,
    );
    assert!(result.is_err());
}

#[test]
fn test_expand_bed_file() {
    let dir = TempDir::new().unwrap();
    let vcf = write_file(&dir, "variants.vcf", VCF);
    let bed = write_file(
        &dir,
        "regions.bed",
        "chr1\t50\t150\tpeak1\nchr1\t200\t300\nchr2\t0\t10\n",
    );
    let output = dir.path().join("expanded.bed");

    let space = load_space(&vcf);
    assert_eq!(space.insertion_count(), 2);

    let written = formats::expand_bed(&bed, &output, &space).unwrap();
    assert_eq!(written, 3);
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "chr1\t52\t155\tpeak1\nchr1\t205\t305\nchr2\t0\t10\n"
    );
}

#[tokio::test]
async fn test_expanded_sequence_from_files() {
    let dir = TempDir::new().unwrap();
    let vcf = write_file(&dir, "variants.vcf", VCF);
    let fasta = write_file(&dir, "ref.fa", ">chr1 test\nACGTAC\nGTAC\n");

    let space = load_space(&vcf);
    let reference = FastaReference::from_path(&fasta).unwrap();

    let seq = space
        .get_expanded_sequence("chr1", 0, 10, &reference)
        .await
        .unwrap();
    assert_eq!(seq.as_deref(), Some("ACGTTTACGTAC"));

    let missing = space
        .get_expanded_sequence("chr9", 0, 10, &reference)
        .await
        .unwrap();
    assert_eq!(missing, None);
}
