//! VariantTrack CLI entry point
//!
//! Reduces signal tracks to display resolution and moves regions and
//! sequences onto the insertion-aware expanded axis.

use clap::{Parser, Subcommand, ValueEnum};
use variant_track::core::{CoordinateSpace, SignalTrack, WindowFunction};
use variant_track::formats;
use std::path::PathBuf;
use std::time::Instant;

/// Window function (CLI enum)
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum WindowFunctionArg {
    /// Mean of the values in each bin
    #[default]
    Mean,
    /// Minimum value in each bin
    Min,
    /// Maximum value in each bin
    Max,
    /// No reduction
    None,
}

impl From<WindowFunctionArg> for WindowFunction {
    fn from(arg: WindowFunctionArg) -> Self {
        match arg {
            WindowFunctionArg::Mean => WindowFunction::Mean,
            WindowFunctionArg::Min => WindowFunction::Min,
            WindowFunctionArg::Max => WindowFunction::Max,
            WindowFunctionArg::None => WindowFunction::None,
        }
    }
}

#[derive(Parser)]
#[command(name = "variant-track")]
#[command(about = "Signal reduction and insertion-aware coordinates for genome tracks")]
#[command(version)]
#[command(author = "VariantTrack Contributors")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reduce a Wiggle/bedGraph file to one value per bin
    Reduce {
        /// Input Wiggle/bedGraph file
        input: PathBuf,
        /// Output bedGraph file (default: output.bedGraph)
        output: Option<PathBuf>,
        /// Bases per bin
        #[arg(short = 'b', long = "bin-size")]
        bin_size: f64,
        /// Bin origin
        #[arg(short = 'o', long, default_value = "0")]
        origin: u64,
        /// Window function
        #[arg(short = 'w', long = "window-function", default_value = "mean")]
        window_function: WindowFunctionArg,
        /// Multiply values before reducing
        #[arg(long = "scale")]
        scale_factor: Option<f64>,
    },
    /// Rewrite BED regions in expanded coordinates
    Expand {
        /// VCF file providing insertions
        vcf: PathBuf,
        /// Input BED file
        input: PathBuf,
        /// Output BED file (default: output.bed)
        output: Option<PathBuf>,
    },
    /// Print a reference region with insertions spliced in
    Sequence {
        /// VCF file providing insertions
        vcf: PathBuf,
        /// Reference FASTA file
        fasta: PathBuf,
        /// Sequence name
        chrom: String,
        /// Start position (0-based)
        start: u64,
        /// End position (exclusive)
        end: u64,
    },
}

fn load_space(vcf: &PathBuf) -> anyhow::Result<CoordinateSpace> {
    let start = Instant::now();
    eprintln!("Loading insertions: {:?}", vcf);

    let mut space = CoordinateSpace::new();
    let stats = formats::load_insertions_from_path(vcf, &mut space)
        .map_err(|e| anyhow::anyhow!("Failed to load insertions: {}", e))?;

    eprintln!(
        "Loaded {} insertions from {} records in {:.2}s",
        stats.insertions,
        stats.records,
        start.elapsed().as_secs_f64()
    );
    Ok(space)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let start = Instant::now();

    match cli.command {
        Commands::Reduce { input, output, bin_size, origin, window_function, scale_factor } => {
            let output_path = output.unwrap_or_else(|| PathBuf::from("output.bedGraph"));
            let mut track = SignalTrack::new(window_function.into());
            track.scale_factor = scale_factor;

            eprintln!("Reducing signal file: {:?} -> {:?}", input, output_path);
            let stats = formats::reduce_wig(&input, &output_path, &track, origin, bin_size)?;

            eprintln!("\n=== Reduction Statistics ===");
            eprintln!("Sequences:       {}", stats.sequences);
            eprintln!("Input records:   {}", stats.input);
            eprintln!("Output records:  {}", stats.output);
            eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());
        }

        Commands::Expand { vcf, input, output } => {
            let space = load_space(&vcf)?;
            let output_path = output.unwrap_or_else(|| PathBuf::from("output.bed"));

            eprintln!("Expanding BED file: {:?} -> {:?}", input, output_path);
            let written = formats::expand_bed(&input, &output_path, &space)?;

            eprintln!("\n=== Expansion Statistics ===");
            eprintln!("Records:         {}", written);
            eprintln!("Cache hit rate:  {:.1}%", space.cache_stats().hit_rate());
            eprintln!("Time elapsed:    {:.2}s", start.elapsed().as_secs_f64());
        }

        Commands::Sequence { vcf, fasta, chrom, start: region_start, end } => {
            anyhow::ensure!(region_start <= end, "start ({}) > end ({})", region_start, end);
            let space = load_space(&vcf)?;
            let reference = formats::FastaReference::from_path(&fasta)?;

            let runtime = tokio::runtime::Runtime::new()?;
            let sequence =
                runtime.block_on(space.get_expanded_sequence(&chrom, region_start, end, &reference))?;

            match sequence {
                Some(seq) => println!(">{}:{}-{} expanded\n{}", chrom, region_start, end, seq),
                None => anyhow::bail!("No reference data for {}:{}-{}", chrom, region_start, end),
            }
        }
    }

    Ok(())
}
