use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use radchar_viewer::data::loader::load_file;
use radchar_viewer::data::model::Precision;
use radchar_viewer::data::synth::{write_container, SynthOptions};

/// Write a synthetic RadChar-shaped HDF5 container.
#[derive(Parser, Debug)]
#[command(name = "generate_sample", version, about)]
struct Cli {
    /// Output container
    #[arg(short, long, default_value = "RadChar-Tiny.h5")]
    output: PathBuf,

    /// Number of waveforms
    #[arg(long, default_value_t = 50_000)]
    rows: usize,

    /// Samples per waveform
    #[arg(long, default_value_t = 512)]
    samples: usize,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Store complex128 instead of complex64
    #[arg(long)]
    double: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let opts = SynthOptions {
        rows: cli.rows,
        samples: cli.samples,
        seed: cli.seed,
        precision: if cli.double {
            Precision::Double
        } else {
            Precision::Single
        },
        ..SynthOptions::default()
    };
    write_container(&cli.output, &opts)?;

    // Read it back so the printout matches what the viewer will see.
    let dataset = load_file(&cli.output)?;
    println!("Wrote {}", cli.output.display());
    println!("{}", dataset.summary());
    println!("labels: {}", dataset.labels.element_type());
    Ok(())
}
