mod app;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use app::RadCharApp;
use clap::Parser;
use eframe::egui;
use radchar_viewer::config::{ViewerConfig, DEFAULT_INDEX, DEFAULT_PATH, DEFAULT_SAMPLE_RATE};
use radchar_viewer::data::loader::load_file;
use radchar_viewer::data::waveform::WaveformTrace;
use state::AppState;

#[derive(Parser, Debug)]
#[command(name = "radchar-viewer")]
#[command(version, about = "Plot one radar IQ waveform from a RadChar HDF5 container", long_about = None)]
struct Cli {
    /// HDF5 container holding `iq` and `labels`
    #[arg(default_value = DEFAULT_PATH)]
    path: PathBuf,

    /// Row of the iq matrix to plot
    #[arg(short, long, default_value_t = DEFAULT_INDEX)]
    index: usize,

    /// Sampling rate in samples per second
    #[arg(long, default_value_t = DEFAULT_SAMPLE_RATE, value_parser = parse_sample_rate)]
    sample_rate: f64,

    /// Print the container summary, check the index, and exit without a window
    #[arg(long)]
    summary_only: bool,
}

fn parse_sample_rate(s: &str) -> Result<f64, String> {
    let rate: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(format!("sample rate must be positive, got {s}"))
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = ViewerConfig {
        path: cli.path,
        index: cli.index,
        sample_rate: cli.sample_rate,
    };

    let dataset = load_file(&config.path)
        .with_context(|| format!("loading {}", config.path.display()))?;
    println!("{}", dataset.summary());

    let trace = WaveformTrace::select(&dataset.iq, config.index, config.sample_rate)
        .with_context(|| format!("selecting waveform from {}", config.path.display()))?;

    if cli.summary_only {
        return Ok(());
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let state = AppState::new(config, dataset, trace);
    eframe::run_native(
        "RadChar Viewer – IQ Waveform",
        options,
        Box::new(|_cc| Ok(Box::new(RadCharApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("viewer window failed: {e}"))
}
