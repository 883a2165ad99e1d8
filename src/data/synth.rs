use std::f64::consts::PI;
use std::path::Path;

use anyhow::{Context, Result};
use hdf5::H5Type;
use ndarray::Array2;
use num_complex::Complex64;

use super::layout::{ComplexPair32, ComplexPair64};
use super::loader::{IQ_ARRAY, LABELS_ARRAY};
use super::model::Precision;
use super::sync::with_hdf5;

/// Rows generated and written per HDF5 slice write.
const BLOCK_ROWS: usize = 1024;

const BARKER_13: [f64; 13] = [1., 1., 1., 1., 1., -1., -1., 1., 1., -1., 1., -1., 1.];
/// Frank code order; the code has `FRANK_ORDER²` chips.
const FRANK_ORDER: usize = 4;
/// LFM sweep as a fraction of the sampling rate.
const LFM_BANDWIDTH: f64 = 0.25;

// ---------------------------------------------------------------------------
// Label record
// ---------------------------------------------------------------------------

/// Per-waveform annotation written to the `labels` array (times in seconds).
#[derive(H5Type, Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct RadarLabel {
    pub index: i64,
    pub signal_type: i32,
    pub number_of_pulses: i32,
    pub pulse_width: f64,
    pub time_delay: f64,
    pub pulse_repetition_interval: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalType {
    CoherentPulseTrain,
    Barker,
    Frank,
    LinearFm,
}

impl SignalType {
    pub const ALL: [SignalType; 4] = [
        SignalType::CoherentPulseTrain,
        SignalType::Barker,
        SignalType::Frank,
        SignalType::LinearFm,
    ];

    pub fn code(self) -> i32 {
        match self {
            SignalType::CoherentPulseTrain => 0,
            SignalType::Barker => 1,
            SignalType::Frank => 2,
            SignalType::LinearFm => 3,
        }
    }

    /// Phase (radians) of intra-pulse sample `n` of a pulse `width` samples long.
    fn phase(self, n: usize, width: usize) -> f64 {
        let frac = n as f64 / width as f64;
        match self {
            SignalType::CoherentPulseTrain => 0.0,
            SignalType::Barker => {
                let chip = (frac * BARKER_13.len() as f64) as usize;
                if BARKER_13[chip.min(BARKER_13.len() - 1)] < 0.0 {
                    PI
                } else {
                    0.0
                }
            }
            SignalType::Frank => {
                let chips = FRANK_ORDER * FRANK_ORDER;
                let chip = ((frac * chips as f64) as usize).min(chips - 1);
                let (i, j) = (chip / FRANK_ORDER, chip % FRANK_ORDER);
                2.0 * PI * (i * j) as f64 / FRANK_ORDER as f64
            }
            SignalType::LinearFm => PI * LFM_BANDWIDTH * n as f64 * frac,
        }
    }
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SynthOptions {
    pub rows: usize,
    pub samples: usize,
    pub sample_rate: f64,
    pub seed: u64,
    /// Standard deviation of the complex Gaussian noise per component.
    pub noise_std: f64,
    pub precision: Precision,
    /// Leave the `labels` array out (for exercising loader failures).
    pub include_labels: bool,
}

impl Default for SynthOptions {
    fn default() -> Self {
        Self {
            rows: 50_000,
            samples: 512,
            sample_rate: 3.2e6,
            seed: 42,
            noise_std: 0.1,
            precision: Precision::Single,
            include_labels: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Container writer
// ---------------------------------------------------------------------------

/// Write a RadChar-shaped container to `path`, replacing any existing file.
pub fn write_container(path: &Path, opts: &SynthOptions) -> Result<()> {
    with_hdf5(|| write_session(path, opts))
}

fn write_session(path: &Path, opts: &SynthOptions) -> Result<()> {
    let file = hdf5::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut rng = SimpleRng::new(opts.seed);

    let labels = match opts.precision {
        Precision::Single => write_iq::<ComplexPair32>(&file, opts, &mut rng)?,
        Precision::Double => write_iq::<ComplexPair64>(&file, opts, &mut rng)?,
    };

    if opts.include_labels {
        file.new_dataset::<RadarLabel>()
            .shape(labels.len())
            .create(LABELS_ARRAY)
            .context("creating labels dataset")?
            .write_raw(labels.as_slice())
            .context("writing labels")?;
    }

    log::info!(
        "Wrote {} waveforms x {} samples ({}) to {}",
        opts.rows,
        opts.samples,
        opts.precision,
        path.display()
    );
    Ok(())
}

fn write_iq<T>(file: &hdf5::File, opts: &SynthOptions, rng: &mut SimpleRng) -> Result<Vec<RadarLabel>>
where
    T: H5Type + From<Complex64>,
{
    let ds = file
        .new_dataset::<T>()
        .shape((opts.rows, opts.samples))
        .create(IQ_ARRAY)
        .context("creating iq dataset")?;

    let mut labels = Vec::with_capacity(opts.rows);
    let mut start = 0;
    while start < opts.rows {
        let end = (start + BLOCK_ROWS).min(opts.rows);
        let mut flat = Vec::with_capacity((end - start) * opts.samples);
        for index in start..end {
            let (row, label) = synthesize(index, opts, rng);
            flat.extend(row.into_iter().map(T::from));
            labels.push(label);
        }
        let block = Array2::from_shape_vec((end - start, opts.samples), flat)
            .context("shaping iq block")?;
        ds.write_slice(&block, (start..end, ..))
            .with_context(|| format!("writing iq rows {start}..{end}"))?;
        start = end;
    }
    Ok(labels)
}

// ---------------------------------------------------------------------------
// Waveform synthesis
// ---------------------------------------------------------------------------

/// One noisy pulse train and the label describing it.
pub fn synthesize(index: usize, opts: &SynthOptions, rng: &mut SimpleRng) -> (Vec<Complex64>, RadarLabel) {
    let len = opts.samples;
    let signal_type = SignalType::ALL[rng.range(0, SignalType::ALL.len() - 1)];
    let pulses = rng.range(2, 6);

    // Every pulse must fit inside its repetition interval and the whole train
    // inside the capture.
    let pri_max = (len / pulses).max(1);
    let width = rng.range(10, 40).min(pri_max);
    let pri = rng.range((2 * width).min(pri_max), pri_max);
    let delay = rng.range(0, len.saturating_sub(pulses * pri));
    let phase0 = rng.next_f64() * 2.0 * PI;

    let mut row: Vec<Complex64> = (0..len)
        .map(|_| Complex64::new(rng.gauss(0.0, opts.noise_std), rng.gauss(0.0, opts.noise_std)))
        .collect();
    for p in 0..pulses {
        let first = delay + p * pri;
        for n in 0..width {
            if let Some(sample) = row.get_mut(first + n) {
                *sample += Complex64::from_polar(1.0, phase0 + signal_type.phase(n, width));
            }
        }
    }

    let label = RadarLabel {
        index: index as i64,
        signal_type: signal_type.code(),
        number_of_pulses: pulses as i32,
        pulse_width: width as f64 / opts.sample_rate,
        time_delay: delay as f64 / opts.sample_rate,
        pulse_repetition_interval: pri as f64 / opts.sample_rate,
    };
    (row, label)
}

// ---------------------------------------------------------------------------
// PRNG
// ---------------------------------------------------------------------------

/// Minimal deterministic PRNG (xoshiro256**)
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    pub fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform integer in `lo..=hi`; returns `lo` when the range is empty.
    pub fn range(&mut self, lo: usize, hi: usize) -> usize {
        if hi <= lo {
            return lo;
        }
        lo + (self.next_u64() % (hi - lo + 1) as u64) as usize
    }

    /// Box-Muller transform for normal distribution
    pub fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos();
        mean + std_dev * z
    }
}
