use ndarray::ArrayView1;
use num_complex::Complex64;

use super::error::SelectError;
use super::model::IqMatrix;

// ---------------------------------------------------------------------------
// Time axis
// ---------------------------------------------------------------------------

/// `len` evenly spaced instants from 0 to `len / sample_rate` inclusive.
///
/// Equivalent to `linspace(0, t_max, len)`: the step is `t_max / (len - 1)`
/// and the last point is exactly `t_max`.
pub fn time_axis(len: usize, sample_rate: f64) -> Vec<f64> {
    let t_max = len as f64 / sample_rate;
    match len {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let step = t_max / (len - 1) as f64;
            let mut t: Vec<f64> = (0..len).map(|k| k as f64 * step).collect();
            t[len - 1] = t_max;
            t
        }
    }
}

// ---------------------------------------------------------------------------
// Component extraction
// ---------------------------------------------------------------------------

/// Split a complex row into its in-phase (real) and quadrature (imaginary)
/// sequences.
pub fn split_components(row: ArrayView1<'_, Complex64>) -> (Vec<f64>, Vec<f64>) {
    row.iter().map(|s| (s.re, s.im)).unzip()
}

// ---------------------------------------------------------------------------
// WaveformTrace – everything the plot needs for one waveform
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct WaveformTrace {
    /// Row of the IQ matrix this trace was taken from.
    pub index: usize,
    pub sample_rate: f64,
    pub time: Vec<f64>,
    pub in_phase: Vec<f64>,
    pub quadrature: Vec<f64>,
}

impl WaveformTrace {
    /// Pick waveform `index` and lay it out against time.
    pub fn select(iq: &IqMatrix, index: usize, sample_rate: f64) -> Result<Self, SelectError> {
        let row = iq.row(index)?;
        let time = time_axis(row.len(), sample_rate);
        let (in_phase, quadrature) = split_components(row);
        Ok(WaveformTrace {
            index,
            sample_rate,
            time,
            in_phase,
            quadrature,
        })
    }

    /// Duration covered by the time axis in seconds.
    pub fn duration(&self) -> f64 {
        self.time.last().copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}
