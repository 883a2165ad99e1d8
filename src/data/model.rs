use std::fmt;

use ndarray::{Array2, ArrayView1};
use num_complex::Complex64;

use super::error::SelectError;

// ---------------------------------------------------------------------------
// Precision – how the complex samples were stored on disk
// ---------------------------------------------------------------------------

/// Element precision of the `iq` array in the container.
///
/// Samples are always widened to `Complex64` in memory; this records what
/// the file actually held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    /// Two `f32` members (`complex64` in NumPy terms).
    Single,
    /// Two `f64` members (`complex128`).
    Double,
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Precision::Single => write!(f, "complex64"),
            Precision::Double => write!(f, "complex128"),
        }
    }
}

// ---------------------------------------------------------------------------
// IqMatrix – one waveform per row
// ---------------------------------------------------------------------------

/// The materialized `iq` array: N waveforms of L complex samples each.
#[derive(Debug, Clone, PartialEq)]
pub struct IqMatrix {
    samples: Array2<Complex64>,
    precision: Precision,
}

impl IqMatrix {
    pub fn new(samples: Array2<Complex64>, precision: Precision) -> Self {
        Self { samples, precision }
    }

    /// Number of waveforms (N).
    pub fn rows(&self) -> usize {
        self.samples.nrows()
    }

    /// Samples per waveform (L).
    pub fn samples_per_row(&self) -> usize {
        self.samples.ncols()
    }

    pub fn shape(&self) -> [usize; 2] {
        [self.rows(), self.samples_per_row()]
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn samples(&self) -> &Array2<Complex64> {
        &self.samples
    }

    /// Borrow waveform `index`.
    pub fn row(&self, index: usize) -> Result<ArrayView1<'_, Complex64>, SelectError> {
        if index >= self.rows() {
            return Err(SelectError::OutOfBounds {
                index,
                rows: self.rows(),
            });
        }
        Ok(self.samples.row(index))
    }
}

// ---------------------------------------------------------------------------
// LabelArray – per-waveform annotations, kept opaque
// ---------------------------------------------------------------------------

/// The materialized `labels` array.
///
/// The element layout is never interpreted: the bytes are exactly what the
/// container stored, one fixed-size element after another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelArray {
    shape: Vec<usize>,
    element_type: String,
    element_size: usize,
    bytes: Vec<u8>,
}

impl LabelArray {
    pub fn new(shape: Vec<usize>, element_type: String, element_size: usize, bytes: Vec<u8>) -> Self {
        Self {
            shape,
            element_type,
            element_size,
            bytes,
        }
    }

    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of labels along the first axis.
    pub fn len(&self) -> usize {
        self.shape.first().copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Human-readable element type, e.g. `compound { index: int64, ... }`.
    pub fn element_type(&self) -> &str {
        &self.element_type
    }

    pub fn element_size(&self) -> usize {
        self.element_size
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Raw bytes of one element in flat (row-major) order.
    pub fn element(&self, flat_index: usize) -> Option<&[u8]> {
        let start = flat_index.checked_mul(self.element_size)?;
        let end = start.checked_add(self.element_size)?;
        self.bytes.get(start..end)
    }
}

// ---------------------------------------------------------------------------
// RadarDataset – the complete loaded container
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct RadarDataset {
    /// Top-level array names in the order the container reports them.
    pub names: Vec<String>,
    pub iq: IqMatrix,
    pub labels: LabelArray,
}

impl RadarDataset {
    /// Number of waveforms.
    pub fn len(&self) -> usize {
        self.iq.rows()
    }

    pub fn is_empty(&self) -> bool {
        self.iq.rows() == 0
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            names: self.names.clone(),
            iq_shape: self.iq.shape().to_vec(),
            labels_shape: self.labels.shape().to_vec(),
        }
    }
}

// ---------------------------------------------------------------------------
// DatasetSummary – the diagnostic printout
// ---------------------------------------------------------------------------

/// Array names and shapes, printed right after a load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSummary {
    pub names: Vec<String>,
    pub iq_shape: Vec<usize>,
    pub labels_shape: Vec<usize>,
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", format_names(&self.names))?;
        writeln!(f, "{}", format_shape(&self.iq_shape))?;
        write!(f, "{}", format_shape(&self.labels_shape))
    }
}

/// `['iq', 'labels']`
pub fn format_names(names: &[String]) -> String {
    let quoted: Vec<String> = names.iter().map(|n| format!("'{n}'")).collect();
    format!("[{}]", quoted.join(", "))
}

/// Tuple notation: `(50000, 512)`, `(50000,)`, `()`.
pub fn format_shape(shape: &[usize]) -> String {
    match shape {
        [] => "()".to_string(),
        [n] => format!("({n},)"),
        dims => {
            let parts: Vec<String> = dims.iter().map(|d| d.to_string()).collect();
            format!("({})", parts.join(", "))
        }
    }
}
