/// Data layer: container loading, in-memory model, and waveform extraction.
///
/// Architecture:
/// ```text
///  RadChar-Tiny.h5
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  open read-only → iq + labels
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ RadarDataset  │  IqMatrix (N×L complex), LabelArray (opaque)
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ waveform  │  one row → time axis, in-phase, quadrature
///   └──────────┘
/// ```

pub mod error;
pub mod layout;
pub mod loader;
pub mod model;
pub mod synth;
pub mod sync;
pub mod waveform;
