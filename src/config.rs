use std::path::PathBuf;

/// Container the viewer opens when no path is given.
pub const DEFAULT_PATH: &str = "./RadChar-Tiny.h5";
/// Waveform shown when no index is given.
pub const DEFAULT_INDEX: usize = 1000;
/// Sampling rate of the RadChar captures, in samples per second.
pub const DEFAULT_SAMPLE_RATE: f64 = 3.2e6;

/// What to open and which waveform to show.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub path: PathBuf,
    pub index: usize,
    pub sample_rate: f64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_PATH),
            index: DEFAULT_INDEX,
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}
