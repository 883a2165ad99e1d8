use std::path::{Path, PathBuf};

use radchar_viewer::config::ViewerConfig;
use radchar_viewer::data::loader::load_file;
use radchar_viewer::data::model::RadarDataset;
use radchar_viewer::data::waveform::WaveformTrace;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Source path, selected index and sampling rate currently in effect.
    pub config: ViewerConfig,

    /// Loaded container; a failed File → Open keeps the previous one.
    pub dataset: RadarDataset,

    /// The single waveform on screen.
    pub trace: Option<WaveformTrace>,

    /// Index being edited in the top bar, applied with "Show".
    pub pending_index: usize,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: ViewerConfig, dataset: RadarDataset, trace: WaveformTrace) -> Self {
        Self {
            pending_index: config.index,
            config,
            dataset,
            trace: Some(trace),
            status_message: None,
        }
    }

    /// Load another container and show the current index from it.
    pub fn open_path(&mut self, path: &Path) {
        match load_file(path) {
            Ok(dataset) => {
                log::info!("{}:\n{}", path.display(), dataset.summary());
                self.set_dataset(path.to_path_buf(), dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a newly loaded dataset and rebuild the trace for it.
    pub fn set_dataset(&mut self, path: PathBuf, dataset: RadarDataset) {
        self.config.path = path;
        self.dataset = dataset;
        self.trace = None;
        self.status_message = None;
        self.select(self.config.index);
    }

    /// Replace the trace on screen with waveform `index`.
    pub fn select(&mut self, index: usize) {
        match WaveformTrace::select(&self.dataset.iq, index, self.config.sample_rate) {
            Ok(trace) => {
                log::debug!("showing waveform {index}");
                self.config.index = index;
                self.pending_index = index;
                self.trace = Some(trace);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("{e}");
                self.pending_index = self.config.index;
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Number of waveforms in the loaded dataset.
    pub fn rows(&self) -> usize {
        self.dataset.len()
    }
}
