//! Load lifecycle for the single model asset.
//!
//! A load worker reports back over a channel with three kinds of events;
//! the viewer folds them into a small state machine:
//! `{not-loaded -> loading -> (loaded | errored)}`.

use crate::model::ModelData;
use crate::progress::ProgressTracker;

/// Events emitted by a load worker.
#[derive(Debug)]
pub enum LoadEvent {
    /// Bytes received so far. `total == 0` means the length is unknown.
    Progress { loaded: u64, total: u64 },
    /// Fetch and parse both succeeded.
    Loaded(ModelData),
    /// Fetch or parse failed; carries the reason for the log.
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    NotLoaded,
    Loading,
    Loaded,
    Errored,
}

/// View-facing load state: the phase plus the progress display.
#[derive(Debug)]
pub struct ViewerState {
    phase: LoadPhase,
    progress: ProgressTracker,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewerState {
    pub fn new() -> Self {
        Self {
            phase: LoadPhase::NotLoaded,
            progress: ProgressTracker::new(),
        }
    }

    /// Start (or restart) a load, clearing any previous error and progress.
    pub fn begin_load(&mut self) {
        self.phase = LoadPhase::Loading;
        self.progress.reset();
    }

    /// Fold one loader event into the state. Returns the model on success
    /// so the caller can hand it to the renderer. Events arriving outside
    /// the loading phase are stale and ignored.
    pub fn apply(&mut self, event: LoadEvent) -> Option<ModelData> {
        if self.phase != LoadPhase::Loading {
            return None;
        }
        match event {
            LoadEvent::Progress { loaded, total } => {
                self.progress.update(loaded, total);
                None
            }
            LoadEvent::Loaded(model) => {
                log::info!(
                    "model loaded: {} meshes, {} vertices",
                    model.meshes.len(),
                    model.vertex_count()
                );
                self.phase = LoadPhase::Loaded;
                Some(model)
            }
            LoadEvent::Failed(reason) => {
                log::error!("model load failed: {reason}");
                self.phase = LoadPhase::Errored;
                None
            }
        }
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn show_error(&self) -> bool {
        self.phase == LoadPhase::Errored
    }

    pub fn show_progress(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    pub fn percent(&self) -> f32 {
        self.progress.percent()
    }
}
