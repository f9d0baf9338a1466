//! Download progress tracking.

/// Maps raw (loaded, total) byte counts to a displayed percentage.
///
/// The display never decreases and stays within [0, 100]. Events without a
/// computable total (`total == 0`, the server sent no content length) leave
/// the display unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressTracker {
    percent: f32,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in one progress event and return the updated display percentage.
    pub fn update(&mut self, loaded: u64, total: u64) -> f32 {
        if total > 0 {
            let pct = (loaded as f32 * 100.0 / total as f32).clamp(0.0, 100.0);
            if pct > self.percent {
                self.percent = pct;
            }
        }
        self.percent
    }

    pub fn percent(&self) -> f32 {
        self.percent
    }

    pub fn reset(&mut self) {
        self.percent = 0.0;
    }
}
