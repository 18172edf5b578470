//! Two-mode switch between full cluster inspection and the coverage set.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Clusters,
    Coverage,
}

impl ViewMode {
    pub const ALL: [ViewMode; 2] = [ViewMode::Clusters, ViewMode::Coverage];
}

/// Holds the active [`ViewMode`]. Only explicit selection changes it; there
/// is no terminal state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewController {
    mode: ViewMode,
}

impl ViewController {
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Returns `true` when the mode actually changed.
    pub fn select(&mut self, mode: ViewMode) -> bool {
        let changed = self.mode != mode;
        self.mode = mode;
        changed
    }

    pub fn reset(&mut self) {
        self.mode = ViewMode::Clusters;
    }
}
