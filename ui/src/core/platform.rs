//! Platform detection helpers.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Web,
    Desktop,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_arch = "wasm32") {
            Self::Web
        } else {
            Self::Desktop
        }
    }

    /// Exports go through the browser's download manager rather than the filesystem.
    pub fn downloads_via_browser(self) -> bool {
        matches!(self, Self::Web)
    }
}
