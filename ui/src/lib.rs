//! Shared UI crate for ExamDedup: the deduplication engine, its dashboard
//! components and the localized chrome used by the web and desktop launchers.

use dioxus::prelude::*;

pub mod core;
pub mod dedup;
pub mod i18n;
pub mod results;
pub mod upload;
pub mod views;

pub mod components {
    // Localized application navbar (components/app_navbar.rs)
    pub mod app_navbar;
    pub use app_navbar::AppNavbar;
}

/// Shared theme stylesheet. Web links it; desktop embeds the file directly.
pub const THEME_CSS: Asset = asset!("/assets/theme/main.css");
