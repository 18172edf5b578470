//! Cross-cutting helpers: service configuration, formatting, platform detection.

pub mod config;
pub mod format;
pub mod platform;
