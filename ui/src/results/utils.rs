use time::{macros::format_description, OffsetDateTime};

use crate::dedup::Difficulty;

/// Wall-clock `HH:MM`. UTC stamps are labelled, since they only appear when
/// the local offset could not be determined.
pub(crate) fn format_time_badge(date: OffsetDateTime) -> String {
    let formatted = if date.offset().is_utc() {
        date.format(&format_description!("[hour]:[minute] UTC"))
    } else {
        date.format(&format_description!("[hour]:[minute]"))
    };
    formatted.unwrap_or_else(|_| "—".to_string())
}

/// Share of `value` in `total` as a `[0, 1]` fraction; zero when `total` is zero.
pub(crate) fn share(value: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        value as f64 / total as f64
    }
}

pub(crate) fn difficulty_badge_class(difficulty: Difficulty) -> String {
    format!("difficulty-badge difficulty-badge--{}", difficulty.css_modifier())
}
