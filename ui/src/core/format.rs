//! Formatting helpers for presenting scores and counts.

/// A `[0, 1]` score as a whole percentage: `0.912` → `91%`.
pub fn format_percent(fraction: f64) -> String {
    if fraction.is_finite() {
        format!("{:.0}%", fraction * 100.0)
    } else {
        "—".to_string()
    }
}

/// A value that is already a percentage, shown as reported: `33.33` → `33.33%`.
pub fn format_reported_percent(value: f64) -> String {
    if value.is_finite() {
        format!("{value}%")
    } else {
        "—".to_string()
    }
}

/// Width for a bar whose length encodes a `[0, 1]` score.
pub fn bar_width(fraction: f64) -> String {
    let clamped = if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };
    format!("width: {:.1}%", clamped * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds_to_whole_numbers() {
        assert_eq!(format_percent(0.912), "91%");
        assert_eq!(format_percent(1.0), "100%");
        assert_eq!(format_percent(f64::NAN), "—");
    }

    #[test]
    fn reported_percent_is_verbatim() {
        assert_eq!(format_reported_percent(33.33), "33.33%");
        assert_eq!(format_reported_percent(50.0), "50%");
    }

    #[test]
    fn bar_width_is_clamped() {
        assert_eq!(bar_width(0.5), "width: 50.0%");
        assert_eq!(bar_width(1.7), "width: 100.0%");
        assert_eq!(bar_width(f64::INFINITY), "width: 0.0%");
    }
}
