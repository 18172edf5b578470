use dioxus::prelude::*;

use crate::core::format;
use crate::dedup::{summarize, InstalledResult};
use crate::results::format_time_badge;
use crate::{i18n, t};

/// Headline numbers for the installed result.
#[component]
pub fn ResultsOverview(installed: InstalledResult) -> Element {
    i18n::use_language();
    let summary = summarize(&installed.result);
    let analyzed_at = format_time_badge(installed.received_at);
    let reduction = format::format_reported_percent(summary.reduction_percent);

    let cards = [
        (t!("summary-total-questions"), summary.total_questions.to_string(), "stat-card--questions"),
        (t!("summary-clusters"), summary.total_clusters.to_string(), "stat-card--clusters"),
        (t!("summary-optimized"), summary.reduced_question_count.to_string(), "stat-card--optimized"),
        (t!("summary-reduction"), reduction, "stat-card--reduction"),
    ];

    rsx! {
        section { class: "results-overview",
            div { class: "results-overview__cards",
                for (label, value, modifier) in cards.into_iter() {
                    div { key: "{modifier}", class: "stat-card {modifier}",
                        span { class: "stat-card__label", "{label}" }
                        span { class: "stat-card__value", "{value}" }
                    }
                }
            }

            div { class: "results-overview__meta",
                span { {t!("summary-analyzed-at", time = analyzed_at)} }
                span { {t!("summary-duplicates", count = summary.duplicate_clusters)} }
                if let Some(mean) = summary.mean_confidence {
                    span { {t!("summary-mean-confidence", value = format::format_percent(mean))} }
                }
            }
        }
    }
}
