use dioxus::prelude::*;

use crate::core::format;
use crate::dedup::aggregate::{difficulty_chart, source_chart};
use crate::dedup::{difficulty_histogram, per_source_histogram, ChartPoint, InstalledResult};
use crate::results::share;
use crate::{i18n, t};

/// Difficulty and per-document distributions side by side.
#[component]
pub fn ResultsCharts(installed: InstalledResult) -> Element {
    i18n::use_language();
    let result = Some(installed.result.as_ref());
    let difficulty = difficulty_chart(&difficulty_histogram(result));
    let sources = source_chart(&per_source_histogram(result));

    rsx! {
        div { class: "results-charts",
            section { class: "dashboard-card results-chart",
                div { class: "dashboard-card__header",
                    h2 { {t!("chart-difficulty-title")} }
                }
                ChartBars { points: difficulty, modifier: "difficulty" }
            }
            section { class: "dashboard-card results-chart",
                div { class: "dashboard-card__header",
                    h2 { {t!("chart-sources-title")} }
                }
                ChartBars { points: sources, modifier: "source" }
            }
        }
    }
}

/// Horizontal bars, each scaled against the sum of all values.
#[component]
pub fn ChartBars(points: Vec<ChartPoint>, modifier: &'static str) -> Element {
    i18n::use_language();
    let total: usize = points.iter().map(|point| point.value).sum();

    if total == 0 {
        return rsx! {
            p { class: "dashboard-card__placeholder", {t!("chart-empty")} }
        };
    }

    rsx! {
        ul { class: "chart-bars chart-bars--{modifier}",
            for point in points.into_iter() {
                {render_bar(point, total)}
            }
        }
    }
}

fn render_bar(point: ChartPoint, total: usize) -> Element {
    let fraction = share(point.value, total);
    let width = format::bar_width(fraction);
    let percent = format::format_percent(fraction);
    let ChartPoint { name, value } = point;

    rsx! {
        li { key: "{name}", class: "chart-bars__row",
            span { class: "chart-bars__label", title: "{name}", "{name}" }
            div { class: "chart-bars__track",
                div { class: "chart-bars__fill", style: "{width}" }
            }
            span { class: "chart-bars__value", "{value} · {percent}" }
        }
    }
}
