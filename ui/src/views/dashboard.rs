use dioxus::prelude::*;

use crate::dedup::{DashboardSession, ViewMode};
use crate::results::{ClusterList, CoverageSet, ResultsCharts, ResultsOverview, ViewSwitcher};
use crate::upload::UploadPanel;
use crate::{i18n, t};

/// The single page: upload, then explore clusters or the practice set.
#[component]
pub fn Dashboard() -> Element {
    i18n::use_language();

    let session = use_signal(DashboardSession::new);
    let loading = session.read().is_loading();
    let installed = session.read().installed().cloned();
    let mode = session.read().view_mode();
    let attempt = installed.as_ref().map(|i| i.attempt).unwrap_or_default();

    rsx! {
        section { class: "page page-dashboard",
            header { class: "page-dashboard__intro",
                h1 { {t!("dashboard-title")} }
                p { {t!("dashboard-intro")} }
            }

            UploadPanel { session }

            if loading {
                div { class: "dashboard-loading", role: "status", aria_live: "polite",
                    span { class: "spinner spinner--large", aria_hidden: "true" }
                    p { {t!("dashboard-loading")} }
                    div { class: "dashboard-loading__skeleton",
                        for slot in 0..4 {
                            div { key: "{slot}", class: "skeleton-card" }
                        }
                    }
                }
            }

            if let Some(installed) = installed {
                ResultsOverview { installed: installed.clone() }
                ResultsCharts { installed: installed.clone() }
                ViewSwitcher { session }
                {match mode {
                    ViewMode::Clusters => rsx! { ClusterList { session } },
                    ViewMode::Coverage => rsx! {
                        CoverageSet { key: "{attempt}", installed: installed.clone() }
                    },
                }}
            }
        }
    }
}
