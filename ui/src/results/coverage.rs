use dioxus::prelude::*;

use crate::core::format;
use crate::core::platform::Platform;
use crate::dedup::{export_coverage, CoverageItem, Delivery, ExportError, InstalledResult, PlatformDownload};
use crate::results::difficulty_badge_class;
use crate::{i18n, t};

#[derive(Clone, Debug, PartialEq)]
enum ExportStatus {
    Idle,
    Working,
    Done(String),
    Error(String),
}

/// The minimal practice set with its CSV export. Key it by attempt so a new
/// result starts with a clean export status.
#[component]
pub fn CoverageSet(installed: InstalledResult) -> Element {
    i18n::use_language();
    let items = installed.result.coverage_set.clone();
    let has_items = !items.is_empty();
    let mut status = use_signal(|| ExportStatus::Idle);

    let hint = if Platform::current().downloads_via_browser() {
        t!("export-hint-web")
    } else {
        t!("export-hint-desktop")
    };

    let feedback = match &status() {
        ExportStatus::Idle => None,
        ExportStatus::Working => Some((
            "dashboard-card__meta".to_string(),
            format!("{}…", t!("export-working")),
        )),
        ExportStatus::Done(message) => Some((
            "dashboard-card__meta dashboard-card__meta--success".to_string(),
            format!("✅ {message}"),
        )),
        ExportStatus::Error(err) => Some((
            "dashboard-card__meta dashboard-card__meta--error".to_string(),
            format!("⚠️ {err}"),
        )),
    };

    let export_handler = move |_| {
        if status() == ExportStatus::Working {
            return;
        }
        status.set(ExportStatus::Working);
        match perform_export(&installed) {
            Ok(message) => status.set(ExportStatus::Done(message)),
            Err(err) => {
                tracing::warn!(%err, "coverage export failed");
                status.set(ExportStatus::Error(export_error_message(&err)));
            }
        }
    };

    rsx! {
        section { class: "dashboard-card coverage-set",
            div { class: "dashboard-card__header",
                div {
                    h2 { {t!("coverage-title")} }
                    p { class: "dashboard-card__subtitle", {t!("coverage-intro")} }
                }
                div { class: "coverage-set__actions",
                    button {
                        r#type: "button",
                        class: "button button--primary",
                        disabled: !has_items || status() == ExportStatus::Working,
                        title: "{hint}",
                        onclick: export_handler,
                        {t!("coverage-export")}
                    }
                }
            }

            if let Some((class_name, message)) = feedback {
                p { class: "{class_name}", role: "status", "{message}" }
            }

            if !has_items {
                p { class: "dashboard-card__placeholder", {t!("coverage-empty")} }
            } else {
                ol { class: "coverage-set__items",
                    for (position, item) in items.into_iter().enumerate() {
                        {render_item(position, item)}
                    }
                }
            }
        }
    }
}

fn perform_export(installed: &InstalledResult) -> Result<String, ExportError> {
    let target = PlatformDownload::new()?;
    let message = match export_coverage(Some(installed.result.as_ref()), &target)? {
        Some(Delivery::Saved(path)) => t!("export-saved", path = path.display().to_string()),
        Some(Delivery::Started) => t!("export-started"),
        None => t!("export-skipped"),
    };
    Ok(message)
}

fn export_error_message(err: &ExportError) -> String {
    match err {
        ExportError::NoExportDirectory => t!("export-error-no-directory"),
        ExportError::Io(reason) => t!("export-error-io", reason = reason.as_str()),
        ExportError::Browser(reason) => t!("export-error-browser", reason = reason.as_str()),
    }
}

fn render_item(position: usize, item: CoverageItem) -> Element {
    let CoverageItem {
        text,
        difficulty,
        source_document,
        cluster_confidence,
    } = item;
    let badge = difficulty_badge_class(difficulty);
    let confidence = format::format_percent(cluster_confidence);
    let number = position + 1;

    rsx! {
        li { key: "{position}", class: "coverage-set__item",
            span { class: "coverage-set__number", "{number}" }
            div { class: "coverage-set__body",
                p { class: "coverage-set__text", "{text}" }
                div { class: "cluster__tags",
                    span { class: "{badge}", "{difficulty}" }
                    span { class: "source-tag", "{source_document}" }
                    span { class: "coverage-set__confidence", "{confidence}" }
                }
            }
        }
    }
}
