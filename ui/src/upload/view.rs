use std::path::Path;
use std::rc::Rc;

use dioxus::prelude::*;

use crate::dedup::{
    submit, DashboardSession, HttpTransport, SelectedFile, SessionCell, UploadError,
};
use crate::{i18n, t};

impl SessionCell for Signal<DashboardSession> {
    fn update<R>(&mut self, f: impl FnOnce(&mut DashboardSession) -> R) -> R {
        self.with_mut(f)
    }
}

/// File picker plus the submit button. The session signal is shared with the
/// dashboard so results and errors render outside this panel.
#[component]
pub fn UploadPanel(session: Signal<DashboardSession>) -> Element {
    i18n::use_language();
    let mut files = use_signal(Vec::<SelectedFile>::new);
    let mut reading = use_signal(|| false);
    let transport = use_hook(|| Rc::new(HttpTransport::default()));

    let loading = session.read().is_loading();
    let error = session.read().error().map(error_message);
    let picked = files.read().len();
    let names: Vec<String> = files.read().iter().map(|file| file.name.clone()).collect();

    let on_pick = move |evt: FormEvent| async move {
        let Some(engine) = evt.files() else {
            return;
        };
        reading.set(true);
        let mut selected = Vec::new();
        for path in engine.files() {
            match engine.read_file(&path).await {
                Some(bytes) => selected.push(SelectedFile::new(display_name(&path), bytes)),
                None => tracing::warn!(%path, "could not read selected file"),
            }
        }
        tracing::debug!(count = selected.len(), "files selected");
        files.set(selected);
        reading.set(false);
    };

    let on_submit = move |_| {
        let picked = files();
        let transport = transport.clone();
        let mut cell = session;
        spawn(async move {
            if let Err(rejection) = submit(&mut cell, transport.as_ref(), picked).await {
                tracing::debug!(%rejection, "submit not started");
            }
        });
    };

    rsx! {
        section { class: "dashboard-card upload-panel",
            div { class: "dashboard-card__header",
                h2 { {t!("upload-title")} }
            }

            label { class: "upload-panel__dropzone",
                r#for: "upload-input",
                input {
                    id: "upload-input",
                    class: "visually-hidden",
                    r#type: "file",
                    accept: ".pdf,application/pdf",
                    multiple: true,
                    disabled: loading,
                    onchange: on_pick,
                }
                span { class: "upload-panel__icon", aria_hidden: "true", "⇪" }
                if picked > 0 {
                    span { class: "upload-panel__label", {t!("upload-selected", count = picked)} }
                } else {
                    span { class: "upload-panel__label", {t!("upload-select")} }
                }
                span { class: "upload-panel__hint", {t!("upload-hint")} }
            }

            if !names.is_empty() {
                ul { class: "upload-panel__files",
                    for name in names.iter() {
                        li { key: "{name}", class: "upload-panel__file", "{name}" }
                    }
                }
            }

            button {
                r#type: "button",
                class: "button button--primary upload-panel__submit",
                disabled: loading || reading(),
                onclick: on_submit,
                if loading {
                    span { class: "spinner", aria_hidden: "true" }
                    {t!("upload-processing")}
                } else if reading() {
                    {t!("upload-reading")}
                } else {
                    {t!("upload-submit")}
                }
            }

            if let Some(message) = error {
                p { class: "upload-panel__error", role: "alert", "{message}" }
            }
        }
    }
}

/// Localized text for a failed attempt. A `detail` sent by the service is
/// shown verbatim.
fn error_message(err: &UploadError) -> String {
    match err {
        UploadError::NoFiles => t!("error-no-files"),
        UploadError::NotPdf(name) => t!("error-not-pdf", name = name.as_str()),
        UploadError::Transport(reason) => t!("error-transport", reason = reason.as_str()),
        UploadError::Service {
            detail: Some(detail), ..
        } => detail.clone(),
        UploadError::Service { status, detail: None } => {
            t!("error-service", status = (*status))
        }
        UploadError::Malformed(reason) => t!("error-malformed", reason = reason.as_str()),
    }
}

/// Browsers hand over bare names; desktop pickers hand over full paths.
fn display_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}
