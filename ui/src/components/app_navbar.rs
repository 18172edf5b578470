use dioxus::prelude::*;

use crate::i18n;
use crate::t;

const NAVBAR_CSS: Asset = asset!("/assets/styling/navbar.css");
const NAVBAR_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/styling/navbar.css"
));

/// Brand header with the locale switcher.
///
/// The launchers provide a `Signal<String>` context holding the active
/// language code. Picking a language here writes it, and every component that
/// called [`i18n::use_language`] re-renders with fresh lookups.
#[component]
pub fn AppNavbar(children: Element) -> Element {
    i18n::init();
    let active = i18n::use_language();
    let lang_code = try_use_context::<Signal<String>>();
    let languages = use_hook(i18n::available_languages);

    let on_change = move |evt: FormEvent| {
        let requested = evt.value();
        match i18n::set_language(&requested) {
            Ok(()) => {
                tracing::info!(lang = %requested, "language switched");
                if let Some(mut code) = lang_code {
                    code.set(requested);
                }
            }
            Err(err) => tracing::warn!(%err, lang = %requested, "language switch failed"),
        }
    };

    rsx! {
        document::Link { rel: "stylesheet", href: NAVBAR_CSS }
        if cfg!(all(not(debug_assertions), not(target_arch = "wasm32"))) {
            document::Style { "{NAVBAR_CSS_INLINE}" }
        }

        header { id: "navbar", class: "navbar",
            div { class: "navbar__inner",
                div { class: "navbar__brand",
                    span { class: "navbar__brand-link",
                        span { class: "navbar__brand-spark", aria_hidden: "true" }
                        span { class: "navbar__brand-mark", "ExamDedup" }
                    }
                    span { class: "navbar__brand-subtitle", {t!("tagline")} }
                }

                nav { class: "navbar__links", {children} }

                if languages.len() > 1 {
                    div { class: "navbar__locale",
                        label { class: "visually-hidden", r#for: "locale-select",
                            {t!("nav-language-label")}
                        }
                        select {
                            id: "locale-select",
                            value: "{active}",
                            oninput: on_change,
                            for code in languages.iter() {
                                option { key: "{code}", value: "{code}", selected: *code == active, "{code}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
