//! Fluent localization for the dashboard.
//!
//! Bundles live under `i18n/<lang>/examdedup_ui.ftl` and are embedded at
//! compile time with `rust-embed`, so web and desktop builds ship the same
//! strings. `en-US` is the reference locale; every other locale must carry
//! the same message ids (see `tests/i18n_missing_keys.rs`).
//!
//! Components call [`init`] once (the launchers do it), look messages up with
//! [`t!`](crate::t) and subscribe to language switches with [`use_language`].
//!
//! Placeables are rendered without Unicode isolation marks so counts and
//! file paths can be embedded in plain attribute strings.

use std::sync::Once;

use dioxus::prelude::*;
use i18n_embed::fluent::FluentLanguageLoader;
use i18n_embed::I18nEmbedError;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use unic_langid::{langid, LanguageIdentifier};

pub use i18n_embed_fl::fl;

/// Lookup through the shared loader.
///
/// ```ignore
/// t!("view-clusters");
/// t!("cluster-heading", index = 3);
/// ```
#[macro_export]
macro_rules! t {
    ($key:literal) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key)
    };
    ($key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!(&*$crate::i18n::LOADER, $key, $( $arg = $value ),+ )
    };
}

/// Bundle name; also the `.ftl` file stem in every locale folder.
const DOMAIN: &str = "examdedup_ui";

pub const FALLBACK_LANGUAGE: LanguageIdentifier = langid!("en-US");

#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

pub static LOADER: Lazy<FluentLanguageLoader> =
    Lazy::new(|| FluentLanguageLoader::new(DOMAIN, FALLBACK_LANGUAGE));

static INIT: Once = Once::new();

/// Load the bundles matching the user's preferred languages. Idempotent.
pub fn init() {
    INIT.call_once(|| {
        let requested = requested_languages();
        match select(&requested) {
            Ok(()) => tracing::debug!(?requested, "localization ready"),
            Err(err) => tracing::warn!(%err, "language selection failed; using fallback"),
        }
    });
}

/// Switch to `tag` at runtime. Unparseable tags are ignored; tags without an
/// embedded bundle fall back to [`FALLBACK_LANGUAGE`].
pub fn set_language(tag: &str) -> Result<(), I18nEmbedError> {
    let Ok(lang) = tag.parse::<LanguageIdentifier>() else {
        tracing::debug!(tag, "ignoring unparseable language tag");
        return Ok(());
    };
    select(&[lang])
}

/// Loads `requested` and turns isolation off on the freshly built bundles.
fn select(requested: &[LanguageIdentifier]) -> Result<(), I18nEmbedError> {
    i18n_embed::select(&*LOADER, &Localizations, requested)?;
    LOADER.set_use_isolating(false);
    Ok(())
}

/// Embedded locale folders, sorted.
pub fn available_languages() -> Vec<String> {
    let mut langs: Vec<String> = Localizations::iter()
        .filter_map(|path| path.split('/').next().map(str::to_string))
        .collect();
    langs.sort();
    langs.dedup();
    langs
}

/// Subscribe the calling component to the launcher-provided language code so
/// its `t!` lookups refresh after a switch. Returns the active code.
pub fn use_language() -> String {
    try_use_context::<Signal<String>>()
        .map(|code| code())
        .unwrap_or_else(|| FALLBACK_LANGUAGE.to_string())
}

#[cfg(target_arch = "wasm32")]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::WebLanguageRequester::requested_languages()
}

#[cfg(not(target_arch = "wasm32"))]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::DesktopLanguageRequester::requested_languages()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_locales_are_embedded() {
        let langs = available_languages();
        assert!(langs.iter().any(|l| l == "en-US"));
        assert!(langs.iter().any(|l| l == "es-ES"));
    }

    #[test]
    fn plain_lookup_is_not_empty() {
        init();
        assert!(!fl!(&*LOADER, "coverage-export").is_empty());
    }

    #[test]
    fn placeables_have_no_isolation_marks() {
        init();
        let heading = fl!(&*LOADER, "cluster-heading", index = 4);
        assert!(heading.ends_with('4'));
        assert!(!heading.contains('\u{2068}'));
    }

    #[test]
    fn unknown_language_keeps_a_usable_bundle() {
        init();
        assert!(set_language("not a tag!").is_ok());
        let _ = set_language("zz-ZZ");
        assert!(!fl!(&*LOADER, "view-coverage").is_empty());
    }

    #[test]
    fn switching_language_keeps_placeables_unisolated() {
        init();
        set_language("es-ES").expect("es-ES is embedded");
        let spanish = fl!(&*LOADER, "cluster-heading", index = 7);
        set_language("en-US").expect("en-US is embedded");
        let english = fl!(&*LOADER, "cluster-heading", index = 7);

        for heading in [spanish, english] {
            assert!(heading.ends_with('7'), "{heading:?}");
            assert!(!heading.contains(['\u{2068}', '\u{2069}']), "{heading:?}");
        }
    }
}
