//! Locale completeness guards.
//!
//! Message ids are pulled out of the `.ftl` files with a line heuristic:
//! `id = ...` at the start of a line, ignoring comments, terms, attributes and
//! the variant lines of selectors. Good enough for flat bundles like ours.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

const FTL_FILENAME: &str = "examdedup_ui.ftl";
const FALLBACK: &str = "en-US";

fn crate_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn is_message_id(candidate: &str) -> bool {
    !candidate.is_empty()
        && candidate.starts_with(|c: char| c.is_ascii_lowercase())
        && candidate
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Message ids in definition order, duplicates included.
fn message_ids(src: &str) -> Vec<String> {
    src.lines()
        .filter(|line| !line.starts_with([' ', '\t', '#', '-', '.', '*', '[']))
        .filter_map(|line| line.split_once('='))
        .map(|(id, _)| id.trim())
        .filter(|id| is_message_id(id))
        .map(str::to_string)
        .collect()
}

fn locale_bundles() -> Vec<(String, String)> {
    let root = crate_root().join("i18n");
    let mut bundles: Vec<(String, String)> = fs::read_dir(&root)
        .unwrap_or_else(|err| panic!("cannot list {}: {err}", root.display()))
        .flatten()
        .filter(|entry| entry.path().is_dir())
        .map(|entry| {
            let locale = entry.file_name().to_string_lossy().into_owned();
            let path = entry.path().join(FTL_FILENAME);
            let src = fs::read_to_string(&path)
                .unwrap_or_else(|err| panic!("locale {locale} is missing {}: {err}", path.display()));
            (locale, src)
        })
        .collect();
    bundles.sort();
    bundles
}

fn fallback_ids() -> BTreeSet<String> {
    let bundles = locale_bundles();
    let (_, src) = bundles
        .iter()
        .find(|(locale, _)| locale == FALLBACK)
        .expect("fallback locale present");
    let ids: BTreeSet<String> = message_ids(src).into_iter().collect();
    assert!(!ids.is_empty(), "fallback bundle defines no messages");
    ids
}

#[test]
fn no_bundle_defines_an_id_twice() {
    for (locale, src) in locale_bundles() {
        let mut seen = BTreeSet::new();
        let dups: Vec<String> = message_ids(&src)
            .into_iter()
            .filter(|id| !seen.insert(id.clone()))
            .collect();
        assert!(dups.is_empty(), "{locale} defines these ids twice: {dups:?}");
    }
}

#[test]
fn all_locales_have_all_fallback_keys() {
    let expected = fallback_ids();
    let mut failures = Vec::new();

    for (locale, src) in locale_bundles() {
        let present: BTreeSet<String> = message_ids(&src).into_iter().collect();
        let missing: Vec<&String> = expected.difference(&present).collect();
        if !missing.is_empty() {
            failures.push(format!("{locale} is missing {missing:?}"));
        }
    }

    assert!(
        failures.is_empty(),
        "Translation completeness check failed:\n{}\nHint: copy the ids from {FALLBACK}, then translate.",
        failures.join("\n")
    );
}

/// Every literal `t!("...")` id used under `src/` must exist in the fallback.
#[test]
fn referenced_keys_exist_in_fallback() {
    let expected = fallback_ids();
    let mut referenced = BTreeSet::new();
    collect_referenced_keys(&crate_root().join("src"), &mut referenced);
    assert!(!referenced.is_empty(), "no t!() usages found under src/");

    let missing: Vec<&String> = referenced.difference(&expected).collect();
    assert!(missing.is_empty(), "ids used in code but missing from {FALLBACK}: {missing:?}");
}

fn collect_referenced_keys(dir: &Path, found: &mut BTreeSet<String>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for path in entries.flatten().map(|entry| entry.path()) {
        if path.is_dir() {
            collect_referenced_keys(&path, found);
            continue;
        }
        if path.extension().and_then(|ext| ext.to_str()) != Some("rs") {
            continue;
        }
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };
        for (pos, needle) in content.match_indices("t!(\"") {
            // Skip `format!(`, `fl!(` and friends.
            let standalone = content[..pos]
                .chars()
                .next_back()
                .map_or(true, |c| !(c.is_alphanumeric() || c == '_'));
            let rest = &content[pos + needle.len()..];
            if let (true, Some(end)) = (standalone, rest.find('"')) {
                let key = &rest[..end];
                if is_message_id(key) {
                    found.insert(key.to_string());
                }
            }
        }
    }
}
