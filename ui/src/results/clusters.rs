use dioxus::prelude::*;

use crate::core::format;
use crate::dedup::{Cluster, DashboardSession, Difficulty};
use crate::results::difficulty_badge_class;
use crate::{i18n, t};

#[component]
pub fn ClusterList(session: Signal<DashboardSession>) -> Element {
    i18n::use_language();
    let state = session.read();
    let Some(result) = state.result() else {
        return rsx! {};
    };

    let entries: Vec<ClusterEntry> = result
        .clusters
        .iter()
        .enumerate()
        .map(|(index, cluster)| ClusterEntry::new(index, cluster, state.expansion().is_expanded(index)))
        .collect();
    let has_entries = !entries.is_empty();
    let all_open = has_entries && state.expansion().len() == entries.len();
    drop(state);

    rsx! {
        section { class: "dashboard-card cluster-list",
            div { class: "dashboard-card__header",
                h2 { {t!("view-clusters")} }
                if has_entries {
                    button {
                        r#type: "button",
                        class: "button button--ghost",
                        onclick: move |_| {
                            let mut session = session;
                            session.with_mut(|s| if all_open { s.collapse_all() } else { s.expand_all() });
                        },
                        if all_open {
                            {t!("clusters-collapse-all")}
                        } else {
                            {t!("clusters-expand-all")}
                        }
                    }
                }
            }

            if !has_entries {
                p { class: "dashboard-card__placeholder", {t!("clusters-empty")} }
            } else {
                ul { class: "cluster-list__items",
                    for entry in entries.into_iter() {
                        {render_cluster(entry, session)}
                    }
                }
            }
        }
    }
}

#[derive(Clone)]
struct ClusterEntry {
    index: usize,
    expanded: bool,
    confidence: f64,
    size: usize,
    canonical: String,
    difficulty: Difficulty,
    source: String,
    members: Vec<MemberLine>,
}

#[derive(Clone)]
struct MemberLine {
    text: String,
    difficulty: Difficulty,
    source: String,
    similarity: f64,
}

impl ClusterEntry {
    fn new(index: usize, cluster: &Cluster, expanded: bool) -> Self {
        Self {
            index,
            expanded,
            confidence: cluster.confidence,
            size: cluster.members.len(),
            canonical: cluster.canonical.text.clone(),
            difficulty: cluster.canonical.difficulty,
            source: cluster.canonical.source_document.clone(),
            // Members only render when the cluster is open.
            members: if expanded {
                cluster
                    .members
                    .iter()
                    .map(|member| MemberLine {
                        text: member.text.clone(),
                        difficulty: member.difficulty,
                        source: member.source_document.clone(),
                        similarity: member.similarity,
                    })
                    .collect()
            } else {
                Vec::new()
            },
        }
    }
}

fn render_cluster(entry: ClusterEntry, session: Signal<DashboardSession>) -> Element {
    let ClusterEntry {
        index,
        expanded,
        confidence,
        size,
        canonical,
        difficulty,
        source,
        members,
    } = entry;

    let confidence_label = format::format_percent(confidence);
    let confidence_width = format::bar_width(confidence);
    let badge = difficulty_badge_class(difficulty);
    let number = index + 1;

    rsx! {
        li {
            key: "{index}",
            class: if expanded { "cluster cluster--open" } else { "cluster" },
            button {
                r#type: "button",
                class: "cluster__toggle",
                aria_expanded: expanded,
                onclick: move |_| {
                    let mut session = session;
                    session.with_mut(|s| s.toggle_cluster(index));
                },

                span { class: "cluster__heading",
                    span { class: "cluster__title", {t!("cluster-heading", index = number)} }
                    span { class: "cluster__size", {t!("cluster-size", count = size)} }
                    span { class: "cluster__chevron", aria_hidden: "true",
                        if expanded { "▾" } else { "▸" }
                    }
                }

                span { class: "cluster__confidence",
                    span { class: "cluster__confidence-track",
                        span { class: "cluster__confidence-fill", style: "{confidence_width}" }
                    }
                    span { class: "cluster__confidence-value", "{confidence_label}" }
                }

                span { class: "cluster__canonical",
                    span { class: "cluster__canonical-label", {t!("cluster-canonical")} }
                    span { class: "cluster__canonical-text", "{canonical}" }
                    span { class: "cluster__tags",
                        span { class: "{badge}", "{difficulty}" }
                        span { class: "source-tag", "{source}" }
                    }
                }
            }

            if expanded {
                div { class: "cluster__members",
                    h3 { class: "cluster__members-title", {t!("cluster-members")} }
                    ol { class: "cluster__member-list",
                        for (position, member) in members.into_iter().enumerate() {
                            {render_member(position, member)}
                        }
                    }
                }
            }
        }
    }
}

fn render_member(position: usize, member: MemberLine) -> Element {
    let MemberLine {
        text,
        difficulty,
        source,
        similarity,
    } = member;
    let badge = difficulty_badge_class(difficulty);
    let similarity = format::format_percent(similarity);

    rsx! {
        li { key: "{position}", class: "cluster__member",
            p { class: "cluster__member-text", "{text}" }
            div { class: "cluster__tags",
                span { class: "{badge}", "{difficulty}" }
                span { class: "source-tag", "{source}" }
                span { class: "cluster__similarity", {t!("cluster-similarity", value = similarity)} }
            }
        }
    }
}
