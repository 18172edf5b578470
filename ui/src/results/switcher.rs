use dioxus::prelude::*;

use crate::dedup::{DashboardSession, ViewMode};
use crate::{i18n, t};

#[component]
pub fn ViewSwitcher(session: Signal<DashboardSession>) -> Element {
    i18n::use_language();
    let active = session.read().view_mode();

    rsx! {
        div { class: "view-switcher", role: "tablist",
            for mode in ViewMode::ALL {
                button {
                    key: "{mode:?}",
                    r#type: "button",
                    role: "tab",
                    aria_selected: mode == active,
                    class: if mode == active {
                        "view-switcher__tab view-switcher__tab--active"
                    } else {
                        "view-switcher__tab"
                    },
                    onclick: move |_| {
                        let mut session = session;
                        session.with_mut(|s| s.select_view(mode));
                    },
                    {view_label(mode)}
                }
            }
        }
    }
}

fn view_label(mode: ViewMode) -> String {
    match mode {
        ViewMode::Clusters => t!("view-clusters"),
        ViewMode::Coverage => t!("view-coverage"),
    }
}
