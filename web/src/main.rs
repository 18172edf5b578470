use dioxus::prelude::*;

use ui::components::AppNavbar;
use ui::views::Dashboard;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebNavbar)]
    #[route("/")]
    Dashboard {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    // `launch` installs the tracing subscriber used across the ui crate.
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    ui::i18n::init();

    // Global reactive language code; AppNavbar updates it on selection.
    use_context_provider(|| Signal::new("en-US".to_string()));

    rsx! {
        document::Link { rel: "stylesheet", href: ui::THEME_CSS }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        Router::<Route> {}
    }
}

/// A web-specific Router around the shared `AppNavbar` component
/// which allows us to use the web-specific `Route` enum.
#[component]
fn WebNavbar() -> Element {
    rsx! {
        AppNavbar {}
        Outlet::<Route> {}
    }
}
