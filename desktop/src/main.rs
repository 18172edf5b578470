#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

#[cfg(feature = "desktop")]
use dioxus::desktop::{tao::window::WindowBuilder, Config, LogicalSize};
use dioxus::prelude::*;

use ui::components::AppNavbar;
use ui::views::Dashboard;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(DesktopShell)]
    #[route("/")]
    Dashboard {},
}

// The shared theme is compiled in; packaged builds carry no asset folder.
const THEME_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

#[cfg(feature = "desktop")]
fn main() {
    LaunchBuilder::desktop()
        .with_cfg(
            Config::new().with_window(
                WindowBuilder::new()
                    .with_title(format!("ExamDedup – v{}", env!("CARGO_PKG_VERSION")))
                    .with_min_inner_size(LogicalSize::new(720.0, 560.0))
                    .with_maximized(true),
            ),
        )
        .launch(App);
}

#[component]
fn App() -> Element {
    ui::i18n::init();

    // Active language code; AppNavbar writes it, views subscribe to it.
    use_context_provider(|| Signal::new("en-US".to_string()));

    // Some window managers ignore the builder's maximize hint.
    #[cfg(feature = "desktop")]
    {
        let win = dioxus::desktop::use_window();
        use_effect(move || {
            win.set_maximized(true);
        });
    }

    rsx! {
        document::Style { "{THEME_CSS_INLINE}" }
        Router::<Route> {}
    }
}

#[component]
fn DesktopShell() -> Element {
    rsx! {
        AppNavbar {}
        Outlet::<Route> {}
    }
}
