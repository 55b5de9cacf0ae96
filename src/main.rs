use dioxus::prelude::*;

mod analytics;
mod api;
mod cache;
mod cache_service;
mod components;
mod db;
mod error;
mod locale;
mod query_param;
mod translations;

use components::AppView;

const APP_CSS: Asset = asset!("/assets/styling/app.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Meta { name: "theme-color", content: "#2f6f5e" }
        document::Meta { name: "mobile-web-app-capable", content: "yes" }
        document::Meta { name: "apple-mobile-web-app-title", content: "Quran Reader" }

        document::Stylesheet { href: APP_CSS }

        Router::<AppView> {}
    }
}
