use dioxus::prelude::*;

use crate::views::ProblemView;

#[component]
pub fn App() -> Element {
    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "Math Tutor" }

        div { class: "app-root",
            ProblemView {}
        }
    }
}
