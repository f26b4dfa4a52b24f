use dioxus::prelude::*;

#[component]
pub fn WelcomeScreen(on_start: EventHandler<()>) -> Element {
    rsx! {
        div { class: "survey-welcome",
            h1 { "Welcome to our Customer Survey" }
            button {
                class: "btn btn-primary",
                r#type: "button",
                onclick: move |_| on_start.call(()),
                "Start Survey"
            }
        }
    }
}
