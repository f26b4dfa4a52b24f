use dioxus::prelude::*;

#[component]
pub fn ThankYouScreen() -> Element {
    rsx! {
        div { class: "survey-thank-you",
            h1 { "Thank you for your feedback!" }
            p { "You will be redirected shortly..." }
        }
    }
}
