use dioxus::prelude::*;
use services::SubmitDecision;

/// Blocking confirmation before the survey is submitted.
#[component]
pub fn ConfirmSubmitModal(on_decide: EventHandler<SubmitDecision>) -> Element {
    rsx! {
        div {
            class: "survey-modal-overlay",
            onclick: move |_| on_decide.call(SubmitDecision::Declined),
            div {
                class: "survey-modal",
                onclick: move |evt| evt.stop_propagation(),
                p { class: "survey-modal-body",
                    "Are you sure you want to submit the survey?"
                }
                div { class: "survey-modal-actions",
                    button {
                        class: "btn survey-modal-cancel",
                        r#type: "button",
                        onclick: move |_| on_decide.call(SubmitDecision::Declined),
                        "Cancel"
                    }
                    button {
                        class: "btn btn-primary survey-modal-confirm",
                        r#type: "button",
                        onclick: move |_| on_decide.call(SubmitDecision::Accepted),
                        "Submit"
                    }
                }
            }
        }
    }
}
