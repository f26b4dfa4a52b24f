use dioxus::prelude::*;

use crate::vm::{InputVm, QuestionVm};

#[component]
pub fn QuestionScreen(
    question: QuestionVm,
    on_answer: EventHandler<String>,
    on_previous: EventHandler<()>,
    on_next: EventHandler<()>,
    on_submit: EventHandler<()>,
) -> Element {
    let heading = question.heading();

    rsx! {
        div { class: "survey-question",
            div { class: "survey-question-heading", "{heading}" }

            // Keyed by question so the control remounts with its stored value.
            div { key: "{question.id}", class: "survey-question-input",
                match question.input.clone() {
                    InputVm::Rating { min, max, value } => rsx! {
                        input {
                            class: "survey-rating",
                            r#type: "range",
                            min: "{min}",
                            max: "{max}",
                            value: "{value}",
                            disabled: question.locked,
                            oninput: move |evt| on_answer.call(evt.value()),
                        }
                        span { class: "survey-rating-value", "{value}" }
                    },
                    InputVm::Text { value } => rsx! {
                        textarea {
                            class: "survey-text",
                            value: "{value}",
                            disabled: question.locked,
                            oninput: move |evt| on_answer.call(evt.value()),
                        }
                    },
                }
            }

            div { class: "survey-nav",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    disabled: !question.can_go_back || question.locked,
                    onclick: move |_| on_previous.call(()),
                    "Previous"
                }
                if question.is_last {
                    button {
                        class: "btn btn-success",
                        r#type: "button",
                        disabled: question.locked,
                        onclick: move |_| on_submit.call(()),
                        if question.locked { "Submitting..." } else { "Submit" }
                    }
                } else {
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        disabled: question.locked,
                        onclick: move |_| on_next.call(()),
                        "Next"
                    }
                }
            }
        }
    }
}
