use dioxus::prelude::*;

use crate::vm::{QuizFeedbackVm, QuizVm};

#[component]
pub fn QuizModal(
    vm: QuizVm,
    feedback: Option<QuizFeedbackVm>,
    on_submit: EventHandler<String>,
    on_skip: EventHandler<()>,
    on_close: EventHandler<()>,
) -> Element {
    let mut answer = use_signal(String::new);

    rsx! {
        div { class: "modal-backdrop",
            div { class: "modal quiz-modal", role: "dialog",
                header { class: "modal-header",
                    h3 { "{vm.title}" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| on_close.call(()),
                        "Close"
                    }
                }
                p { class: "quiz-position", "{vm.position_label}" }
                if let Some(prompt) = vm.prompt.as_ref() {
                    p { class: "quiz-prompt", "{prompt}" }
                    form {
                        class: "quiz-form",
                        onsubmit: move |evt: FormEvent| {
                            evt.prevent_default();
                            on_submit.call(answer());
                            answer.set(String::new());
                        },
                        input {
                            class: "quiz-answer",
                            r#type: "text",
                            placeholder: "Type your answer",
                            value: "{answer}",
                            oninput: move |evt| answer.set(evt.value()),
                        }
                        button { class: "btn btn-primary", r#type: "submit", "Submit" }
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| on_skip.call(()),
                            "Skip"
                        }
                    }
                } else {
                    p { class: "quiz-finished", "Exam finished." }
                }
                if let Some(feedback) = feedback.as_ref() {
                    p { class: "{feedback.class()}", "{feedback.text}" }
                }
            }
        }
    }
}
