use dioxus::prelude::*;

use mentor_core::practice::{check, practice_problems};

use crate::vm::{PracticeCardVm, PracticeFeedbackVm, map_practice_card, map_practice_feedback};

#[component]
pub fn PracticeView() -> Element {
    let cards = practice_problems()
        .iter()
        .map(map_practice_card)
        .collect::<Vec<_>>();

    rsx! {
        div { class: "page practice-page",
            header { class: "view-header",
                h2 { class: "view-title", "Practice" }
                p { class: "view-subtitle", "Work each problem and check your number." }
            }
            div { class: "view-divider" }
            div { class: "practice-grid",
                for card in cards {
                    PracticeCard { key: "{card.id}", card }
                }
            }
        }
    }
}

#[component]
fn PracticeCard(card: PracticeCardVm) -> Element {
    let mut answer = use_signal(String::new);
    let mut feedback = use_signal(|| None::<PracticeFeedbackVm>);
    let expected = card.expected;
    let unit = card.unit;

    rsx! {
        article { class: "practice-card", id: "practice-{card.id}",
            h3 { "{card.title}" }
            p { class: "practice-prompt", "{card.prompt}" }
            div { class: "practice-input",
                input {
                    r#type: "text",
                    inputmode: "decimal",
                    value: "{answer}",
                    oninput: move |evt| answer.set(evt.value()),
                }
                span { class: "practice-unit", "{unit}" }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| {
                        let result = check(&answer(), expected, unit);
                        feedback.set(Some(map_practice_feedback(&result)));
                    },
                    "Check"
                }
            }
            if let Some(feedback) = feedback() {
                p { class: "{feedback.class}", "{feedback.text}" }
            }
        }
    }
}
