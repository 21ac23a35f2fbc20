use dioxus::prelude::*;

use mentor_core::model::{BankId, LessonId};

use crate::context::AppContext;
use crate::views::{ProgressDashboard, QuizModal};
use crate::vm::{QuizFeedbackVm, QuizVm, map_quiz};

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz = use_signal(|| None::<QuizVm>);
    let feedback = use_signal(|| None::<QuizFeedbackVm>);

    let launch = {
        let engine = ctx.engine();
        use_callback(move |bank: &'static str| {
            let engine = engine.clone();
            let mut quiz = quiz;
            let mut feedback = feedback;
            spawn(async move {
                let mut engine = engine.lock().await;
                if let Some(session) = engine.launch_quiz(bank) {
                    quiz.set(Some(map_quiz(session)));
                    feedback.set(None);
                }
            });
        })
    };

    let submit = {
        let engine = ctx.engine();
        use_callback(move |answer: String| {
            let engine = engine.clone();
            let mut quiz = quiz;
            let mut feedback = feedback;
            spawn(async move {
                let mut engine = engine.lock().await;
                let next = match engine.submit_answer(&answer).await {
                    Ok(outcome) => QuizFeedbackVm::from_outcome(&outcome),
                    Err(err) => QuizFeedbackVm::from_error(&err),
                };
                feedback.set(Some(next));
                quiz.set(engine.active().map(map_quiz));
            });
        })
    };

    let skip = {
        let engine = ctx.engine();
        use_callback(move |()| {
            let engine = engine.clone();
            let mut quiz = quiz;
            let mut feedback = feedback;
            spawn(async move {
                let mut engine = engine.lock().await;
                let next = match engine.skip().await {
                    Ok(outcome) => QuizFeedbackVm::from_outcome(&outcome),
                    Err(err) => QuizFeedbackVm::from_error(&err),
                };
                feedback.set(Some(next));
                quiz.set(engine.active().map(map_quiz));
            });
        })
    };

    let close = {
        let engine = ctx.engine();
        use_callback(move |()| {
            let engine = engine.clone();
            let mut quiz = quiz;
            let mut feedback = feedback;
            spawn(async move {
                engine.lock().await.close();
                quiz.set(None);
                feedback.set(None);
            });
        })
    };

    rsx! {
        div { class: "page home-page",
            header { class: "view-header",
                h2 { class: "view-title", "Your physics path" }
                p { class: "view-subtitle",
                    "Answer five in a row to pass a lesson. The final exam needs a perfect score."
                }
            }
            ProgressDashboard {}
            div { class: "view-divider" }
            section { class: "lesson-grid",
                for lesson in LessonId::ALL {
                    LessonCard { key: "{lesson}", lesson, on_start: launch }
                }
                article { class: "lesson-card final-card",
                    h3 { "Final exam" }
                    p { "One pass through every exam question." }
                    button {
                        class: "btn btn-primary",
                        r#type: "button",
                        onclick: move |_| launch.call(BankId::FINAL_EXAM),
                        "Take final exam"
                    }
                }
            }
            if let Some(vm) = quiz() {
                QuizModal {
                    vm,
                    feedback: feedback(),
                    on_submit: submit,
                    on_skip: skip,
                    on_close: close,
                }
            }
        }
    }
}

#[component]
fn LessonCard(lesson: LessonId, on_start: EventHandler<&'static str>) -> Element {
    rsx! {
        article { class: "lesson-card",
            h3 { "{lesson.title()}" }
            button {
                class: "btn btn-primary",
                r#type: "button",
                onclick: move |_| on_start.call(lesson.as_str()),
                "Start quiz"
            }
        }
    }
}
