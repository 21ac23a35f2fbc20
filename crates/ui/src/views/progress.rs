use dioxus::prelude::*;

use crate::context::AppContext;
use crate::vm::map_progress;

/// Overall progress bar with per-lesson and final exam status.
#[component]
pub fn ProgressDashboard() -> Element {
    let ctx = use_context::<AppContext>();
    let progress = ctx.progress();
    let snapshot = use_signal(|| progress.current());

    use_future(move || {
        let progress = progress.clone();
        let mut snapshot = snapshot;
        async move {
            let mut rx = progress.subscribe();
            loop {
                let latest = rx.borrow_and_update().clone();
                snapshot.set(latest);
                if rx.changed().await.is_err() {
                    break;
                }
            }
        }
    });

    let vm = map_progress(&snapshot.read());
    let final_class = if vm.final_passed {
        "final-status passed"
    } else {
        "final-status"
    };

    rsx! {
        section { class: "progress-dashboard",
            p { class: "progress-label", "{vm.label}" }
            div { class: "progress-track",
                div { class: "progress-bar", style: "width: {vm.bar_width}" }
            }
            ul { class: "lesson-status",
                for lesson in vm.lessons.iter() {
                    li {
                        key: "{lesson.id}",
                        class: if lesson.passed { "passed" } else { "pending" },
                        span { class: "lesson-title", "{lesson.title}" }
                        span { class: "lesson-state", "{lesson.status_label}" }
                    }
                }
            }
            p { class: "{final_class}", "{vm.final_status}" }
        }
    }
}
