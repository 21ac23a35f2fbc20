use dioxus::prelude::*;

use crate::vm::nav_label;

#[component]
pub fn NavButton(signed_in: Signal<Option<String>>, on_open: EventHandler<()>) -> Element {
    let label = nav_label(signed_in.read().as_deref());
    rsx! {
        button {
            class: "nav-account",
            r#type: "button",
            onclick: move |_| on_open.call(()),
            "{label}"
        }
    }
}
