use dioxus::prelude::*;

use crate::context::AppContext;
use crate::vm::footer_text;

#[component]
pub fn Footer() -> Element {
    let ctx = use_context::<AppContext>();
    let text = footer_text(ctx.clock().year());
    rsx! {
        footer { class: "site-footer", "{text}" }
    }
}
