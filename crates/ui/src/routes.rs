use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::context::AppContext;
use crate::views::{AccountModal, Footer, HomeView, NavButton, PracticeView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/practice", PracticeView)] Practice {},
}

#[component]
fn Layout() -> Element {
    let ctx = use_context::<AppContext>();
    let mut account_open = use_signal(|| false);
    let signed_in = use_signal(|| None::<String>);

    use_future(move || {
        let ctx = ctx.clone();
        let mut signed_in = signed_in;
        async move {
            ctx.load_progress().await;
            if let Ok(email) = ctx.auth().current_email().await {
                signed_in.set(email);
            }
        }
    });

    rsx! {
        div { class: "app",
            header { class: "topbar",
                h1 { "Physics Mentor" }
                nav {
                    Link { to: Route::Home {}, "Lessons" }
                    Link { to: Route::Practice {}, "Practice" }
                }
                NavButton { signed_in, on_open: move |()| account_open.set(true) }
            }
            main { class: "content",
                Outlet::<Route> {}
            }
            Footer {}
            if account_open() {
                AccountModal { signed_in, on_close: move |()| account_open.set(false) }
            }
        }
    }
}
