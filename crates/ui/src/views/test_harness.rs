use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use mentor_core::time::fixed_clock;
use services::AppServices;
use storage::Storage;

use crate::context::{AppContext, UiApp, build_app_context};
use crate::views::{AccountModal, Footer, HomeView, NavButton, PracticeView};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Practice,
    Chrome,
    Account,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    context: AppContext,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    use_context_provider(|| props.context.clone());
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    let signed_in = use_signal(|| None::<String>);
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Practice => rsx! { PracticeView {} },
        ViewKind::Chrome => rsx! {
            NavButton { signed_in, on_open: move |()| {} }
            Footer {}
        },
        ViewKind::Account => rsx! {
            AccountModal { signed_in, on_close: move |()| {} }
        },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
    pub context: AppContext,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Services over in-memory storage with accounts disabled and a fixed clock.
pub fn test_context(storage: &Storage) -> AppContext {
    let app: Arc<dyn UiApp> = Arc::new(AppServices::with_provider(
        storage.clone(),
        fixed_clock(),
        None,
    ));
    build_app_context(&app)
}

/// Build a harness over `storage`, loading stored quiz progress first.
pub async fn setup_view_harness_with_storage(view: ViewKind, storage: Storage) -> ViewHarness {
    let context = test_context(&storage);
    context.load_progress().await;

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            context: context.clone(),
            view,
        },
    );

    ViewHarness {
        dom,
        storage,
        context,
    }
}

pub async fn setup_view_harness(view: ViewKind) -> ViewHarness {
    setup_view_harness_with_storage(view, Storage::in_memory()).await
}
