use dioxus::prelude::*;

use mentor_core::model::ProfileDraft;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{ProfileFormVm, map_profile_form, profile_error_message};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AuthMode {
    SignIn,
    SignUp,
}

/// Sign-in form when signed out, profile dashboard when signed in.
#[component]
pub fn AccountModal(signed_in: Signal<Option<String>>, on_close: EventHandler<()>) -> Element {
    rsx! {
        div { class: "modal-backdrop",
            div { class: "modal account-modal", role: "dialog",
                header { class: "modal-header",
                    h3 { "Account" }
                    button {
                        class: "btn btn-secondary",
                        r#type: "button",
                        onclick: move |_| on_close.call(()),
                        "Close"
                    }
                }
                match signed_in() {
                    Some(email) => rsx! {
                        AccountDashboard { email, signed_in }
                    },
                    None => rsx! {
                        AuthForm { signed_in }
                    },
                }
            }
        }
    }
}

#[component]
fn AuthForm(signed_in: Signal<Option<String>>) -> Element {
    let ctx = use_context::<AppContext>();
    let auth = ctx.auth();
    let enabled = auth.enabled();
    let mut mode = use_signal(|| AuthMode::SignIn);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let error = use_signal(|| None::<String>);
    let busy = use_signal(|| false);

    let submit = use_callback(move |()| {
        let auth = auth.clone();
        let mut signed_in = signed_in;
        let mut error = error;
        let mut busy = busy;
        let (email, password, mode) = (email(), password(), mode());
        spawn(async move {
            busy.set(true);
            let result = match mode {
                AuthMode::SignIn => auth.sign_in(&email, &password).await,
                AuthMode::SignUp => auth.sign_up(&email, &password).await,
            };
            busy.set(false);
            match result {
                Ok(session) => {
                    error.set(None);
                    signed_in.set(Some(session.email().to_string()));
                }
                Err(err) => error.set(Some(err.user_message())),
            }
        });
    });

    let (title, action, switch_label, other_mode) = match mode() {
        AuthMode::SignIn => ("Sign in", "Sign in", "Need an account? Sign up", AuthMode::SignUp),
        AuthMode::SignUp => (
            "Create account",
            "Sign up",
            "Have an account? Sign in",
            AuthMode::SignIn,
        ),
    };

    rsx! {
        form {
            class: "auth-form",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                submit.call(());
            },
            h4 { "{title}" }
            if !enabled {
                p { class: "auth-disabled", "Accounts are not available right now." }
            }
            label { "Email"
                input {
                    r#type: "email",
                    value: "{email}",
                    oninput: move |evt| email.set(evt.value()),
                }
            }
            label { "Password"
                input {
                    r#type: "password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
            }
            if let Some(message) = error() {
                p { class: "form-error", "{message}" }
            }
            button {
                class: "btn btn-primary",
                r#type: "submit",
                disabled: busy() || !enabled,
                "{action}"
            }
            button {
                class: "btn btn-link",
                r#type: "button",
                onclick: move |_| mode.set(other_mode),
                "{switch_label}"
            }
        }
    }
}

#[component]
fn AccountDashboard(email: String, signed_in: Signal<Option<String>>) -> Element {
    let ctx = use_context::<AppContext>();
    let profiles = ctx.profiles();
    let status = use_signal(|| None::<String>);

    let resource = {
        let email = email.clone();
        use_resource(move || {
            let profiles = profiles.clone();
            let email = email.clone();
            async move {
                let profile = profiles
                    .load(&email)
                    .await
                    .map_err(|_| ViewError::Storage)?;
                Ok::<_, ViewError>(map_profile_form(&profile))
            }
        })
    };

    let sign_out = {
        let auth = ctx.auth();
        use_callback(move |()| {
            let auth = auth.clone();
            let mut signed_in = signed_in;
            let mut status = status;
            spawn(async move {
                match auth.sign_out().await {
                    Ok(()) => signed_in.set(None),
                    Err(err) => status.set(Some(err.user_message())),
                }
            });
        })
    };

    let reset_progress = {
        let engine = ctx.engine();
        use_callback(move |()| {
            let engine = engine.clone();
            let mut status = status;
            spawn(async move {
                let message = match engine.lock().await.reset_progress().await {
                    Ok(()) => "Quiz progress reset.",
                    Err(_) => "Quiz progress could not be reset.",
                };
                status.set(Some(message.to_string()));
            });
        })
    };

    let state = view_state_from_resource(resource);

    rsx! {
        div { class: "account-dashboard",
            p { class: "account-email", "Signed in as {email}" }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
                ViewState::Ready(form) => rsx! {
                    ProfileForm { email: email.clone(), form }
                },
            }
            if let Some(message) = status() {
                p { class: "account-status", "{message}" }
            }
            div { class: "account-actions",
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| reset_progress.call(()),
                    "Reset quiz progress"
                }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| sign_out.call(()),
                    "Sign out"
                }
            }
        }
    }
}

#[component]
fn ProfileForm(email: String, form: ProfileFormVm) -> Element {
    let ctx = use_context::<AppContext>();
    let profiles = ctx.profiles();
    let mut draft = use_signal(|| form.draft.clone());
    let updated_label = use_signal(|| form.updated_label.clone());
    let message = use_signal(|| None::<(String, bool)>);

    let save = use_callback(move |()| {
        let profiles = profiles.clone();
        let email = email.clone();
        let values: ProfileDraft = draft();
        let mut draft = draft;
        let mut updated_label = updated_label;
        let mut message = message;
        spawn(async move {
            match profiles.save(&email, values).await {
                Ok(profile) => {
                    let saved = map_profile_form(&profile);
                    draft.set(saved.draft);
                    updated_label.set(saved.updated_label);
                    message.set(Some(("Profile saved.".to_string(), true)));
                }
                Err(err) => message.set(Some((profile_error_message(&err), false))),
            }
        });
    });

    let current = draft();

    rsx! {
        form {
            class: "profile-form",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                save.call(());
            },
            label { "Display name"
                input {
                    value: "{current.display_name}",
                    oninput: move |evt| draft.write().display_name = evt.value(),
                }
            }
            label { "Study goal"
                input {
                    value: "{current.study_goal}",
                    oninput: move |evt| draft.write().study_goal = evt.value(),
                }
            }
            label { "Weekly target hours"
                input {
                    r#type: "number",
                    min: "0",
                    max: "168",
                    step: "0.5",
                    value: "{current.weekly_target_hours}",
                    oninput: move |evt| draft.write().weekly_target_hours = evt.value(),
                }
            }
            label { "Physics 1 mastery (%)"
                input {
                    r#type: "number",
                    min: "0",
                    max: "100",
                    value: "{current.physics1_mastery}",
                    oninput: move |evt| draft.write().physics1_mastery = evt.value(),
                }
            }
            label { "Physics 2 mastery (%)"
                input {
                    r#type: "number",
                    min: "0",
                    max: "100",
                    value: "{current.physics2_mastery}",
                    oninput: move |evt| draft.write().physics2_mastery = evt.value(),
                }
            }
            label { "Current streak (days)"
                input {
                    r#type: "number",
                    min: "0",
                    value: "{current.current_streak}",
                    oninput: move |evt| draft.write().current_streak = evt.value(),
                }
            }
            label { "Notes"
                textarea {
                    value: "{current.notes}",
                    oninput: move |evt| draft.write().notes = evt.value(),
                }
            }
            p { class: "profile-updated", "{updated_label}" }
            if let Some((text, ok)) = message() {
                p { class: if ok { "form-status" } else { "form-error" }, "{text}" }
            }
            button { class: "btn btn-primary", r#type: "submit", "Save profile" }
        }
    }
}
