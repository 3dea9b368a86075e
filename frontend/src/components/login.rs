//! Login page: credential form, token decode, session publish, redirect.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;

use catalog_shared::validation::{FormErrors, validate_email, validate_password};

use crate::api::use_api;
use crate::auth::{login, use_auth};
use crate::components::fields::InputGroup;

#[component]
pub fn LoginPage() -> impl IntoView {
    let api = use_api();
    let auth_ctx = use_auth();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let errors = RwSignal::new(FormErrors::new());
    let (message, set_message) = signal(Option::<String>::None);
    let (is_submitting, set_is_submitting) = signal(false);

    let field_error = move |field: &'static str| {
        Signal::derive(move || errors.with(|e| e.get(field)))
    };

    let validate_field = move |field: &'static str| {
        let result = match field {
            "email" => validate_email(&email.get_untracked()),
            "password" => validate_password(&password.get_untracked()),
            _ => return,
        };
        errors.update(|e| e.set(field, result));
    };

    let on_submit = {
        let api = api.clone();
        let navigate = navigate.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();

            // An invalid draft never reaches the network.
            let mut checked = FormErrors::new();
            checked.set("email", validate_email(&email.get_untracked()));
            checked.set("password", validate_password(&password.get_untracked()));
            let ok = checked.is_empty();
            errors.set(checked);
            if !ok {
                return;
            }

            set_is_submitting.set(true);
            set_message.set(None);

            let api = api.clone();
            let navigate = navigate.clone();
            spawn_local(async move {
                match login(
                    &auth_ctx,
                    &api,
                    email.get_untracked().trim().to_string(),
                    password.get_untracked(),
                )
                .await
                {
                    Ok(()) => {
                        set_message.try_set(None);
                        navigate("/", Default::default());
                    }
                    // One fixed message regardless of the failure reason.
                    Err(_) => {
                        set_message.try_set(Some("Invalid email or password".to_string()));
                    }
                }
                set_is_submitting.try_set(false);
            });
        }
    };

    view! {
        <div class="hero py-16">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"Login"</h1>
                    <p class="text-base-content/70">"Sign in to manage the catalog"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || message.get().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || message.get().unwrap()}</span>
                            </div>
                        </Show>

                        <InputGroup
                            label="Email"
                            field="email"
                            input_type="email"
                            placeholder="admin@example.com"
                            value=email
                            error=field_error("email")
                            on_blur=Callback::new(move |_| validate_field("email"))
                        />
                        <InputGroup
                            label="Password"
                            field="password"
                            input_type="password"
                            placeholder="••••••••"
                            value=password
                            error=field_error("password")
                            on_blur=Callback::new(move |_| validate_field("password"))
                        />

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || {
                                    if is_submitting.get() {
                                        view! {
                                            <span class="loading loading-spinner"></span>
                                            "Signing in..."
                                        }
                                            .into_any()
                                    } else {
                                        "Login".into_any()
                                    }
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
