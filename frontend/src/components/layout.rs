//! Shared page frame: top navigation plus the routed outlet.

use leptos::prelude::*;
use leptos_router::components::{A, Outlet};
use leptos_router::hooks::use_navigate;

use crate::auth::{logout, use_auth};

#[component]
pub fn DefaultLayout() -> impl IntoView {
    let auth_ctx = use_auth();
    let auth_state = auth_ctx.state;
    let navigate = use_navigate();

    let on_logout = move |_| {
        logout(&auth_ctx);
        navigate("/login", Default::default());
    };

    let session_email =
        move || auth_state.with(|s| s.user.as_ref().map(|u| u.email.clone()));

    view! {
        <div class="min-h-screen bg-base-200">
            <div class="navbar bg-base-100 shadow-md px-4">
                <div class="flex-1 gap-2">
                    <A href="/" attr:class="btn btn-ghost text-xl">
                        "Catalog Admin"
                    </A>
                    <A href="/category" attr:class="btn btn-ghost btn-sm">
                        "Categories"
                    </A>
                    <A href="/products" attr:class="btn btn-ghost btn-sm">
                        "Products"
                    </A>
                </div>
                <div class="flex-none gap-2">
                    <Show
                        when=move || auth_state.with(|s| s.is_authenticated)
                        fallback=|| {
                            view! {
                                <A href="/login" attr:class="btn btn-primary btn-sm">
                                    "Login"
                                </A>
                            }
                        }
                    >
                        <span class="badge badge-neutral hidden md:inline-flex">
                            {session_email}
                        </span>
                        <button class="btn btn-outline btn-error btn-sm" on:click=on_logout.clone()>
                            "Logout"
                        </button>
                    </Show>
                </div>
            </div>
            <main class="max-w-7xl mx-auto p-4 md:p-8">
                <Outlet />
            </main>
        </div>
    }
}
