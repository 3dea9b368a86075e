//! Catalog admin front-end.
//!
//! Context-driven layering:
//! - `api`: pre-configured HTTP client for the catalog REST backend
//! - `auth`: authenticated-session state, written only by the login flow
//! - `components`: UI layer (layout shell, field primitives, pages)

mod api;
mod auth;
mod components {
    pub mod category {
        pub mod form;
        pub mod list;
    }
    pub mod fields;
    pub mod layout;
    pub mod login;
    pub mod modal_delete;
    pub mod product {
        pub mod form;
        pub mod list;
    }
}

use leptos::prelude::*;
use leptos_router::components::{Outlet, ParentRoute, Route, Router, Routes};
use leptos_router::path;

use crate::api::CatalogApi;
use crate::auth::{AuthContext, init_auth};
use crate::components::category::form::{CategoryCreatePage, CategoryEditPage};
use crate::components::category::list::CategoryListPage;
use crate::components::layout::DefaultLayout;
use crate::components::login::LoginPage;
use crate::components::product::form::{ProductCreatePage, ProductEditPage};
use crate::components::product::list::ProductListPage;

fn not_found() -> AnyView {
    view! {
        <div class="flex items-center justify-center min-h-screen bg-base-200">
            <div class="text-center">
                <h1 class="text-6xl font-bold text-error">"404"</h1>
                <p class="text-xl mt-4">"Page not found"</p>
            </div>
        </div>
    }
    .into_any()
}

#[component]
pub fn App() -> impl IntoView {
    // One API client and one session container for the whole app.
    provide_context(CatalogApi::new());

    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // Rehydrate the session from a persisted token, if one is still valid.
    init_auth(&auth_ctx);

    view! {
        <Router>
            <Routes fallback=not_found>
                <ParentRoute path=path!("/") view=DefaultLayout>
                    <Route path=path!("") view=CategoryListPage />
                    <ParentRoute path=path!("category") view=|| view! { <Outlet /> }>
                        <Route path=path!("") view=CategoryListPage />
                        <Route path=path!("create") view=CategoryCreatePage />
                        <Route path=path!("edit/:id") view=CategoryEditPage />
                    </ParentRoute>
                    <ParentRoute path=path!("products") view=|| view! { <Outlet /> }>
                        <Route path=path!("") view=ProductListPage />
                        <Route path=path!("create") view=ProductCreatePage />
                        <Route path=path!("edit/:id") view=ProductEditPage />
                    </ParentRoute>
                    <Route path=path!("login") view=LoginPage />
                </ParentRoute>
            </Routes>
        </Router>
    }
}
