//! Category list page: fetch on mount, per-row edit/delete.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use web_sys::{AbortController, AbortSignal};

use catalog_shared::{CategoryItem, asset_url};

use crate::api::{CatalogApi, use_api};
use crate::components::modal_delete::ModalDelete;

async fn fetch_list(
    api: CatalogApi,
    abort: Option<AbortSignal>,
    set_list: WriteSignal<Vec<CategoryItem>>,
    set_loading: WriteSignal<bool>,
) {
    match api.get_categories(abort.as_ref()).await {
        Ok(data) => {
            set_list.try_set(data);
        }
        Err(e) => {
            leptos::logging::error!("failed to load categories: {}", e);
        }
    }
    set_loading.try_set(false);
}

#[component]
pub fn CategoryListPage() -> impl IntoView {
    let api = use_api();

    let (list, set_list) = signal(Vec::<CategoryItem>::new());
    let (loading, set_loading) = signal(true);

    // Initial load, aborted if the page is torn down while it is in flight.
    let controller = AbortController::new().ok();
    {
        let api = api.clone();
        let abort = controller.as_ref().map(|c| c.signal());
        spawn_local(fetch_list(api, abort, set_list, set_loading));
    }
    on_cleanup(move || {
        if let Some(controller) = controller {
            controller.abort();
        }
    });

    let handle_delete = {
        let api = api.clone();
        move |id: i32| {
            let api = api.clone();
            spawn_local(async move {
                match api.delete_category(id).await {
                    // Reload the whole collection; the stale list stays on failure.
                    Ok(()) => {
                        set_loading.try_set(true);
                        fetch_list(api, None, set_list, set_loading).await;
                    }
                    Err(e) => {
                        leptos::logging::error!("failed to delete category {}: {}", id, e);
                    }
                }
            });
        }
    };

    let is_empty = move || list.with(|l| l.is_empty());

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-3xl font-bold">"Categories"</h1>
                <A href="create" attr:class="btn btn-primary">
                    "Create New Category"
                </A>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0 overflow-x-auto">
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                <th>"Name"</th>
                                <th>"Description"</th>
                                <th>"Photo"</th>
                                <th>"Actions"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <Show when=move || loading.get() && is_empty()>
                                <tr>
                                    <td colspan="4" class="text-center py-8 text-base-content/50">
                                        <span class="loading loading-spinner loading-md"></span>
                                        " Loading..."
                                    </td>
                                </tr>
                            </Show>
                            <Show when=move || !loading.get() && is_empty()>
                                <tr>
                                    <td colspan="4" class="text-center py-8 text-base-content/50">
                                        "No categories yet. Create one to get started."
                                    </td>
                                </tr>
                            </Show>
                            <For
                                each=move || list.get()
                                key=|item| item.id
                                children={
                                    let handle_delete = handle_delete.clone();
                                    move |item| {
                                        let handle_delete = handle_delete.clone();
                                        view! {
                                            <tr>
                                                <td class="font-medium">{item.name.clone()}</td>
                                                <td>{item.description}</td>
                                                <td>
                                                    <img
                                                        class="w-24 rounded"
                                                        src=asset_url(&item.image)
                                                        alt=item.name.clone()
                                                    />
                                                </td>
                                                <td>
                                                    <div class="flex gap-2">
                                                        <A
                                                            href=format!("edit/{}", item.id)
                                                            attr:class="btn btn-outline btn-sm"
                                                        >
                                                            "Edit"
                                                        </A>
                                                        <ModalDelete
                                                            id=item.id
                                                            text=item.name
                                                            on_delete=Callback::new(move |id| {
                                                                handle_delete(id)
                                                            })
                                                        />
                                                    </div>
                                                </td>
                                            </tr>
                                        }
                                    }
                                }
                            />
                        </tbody>
                    </table>
                </div>
            </div>
        </div>
    }
}
