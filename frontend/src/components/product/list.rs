//! Product list page.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use web_sys::{AbortController, AbortSignal};

use catalog_shared::{ProductItem, product_thumb_url};

use crate::api::{CatalogApi, use_api};
use crate::components::modal_delete::ModalDelete;

async fn fetch_list(
    api: CatalogApi,
    abort: Option<AbortSignal>,
    set_list: WriteSignal<Vec<ProductItem>>,
    set_loading: WriteSignal<bool>,
) {
    match api.get_products(abort.as_ref()).await {
        Ok(data) => {
            set_list.try_set(data);
        }
        Err(e) => {
            leptos::logging::error!("failed to load products: {}", e);
        }
    }
    set_loading.try_set(false);
}

#[component]
pub fn ProductListPage() -> impl IntoView {
    let api = use_api();

    let (list, set_list) = signal(Vec::<ProductItem>::new());
    let (loading, set_loading) = signal(true);

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
                match api.delete_product(id).await {
                    Ok(()) => {
                        set_loading.try_set(true);
                        fetch_list(api, None, set_list, set_loading).await;
                    }
                    Err(e) => {
                        leptos::logging::error!("failed to delete product {}: {}", id, e);
                    }
                }
            });
        }
    };

    let is_empty = move || list.with(|l| l.is_empty());

    view! {
        <div class="space-y-6">
            <div class="flex items-center justify-between">
                <h1 class="text-3xl font-bold">"Products"</h1>
                <A href="create" attr:class="btn btn-primary">
                    "Create New Product"
                </A>
            </div>

            <div class="card bg-base-100 shadow-xl">
                <div class="card-body p-0 overflow-x-auto">
                    <table class="table table-zebra w-full">
                        <thead>
                            <tr>
                                <th>"Name"</th>
                                <th>"Description"</th>
                                <th>"Price"</th>
                                <th>"Photos"</th>
                                <th>"Actions"</th>
                            </tr>
                        </thead>
                        <tbody>
                            <Show when=move || loading.get() && is_empty()>
                                <tr>
                                    <td colspan="5" class="text-center py-8 text-base-content/50">
                                        <span class="loading loading-spinner loading-md"></span>
                                        " Loading..."
                                    </td>
                                </tr>
                            </Show>
                            <Show when=move || !loading.get() && is_empty()>
                                <tr>
                                    <td colspan="5" class="text-center py-8 text-base-content/50">
                                        "No products yet. Create one to get started."
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
                                        let thumbs = item
                                            .images
                                            .iter()
                                            .map(|image| product_thumb_url(&image.image))
                                            .collect::<Vec<_>>();
                                        view! {
                                            <tr>
                                                <td class="font-medium">{item.name.clone()}</td>
                                                <td>{item.description}</td>
                                                <td>{format!("{:.2}", item.price)}</td>
                                                <td>
                                                    <div class="flex flex-wrap gap-2">
                                                        {thumbs
                                                            .into_iter()
                                                            .map(|src| {
                                                                view! {
                                                                    <img
                                                                        class="w-16 rounded"
                                                                        src=src
                                                                        alt=item.name.clone()
                                                                    />
                                                                }
                                                            })
                                                            .collect_view()}
                                                    </div>
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
