//! Product create/edit form.
//!
//! The draft keeps file handles out of the render path: attachments live in a
//! non-reactive store keyed by a counter, while a parallel signal of object
//! URLs drives the preview grid. Removing a tile revokes its URL; unmount
//! revokes whatever is left.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::{use_navigate, use_params_map};
use web_sys::{AbortController, File, Url};

use catalog_shared::validation::{
    FormErrors, validate_description, validate_images, validate_name, validate_price,
};
use catalog_shared::{CategoryItem, product_thumb_url};

use crate::api::{ProductPayload, use_api};
use crate::components::fields::{InputGroup, SelectGroup, TextAreaGroup};

#[derive(Clone, Copy)]
struct ProductFormState {
    name: RwSignal<String>,
    description: RwSignal<String>,
    /// Raw price input; parsed at validation time.
    price: RwSignal<String>,
    category_id: RwSignal<i32>,
    /// Pending attachments, keyed so removal works by identity.
    files: StoredValue<Vec<(usize, File)>, LocalStorage>,
    /// Object URLs mirroring `files`, in insertion order.
    previews: RwSignal<Vec<(usize, String)>>,
    next_key: StoredValue<usize>,
    errors: RwSignal<FormErrors>,
}

impl ProductFormState {
    fn new() -> Self {
        Self {
            name: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            price: RwSignal::new(String::new()),
            category_id: RwSignal::new(0),
            files: StoredValue::new_local(Vec::new()),
            previews: RwSignal::new(Vec::new()),
            next_key: StoredValue::new(0),
            errors: RwSignal::new(FormErrors::new()),
        }
    }

    fn validate_field(&self, field: &str) {
        let result = match field {
            "name" => validate_name(&self.name.get_untracked()),
            "description" => validate_description(&self.description.get_untracked()),
            "price" => validate_price(&self.price.get_untracked()).map(|_| ()),
            _ => return,
        };
        self.errors.update(|errors| errors.set(field, result));
    }

    /// Full draft check; returns the submit payload when everything passes.
    fn validate(&self) -> Option<ProductPayload> {
        let mut errors = FormErrors::new();
        errors.set("name", validate_name(&self.name.get_untracked()));
        errors.set(
            "description",
            validate_description(&self.description.get_untracked()),
        );
        let price = validate_price(&self.price.get_untracked());
        errors.set("price", price.clone().map(|_| ()));

        let image_check = self.files.with_value(|files| {
            let types: Vec<String> = files.iter().map(|(_, f)| f.type_()).collect();
            validate_images(files.len(), types.iter().map(String::as_str))
        });
        errors.set("images", image_check);

        let ok = errors.is_empty();
        self.errors.set(errors);
        if !ok {
            return None;
        }

        Some(ProductPayload {
            name: self.name.get_untracked().trim().to_string(),
            description: self.description.get_untracked().trim().to_string(),
            price: price.unwrap_or_default(),
            category_id: self.category_id.get_untracked(),
            images: self
                .files
                .with_value(|files| files.iter().map(|(_, f)| f.clone()).collect()),
        })
    }

    /// Append a selected file; never replaces earlier attachments.
    fn attach(&self, file: File) {
        let key = self.next_key.get_value();
        self.next_key.set_value(key + 1);
        if let Ok(url) = Url::create_object_url_with_blob(&file) {
            self.previews.update(|previews| previews.push((key, url)));
        }
        self.files.update_value(|files| files.push((key, file)));
        self.errors.update(|errors| errors.set("images", Ok(())));
    }

    fn remove(&self, key: usize) {
        self.previews.update(|previews| {
            previews.retain(|(k, url)| {
                if *k == key {
                    Url::revoke_object_url(url).ok();
                    false
                } else {
                    true
                }
            });
        });
        self.files.update_value(|files| files.retain(|(k, _)| *k != key));
    }

    fn revoke_all(&self) {
        if let Some(previews) = self.previews.try_get_untracked() {
            for (_, url) in &previews {
                Url::revoke_object_url(url).ok();
            }
        }
    }

    fn field_error(&self, field: &'static str) -> Signal<Option<String>> {
        let errors = self.errors;
        Signal::derive(move || errors.with(|e| e.get(field)))
    }
}

#[component]
fn ProductForm(#[prop(optional)] id: Option<i32>) -> impl IntoView {
    let api = use_api();
    let navigate = use_navigate();

    let state = ProductFormState::new();
    let (categories, set_categories) = signal(Vec::<CategoryItem>::new());
    let (existing_images, set_existing_images) = signal(Vec::<String>::new());
    let (submitting, set_submitting) = signal(false);
    let (banner, set_banner) = signal(Option::<String>::None);

    let controller = AbortController::new().ok();
    let abort = controller.as_ref().map(|c| c.signal());

    // The select only offers fetched categories; default the reference to the
    // first one so a create submit always carries a valid id.
    {
        let api = api.clone();
        let abort = abort.clone();
        spawn_local(async move {
            match api.get_categories(abort.as_ref()).await {
                Ok(data) => {
                    if state.category_id.try_get_untracked() == Some(0) {
                        if let Some(first) = data.first() {
                            state.category_id.try_set(first.id);
                        }
                    }
                    set_categories.try_set(data);
                }
                Err(e) => {
                    leptos::logging::error!("failed to load categories: {}", e);
                    set_banner.try_set(Some("Failed to load categories".to_string()));
                }
            }
        });
    }

    if let Some(id) = id {
        let api = api.clone();
        spawn_local(async move {
            match api.get_product(id, abort.as_ref()).await {
                Ok(item) => {
                    state.name.try_set(item.name);
                    state.description.try_set(item.description);
                    state.price.try_set(item.price.to_string());
                    state.category_id.try_set(item.category_id);
                    set_existing_images.try_set(
                        item.images
                            .iter()
                            .map(|image| product_thumb_url(&image.image))
                            .collect(),
                    );
                }
                Err(e) => {
                    leptos::logging::error!("failed to load product {}: {}", id, e);
                    set_banner.try_set(Some("Failed to load product".to_string()));
                }
            }
        });
    }

    on_cleanup(move || {
        if let Some(controller) = controller {
            controller.abort();
        }
        state.revoke_all();
    });

    let on_file_change = move |ev: leptos::ev::Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&ev);
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            state.attach(file);
        }
        // Allow re-selecting the same file.
        input.set_value("");
    };

    let on_submit = {
        let api = api.clone();
        let navigate = navigate.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            let Some(payload) = state.validate() else {
                return;
            };
            set_submitting.set(true);
            set_banner.set(None);

            let api = api.clone();
            let navigate = navigate.clone();
            spawn_local(async move {
                let result = match id {
                    None => api.create_product(&payload).await,
                    Some(id) => api.update_product(id, &payload).await,
                };
                match result {
                    Ok(()) => navigate("/products", Default::default()),
                    Err(e) => {
                        leptos::logging::error!("failed to save product: {}", e);
                        set_banner.try_set(Some(
                            "Failed to save product. Please try again.".to_string(),
                        ));
                    }
                }
                set_submitting.try_set(false);
            });
        }
    };

    let heading = if id.is_some() { "Edit Product" } else { "Create Product" };
    let submit_label = if id.is_some() { "Save" } else { "Create" };
    let images_error = state.field_error("images");

    view! {
        <div class="max-w-2xl mx-auto">
            <h1 class="text-3xl font-bold mb-6">{heading}</h1>

            <div class="card bg-base-100 shadow-xl">
                <form class="card-body space-y-2" on:submit=on_submit>
                    <Show when=move || banner.get().is_some()>
                        <div role="alert" class="alert alert-error text-sm py-2">
                            <span>{move || banner.get().unwrap()}</span>
                        </div>
                    </Show>

                    <InputGroup
                        label="Name"
                        field="name"
                        value=state.name
                        error=state.field_error("name")
                        on_blur=Callback::new(move |_| state.validate_field("name"))
                    />
                    <InputGroup
                        label="Price"
                        field="price"
                        input_type="number"
                        placeholder="0.00"
                        value=state.price
                        error=state.field_error("price")
                        on_blur=Callback::new(move |_| state.validate_field("price"))
                    />
                    <SelectGroup
                        label="Category"
                        field="categoryId"
                        items=categories
                        selected=state.category_id
                    />
                    <TextAreaGroup
                        label="Description"
                        field="description"
                        placeholder="Describe the product..."
                        value=state.description
                        error=state.field_error("description")
                        on_blur=Callback::new(move |_| state.validate_field("description"))
                    />

                    <div class="form-control">
                        <label class="label" for="selectImage">
                            <span class="label-text">"Photos"</span>
                        </label>
                        <input
                            id="selectImage"
                            type="file"
                            accept="image/*"
                            class="file-input file-input-bordered w-full"
                            on:change=on_file_change
                        />
                        <Show when=move || images_error.get().is_some()>
                            <label class="label">
                                <span class="label-text-alt text-error">
                                    {move || images_error.get().unwrap()}
                                </span>
                            </label>
                        </Show>
                    </div>

                    <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                        <For
                            each=move || state.previews.get()
                            key=|(key, _)| *key
                            children=move |(key, url)| {
                                view! {
                                    <div class="relative">
                                        <img class="w-full h-28 object-cover rounded" src=url />
                                        <button
                                            type="button"
                                            class="btn btn-error btn-xs absolute top-1 right-1"
                                            on:click=move |_| state.remove(key)
                                        >
                                            "✕"
                                        </button>
                                    </div>
                                }
                            }
                        />
                    </div>

                    <Show when=move || id.is_some() && !existing_images.get().is_empty()>
                        <div>
                            <p class="text-sm text-base-content/70">
                                "Current photos (replaced on save):"
                            </p>
                            <div class="flex flex-wrap gap-2 mt-2">
                                {move || {
                                    existing_images
                                        .get()
                                        .into_iter()
                                        .map(|src| {
                                            view! { <img class="w-16 rounded" src=src /> }
                                        })
                                        .collect_view()
                                }}
                            </div>
                        </div>
                    </Show>

                    <div class="card-actions mt-4">
                        <button class="btn btn-primary" disabled=move || submitting.get()>
                            {move || {
                                if submitting.get() {
                                    view! {
                                        <span class="loading loading-spinner"></span>
                                        "Saving..."
                                    }
                                        .into_any()
                                } else {
                                    submit_label.into_any()
                                }
                            }}
                        </button>
                        <A href="/products" attr:class="btn btn-ghost">
                            "Cancel"
                        </A>
                    </div>
                </form>
            </div>
        </div>
    }
}

#[component]
pub fn ProductCreatePage() -> impl IntoView {
    view! { <ProductForm /> }
}

#[component]
pub fn ProductEditPage() -> impl IntoView {
    let params = use_params_map();
    let id = params.with_untracked(|p| p.get("id").and_then(|raw| raw.parse::<i32>().ok()));

    match id {
        Some(id) => view! { <ProductForm id=id /> }.into_any(),
        None => view! {
            <div class="text-center py-16 text-base-content/50">"Product not found"</div>
        }
        .into_any(),
    }
}
