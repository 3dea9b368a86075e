//! Category create/edit form.
//!
//! One form component backs both pages; edit seeds the draft from a one-shot
//! fetch by route id. The draft holds the pending image file plus its
//! object-URL preview, which is revoked on replacement and on unmount.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::{use_navigate, use_params_map};
use web_sys::{AbortController, File, Url};

use catalog_shared::validation::{
    FormErrors, is_accepted_image_type, validate_description, validate_images, validate_name,
};
use catalog_shared::asset_url;

use crate::api::{CategoryPayload, use_api};
use crate::components::fields::{InputGroup, TextAreaGroup};

/// Draft state of the category form. `Copy` via signal handles, so it can be
/// captured freely by event handlers.
#[derive(Clone, Copy)]
struct CategoryFormState {
    name: RwSignal<String>,
    description: RwSignal<String>,
    image: RwSignal<Option<File>, LocalStorage>,
    /// Object URL of the pending attachment.
    preview: RwSignal<Option<String>>,
    /// Server path of the already-stored image (edit only).
    current_image: RwSignal<Option<String>>,
    errors: RwSignal<FormErrors>,
}

impl CategoryFormState {
    fn new() -> Self {
        Self {
            name: RwSignal::new(String::new()),
            description: RwSignal::new(String::new()),
            image: RwSignal::new_local(None),
            preview: RwSignal::new(None),
            current_image: RwSignal::new(None),
            errors: RwSignal::new(FormErrors::new()),
        }
    }

    fn validate_field(&self, field: &str) {
        let result = match field {
            "name" => validate_name(&self.name.get_untracked()),
            "description" => validate_description(&self.description.get_untracked()),
            _ => return,
        };
        self.errors.update(|errors| errors.set(field, result));
    }

    /// Full draft check; a new attachment is mandatory only on create.
    fn validate(&self, require_image: bool) -> bool {
        let mut errors = FormErrors::new();
        errors.set("name", validate_name(&self.name.get_untracked()));
        errors.set(
            "description",
            validate_description(&self.description.get_untracked()),
        );
        let image_check = self.image.with_untracked(|image| match image {
            Some(file) => {
                let mime = file.type_();
                if is_accepted_image_type(&mime) {
                    Ok(())
                } else {
                    Err(format!("Unsupported image type: {}", mime))
                }
            }
            None if require_image => validate_images(0, std::iter::empty()),
            None => Ok(()),
        });
        errors.set("image", image_check);

        let ok = errors.is_empty();
        self.errors.set(errors);
        ok
    }

    fn attach(&self, file: File) {
        if let Some(old) = self.preview.get_untracked() {
            Url::revoke_object_url(&old).ok();
        }
        self.preview.set(Url::create_object_url_with_blob(&file).ok());
        self.image.set(Some(file));
    }

    fn to_payload(&self) -> CategoryPayload {
        CategoryPayload {
            name: self.name.get_untracked().trim().to_string(),
            description: self.description.get_untracked().trim().to_string(),
            image: self.image.get_untracked(),
        }
    }

    fn field_error(&self, field: &'static str) -> Signal<Option<String>> {
        let errors = self.errors;
        Signal::derive(move || errors.with(|e| e.get(field)))
    }
}

#[component]
fn CategoryForm(#[prop(optional)] id: Option<i32>) -> impl IntoView {
    let api = use_api();
    let navigate = use_navigate();

    let state = CategoryFormState::new();
    let (submitting, set_submitting) = signal(false);
    let (banner, set_banner) = signal(Option::<String>::None);

    // Seed the draft on edit; abort the fetch if the page unmounts first.
    let controller = AbortController::new().ok();
    if let Some(id) = id {
        let api = api.clone();
        let abort = controller.as_ref().map(|c| c.signal());
        spawn_local(async move {
            match api.get_category(id, abort.as_ref()).await {
                Ok(item) => {
                    state.name.try_set(item.name);
                    state.description.try_set(item.description);
                    state.current_image.try_set(Some(item.image));
                }
                Err(e) => {
                    leptos::logging::error!("failed to load category {}: {}", id, e);
                    set_banner.try_set(Some("Failed to load category".to_string()));
                }
            }
        });
    }

    on_cleanup(move || {
        if let Some(controller) = controller {
            controller.abort();
        }
        if let Some(Some(url)) = state.preview.try_get_untracked() {
            Url::revoke_object_url(&url).ok();
        }
    });

    let on_file_change = move |ev: leptos::ev::Event| {
        let input = event_target::<web_sys::HtmlInputElement>(&ev);
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            state.attach(file);
            state.errors.update(|errors| errors.set("image", Ok(())));
        }
        // Allow re-selecting the same file.
        input.set_value("");
    };

    let on_submit = {
        let api = api.clone();
        let navigate = navigate.clone();
        move |ev: leptos::web_sys::SubmitEvent| {
            ev.prevent_default();
            if !state.validate(id.is_none()) {
                return;
            }
            set_submitting.set(true);
            set_banner.set(None);

            let api = api.clone();
            let navigate = navigate.clone();
            let payload = state.to_payload();
            spawn_local(async move {
                let result = match id {
                    None => api.create_category(&payload).await,
                    Some(id) => api.update_category(id, &payload).await,
                };
                match result {
                    Ok(()) => navigate("/category", Default::default()),
                    Err(e) => {
                        leptos::logging::error!("failed to save category: {}", e);
                        set_banner.try_set(Some(
                            "Failed to save category. Please try again.".to_string(),
                        ));
                    }
                }
                set_submitting.try_set(false);
            });
        }
    };

    let heading = if id.is_some() { "Edit Category" } else { "Create Category" };
    let submit_label = if id.is_some() { "Save" } else { "Create" };
    let image_error = state.field_error("image");

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
                    <TextAreaGroup
                        label="Description"
                        field="description"
                        placeholder="Describe the category..."
                        value=state.description
                        error=state.field_error("description")
                        on_blur=Callback::new(move |_| state.validate_field("description"))
                    />

                    <div class="form-control">
                        <label class="label" for="image">
                            <span class="label-text">"Photo"</span>
                        </label>
                        <input
                            id="image"
                            type="file"
                            accept="image/*"
                            class="file-input file-input-bordered w-full"
                            on:change=on_file_change
                        />
                        <Show when=move || image_error.get().is_some()>
                            <label class="label">
                                <span class="label-text-alt text-error">
                                    {move || image_error.get().unwrap()}
                                </span>
                            </label>
                        </Show>
                    </div>

                    // Pending attachment preview, or the stored image on edit.
                    <Show when=move || state.preview.get().is_some()>
                        <img
                            class="w-40 rounded"
                            src=move || state.preview.get().unwrap_or_default()
                        />
                    </Show>
                    <Show when=move || {
                        state.preview.get().is_none() && state.current_image.get().is_some()
                    }>
                        <img
                            class="w-40 rounded"
                            src=move || {
                                asset_url(&state.current_image.get().unwrap_or_default())
                            }
                        />
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
                        <A href="/category" attr:class="btn btn-ghost">
                            "Cancel"
                        </A>
                    </div>
                </form>
            </div>
        </div>
    }
}

#[component]
pub fn CategoryCreatePage() -> impl IntoView {
    view! { <CategoryForm /> }
}

#[component]
pub fn CategoryEditPage() -> impl IntoView {
    let params = use_params_map();
    let id = params.with_untracked(|p| p.get("id").and_then(|raw| raw.parse::<i32>().ok()));

    match id {
        Some(id) => view! { <CategoryForm id=id /> }.into_any(),
        None => view! {
            <div class="text-center py-16 text-base-content/50">"Category not found"</div>
        }
        .into_any(),
    }
}
