//! Form field primitives: labeled input, textarea, category select.
//!
//! Field state lives in the owning form as `RwSignal`s; these components only
//! render the control, push changes back, and show the field's error.

use leptos::prelude::*;

use catalog_shared::CategoryItem;

#[component]
pub fn InputGroup(
    #[prop(into)] label: String,
    /// Field name; doubles as the element id.
    #[prop(into)] field: String,
    #[prop(into, default = "text".to_string())] input_type: String,
    #[prop(into, optional)] placeholder: String,
    value: RwSignal<String>,
    #[prop(into)] error: Signal<Option<String>>,
    /// Invoked when the control loses focus, so forms can re-validate.
    #[prop(into, optional)] on_blur: Option<Callback<()>>,
) -> impl IntoView {
    let id = field.clone();
    view! {
        <div class="form-control w-full">
            <label class="label" for=id.clone()>
                <span class="label-text">{label}</span>
            </label>
            <input
                id=id
                name=field
                type=input_type
                placeholder=placeholder
                class=move || {
                    if error.get().is_some() {
                        "input input-bordered w-full input-error"
                    } else {
                        "input input-bordered w-full"
                    }
                }
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
                on:blur=move |_| {
                    if let Some(cb) = on_blur {
                        cb.run(());
                    }
                }
            />
            <Show when=move || error.get().is_some()>
                <label class="label">
                    <span class="label-text-alt text-error">{move || error.get().unwrap()}</span>
                </label>
            </Show>
        </div>
    }
}

#[component]
pub fn TextAreaGroup(
    #[prop(into)] label: String,
    #[prop(into)] field: String,
    #[prop(into, optional)] placeholder: String,
    value: RwSignal<String>,
    #[prop(into)] error: Signal<Option<String>>,
    #[prop(into, optional)] on_blur: Option<Callback<()>>,
) -> impl IntoView {
    let id = field.clone();
    view! {
        <div class="form-control w-full">
            <label class="label" for=id.clone()>
                <span class="label-text">{label}</span>
            </label>
            <textarea
                id=id
                name=field
                rows="4"
                placeholder=placeholder
                class=move || {
                    if error.get().is_some() {
                        "textarea textarea-bordered w-full textarea-error"
                    } else {
                        "textarea textarea-bordered w-full"
                    }
                }
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
                on:blur=move |_| {
                    if let Some(cb) = on_blur {
                        cb.run(());
                    }
                }
            >
                {value.get_untracked()}
            </textarea>
            <Show when=move || error.get().is_some()>
                <label class="label">
                    <span class="label-text-alt text-error">{move || error.get().unwrap()}</span>
                </label>
            </Show>
        </div>
    }
}

/// Select over the fetched category collection. Only ids present in `items`
/// are offered, which is the sole client-side referential check.
#[component]
pub fn SelectGroup(
    #[prop(into)] label: String,
    #[prop(into)] field: String,
    #[prop(into)] items: Signal<Vec<CategoryItem>>,
    selected: RwSignal<i32>,
) -> impl IntoView {
    let id = field.clone();
    view! {
        <div class="form-control w-full">
            <label class="label" for=id.clone()>
                <span class="label-text">{label}</span>
            </label>
            <select
                id=id
                name=field
                class="select select-bordered w-full"
                on:change=move |ev| {
                    if let Ok(value) = event_target_value(&ev).parse::<i32>() {
                        selected.set(value);
                    }
                }
            >
                <For
                    each=move || items.get()
                    key=|item| item.id
                    children=move |item| {
                        view! {
                            <option
                                value=item.id.to_string()
                                selected=move || selected.get() == item.id
                            >
                                {item.name}
                            </option>
                        }
                    }
                />
            </select>
        </div>
    }
}
