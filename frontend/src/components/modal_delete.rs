//! Delete-confirmation modal used by every list row.

use leptos::prelude::*;

#[component]
pub fn ModalDelete(
    /// Identifier handed back on confirmation.
    id: i32,
    /// Display name of the entity being deleted.
    #[prop(into)] text: String,
    #[prop(into)] on_delete: Callback<i32>,
) -> impl IntoView {
    let (open, set_open) = signal(false);
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if open.get() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    let confirm = move |_| {
        set_open.set(false);
        on_delete.run(id);
    };

    view! {
        <button class="btn btn-outline btn-error btn-sm" on:click=move |_| set_open.set(true)>
            "Delete"
        </button>
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| set_open.set(false)>
            <div class="modal-box">
                <h3 class="font-bold text-lg">"Confirm deletion"</h3>
                <p class="py-4">
                    "Are you sure you want to delete \"" {text} "\"? This cannot be undone."
                </p>
                <div class="modal-action">
                    <button class="btn" on:click=move |_| set_open.set(false)>
                        "Cancel"
                    </button>
                    <button class="btn btn-error" on:click=confirm>
                        "Delete"
                    </button>
                </div>
            </div>
        </dialog>
    }
}
