use dioxus::prelude::*;

#[component]
pub fn DeleteConfirmDialog(
    profile_name: String,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "dialog-overlay",
            div { class: "delete-confirm-dialog",
                h3 { "Delete Profile" }
                p { "Remove \"{profile_name}\" from saved profiles? Every profile with this name is deleted." }
                div { class: "dialog-buttons",
                    button {
                        class: "secondary",
                        onclick: move |_| on_cancel.call(()),
                        "Keep"
                    }
                    button {
                        class: "primary danger",
                        onclick: move |_| on_confirm.call(()),
                        "Delete"
                    }
                }
            }
        }
    }
}
