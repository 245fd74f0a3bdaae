use crate::state::{AppState, ProfileForm};
use dioxus::prelude::*;

#[component]
pub fn ProfileEditor(
    state: Signal<AppState>,
    on_change: EventHandler<ProfileForm>,
    on_add: EventHandler<()>,
) -> Element {
    let form = state.read().form.clone();
    let disabled = state.read().is_busy();

    let name_form = form.clone();
    let preferred_form = form.clone();
    let alternate_form = form.clone();

    rsx! {
        div { class: "section",
            div { class: "section-title", "New Profile" }

            div { class: "form-group",
                label { r#for: "profile-name", "Name" }
                input {
                    r#type: "text",
                    id: "profile-name",
                    placeholder: "e.g., Cloudflare",
                    value: "{form.name}",
                    disabled: disabled,
                    oninput: move |evt| {
                        on_change.call(ProfileForm { name: evt.value(), ..name_form.clone() })
                    }
                }
            }

            div { class: "dns-inputs",
                div { class: "form-group",
                    label { r#for: "preferred-dns", "Preferred DNS Server" }
                    input {
                        r#type: "text",
                        id: "preferred-dns",
                        placeholder: "e.g., 1.1.1.1",
                        value: "{form.preferred}",
                        disabled: disabled,
                        oninput: move |evt| {
                            on_change.call(ProfileForm { preferred: evt.value(), ..preferred_form.clone() })
                        }
                    }
                }

                div { class: "form-group",
                    label { r#for: "alternate-dns", "Alternate DNS Server (Optional)" }
                    input {
                        r#type: "text",
                        id: "alternate-dns",
                        placeholder: "e.g., 1.0.0.1",
                        value: "{form.alternate}",
                        disabled: disabled,
                        oninput: move |evt| {
                            on_change.call(ProfileForm { alternate: evt.value(), ..alternate_form.clone() })
                        }
                    }
                }
            }

            div { class: "button-group",
                button {
                    class: "primary",
                    disabled: disabled,
                    onclick: move |_| on_add.call(()),
                    "Add Profile"
                }
            }
        }
    }
}
