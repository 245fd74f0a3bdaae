use crate::state::AppState;
use dioxus::prelude::*;

#[component]
pub fn ProfileSelector(
    state: Signal<AppState>,
    on_profile_change: EventHandler<String>,
    on_delete: EventHandler<()>,
) -> Element {
    let (profiles, selected_name, disabled) = {
        let state = state.read();
        let profiles = state
            .switcher
            .list_profiles()
            .iter()
            .map(|p| (p.name.clone(), p.display_name()))
            .collect::<Vec<_>>();
        let selected_name = state.selected_profile.clone().unwrap_or_default();
        // Selection is fixed while a static profile is applied.
        let disabled = state.is_busy() || state.is_connected();
        (profiles, selected_name, disabled)
    };

    let has_profiles = !profiles.is_empty();

    rsx! {
        div { class: "section",
            div { class: "section-title", "Profile" }
            div { class: "profile-selector",
                select {
                    class: "profile-dropdown",
                    disabled: disabled,
                    value: "{selected_name}",
                    onchange: move |evt: Event<FormData>| {
                        on_profile_change.call(evt.value());
                    },
                    if !has_profiles {
                        option { value: "", disabled: true, selected: true, "(No profiles)" }
                    }
                    for (name, label) in profiles {
                        option {
                            value: "{name}",
                            selected: name == selected_name,
                            "{label}"
                        }
                    }
                }
                button {
                    class: "secondary danger delete-btn",
                    disabled: disabled || !has_profiles,
                    onclick: move |_| on_delete.call(()),
                    "Delete"
                }
            }
        }
    }
}
